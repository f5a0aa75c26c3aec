use std::fmt;

/// A player's symbol as stored on the board.
///
/// The board never sees player objects, only tokens. Empty cells are
/// represented as `None` wherever a cell value is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Token(char);

impl Token {
    pub const fn new(symbol: char) -> Self {
        Token(symbol)
    }

    pub fn symbol(self) -> char {
        self.0
    }
}

impl From<char> for Token {
    fn from(symbol: char) -> Self {
        Token(symbol)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
