use super::Token;
use crate::error::SessionError;

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 10;

/// Tokens handed out to players in seat order when none are configured.
pub const DEFAULT_TOKENS: [Token; MAX_PLAYERS] = [
    Token::new('X'),
    Token::new('O'),
    Token::new('A'),
    Token::new('M'),
    Token::new('K'),
    Token::new('T'),
    Token::new('N'),
    Token::new('Q'),
    Token::new('E'),
    Token::new('F'),
];

/// Seats around the table, taking turns in fixed round-robin order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Players {
    tokens: Vec<Token>,
    current: usize,
}

impl Players {
    /// The first `count` tokens of [`DEFAULT_TOKENS`].
    pub fn new(count: usize) -> Result<Self, SessionError> {
        check_count(count)?;
        Self::with_tokens(DEFAULT_TOKENS[..count].to_vec())
    }

    /// Explicit tokens, one per player, in turn order.
    pub fn with_tokens(tokens: Vec<Token>) -> Result<Self, SessionError> {
        check_count(tokens.len())?;
        for (i, token) in tokens.iter().enumerate() {
            if tokens[..i].contains(token) {
                return Err(SessionError::DuplicateToken(*token));
            }
        }
        Ok(Players { tokens, current: 0 })
    }

    /// Token of the player whose turn it is.
    pub fn current(&self) -> Token {
        self.tokens[self.current]
    }

    /// Pass the turn to the next seat.
    pub fn advance(&mut self) {
        self.current = (self.current + 1) % self.tokens.len();
    }

    pub fn count(&self) -> usize {
        self.tokens.len()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Back to the first seat.
    pub fn reset(&mut self) {
        self.current = 0;
    }
}

fn check_count(count: usize) -> Result<(), SessionError> {
    if (MIN_PLAYERS..=MAX_PLAYERS).contains(&count) {
        Ok(())
    } else {
        Err(SessionError::InvalidPlayerCount {
            count,
            min: MIN_PLAYERS,
            max: MAX_PLAYERS,
        })
    }
}
