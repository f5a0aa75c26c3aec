use std::fmt;

/// A cell coordinate. Row 0 is the bottom of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: usize,
    pub column: usize,
}

impl Position {
    pub const fn new(row: usize, column: usize) -> Self {
        Position { row, column }
    }

    /// Move one step by `(dr, dc)`, or `None` if that leaves a `rows` x `columns` grid.
    pub fn step(self, dr: isize, dc: isize, rows: usize, columns: usize) -> Option<Position> {
        let row = self.row.checked_add_signed(dr)?;
        let column = self.column.checked_add_signed(dc)?;
        (row < rows && column < columns).then_some(Position { row, column })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// One of the four lines a run can lie along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
    /// Bottom-left to top-right, "/".
    DiagonalUp,
    /// Top-left to bottom-right, "\".
    DiagonalDown,
}

impl Axis {
    pub const ALL: [Axis; 4] = [
        Axis::Horizontal,
        Axis::Vertical,
        Axis::DiagonalUp,
        Axis::DiagonalDown,
    ];

    /// Unit step `(row, column)` in the axis' forward direction. The backward
    /// direction is the negation.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Axis::Horizontal => (0, 1),
            Axis::Vertical => (1, 0),
            Axis::DiagonalUp => (1, 1),
            Axis::DiagonalDown => (-1, 1),
        }
    }
}
