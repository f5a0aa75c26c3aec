use std::fmt;

use tracing::{debug, instrument};

use super::scan;
use super::store::{CellStore, DenseStore, SparseStore};
use super::{Axis, Position, Token};
use crate::error::BoardError;

pub const MIN_ROW: usize = 3;
pub const MAX_ROW: usize = 100;
pub const MIN_COLUMN: usize = 3;
pub const MAX_COLUMN: usize = 100;
pub const MIN_NUM_TO_WIN: usize = 3;
pub const MAX_NUM_TO_WIN: usize = 25;

/// A gravity-fed Connect-X board.
///
/// Row 0 is the bottom; tokens settle into the lowest empty row of their
/// column. Every query is answered from single-cell reads, so the cell layout
/// is pluggable through `S`.
///
/// `num_to_win` should not exceed `max(rows, columns)`, otherwise no line can
/// ever win. The board accepts such a configuration and simply never reports a
/// win.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board<S: CellStore = DenseStore> {
    rows: usize,
    columns: usize,
    num_to_win: usize,
    store: S,
}

/// A board that only stores occupied cells.
pub type SparseBoard = Board<SparseStore>;

impl Board {
    /// Create an empty board backed by a dense grid.
    pub fn new(rows: usize, columns: usize, num_to_win: usize) -> Result<Self, BoardError> {
        Self::with_store(rows, columns, num_to_win)
    }
}

fn check_range(name: &'static str, value: usize, min: usize, max: usize) -> Result<(), BoardError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(BoardError::InvalidConfiguration {
            name,
            value,
            min,
            max,
        })
    }
}

impl<S: CellStore> Board<S> {
    /// Create an empty board with any cell store.
    #[instrument(level = "debug")]
    pub fn with_store(rows: usize, columns: usize, num_to_win: usize) -> Result<Self, BoardError> {
        check_range("rows", rows, MIN_ROW, MAX_ROW)?;
        check_range("columns", columns, MIN_COLUMN, MAX_COLUMN)?;
        check_range("num_to_win", num_to_win, MIN_NUM_TO_WIN, MAX_NUM_TO_WIN)?;

        Ok(Board {
            rows,
            columns,
            num_to_win,
            store: S::with_dimensions(rows, columns),
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn num_to_win(&self) -> usize {
        self.num_to_win
    }

    /// Read a cell. `pos` must be inside the board.
    pub(super) fn cell(&self, pos: Position) -> Option<Token> {
        self.store.get(pos)
    }

    fn check_position(&self, pos: Position) -> Result<(), BoardError> {
        if pos.row < self.rows && pos.column < self.columns {
            Ok(())
        } else {
            Err(BoardError::OutOfBounds {
                row: pos.row,
                column: pos.column,
                rows: self.rows,
                columns: self.columns,
            })
        }
    }

    fn check_column(&self, column: usize) -> Result<(), BoardError> {
        if column < self.columns {
            Ok(())
        } else {
            Err(BoardError::InvalidColumn {
                column,
                columns: self.columns,
            })
        }
    }

    /// The token at `pos`, or `None` for an empty cell.
    pub fn token_at(&self, pos: Position) -> Result<Option<Token>, BoardError> {
        self.check_position(pos)?;
        Ok(self.cell(pos))
    }

    /// Whether `token` occupies `pos`.
    pub fn is_player_at(&self, pos: Position, token: Token) -> Result<bool, BoardError> {
        Ok(self.token_at(pos)? == Some(token))
    }

    /// Whether `column` can still accept a token.
    pub fn is_column_playable(&self, column: usize) -> Result<bool, BoardError> {
        Ok(self.lowest_empty_row(column)?.is_some())
    }

    /// The row the next token dropped into `column` would land on.
    pub fn lowest_empty_row(&self, column: usize) -> Result<Option<usize>, BoardError> {
        self.check_column(column)?;
        Ok(scan::first_empty_row(self, column))
    }

    /// Drop `token` into `column` and return where it landed.
    ///
    /// Fails with [`BoardError::ColumnFull`] without touching the board when
    /// the column has no empty cell.
    #[instrument(level = "debug", skip(self))]
    pub fn place_token(&mut self, token: Token, column: usize) -> Result<Position, BoardError> {
        let row = self
            .lowest_empty_row(column)?
            .ok_or(BoardError::ColumnFull(column))?;

        let pos = Position::new(row, column);
        self.store.set(pos, token);
        debug!(%token, %pos, "token placed");
        Ok(pos)
    }

    /// Whether every cell is occupied. Says nothing about wins; check for a
    /// win first.
    pub fn is_board_full(&self) -> bool {
        scan::all_occupied(self)
    }

    /// Whether a run of at least `num_to_win` copies of `token` passes
    /// through `pos` along any axis.
    ///
    /// Pass the position returned by [`place_token`](Self::place_token)
    /// together with the token that was placed.
    pub fn has_winning_line_through(&self, pos: Position, token: Token) -> Result<bool, BoardError> {
        self.check_position(pos)?;
        Ok(scan::winning_axis(self, pos, token).is_some())
    }

    /// Length of the run of `token` through `pos` along `axis`, counting
    /// `pos` once. Zero when `pos` does not hold `token`.
    pub fn run_length(&self, pos: Position, token: Token, axis: Axis) -> Result<usize, BoardError> {
        self.check_position(pos)?;
        Ok(scan::run_length(self, pos, token, axis))
    }

    /// The cells of a winning run through `pos`, end to end, if there is one.
    pub fn winning_line(&self, pos: Position, token: Token) -> Result<Option<Vec<Position>>, BoardError> {
        self.check_position(pos)?;
        Ok(scan::winning_axis(self, pos, token).map(|axis| scan::run_cells(self, pos, token, axis)))
    }

    /// Whether the token most recently dropped into `column` completed a
    /// winning line. By gravity that token is the topmost one in the column.
    pub fn winner_at(&self, column: usize) -> Result<bool, BoardError> {
        self.check_column(column)?;
        match scan::top_occupied(self, column) {
            Some(pos) => match self.cell(pos) {
                Some(token) => self.has_winning_line_through(pos, token),
                None => Ok(false),
            },
            None => Ok(false),
        }
    }

    /// Empty every cell, keeping dimensions and `num_to_win`.
    pub fn clear(&mut self) {
        self.store.clear();
    }
}

impl<S: CellStore> fmt::Display for Board<S> {
    /// Column indices on top, then rows from the top of the board down.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = (self.columns - 1).to_string().len();

        for column in 0..self.columns {
            write!(f, "|{:>width$}", column)?;
        }
        writeln!(f, "|")?;

        for row in (0..self.rows).rev() {
            for column in 0..self.columns {
                let symbol = self
                    .cell(Position::new(row, column))
                    .map_or(' ', Token::symbol);
                write!(f, "|{:>width$}", symbol)?;
            }
            writeln!(f, "|")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const X: Token = Token::new('X');
    const O: Token = Token::new('O');

    fn snapshot<S: CellStore>(board: &Board<S>) -> Vec<Option<Token>> {
        let mut cells = Vec::new();
        for row in 0..board.rows() {
            for column in 0..board.columns() {
                cells.push(board.token_at(Position::new(row, column)).unwrap());
            }
        }
        cells
    }

    /// Builds the "/" diagonal (0,0),(1,1),(2,2) using `filler` underneath.
    fn rising_diagonal<S: CellStore>(board: &mut Board<S>, token: Token, filler: Token) -> Position {
        board.place_token(token, 0).unwrap();
        board.place_token(filler, 1).unwrap();
        board.place_token(token, 1).unwrap();
        board.place_token(filler, 2).unwrap();
        board.place_token(filler, 2).unwrap();
        board.place_token(token, 2).unwrap()
    }

    /// Fills a board with a column pattern that never lines up three in a row.
    fn fill_without_win<S: CellStore>(board: &mut Board<S>) {
        let cols = board.columns();
        let rows = board.rows();
        for column in 0..cols {
            for row in 0..rows {
                // Column pairs alternate every row; no axis sees more than two in a row.
                let flip = (row + column / 2) % 2 == 0;
                let token = if flip { X } else { O };
                let pos = board.place_token(token, column).unwrap();
                assert_eq!(pos, Position::new(row, column));
            }
        }
    }

    fn scenario_a<S: CellStore>() {
        let mut board = Board::<S>::with_store(6, 7, 4).unwrap();
        let mut last = None;
        for column in 0..4 {
            let pos = board.place_token(X, column).unwrap();
            assert_eq!(pos.row, 0);
            last = Some(pos);
        }
        assert_eq!(last, Some(Position::new(0, 3)));
        assert!(board.has_winning_line_through(Position::new(0, 3), X).unwrap());
        assert_eq!(board.run_length(Position::new(0, 3), X, Axis::Horizontal).unwrap(), 4);
    }

    fn scenario_b<S: CellStore>() {
        let mut board = Board::<S>::with_store(3, 3, 3).unwrap();
        let first = board.place_token(O, 0).unwrap();
        assert!(!board.has_winning_line_through(first, O).unwrap());
        let second = board.place_token(O, 0).unwrap();
        assert!(!board.has_winning_line_through(second, O).unwrap());
        let third = board.place_token(O, 0).unwrap();
        assert_eq!(third, Position::new(2, 0));
        assert!(board.has_winning_line_through(third, O).unwrap());
        assert!(board.winner_at(0).unwrap());
    }

    fn scenario_c<S: CellStore>() {
        let mut board = Board::<S>::with_store(5, 5, 3).unwrap();
        let last = rising_diagonal(&mut board, X, O);
        assert_eq!(last, Position::new(2, 2));
        assert!(board.has_winning_line_through(last, X).unwrap());
        assert_eq!(board.run_length(last, X, Axis::DiagonalUp).unwrap(), 3);
        assert!(board.has_winning_line_through(Position::new(0, 0), X).unwrap());
    }

    fn scenario_d<S: CellStore>() {
        let mut board = Board::<S>::with_store(6, 7, 3).unwrap();
        fill_without_win(&mut board);
        assert!(board.is_board_full());
        for row in 0..board.rows() {
            for column in 0..board.columns() {
                let pos = Position::new(row, column);
                let token = board.token_at(pos).unwrap().unwrap();
                assert!(!board.has_winning_line_through(pos, token).unwrap(), "{pos} wins");
            }
        }
    }

    fn scenario_e<S: CellStore>() {
        let mut board = Board::<S>::with_store(3, 3, 3).unwrap();
        for token in [X, O, X] {
            board.place_token(token, 1).unwrap();
        }
        board.place_token(O, 2).unwrap();
        let before = snapshot(&board);

        assert_eq!(board.place_token(O, 1), Err(BoardError::ColumnFull(1)));
        assert_eq!(snapshot(&board), before);
        assert!(!board.is_column_playable(1).unwrap());
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new(6, 7, 4).unwrap();
        assert!(snapshot(&board).iter().all(Option::is_none));
        assert!(!board.is_board_full());
        for column in 0..7 {
            assert!(board.is_column_playable(column).unwrap());
        }
    }

    #[test]
    fn test_construction_bounds() {
        assert!(Board::new(MIN_ROW, MIN_COLUMN, MIN_NUM_TO_WIN).is_ok());
        assert!(Board::new(MAX_ROW, MAX_COLUMN, MAX_NUM_TO_WIN).is_ok());

        assert!(matches!(
            Board::new(2, 7, 4),
            Err(BoardError::InvalidConfiguration { name: "rows", value: 2, .. })
        ));
        assert!(matches!(
            Board::new(6, 101, 4),
            Err(BoardError::InvalidConfiguration { name: "columns", value: 101, .. })
        ));
        assert!(matches!(
            Board::new(6, 7, 26),
            Err(BoardError::InvalidConfiguration { name: "num_to_win", .. })
        ));
        assert!(matches!(
            Board::new(6, 7, 2),
            Err(BoardError::InvalidConfiguration { name: "num_to_win", .. })
        ));
    }

    #[test]
    fn test_unreachable_num_to_win_never_wins() {
        let mut board = Board::new(3, 3, 5).unwrap();
        let mut last = Position::new(0, 0);
        for _ in 0..3 {
            last = board.place_token(X, 0).unwrap();
        }
        assert!(!board.has_winning_line_through(last, X).unwrap());
    }

    #[test]
    fn test_place_token_gravity() {
        let mut board = Board::new(6, 7, 4).unwrap();

        let pos = board.place_token(X, 3).unwrap();
        assert_eq!(pos, Position::new(0, 3));
        assert_eq!(board.token_at(pos).unwrap(), Some(X));

        let pos = board.place_token(O, 3).unwrap();
        assert_eq!(pos, Position::new(1, 3));
        assert_eq!(board.lowest_empty_row(3).unwrap(), Some(2));
    }

    #[test]
    fn test_invalid_column() {
        let mut board = Board::new(6, 7, 4).unwrap();
        let expected = BoardError::InvalidColumn { column: 7, columns: 7 };
        assert_eq!(board.place_token(X, 7), Err(expected.clone()));
        assert_eq!(board.is_column_playable(7), Err(expected.clone()));
        assert_eq!(board.winner_at(7), Err(expected));
    }

    #[test]
    fn test_out_of_bounds_position() {
        let board = Board::new(6, 7, 4).unwrap();
        let outside = Position::new(6, 0);
        let expected = BoardError::OutOfBounds {
            row: 6,
            column: 0,
            rows: 6,
            columns: 7,
        };
        assert_eq!(board.token_at(outside), Err(expected.clone()));
        assert_eq!(board.has_winning_line_through(outside, X), Err(expected.clone()));
        assert_eq!(board.is_player_at(outside, X), Err(expected));
    }

    #[test]
    fn test_is_player_at() {
        let mut board = Board::new(3, 3, 3).unwrap();
        let pos = board.place_token(X, 2).unwrap();
        assert!(board.is_player_at(pos, X).unwrap());
        assert!(!board.is_player_at(pos, O).unwrap());
        assert!(!board.is_player_at(Position::new(1, 2), X).unwrap());
    }

    #[test]
    fn test_horizontal_win_dense() {
        scenario_a::<DenseStore>();
    }

    #[test]
    fn test_horizontal_win_sparse() {
        scenario_a::<SparseStore>();
    }

    #[test]
    fn test_vertical_win_dense() {
        scenario_b::<DenseStore>();
    }

    #[test]
    fn test_vertical_win_sparse() {
        scenario_b::<SparseStore>();
    }

    #[test]
    fn test_diagonal_up_win_dense() {
        scenario_c::<DenseStore>();
    }

    #[test]
    fn test_diagonal_up_win_sparse() {
        scenario_c::<SparseStore>();
    }

    #[test]
    fn test_full_board_without_win_dense() {
        scenario_d::<DenseStore>();
    }

    #[test]
    fn test_full_board_without_win_sparse() {
        scenario_d::<SparseStore>();
    }

    #[test]
    fn test_full_column_rejected_dense() {
        scenario_e::<DenseStore>();
    }

    #[test]
    fn test_full_column_rejected_sparse() {
        scenario_e::<SparseStore>();
    }

    #[test]
    fn test_diagonal_down_win() {
        let mut board = Board::new(6, 7, 4).unwrap();
        // "\" through (3,0),(2,1),(1,2),(0,3)
        board.place_token(X, 3).unwrap();

        board.place_token(O, 2).unwrap();
        board.place_token(X, 2).unwrap();

        board.place_token(O, 1).unwrap();
        board.place_token(O, 1).unwrap();
        board.place_token(X, 1).unwrap();

        board.place_token(O, 0).unwrap();
        board.place_token(O, 0).unwrap();
        board.place_token(O, 0).unwrap();
        let pos = board.place_token(X, 0).unwrap();

        assert_eq!(pos, Position::new(3, 0));
        assert!(board.has_winning_line_through(pos, X).unwrap());
        assert_eq!(board.run_length(pos, X, Axis::DiagonalDown).unwrap(), 4);
    }

    #[test]
    fn test_win_from_middle_of_run() {
        let mut board = Board::new(6, 7, 4).unwrap();
        for column in [0, 1, 3] {
            board.place_token(X, column).unwrap();
        }
        let pos = board.place_token(X, 2).unwrap();
        assert!(board.has_winning_line_through(pos, X).unwrap());
    }

    #[test]
    fn test_no_win_with_three() {
        let mut board = Board::new(6, 7, 4).unwrap();
        for column in 0..3 {
            board.place_token(X, column).unwrap();
        }
        assert!(!board.has_winning_line_through(Position::new(0, 1), X).unwrap());
        assert!(!board.winner_at(2).unwrap());
    }

    #[test]
    fn test_run_blocked_by_other_token() {
        let mut board = Board::new(6, 7, 4).unwrap();
        for (column, token) in [(0, X), (1, X), (2, O), (3, X), (4, X)] {
            board.place_token(token, column).unwrap();
        }
        assert!(!board.has_winning_line_through(Position::new(0, 1), X).unwrap());
        assert_eq!(board.run_length(Position::new(0, 3), X, Axis::Horizontal).unwrap(), 2);
    }

    #[test]
    fn test_query_with_other_token_is_false() {
        let mut board = Board::new(3, 3, 3).unwrap();
        let mut last = Position::new(0, 0);
        for column in 0..3 {
            last = board.place_token(X, column).unwrap();
        }
        assert!(board.has_winning_line_through(last, X).unwrap());
        assert!(!board.has_winning_line_through(last, O).unwrap());
        assert_eq!(board.run_length(last, O, Axis::Horizontal).unwrap(), 0);
    }

    #[test]
    fn test_winning_line_cells() {
        let mut board = Board::new(6, 7, 4).unwrap();
        for column in 2..6 {
            board.place_token(O, column).unwrap();
        }
        let line = board.winning_line(Position::new(0, 4), O).unwrap().unwrap();
        let expected: Vec<_> = (2..6).map(|c| Position::new(0, c)).collect();
        assert_eq!(line, expected);

        assert_eq!(board.winning_line(Position::new(1, 4), O).unwrap(), None);
    }

    #[test]
    fn test_winner_at_uses_top_of_column() {
        let mut board = Board::new(3, 3, 3).unwrap();
        assert!(!board.winner_at(0).unwrap());

        board.place_token(X, 0).unwrap();
        board.place_token(X, 1).unwrap();
        board.place_token(X, 2).unwrap();
        assert!(board.winner_at(2).unwrap());

        // The top of column 2 is now O, which does not win.
        board.place_token(O, 2).unwrap();
        assert!(!board.winner_at(2).unwrap());
    }

    #[test]
    fn test_winner_at_full_column() {
        let mut board = Board::new(3, 3, 3).unwrap();
        for _ in 0..3 {
            board.place_token(O, 1).unwrap();
        }
        assert!(!board.is_column_playable(1).unwrap());
        assert!(board.winner_at(1).unwrap());
    }

    #[test]
    fn test_sparse_boards_equal_regardless_of_move_order() {
        let mut a = SparseBoard::with_store(3, 3, 3).unwrap();
        a.place_token(X, 0).unwrap();
        a.place_token(X, 1).unwrap();

        let mut b = SparseBoard::with_store(3, 3, 3).unwrap();
        b.place_token(X, 1).unwrap();
        b.place_token(X, 0).unwrap();

        assert_eq!(snapshot(&a), snapshot(&b));
        assert_eq!(a, b);
    }

    #[test]
    fn test_clear() {
        let mut board = Board::new(3, 3, 3).unwrap();
        for column in 0..3 {
            board.place_token(X, column).unwrap();
        }
        board.clear();
        assert_eq!(board, Board::new(3, 3, 3).unwrap());
    }

    #[test]
    fn test_display() {
        let mut board = Board::new(3, 3, 3).unwrap();
        board.place_token(X, 0).unwrap();
        board.place_token(O, 0).unwrap();
        board.place_token(X, 2).unwrap();
        assert_eq!(board.to_string(), "|0|1|2|\n| | | |\n|O| | |\n|X| |X|\n");
    }

    #[test]
    fn test_display_pads_wide_boards() {
        let mut board = Board::new(3, 11, 3).unwrap();
        board.place_token(X, 10).unwrap();
        let text = board.to_string();
        let lines: Vec<_> = text.lines().collect();
        assert!(lines[0].starts_with("| 0| 1|"));
        assert!(lines[0].ends_with("|10|"));
        assert!(lines[3].ends_with("| X|"));
        assert!(lines.iter().all(|l| l.len() == lines[0].len()));
    }
}
