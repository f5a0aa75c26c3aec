//! Run scanning over a board's cells.
//!
//! Everything here reads the board through `Board::cell` and position
//! arithmetic only, so it works for any cell store.

use super::store::CellStore;
use super::{Axis, Board, Position, Token};

/// Count cells holding `token` from `from` outward in direction `(dr, dc)`,
/// `from` included. Stops at the first other cell or the edge.
fn count_direction<S: CellStore>(
    board: &Board<S>,
    from: Position,
    token: Token,
    (dr, dc): (isize, isize),
) -> usize {
    let mut count = 0;
    let mut cursor = Some(from);
    while let Some(pos) = cursor {
        if board.cell(pos) != Some(token) {
            break;
        }
        count += 1;
        cursor = pos.step(dr, dc, board.rows(), board.columns());
    }
    count
}

/// Run length of `token` through `pos` along `axis`.
pub(super) fn run_length<S: CellStore>(board: &Board<S>, pos: Position, token: Token, axis: Axis) -> usize {
    let (dr, dc) = axis.delta();
    let forward = count_direction(board, pos, token, (dr, dc));
    if forward == 0 {
        return 0;
    }
    let backward = count_direction(board, pos, token, (-dr, -dc));
    // `pos` was counted by both scans
    forward + backward - 1
}

/// The first axis on which the run through `pos` reaches `num_to_win`.
pub(super) fn winning_axis<S: CellStore>(board: &Board<S>, pos: Position, token: Token) -> Option<Axis> {
    Axis::ALL
        .into_iter()
        .find(|&axis| run_length(board, pos, token, axis) >= board.num_to_win())
}

/// The cells of the run through `pos` along `axis`, from the backward end to
/// the forward end.
pub(super) fn run_cells<S: CellStore>(board: &Board<S>, pos: Position, token: Token, axis: Axis) -> Vec<Position> {
    let (dr, dc) = axis.delta();
    let backward = count_direction(board, pos, token, (-dr, -dc));
    let length = run_length(board, pos, token, axis);
    if length == 0 {
        return Vec::new();
    }

    let mut start = pos;
    for _ in 1..backward {
        match start.step(-dr, -dc, board.rows(), board.columns()) {
            Some(next) => start = next,
            None => break,
        }
    }

    let mut cells = Vec::with_capacity(length);
    let mut cursor = Some(start);
    while let Some(cell) = cursor {
        if cells.len() == length {
            break;
        }
        cells.push(cell);
        cursor = cell.step(dr, dc, board.rows(), board.columns());
    }
    cells
}

/// Lowest empty row of `column`, scanning up from row 0.
pub(super) fn first_empty_row<S: CellStore>(board: &Board<S>, column: usize) -> Option<usize> {
    (0..board.rows()).find(|&row| board.cell(Position::new(row, column)).is_none())
}

/// The highest occupied cell of `column`.
pub(super) fn top_occupied<S: CellStore>(board: &Board<S>, column: usize) -> Option<Position> {
    match first_empty_row(board, column) {
        Some(0) => None,
        Some(row) => Some(Position::new(row - 1, column)),
        None => Some(Position::new(board.rows() - 1, column)),
    }
}

pub(super) fn all_occupied<S: CellStore>(board: &Board<S>) -> bool {
    (0..board.columns()).all(|column| {
        (0..board.rows()).all(|row| board.cell(Position::new(row, column)).is_some())
    })
}
