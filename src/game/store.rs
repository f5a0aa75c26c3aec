//! Cell storage behind a [`Board`](super::Board).
//!
//! The board only reads and writes single cells, so any layout that can
//! answer "what is at this position" is a valid store. Callers guarantee every
//! position passed in lies inside the dimensions the store was built with.

use std::collections::HashMap;

use super::{Position, Token};

pub trait CellStore {
    fn with_dimensions(rows: usize, columns: usize) -> Self
    where
        Self: Sized;

    fn get(&self, pos: Position) -> Option<Token>;

    fn set(&mut self, pos: Position, token: Token);

    /// Empty every cell without changing dimensions.
    fn clear(&mut self);
}

/// Row-major grid of cells, one slot per position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DenseStore {
    columns: usize,
    cells: Vec<Option<Token>>,
}

impl CellStore for DenseStore {
    fn with_dimensions(rows: usize, columns: usize) -> Self {
        DenseStore {
            columns,
            cells: vec![None; rows * columns],
        }
    }

    fn get(&self, pos: Position) -> Option<Token> {
        self.cells[pos.row * self.columns + pos.column]
    }

    fn set(&mut self, pos: Position, token: Token) {
        self.cells[pos.row * self.columns + pos.column] = Some(token);
    }

    fn clear(&mut self) {
        self.cells.fill(None);
    }
}

/// Occupied cells keyed by position. Empty cells cost nothing, which suits
/// large boards that stay mostly empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SparseStore {
    occupied: HashMap<Position, Token>,
}

impl CellStore for SparseStore {
    fn with_dimensions(_rows: usize, _columns: usize) -> Self {
        SparseStore::default()
    }

    fn get(&self, pos: Position) -> Option<Token> {
        self.occupied.get(&pos).copied()
    }

    fn set(&mut self, pos: Position, token: Token) {
        self.occupied.insert(pos, token);
    }

    fn clear(&mut self) {
        self.occupied.clear();
    }
}
