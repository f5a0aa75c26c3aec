//! Connect-X game logic: the gravity board engine with its run scanners, and
//! a thin turn-taking session on top of it.

mod board;
mod player;
mod position;
mod scan;
mod session;
mod store;
mod token;

pub use board::{
    Board, SparseBoard, MAX_COLUMN, MAX_NUM_TO_WIN, MAX_ROW, MIN_COLUMN, MIN_NUM_TO_WIN, MIN_ROW,
};
pub use player::{Players, DEFAULT_TOKENS, MAX_PLAYERS, MIN_PLAYERS};
pub use position::{Axis, Position};
pub use session::{BoardSettings, GameStatus, MoveOutcome, Session};
pub use store::{CellStore, DenseStore, SparseStore};
pub use token::Token;
