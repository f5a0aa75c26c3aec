//! Front ends for playing a [`Session`](crate::game::Session): a terminal UI
//! and a line-oriented headless mode for pipes and scripts.

mod app;
mod game_view;
pub mod headless;

pub use app::App;

use crate::error::{BoardError, SessionError};
use crate::game::{GameStatus, MoveOutcome, Token};

pub(crate) fn turn_message(token: Token) -> String {
    format!("It is {token}'s turn")
}

/// Message shown after an accepted move; `next` is the player now to move.
pub(crate) fn outcome_message(outcome: &MoveOutcome, next: Token) -> String {
    match outcome.status {
        GameStatus::Won(token) => format!("Player {token} won!"),
        GameStatus::Drawn => "It is a draw!".to_string(),
        GameStatus::InProgress => turn_message(next),
    }
}

pub(crate) fn error_message(err: &SessionError) -> String {
    match err {
        SessionError::Board(BoardError::ColumnFull(column)) => format!("Column {column} is full!"),
        SessionError::Board(BoardError::InvalidColumn { columns, .. }) => {
            format!("Pick a column from 0 to {}", columns - 1)
        }
        SessionError::GameOver => "Game is over!".to_string(),
        other => other.to_string(),
    }
}
