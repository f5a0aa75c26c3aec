use std::path::PathBuf;

use crate::game::Token;

/// Errors raised by the board engine. None of them leave a partial mutation
/// behind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("{name} must be in {min}..={max}, got {value}")]
    InvalidConfiguration {
        name: &'static str,
        value: usize,
        min: usize,
        max: usize,
    },

    #[error("column {0} is full")]
    ColumnFull(usize),

    #[error("position ({row}, {column}) is outside the {rows}x{columns} board")]
    OutOfBounds {
        row: usize,
        column: usize,
        rows: usize,
        columns: usize,
    },

    #[error("column {column} is outside the board (columns: {columns})")]
    InvalidColumn { column: usize, columns: usize },
}

/// Errors raised while running a game on top of the board.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("the game is over")]
    GameOver,

    #[error("player count must be in {min}..={max}, got {count}")]
    InvalidPlayerCount { count: usize, min: usize, max: usize },

    #[error("token '{0}' is assigned to more than one player")]
    DuplicateToken(Token),

    #[error(transparent)]
    Board(#[from] BoardError),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
