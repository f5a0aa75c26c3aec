//! # Connect X
//!
//! An N-player Connect-X game: tokens drop into the columns of a
//! gravity-fed grid and the first player to line up `num_to_win` of them
//! horizontally, vertically or diagonally wins.
//!
//! ## Modules
//!
//! - [`game`]: Board engine (placement, run scanning, tie check) and the
//!   turn-taking session built on it
//! - [`ui`]: Terminal UI and headless line-oriented play
//! - [`config`]: TOML configuration loading and validation
//! - [`error`]: Structured error types

pub mod config;
pub mod error;
pub mod game;
pub mod ui;
