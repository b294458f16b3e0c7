//! Error types for board construction, match control and configuration.
//!
//! The search and evaluation code never fails; these errors only surface at
//! the edges where caller input is checked.

use std::path::PathBuf;

use crate::board::Pos;

/// Errors that can occur when building a board.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("board size {size} is below the minimum of 3")]
    SizeTooSmall { size: usize },

    #[error("cannot place {obstacles} obstacles on a board of {cells} cells")]
    TooManyObstacles { obstacles: usize, cells: usize },

    #[error("invalid board diagram: {0}")]
    Parse(String),
}

/// Errors that can occur when applying a move through the match controller.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GameError {
    #[error("move ({}, {}) is outside the board", .0.row, .0.col)]
    OutOfBounds(Pos),

    #[error("cell ({}, {}) is not empty", .0.row, .0.col)]
    CellOccupied(Pos),

    #[error("the round is already over")]
    RoundOver,

    #[error("the current round has not finished yet")]
    RoundInProgress,

    #[error("the match has already been decided")]
    MatchOver,

    #[error("board error: {0}")]
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
