use thiserror::Error;

use super::state::Position;

/// Errors raised when a session is started from an invalid configuration
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("grid must be at least 1x1, got {width}x{height}")]
    ZeroDimension { width: usize, height: usize },
    #[error("grid {width}x{height} exceeds the addressable cell range")]
    GridTooLarge { width: usize, height: usize },
    #[error("grid {width}x{height} leaves no free cell for food")]
    NoRoomForFood { width: usize, height: usize },
    #[error("growth increment {increment} can overflow the score on a {width}x{height} grid")]
    ScoreOverflow {
        increment: u32,
        width: usize,
        height: usize,
    },
    #[error("start position {position} lies outside the {width}x{height} grid")]
    StartOutOfBounds {
        position: Position,
        width: usize,
        height: usize,
    },
    #[error("snake body must contain at least one segment")]
    EmptyBody,
    #[error("snake segment {position} lies outside the grid")]
    BodyOutOfBounds { position: Position },
    #[error("food at {position} is outside the grid or on the snake")]
    InvalidFood { position: Position },
}
