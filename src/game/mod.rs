//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O, timers or rendering.
//! The interactive mode drives it, and tests can drive it tick by tick.

pub mod config;
pub mod direction;
pub mod error;
pub mod food;
pub mod simulation;
pub mod state;

// Re-export commonly used types
pub use config::{GameConfig, Speed};
pub use direction::Direction;
pub use error::ConfigError;
pub use food::FoodSpawner;
pub use simulation::{GridSimulation, SessionState, TerminationReason, TickOutcome};
pub use state::{Position, Snake};
