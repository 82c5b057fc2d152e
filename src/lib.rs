//! Grid Snake - a tick-driven snake game
//!
//! This library provides:
//! - The simulation core: grid, body, food, scoring and termination (game module)
//! - A fixed-interval tick driver (scheduler module)
//! - Keyboard and drag-gesture input translation (input module)
//! - TUI rendering and the interactive mode (render, modes modules)

pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod scheduler;
