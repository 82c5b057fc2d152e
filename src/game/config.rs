use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use super::error::ConfigError;
use super::state::Position;

/// Difficulty tier, mapped to the time between ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Speed {
    /// 150ms per tick
    Slow,
    /// 100ms per tick
    #[default]
    Normal,
    /// 60ms per tick
    Fast,
}

impl Speed {
    /// Get the tick interval for this speed
    pub fn tick_interval(&self) -> Duration {
        match self {
            Self::Slow => Duration::from_millis(150),
            Self::Normal => Duration::from_millis(100),
            Self::Fast => Duration::from_millis(60),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Slow => "Slow",
            Self::Normal => "Normal",
            Self::Fast => "Fast",
        }
    }
}

/// Configuration for a game session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,
    /// Cell the snake starts on; the grid center when unset
    pub start_position: Option<Position>,
    /// Score added per food eaten
    pub growth_increment: u32,
    /// Tick speed, consumed by the scheduler
    pub speed: Speed,
    /// Minimum drag distance in terminal cells for a swipe to count
    pub swipe_threshold: u16,
    /// Seed for food placement, random when unset
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 20,
            grid_height: 20,
            start_position: None,
            growth_increment: 10,
            speed: Speed::Normal,
            swipe_threshold: 2,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    pub fn with_start(mut self, position: Position) -> Self {
        self.start_position = Some(position);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Load a configuration from a JSON file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let config: GameConfig = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        Ok(config)
    }

    /// The configured start cell, falling back to the grid center
    pub fn start(&self) -> Position {
        self.start_position.unwrap_or_else(|| {
            Position::new((self.grid_width / 2) as i32, (self.grid_height / 2) as i32)
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_grid()?;

        let start = self.start();
        if !start.is_within(self.grid_width, self.grid_height) {
            return Err(ConfigError::StartOutOfBounds {
                position: start,
                width: self.grid_width,
                height: self.grid_height,
            });
        }

        Ok(())
    }

    /// Checks the grid dimensions alone, ignoring the start position
    pub fn validate_grid(&self) -> Result<(), ConfigError> {
        let (width, height) = (self.grid_width, self.grid_height);

        if width == 0 || height == 0 {
            return Err(ConfigError::ZeroDimension { width, height });
        }
        if width > i32::MAX as usize || height > i32::MAX as usize {
            return Err(ConfigError::GridTooLarge { width, height });
        }
        // The snake occupies one cell at start, food needs another
        if width.saturating_mul(height) < 2 {
            return Err(ConfigError::NoRoomForFood { width, height });
        }
        // At most every cell but the start can be eaten
        let max_score = u64::from(self.growth_increment)
            .checked_mul((width as u64).saturating_mul(height as u64) - 1);
        if !matches!(max_score, Some(score) if score <= u64::from(u32::MAX)) {
            return Err(ConfigError::ScoreOverflow {
                increment: self.growth_increment,
                width,
                height,
            });
        }

        Ok(())
    }
}
