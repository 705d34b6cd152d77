use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use super::direction::Direction;

pub const GRID_WIDTH: usize = 15;
pub const GRID_HEIGHT: usize = 15;
/// Terminal columns used to draw one cell; rows are one line each
pub const CELL_WIDTH: u16 = 2;
pub const TICKS_PER_SECOND: u32 = 6;
/// Points awarded per food eaten
pub const FOOD_SCORE: u32 = 10;
pub const START_COLUMN: i32 = (GRID_WIDTH / 2) as i32;
pub const START_ROW: i32 = 8;
pub const START_DIRECTION: Direction = Direction::Right;

/// Smallest allowed grid edge
pub const MIN_GRID_EDGE: usize = 3;

/// Reasons a [`GameConfig`] is rejected
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("grid must be at least {min}x{min}, got {width}x{height}")]
    GridTooSmall {
        width: usize,
        height: usize,
        min: usize,
    },
    #[error("start cell ({x}, {y}) lies outside the {width}x{height} grid")]
    StartOutOfBounds {
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    },
    #[error("ticks_per_second must be at least 1")]
    ZeroTickRate,
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,
    /// Column of the single starting segment
    pub start_x: i32,
    /// Row of the single starting segment
    pub start_y: i32,
    pub start_direction: Direction,
    /// Simulation steps per second
    pub ticks_per_second: u32,
    /// Score increment per food
    pub food_score: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: GRID_WIDTH,
            grid_height: GRID_HEIGHT,
            start_x: START_COLUMN,
            start_y: START_ROW,
            start_direction: START_DIRECTION,
            ticks_per_second: TICKS_PER_SECOND,
            food_score: FOOD_SCORE,
        }
    }
}

impl GameConfig {
    /// Create a configuration with a custom grid size, starting in the center
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            start_x: (width / 2) as i32,
            start_y: (height / 2) as i32,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(5, 5)
    }

    pub fn cell_count(&self) -> usize {
        self.grid_width * self.grid_height
    }

    /// Time between two simulation steps
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(1) / self.ticks_per_second.max(1)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_width < MIN_GRID_EDGE || self.grid_height < MIN_GRID_EDGE {
            return Err(ConfigError::GridTooSmall {
                width: self.grid_width,
                height: self.grid_height,
                min: MIN_GRID_EDGE,
            });
        }

        let in_bounds = self.start_x >= 0
            && (self.start_x as usize) < self.grid_width
            && self.start_y >= 0
            && (self.start_y as usize) < self.grid_height;
        if !in_bounds {
            return Err(ConfigError::StartOutOfBounds {
                x: self.start_x,
                y: self.start_y,
                width: self.grid_width,
                height: self.grid_height,
            });
        }

        if self.ticks_per_second == 0 {
            return Err(ConfigError::ZeroTickRate);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_width, 15);
        assert_eq!(config.grid_height, 15);
        assert_eq!((config.start_x, config.start_y), (7, 8));
        assert_eq!(config.start_direction, Direction::Right);
        assert_eq!(config.food_score, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(20, 10);
        assert_eq!(config.grid_width, 20);
        assert_eq!(config.grid_height, 10);
        assert_eq!((config.start_x, config.start_y), (10, 5));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_tick_interval() {
        let config = GameConfig {
            ticks_per_second: 4,
            ..Default::default()
        };
        assert_eq!(config.tick_interval(), Duration::from_millis(250));
    }

    #[test]
    fn test_rejects_tiny_grid() {
        let config = GameConfig::new(2, 10);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::GridTooSmall { width: 2, .. })
        ));
    }

    #[test]
    fn test_rejects_start_outside_grid() {
        let config = GameConfig {
            start_y: 15,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::StartOutOfBounds { y: 15, .. })
        ));
    }

    #[test]
    fn test_rejects_zero_tick_rate() {
        let config = GameConfig {
            ticks_per_second: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroTickRate));
    }
}
