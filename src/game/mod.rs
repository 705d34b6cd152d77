//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! State lives in [`GameState`]; [`GameEngine`] applies the transition rules to it.

pub mod config;
pub mod direction;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use config::{ConfigError, GameConfig};
pub use direction::Direction;
pub use engine::{GameEngine, Transition};
pub use state::{CollisionType, GameSnapshot, GameState, Position, Snake};
