//! Snake Pro - a grid snake game for the terminal
//!
//! This library provides:
//! - Core game rules and state (game module)
//! - Fixed-rate ticking and snapshot publishing (tick module)
//! - High-score persistence over a key-value store (score, store modules)
//! - TUI rendering, keyboard input and feedback (render, input, feedback modules)
//! - The interactive terminal mode (modes module)

pub mod feedback;
pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod score;
pub mod store;
pub mod tick;
