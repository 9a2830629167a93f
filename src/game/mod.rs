//! Core game logic for Snake
//!
//! Everything here is free of I/O and rendering: the engine owns the state and
//! is advanced explicitly by whoever drives it.

pub mod config;
pub mod direction;
pub mod engine;
pub mod error;
pub mod state;

pub use config::GameConfig;
pub use direction::Direction;
pub use engine::GameEngine;
pub use error::GameError;
pub use state::{Cell, GameState, Outcome, Snake};
