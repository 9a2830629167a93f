//! Grid Snake - the classic Snake game in the terminal
//!
//! This library provides:
//! - Core game logic (game module)
//! - Tick and clock scheduling (timing module)
//! - Keyboard mapping (input module)
//! - TUI rendering (render module)
//! - Session scoreboard (metrics module)
//! - The interactive play loop (modes module)

pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod timing;
