//! grid_snake - a terminal Snake game
//!
//! This library provides:
//! - Core game rules on a fixed-timestep grid (game module)
//! - Keyboard mapping (input module)
//! - TUI rendering (render module)
//! - Session statistics (metrics module)
//! - The interactive terminal host (modes module)

pub mod game;
pub mod input;
pub mod logger;
pub mod metrics;
pub mod modes;
pub mod render;
