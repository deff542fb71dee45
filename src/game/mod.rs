//! Core game rules for Snake
//!
//! Movement, growth, collision detection, scoring and the game-over
//! transition, with no I/O or rendering dependencies. Hosts drive it through
//! [`GameEngine::advance`] once per frame and [`GameEngine::steer`] per input.

pub mod action;
pub mod config;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use action::{Action, Direction};
pub use config::GameConfig;
pub use engine::{GameEngine, StepInfo, StepResult};
pub use state::{CollisionType, GameState, Position, Snake};
