//! Core game logic module for Snake
//!
//! Everything here is free of terminal and filesystem I/O; the controller only
//! reaches durable state through the injected high-score store.

pub mod action;
pub mod config;
pub mod controller;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use action::{Action, Direction};
pub use config::{FoodSpawn, GameConfig};
pub use controller::{GameController, Phase, TickOutcome};
pub use engine::{GameEngine, StepResult};
pub use state::{Cell, CollisionType, GameState, Snake};
