//! GameRoam arcade - a Snake reflex game for the terminal
//!
//! This library provides:
//! - Core game logic and the game state machine (game module)
//! - A re-armable tick scheduler driving the game loop (timing module)
//! - Keyboard and swipe input mapping (input module)
//! - High score persistence (storage module)
//! - TUI rendering and the interactive session (render and modes modules)

pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod storage;
pub mod timing;
