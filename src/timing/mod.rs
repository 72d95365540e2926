//! Tick scheduling for the game loop

pub mod scheduler;

pub use scheduler::TickScheduler;
