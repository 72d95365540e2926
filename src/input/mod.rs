pub mod handler;
pub mod swipe;

pub use handler::{InputAction, InputHandler};
pub use swipe::{SwipeTracker, TouchPoint, classify_swipe};
