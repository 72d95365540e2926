//! Durable state that outlives a single game
//!
//! Only the high score is kept. The storage backend sits behind the
//! [`HighScoreStore`] trait so the controller never touches the filesystem
//! directly and tests can run entirely in memory.

pub mod high_score;

pub use high_score::{HighScoreStore, HighScores, JsonFileStore, MemoryStore, default_data_dir};
