use std::time::{Duration, Instant};

/// Session statistics shown alongside the board
///
/// The clock only runs while a game is being played; pausing stops it and game
/// over freezes it at the final time.
#[derive(Debug, Clone)]
pub struct GameMetrics {
    banked: Duration,
    running_since: Option<Instant>,
    pub games_played: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            banked: Duration::ZERO,
            running_since: None,
            games_played: 0,
        }
    }

    /// Time spent playing the current game
    pub fn elapsed(&self) -> Duration {
        let live = self
            .running_since
            .map_or(Duration::ZERO, |since| since.elapsed());
        self.banked + live
    }

    pub fn is_running(&self) -> bool {
        self.running_since.is_some()
    }

    pub fn on_game_start(&mut self) {
        self.banked = Duration::ZERO;
        self.running_since = Some(Instant::now());
    }

    pub fn on_pause(&mut self) {
        self.stop_clock();
    }

    pub fn on_resume(&mut self) {
        if self.running_since.is_none() {
            self.running_since = Some(Instant::now());
        }
    }

    pub fn on_game_over(&mut self) {
        self.stop_clock();
        self.games_played += 1;
    }

    fn stop_clock(&mut self) {
        if let Some(since) = self.running_since.take() {
            self.banked += since.elapsed();
        }
    }

    pub fn format_time(&self) -> String {
        format_duration(self.elapsed())
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// `mm:ss`, minutes unbounded
pub fn format_duration(elapsed: Duration) -> String {
    let total_secs = elapsed.as_secs();
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}
