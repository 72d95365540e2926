use anyhow::{Context, Result, bail};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use super::state::Cell;

/// Where food may reappear after it has been eaten
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum FoodSpawn {
    /// Any cell on the field, including ones under the snake
    #[default]
    Anywhere,
    /// Only cells the snake does not occupy
    AvoidSnake,
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,

    /// Tick interval at score 0, in milliseconds
    pub base_interval_ms: u64,
    /// Fastest allowed tick interval, in milliseconds
    pub min_interval_ms: u64,
    /// How much each point shortens the tick interval, in milliseconds
    pub speedup_ms_per_point: u64,

    /// Food placement on a fresh game; defaults to three quarters across and down
    pub initial_food: Option<(i32, i32)>,
    /// Respawn policy once food is eaten
    pub food_spawn: FoodSpawn,

    /// Minimum drag distance, in pixels, before a swipe counts
    pub swipe_threshold_px: f32,
    /// Pixel width of one terminal column when measuring drags
    pub cell_width_px: f32,
    /// Pixel height of one terminal row when measuring drags
    pub cell_height_px: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 20,
            grid_height: 20,
            base_interval_ms: 150,
            min_interval_ms: 50,
            speedup_ms_per_point: 2,
            initial_food: None,
            food_spawn: FoodSpawn::Anywhere,
            swipe_threshold_px: 30.0,
            cell_width_px: 8.0,
            cell_height_px: 16.0,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Read a JSON config file; missing fields take their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let config: GameConfig = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        Ok(config)
    }

    /// The cell a new snake starts on
    pub fn start_cell(&self) -> Cell {
        Cell::new((self.grid_width / 2) as i32, (self.grid_height / 2) as i32)
    }

    /// The cell food occupies when a game starts
    pub fn initial_food_cell(&self) -> Cell {
        match self.initial_food {
            Some((x, y)) => Cell::new(x, y),
            None => Cell::new(
                (self.grid_width * 3 / 4) as i32,
                (self.grid_height * 3 / 4) as i32,
            ),
        }
    }

    /// Delay before the next tick: `max(min, base - score * speedup)`
    pub fn tick_interval(&self, score: u32) -> Duration {
        let speedup = self.speedup_ms_per_point.saturating_mul(u64::from(score));
        let millis = self
            .base_interval_ms
            .saturating_sub(speedup)
            .max(self.min_interval_ms);
        Duration::from_millis(millis)
    }

    /// Check that the configuration describes a playable game
    pub fn validate(&self) -> Result<()> {
        if self.grid_width < 2 || self.grid_height < 2 {
            bail!(
                "grid must be at least 2x2, got {}x{}",
                self.grid_width,
                self.grid_height
            );
        }
        if self.grid_width > i32::MAX as usize || self.grid_height > i32::MAX as usize {
            bail!("grid dimensions must fit in i32");
        }
        if self.min_interval_ms == 0 {
            bail!("min_interval_ms must be positive");
        }
        if self.min_interval_ms > self.base_interval_ms {
            bail!(
                "min_interval_ms ({}) exceeds base_interval_ms ({})",
                self.min_interval_ms,
                self.base_interval_ms
            );
        }
        if self.swipe_threshold_px <= 0.0 {
            bail!("swipe_threshold_px must be positive");
        }
        if self.cell_width_px <= 0.0 || self.cell_height_px <= 0.0 {
            bail!("cell pixel sizes must be positive");
        }

        let food = self.initial_food_cell();
        let in_bounds = food.x >= 0
            && food.y >= 0
            && (food.x as usize) < self.grid_width
            && (food.y as usize) < self.grid_height;
        if !in_bounds {
            bail!("initial food ({}, {}) is outside the grid", food.x, food.y);
        }
        if food == self.start_cell() {
            bail!("initial food cannot share the snake's start cell");
        }

        Ok(())
    }
}
