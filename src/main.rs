use anyhow::{Context, Result};
use clap::Parser;
use roam_snake::game::{FoodSpawn, GameConfig, GameController, GameEngine};
use roam_snake::logging::init_logging;
use roam_snake::modes::HumanMode;
use roam_snake::storage::{HighScores, JsonFileStore, default_data_dir};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "roam_snake")]
#[command(version, about = "GameRoam arcade: Snake in the terminal")]
struct Cli {
    /// JSON file with game settings; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width
    #[arg(long)]
    width: Option<usize>,

    /// Grid height
    #[arg(long)]
    height: Option<usize>,

    /// Where eaten food may reappear
    #[arg(long, value_enum)]
    food_spawn: Option<FoodSpawn>,

    /// Seed for food placement, for reproducible games
    #[arg(long)]
    seed: Option<u64>,

    /// Directory holding the high score and log file
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log file (defaults to roam_snake.log in the data directory)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };
        if let Some(width) = self.width {
            config.grid_width = width;
        }
        if let Some(height) = self.height {
            config.grid_height = height;
        }
        if let Some(food_spawn) = self.food_spawn {
            config.food_spawn = food_spawn;
        }
        config.validate().context("Invalid game configuration")?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = cli.game_config()?;
    let data_dir = match &cli.data_dir {
        Some(dir) => dir.clone(),
        None => default_data_dir().context("Failed to resolve data directory")?,
    };
    let log_file = cli
        .log_file
        .clone()
        .unwrap_or_else(|| data_dir.join("roam_snake.log"));
    init_logging(&log_file, &cli.log_level)?;

    info!(
        width = config.grid_width,
        height = config.grid_height,
        food_spawn = ?config.food_spawn,
        data_dir = %data_dir.display(),
        "starting roam_snake"
    );

    let engine = match cli.seed {
        Some(seed) => GameEngine::with_seed(config, seed),
        None => GameEngine::new(config),
    };
    let high_scores = HighScores::load(JsonFileStore::in_dir(&data_dir));
    let controller = GameController::new(engine, high_scores);

    let mut human_mode = HumanMode::new(controller);
    human_mode.run().await?;

    Ok(())
}
