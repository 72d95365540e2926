//! The game's state machine
//!
//! [`GameController`] owns one game's simulation state plus the high score and
//! decides which inputs are meaningful in which [`Phase`]. It never sleeps or
//! spawns anything: the caller drives it by calling [`GameController::tick`]
//! whenever the interval reported by [`GameController::tick_interval`] elapses.

use std::time::Duration;
use tracing::{debug, info};

use super::{
    action::{Action, Direction},
    config::GameConfig,
    engine::{GameEngine, StepResult},
    state::{CollisionType, GameState},
};
use crate::storage::{HighScoreStore, HighScores};

/// Where the game is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the first start
    Ready,
    Playing,
    Paused,
    /// Collided; only a restart leaves this phase
    GameOver,
}

/// Result of a single call to [`GameController::tick`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not playing, nothing happened
    Idle,
    /// The snake moved
    Moved { ate_food: bool },
    /// The snake collided and the game is over
    Ended {
        collision: Option<CollisionType>,
        score: u32,
        new_high_score: bool,
    },
}

pub struct GameController<S> {
    engine: GameEngine,
    state: GameState,
    phase: Phase,
    pending_direction: Option<Direction>,
    high_scores: HighScores<S>,
    new_record: bool,
}

impl<S: HighScoreStore> GameController<S> {
    pub fn new(engine: GameEngine, high_scores: HighScores<S>) -> Self {
        let state = engine.reset();
        Self {
            engine,
            state,
            phase: Phase::Ready,
            pending_direction: None,
            high_scores,
            new_record: false,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        self.engine.config()
    }

    pub fn high_score(&self) -> u32 {
        self.high_scores.best()
    }

    pub fn high_scores(&self) -> &HighScores<S> {
        &self.high_scores
    }

    /// Whether the game that just ended beat the previous high score
    pub fn is_new_record(&self) -> bool {
        self.new_record
    }

    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending_direction
    }

    pub fn is_playing(&self) -> bool {
        self.phase == Phase::Playing
    }

    /// Start a fresh game from any phase
    pub fn start(&mut self) {
        self.state = self.engine.reset();
        self.pending_direction = None;
        self.new_record = false;
        self.phase = Phase::Playing;
        info!(best = self.high_scores.best(), "game started");
    }

    /// Flip between playing and paused; ignored in other phases
    pub fn toggle_pause(&mut self) -> Phase {
        self.phase = match self.phase {
            Phase::Playing => Phase::Paused,
            Phase::Paused => Phase::Playing,
            other => other,
        };
        debug!(phase = ?self.phase, "pause toggled");
        self.phase
    }

    /// Queue a turn for the next tick
    ///
    /// A turn straight back the way the snake last moved is dropped, as is any
    /// request while no game is in progress. Returns whether it was queued.
    pub fn request_direction(&mut self, direction: Direction) -> bool {
        if !matches!(self.phase, Phase::Playing | Phase::Paused) {
            return false;
        }
        if self.state.snake.direction.is_opposite(direction) {
            debug!(?direction, "reversal rejected");
            return false;
        }
        self.pending_direction = Some(direction);
        true
    }

    /// Delay until the next tick at the current score
    pub fn tick_interval(&self) -> Duration {
        self.engine.config().tick_interval(self.state.score)
    }

    /// Advance the simulation by one step if a game is in progress
    pub fn tick(&mut self) -> TickOutcome {
        if self.phase != Phase::Playing {
            return TickOutcome::Idle;
        }

        let action = Action::from(self.pending_direction.take());
        let StepResult {
            terminated,
            ate_food,
            collision_type,
        } = self.engine.step(&mut self.state, action);

        if !terminated {
            return TickOutcome::Moved { ate_food };
        }

        self.phase = Phase::GameOver;
        let score = self.state.score;
        let new_high_score = self.high_scores.submit(score);
        self.new_record = new_high_score;
        info!(
            score,
            steps = self.state.steps,
            ?collision_type,
            new_high_score,
            "game over"
        );

        TickOutcome::Ended {
            collision: collision_type,
            score,
            new_high_score,
        }
    }
}
