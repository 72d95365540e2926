use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::interval;
use tracing::{debug, info};

use crate::game::{GameController, Phase, TickOutcome};
use crate::input::{InputAction, InputHandler};
use crate::metrics::GameMetrics;
use crate::render::Renderer;
use crate::storage::HighScoreStore;
use crate::timing::TickScheduler;

/// Redraw cadence, roughly 30 FPS
const FRAME_INTERVAL: Duration = Duration::from_millis(33);

/// Interactive play in the terminal
///
/// Everything runs on one task: terminal events, game ticks and redraws are
/// multiplexed with `select!`, so the controller is never touched concurrently.
pub struct HumanMode<S> {
    controller: GameController<S>,
    scheduler: TickScheduler,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl<S: HighScoreStore> HumanMode<S> {
    pub fn new(controller: GameController<S>) -> Self {
        let input_handler = InputHandler::new(controller.config());
        Self {
            controller,
            scheduler: TickScheduler::new(),
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler,
            should_quit: false,
        }
    }

    pub fn controller(&self) -> &GameController<S> {
        &self.controller
    }

    pub async fn run(&mut self) -> Result<()> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen, EnableMouseCapture)
            .context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;
        info!("terminal session started");

        let result = self.run_game_loop(&mut terminal).await;

        self.cleanup_terminal(&mut terminal)?;
        info!(games_played = self.metrics.games_played, "terminal session ended");

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut render_timer = interval(FRAME_INTERVAL);

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                _ = self.scheduler.fired() => {
                    self.on_tick();
                }

                _ = render_timer.tick() => {
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.controller, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        self.scheduler.cancel();
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        let action = match event {
            // Only process key press events, not release
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                self.input_handler.handle_key_event(key)
            }
            Event::Mouse(mouse) => self.input_handler.handle_mouse_event(mouse),
            _ => InputAction::None,
        };
        self.apply(action);
    }

    fn apply(&mut self, action: InputAction) {
        match action {
            InputAction::Turn(direction) => {
                self.controller.request_direction(direction);
            }
            InputAction::Start => {
                if self.controller.phase() == Phase::Ready {
                    self.start_game();
                }
            }
            InputAction::Restart => self.start_game(),
            InputAction::TogglePause => match self.controller.toggle_pause() {
                Phase::Paused => {
                    self.scheduler.cancel();
                    self.metrics.on_pause();
                }
                Phase::Playing => {
                    self.scheduler.schedule(self.controller.tick_interval());
                    self.metrics.on_resume();
                }
                _ => {}
            },
            InputAction::Quit => self.should_quit = true,
            InputAction::None => {}
        }
    }

    fn start_game(&mut self) {
        self.controller.start();
        self.metrics.on_game_start();
        self.scheduler.schedule(self.controller.tick_interval());
    }

    fn on_tick(&mut self) {
        match self.controller.tick() {
            TickOutcome::Moved { ate_food } => {
                if ate_food {
                    debug!(interval = ?self.controller.tick_interval(), "speeding up");
                }
                self.scheduler.schedule(self.controller.tick_interval());
            }
            TickOutcome::Ended { .. } => {
                self.scheduler.cancel();
                self.metrics.on_game_over();
            }
            TickOutcome::Idle => self.scheduler.cancel(),
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )
        .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
