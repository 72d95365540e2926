use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use super::swipe::{SwipeTracker, TouchPoint};
use crate::game::{Direction, GameConfig};

/// What a raw terminal event asks the game to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Turn(Direction),
    /// Begin play from the ready screen
    Start,
    /// Throw the current game away and start over
    Restart,
    TogglePause,
    Quit,
    None,
}

/// Maps keyboard and mouse-drag events to [`InputAction`]s
///
/// A left-button drag stands in for a touch swipe. Terminal cells are scaled
/// to pixels before classification so the swipe threshold keeps its meaning.
pub struct InputHandler {
    swipe: SwipeTracker,
    cell_width_px: f32,
    cell_height_px: f32,
}

impl InputHandler {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            swipe: SwipeTracker::new(config.swipe_threshold_px),
            cell_width_px: config.cell_width_px,
            cell_height_px: config.cell_height_px,
        }
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> InputAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return InputAction::Quit;
        }

        match key.code {
            KeyCode::Up => InputAction::Turn(Direction::Up),
            KeyCode::Down => InputAction::Turn(Direction::Down),
            KeyCode::Left => InputAction::Turn(Direction::Left),
            KeyCode::Right => InputAction::Turn(Direction::Right),

            KeyCode::Char('w') | KeyCode::Char('W') => InputAction::Turn(Direction::Up),
            KeyCode::Char('s') | KeyCode::Char('S') => InputAction::Turn(Direction::Down),
            KeyCode::Char('a') | KeyCode::Char('A') => InputAction::Turn(Direction::Left),
            KeyCode::Char('d') | KeyCode::Char('D') => InputAction::Turn(Direction::Right),

            KeyCode::Enter => InputAction::Start,
            KeyCode::Char('r') | KeyCode::Char('R') => InputAction::Restart,
            KeyCode::Char(' ') | KeyCode::Char('p') | KeyCode::Char('P') => {
                InputAction::TogglePause
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => InputAction::Quit,

            _ => InputAction::None,
        }
    }

    pub fn handle_mouse_event(&mut self, mouse: MouseEvent) -> InputAction {
        let point = self.to_pixels(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.swipe.begin(point);
                InputAction::None
            }
            MouseEventKind::Up(MouseButton::Left) => self
                .swipe
                .finish(point)
                .map_or(InputAction::None, InputAction::Turn),
            _ => InputAction::None,
        }
    }

    /// Centre of the terminal cell, in pixels
    fn to_pixels(&self, column: u16, row: u16) -> TouchPoint {
        TouchPoint::new(
            (f32::from(column) + 0.5) * self.cell_width_px,
            (f32::from(row) + 0.5) * self.cell_height_px,
        )
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new(&GameConfig::default())
    }
}
