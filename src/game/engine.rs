use super::{
    action::{Action, Direction},
    config::{FoodSpawn, GameConfig},
    state::{Cell, CollisionType, GameState, Snake},
};
use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::debug;

/// Outcome of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepResult {
    /// Whether the game has ended
    pub terminated: bool,
    /// Whether the snake ate food this tick
    pub ate_food: bool,
    /// Type of collision if one occurred
    pub collision_type: Option<CollisionType>,
}

impl StepResult {
    fn moved(ate_food: bool) -> Self {
        Self {
            terminated: false,
            ate_food,
            collision_type: None,
        }
    }

    fn collided(collision_type: CollisionType) -> Self {
        Self {
            terminated: true,
            ate_food: false,
            collision_type: Some(collision_type),
        }
    }

    fn already_over() -> Self {
        Self {
            terminated: true,
            ate_food: false,
            collision_type: None,
        }
    }
}

/// Applies the movement, collision and growth rules
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
    /// Create an engine whose food placement is seeded from the OS
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            rng: StdRng::from_entropy(),
        }
    }

    /// Create an engine with reproducible food placement
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Build the initial state of a fresh game
    ///
    /// Always the same: a one-cell snake at the centre heading right, food on
    /// the configured initial cell, score zero.
    pub fn reset(&self) -> GameState {
        let snake = Snake::new(self.config.start_cell(), Direction::Right);
        GameState::new(
            snake,
            self.config.initial_food_cell(),
            self.config.grid_width,
            self.config.grid_height,
        )
    }

    /// Advance `state` by one tick
    pub fn step(&mut self, state: &mut GameState, action: Action) -> StepResult {
        if !state.is_alive {
            return StepResult::already_over();
        }

        if let Action::Move(direction) = action {
            if !state.snake.direction.is_opposite(direction) {
                state.snake.direction = direction;
            }
        }

        let new_head = state.snake.head().step(state.snake.direction);

        if let Some(collision_type) = Self::check_collision(state, new_head) {
            debug!(?collision_type, x = new_head.x, y = new_head.y, "snake collided");
            state.is_alive = false;
            state.steps += 1;
            return StepResult::collided(collision_type);
        }

        let ate_food = new_head == state.food;
        state.snake.advance(new_head, ate_food);

        if ate_food {
            state.score += 1;
            state.food = self.spawn_food(&state.snake);
            debug!(
                score = state.score,
                food_x = state.food.x,
                food_y = state.food.y,
                "food eaten"
            );
        }

        state.steps += 1;
        StepResult::moved(ate_food)
    }

    fn check_collision(state: &GameState, head: Cell) -> Option<CollisionType> {
        if !state.is_in_bounds(head) {
            return Some(CollisionType::Wall);
        }
        if state.snake.occupies(head) {
            return Some(CollisionType::SelfCollision);
        }
        None
    }

    /// Pick the next food cell according to the configured policy
    fn spawn_food(&mut self, snake: &Snake) -> Cell {
        match self.config.food_spawn {
            FoodSpawn::Anywhere => self.random_cell(),
            FoodSpawn::AvoidSnake => {
                let free: Vec<Cell> = (0..self.config.grid_height as i32)
                    .flat_map(|y| (0..self.config.grid_width as i32).map(move |x| Cell::new(x, y)))
                    .filter(|cell| !snake.occupies(*cell))
                    .collect();
                if free.is_empty() {
                    self.random_cell()
                } else {
                    free[self.rng.gen_range(0..free.len())]
                }
            }
        }
    }

    fn random_cell(&mut self) -> Cell {
        let x = self.rng.gen_range(0..self.config.grid_width) as i32;
        let y = self.rng.gen_range(0..self.config.grid_height) as i32;
        Cell::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn engine() -> GameEngine {
        GameEngine::with_seed(GameConfig::default(), 7)
    }

    #[test]
    fn test_reset() {
        let state = engine().reset();

        assert!(state.is_alive);
        assert_eq!(state.score, 0);
        assert_eq!(state.steps, 0);
        assert_eq!(state.snake.body, vec![Cell::new(10, 10)]);
        assert_eq!(state.snake.direction, Direction::Right);
        assert_eq!(state.food, Cell::new(15, 15));
    }

    #[test]
    fn test_reset_is_idempotent() {
        let engine = engine();
        assert_eq!(engine.reset(), engine.reset());
    }

    #[test]
    fn test_eating_food_grows_and_scores() {
        let mut engine = engine();
        let mut state = engine.reset();
        state.food = Cell::new(11, 10);

        let result = engine.step(&mut state, Action::Continue);

        assert!(result.ate_food);
        assert!(!result.terminated);
        assert_eq!(state.snake.body, vec![Cell::new(11, 10), Cell::new(10, 10)]);
        assert_eq!(state.score, 1);
        assert!(state.is_in_bounds(state.food));
    }

    #[test]
    fn test_plain_move_keeps_length() {
        let mut engine = engine();
        let mut state = engine.reset();

        let result = engine.step(&mut state, Action::Continue);

        assert!(!result.ate_food);
        assert_eq!(state.snake.body, vec![Cell::new(11, 10)]);
        assert_eq!(state.score, 0);
        assert_eq!(state.steps, 1);
    }

    #[test]
    fn test_wall_collision() {
        let mut engine = engine();
        let mut state = GameState::new(
            Snake::new(Cell::new(0, 0), Direction::Left),
            Cell::new(5, 5),
            20,
            20,
        );
        state.score = 3;

        let result = engine.step(&mut state, Action::Continue);

        assert!(result.terminated);
        assert!(!state.is_alive);
        assert_eq!(result.collision_type, Some(CollisionType::Wall));
        assert_eq!(state.score, 3);
        assert_eq!(state.snake.body, vec![Cell::new(0, 0)]);
    }

    #[test]
    fn test_every_edge_is_a_wall() {
        let cases = [
            (Cell::new(5, 0), Direction::Up),
            (Cell::new(5, 19), Direction::Down),
            (Cell::new(0, 5), Direction::Left),
            (Cell::new(19, 5), Direction::Right),
        ];
        for (start, direction) in cases {
            let mut engine = engine();
            let mut state = GameState::new(Snake::new(start, direction), Cell::new(9, 9), 20, 20);
            let result = engine.step(&mut state, Action::Continue);
            assert_eq!(result.collision_type, Some(CollisionType::Wall), "{start:?}");
        }
    }

    #[test]
    fn test_self_collision() {
        let mut engine = engine();
        // (5,5) head going up, body curls around so (5,4) is occupied
        let snake = Snake::from_cells(
            [
                Cell::new(5, 5),
                Cell::new(6, 5),
                Cell::new(6, 4),
                Cell::new(5, 4),
                Cell::new(4, 4),
            ],
            Direction::Left,
        );
        let mut state = GameState::new(snake, Cell::new(9, 9), 10, 10);

        let result = engine.step(&mut state, Action::Move(Direction::Up));

        assert!(result.terminated);
        assert_eq!(result.collision_type, Some(CollisionType::SelfCollision));
    }

    #[test]
    fn test_running_into_the_tail_is_fatal() {
        let mut engine = engine();
        // a 2x2 loop: moving onto the current tail cell ends the game
        let snake = Snake::from_cells(
            [
                Cell::new(5, 5),
                Cell::new(5, 4),
                Cell::new(4, 4),
                Cell::new(4, 5),
            ],
            Direction::Down,
        );
        let mut state = GameState::new(snake, Cell::new(9, 9), 10, 10);

        let result = engine.step(&mut state, Action::Move(Direction::Left));

        assert_eq!(result.collision_type, Some(CollisionType::SelfCollision));
    }

    #[test]
    fn test_reverse_is_ignored() {
        let mut engine = engine();
        let mut state = engine.reset();

        engine.step(&mut state, Action::Move(Direction::Left));

        assert_eq!(state.snake.direction, Direction::Right);
        assert_eq!(state.snake.head(), Cell::new(11, 10));
    }

    #[test]
    fn test_terminated_game_no_update() {
        let mut engine = engine();
        let mut state = engine.reset();
        state.is_alive = false;
        let before = state.clone();

        let result = engine.step(&mut state, Action::Continue);

        assert!(result.terminated);
        assert_eq!(state, before);
    }

    #[test]
    fn test_avoid_snake_spawn_never_lands_on_body() {
        let config = GameConfig {
            food_spawn: FoodSpawn::AvoidSnake,
            ..GameConfig::new(3, 3)
        };
        let mut engine = GameEngine::with_seed(config, 42);
        let snake = Snake::from_cells(
            [
                Cell::new(0, 0),
                Cell::new(1, 0),
                Cell::new(2, 0),
                Cell::new(2, 1),
                Cell::new(1, 1),
                Cell::new(0, 1),
                Cell::new(0, 2),
                Cell::new(1, 2),
            ],
            Direction::Left,
        );
        for _ in 0..50 {
            assert_eq!(engine.spawn_food(&snake), Cell::new(2, 2));
        }
    }

    #[test]
    fn test_anywhere_spawn_covers_the_grid() {
        let mut engine = GameEngine::with_seed(GameConfig::new(2, 2), 1);
        let snake = Snake::new(Cell::new(0, 0), Direction::Right);
        let seen: HashSet<Cell> = (0..200).map(|_| engine.spawn_food(&snake)).collect();
        assert_eq!(seen.len(), 4);
        assert!(seen.contains(&Cell::new(0, 0)));
    }

    #[test]
    fn test_random_play_invariants() {
        let mut engine = GameEngine::with_seed(GameConfig::small(), 99);
        let mut picker = StdRng::seed_from_u64(3);

        for _ in 0..200 {
            let mut state = engine.reset();
            while state.is_alive {
                let before_len = state.snake.len();
                let before_dir = state.snake.direction;
                let wanted = Direction::ALL[picker.gen_range(0..4)];

                let result = engine.step(&mut state, Action::Move(wanted));
                if result.terminated {
                    assert_eq!(state.snake.len(), before_len);
                    break;
                }

                let grown = state.snake.len() - before_len;
                assert!(grown <= 1);
                assert_eq!(grown == 1, result.ate_food);
                assert!(!state.snake.direction.is_opposite(before_dir));

                let unique: HashSet<Cell> = state.snake.body.iter().copied().collect();
                assert_eq!(unique.len(), state.snake.len());
                assert!(state.snake.body.iter().all(|c| state.is_in_bounds(*c)));
            }
        }
    }
}
