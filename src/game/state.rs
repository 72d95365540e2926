use super::action::Direction;

/// A square on the playing field
///
/// Coordinates are signed so that a head that has left the field (for example
/// `(-1, 0)`) can still be represented and rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighbouring cell one step away in `direction`
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl From<(i32, i32)> for Cell {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// The snake, head first
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body cells with the head at index 0; never empty
    pub body: Vec<Cell>,
    /// Heading applied on the most recent tick
    pub direction: Direction,
}

impl Snake {
    /// A one-cell snake sitting on `start`
    pub fn new(start: Cell, direction: Direction) -> Self {
        Self {
            body: vec![start],
            direction,
        }
    }

    /// Build a snake from explicit cells, head first
    pub fn from_cells(cells: impl IntoIterator<Item = Cell>, direction: Direction) -> Self {
        let body: Vec<Cell> = cells.into_iter().collect();
        assert!(!body.is_empty(), "a snake needs at least one cell");
        Self { body, direction }
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn tail(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    /// Whether `cell` is occupied by any part of the snake, tail included
    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Prepend `new_head`; drop the tail unless the snake is growing this tick
    pub fn advance(&mut self, new_head: Cell, grow: bool) {
        self.body.insert(0, new_head);
        if !grow {
            self.body.pop();
        }
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Why a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// The head left the field
    Wall,
    /// The head ran into the snake's own body
    SelfCollision,
}

/// The simulation tuple for one game
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Cell,
    pub grid_width: usize,
    pub grid_height: usize,
    pub score: u32,
    pub steps: u32,
    pub is_alive: bool,
}

impl GameState {
    pub fn new(snake: Snake, food: Cell, grid_width: usize, grid_height: usize) -> Self {
        Self {
            snake,
            food,
            grid_width,
            grid_height,
            score: 0,
            steps: 0,
            is_alive: true,
        }
    }

    /// Whether `cell` lies inside `[0, width) x [0, height)`
    pub fn is_in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0
            && cell.y >= 0
            && (cell.x as usize) < self.grid_width
            && (cell.y as usize) < self.grid_height
    }

    pub fn cell_count(&self) -> usize {
        self.grid_width * self.grid_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_step() {
        let cell = Cell::new(3, 3);
        assert_eq!(cell.step(Direction::Up), Cell::new(3, 2));
        assert_eq!(cell.step(Direction::Down), Cell::new(3, 4));
        assert_eq!(cell.step(Direction::Left), Cell::new(2, 3));
        assert_eq!(cell.step(Direction::Right), Cell::new(4, 3));
        assert_eq!(Cell::new(0, 0).step(Direction::Left), Cell::new(-1, 0));
    }

    #[test]
    fn test_advance_moves_or_grows() {
        let mut snake = Snake::new(Cell::new(10, 10), Direction::Right);

        snake.advance(Cell::new(11, 10), true);
        assert_eq!(snake.body, vec![Cell::new(11, 10), Cell::new(10, 10)]);

        snake.advance(Cell::new(12, 10), false);
        assert_eq!(snake.body, vec![Cell::new(12, 10), Cell::new(11, 10)]);
        assert_eq!(snake.head(), Cell::new(12, 10));
        assert_eq!(snake.tail(), Cell::new(11, 10));
    }

    #[test]
    fn test_occupies_includes_head_and_tail() {
        let snake = Snake::from_cells(
            [Cell::new(5, 5), Cell::new(4, 5), Cell::new(3, 5)],
            Direction::Right,
        );
        assert!(snake.occupies(Cell::new(5, 5)));
        assert!(snake.occupies(Cell::new(3, 5)));
        assert!(!snake.occupies(Cell::new(6, 5)));
    }

    #[test]
    fn test_bounds() {
        let state = GameState::new(
            Snake::new(Cell::new(10, 10), Direction::Right),
            Cell::new(15, 15),
            20,
            20,
        );
        assert!(state.is_in_bounds(Cell::new(0, 0)));
        assert!(state.is_in_bounds(Cell::new(19, 19)));
        assert!(!state.is_in_bounds(Cell::new(-1, 0)));
        assert!(!state.is_in_bounds(Cell::new(0, -1)));
        assert!(!state.is_in_bounds(Cell::new(20, 0)));
        assert!(!state.is_in_bounds(Cell::new(0, 20)));
        assert_eq!(state.cell_count(), 400);
    }
}
