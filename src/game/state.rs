use serde::{Deserialize, Serialize};

use super::action::Direction;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta, wrapping around both edges of a square grid
    pub fn wrapped_by(&self, dx: i32, dy: i32, grid_size: usize) -> Self {
        let size = grid_size as i32;
        Self {
            x: (self.x + dx + size).rem_euclid(size),
            y: (self.y + dy + size).rem_euclid(size),
        }
    }

    /// Move one cell in a direction on a toroidal grid.
    /// `Direction::None` leaves the position where it is.
    pub fn wrapped_step(&self, direction: Direction, grid_size: usize) -> Self {
        let (dx, dy) = direction.delta();
        self.wrapped_by(dx, dy, grid_size)
    }

    /// Check if the position lies on a square grid of the given size
    pub fn is_on_grid(&self, grid_size: usize) -> bool {
        let size = grid_size as i32;
        (0..size).contains(&self.x) && (0..size).contains(&self.y)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
}

impl Snake {
    /// Create a snake with its head at `head` and `length` segments trailing
    /// behind it, opposite to `heading`.
    pub fn new(head: Position, heading: Direction, length: usize, grid_size: usize) -> Self {
        let (dx, dy) = heading.delta();
        let mut body = Vec::with_capacity(length.max(1));
        body.push(head);

        for i in 1..length {
            let prev = body[i - 1];
            body.push(prev.wrapped_by(-dx, -dy, grid_size));
        }

        Self { body }
    }

    pub fn from_segments(body: Vec<Position>) -> Self {
        Self { body }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get body segments (excluding head)
    pub fn body_segments(&self) -> &[Position] {
        &self.body[1..]
    }

    /// Check if position collides with snake body (excluding head)
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body_segments().contains(&pos)
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Kind of food on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FoodType {
    #[default]
    Regular,
    Golden,
}

impl FoodType {
    /// Scoring multiplier carried by this food type
    pub fn multiplier(&self) -> u32 {
        match self {
            FoodType::Regular => 1,
            FoodType::Golden => 3,
        }
    }
}

/// A food item on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Food {
    pub position: Position,
    pub food_type: FoodType,
}

impl Food {
    pub fn new(position: Position, food_type: FoodType) -> Self {
        Self {
            position,
            food_type,
        }
    }
}

/// Type of collision that ended a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionType {
    /// Snake head ran into its own body
    SelfCollision,
    /// Snake head sits on an obstacle cell
    Obstacle,
}

/// Complete simulation state of one game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub snake: Snake,
    pub food: Food,
    pub direction: Direction,
    pub obstacles: Vec<Position>,
    pub grid_size: usize,
    pub score: u32,
    /// Base tick interval, before the difficulty speed multiplier
    pub tick_interval_ms: u64,
    pub running: bool,
    pub paused: bool,
    pub ticks: u64,
}

impl GameState {
    /// Create a new game state
    pub fn new(
        snake: Snake,
        food: Food,
        obstacles: Vec<Position>,
        grid_size: usize,
        tick_interval_ms: u64,
    ) -> Self {
        Self {
            snake,
            food,
            direction: Direction::None,
            obstacles,
            grid_size,
            score: 0,
            tick_interval_ms,
            running: true,
            paused: false,
            ticks: 0,
        }
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snake.contains(pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_wrapping() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.wrapped_by(1, 0, 20), Position::new(6, 5));
        assert_eq!(pos.wrapped_by(0, -1, 20), Position::new(5, 4));

        assert_eq!(
            Position::new(19, 3).wrapped_step(Direction::Right, 20),
            Position::new(0, 3)
        );
        assert_eq!(
            Position::new(0, 3).wrapped_step(Direction::Left, 20),
            Position::new(19, 3)
        );
        assert_eq!(
            Position::new(4, 0).wrapped_step(Direction::Up, 20),
            Position::new(4, 19)
        );
        assert_eq!(
            Position::new(4, 19).wrapped_step(Direction::Down, 20),
            Position::new(4, 0)
        );
        assert_eq!(
            Position::new(4, 7).wrapped_step(Direction::None, 20),
            Position::new(4, 7)
        );
    }

    #[test]
    fn test_snake_creation() {
        let snake = Snake::new(Position::new(10, 10), Direction::Right, 3, 20);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(10, 10));
        assert_eq!(snake.body[1], Position::new(9, 10));
        assert_eq!(snake.body[2], Position::new(8, 10));
    }

    #[test]
    fn test_snake_creation_wraps() {
        let snake = Snake::new(Position::new(1, 0), Direction::Right, 3, 5);
        assert_eq!(
            snake.body,
            vec![Position::new(1, 0), Position::new(0, 0), Position::new(4, 0)]
        );
    }

    #[test]
    fn test_collision_detection() {
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 3, 20);
        assert!(!snake.collides_with_body(Position::new(5, 5))); // head
        assert!(snake.collides_with_body(Position::new(4, 5))); // body
        assert!(!snake.collides_with_body(Position::new(10, 10))); // empty
    }

    #[test]
    fn test_food_multiplier() {
        assert_eq!(FoodType::Regular.multiplier(), 1);
        assert_eq!(FoodType::Golden.multiplier(), 3);
    }

    #[test]
    fn test_new_state_waits_for_direction() {
        let state = GameState::new(
            Snake::new(Position::new(5, 5), Direction::Right, 1, 10),
            Food::new(Position::new(1, 1), FoodType::Regular),
            vec![],
            10,
            300,
        );

        assert_eq!(state.direction, Direction::None);
        assert!(state.running);
        assert!(!state.paused);
        assert_eq!(state.score, 0);
        assert!(state.is_occupied_by_snake(Position::new(5, 5)));
        assert!(Position::new(9, 9).is_on_grid(10));
        assert!(!Position::new(10, 0).is_on_grid(10));
    }
}
