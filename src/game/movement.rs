//! Snake translation, growth and food consumption for a single tick

use rand::Rng;

use super::action::Direction;
use super::error::GameResult;
use super::food::generate_food;
use super::state::{FoodType, Position, Snake};

/// Points granted for eating one food item, before any multiplier
pub const BASE_FOOD_POINTS: u32 = 10;

/// Emitted when the snake eats the food on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FoodEaten {
    /// Where the replacement food was placed
    pub new_food_position: Position,
    pub base_points: u32,
}

/// Result of moving the snake by one cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub snake: Snake,
    pub food_eaten: Option<FoodEaten>,
}

impl MoveOutcome {
    fn unchanged(snake: &Snake) -> Self {
        Self {
            snake: snake.clone(),
            food_eaten: None,
        }
    }
}

/// Advance the snake one cell in `direction` on a wrap-around grid.
///
/// A head that would land on an obstacle bounces: the snake is returned
/// unchanged. Landing on the food grows the snake by one segment and places
/// replacement food outside the grown snake and the obstacles.
pub fn move_snake<R: Rng + ?Sized>(
    snake: &Snake,
    direction: Direction,
    food_position: Position,
    grid_size: usize,
    obstacles: &[Position],
    rng: &mut R,
) -> GameResult<MoveOutcome> {
    if direction == Direction::None {
        return Ok(MoveOutcome::unchanged(snake));
    }

    let new_head = snake.head().wrapped_step(direction, grid_size);

    if obstacles.contains(&new_head) {
        return Ok(MoveOutcome::unchanged(snake));
    }

    let mut body = Vec::with_capacity(snake.len() + 1);
    body.push(new_head);
    body.extend_from_slice(&snake.body);

    if new_head == food_position {
        let new_food = generate_food(
            grid_size,
            body.iter().chain(obstacles.iter()),
            FoodType::Regular,
            rng,
        )?;

        return Ok(MoveOutcome {
            snake: Snake::from_segments(body),
            food_eaten: Some(FoodEaten {
                new_food_position: new_food.position,
                base_points: BASE_FOOD_POINTS,
            }),
        });
    }

    body.pop();
    Ok(MoveOutcome {
        snake: Snake::from_segments(body),
        food_eaten: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::error::GameError;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(11)
    }

    fn snake(cells: &[(i32, i32)]) -> Snake {
        Snake::from_segments(cells.iter().map(|&(x, y)| Position::new(x, y)).collect())
    }

    #[test]
    fn test_no_direction_leaves_snake_unchanged() {
        let original = snake(&[(3, 3), (2, 3), (1, 3)]);
        let outcome = move_snake(
            &original,
            Direction::None,
            Position::new(3, 3),
            20,
            &[],
            &mut rng(),
        )
        .unwrap();

        assert_eq!(outcome.snake, original);
        assert_eq!(outcome.food_eaten, None);
    }

    #[test]
    fn test_eating_food_grows_and_reports_points() {
        let original = snake(&[(10, 10)]);
        let outcome = move_snake(
            &original,
            Direction::Right,
            Position::new(11, 10),
            20,
            &[],
            &mut rng(),
        )
        .unwrap();

        assert_eq!(outcome.snake, snake(&[(11, 10), (10, 10)]));
        let eaten = outcome.food_eaten.expect("food should be eaten");
        assert_eq!(eaten.base_points, 10);
        assert!(!outcome.snake.contains(eaten.new_food_position));
    }

    #[test]
    fn test_plain_move_keeps_length() {
        let original = snake(&[(5, 5), (4, 5), (3, 5)]);
        let outcome = move_snake(
            &original,
            Direction::Down,
            Position::new(0, 0),
            20,
            &[],
            &mut rng(),
        )
        .unwrap();

        assert_eq!(outcome.snake, snake(&[(5, 6), (5, 5), (4, 5)]));
        assert_eq!(outcome.snake.len(), original.len());
        assert!(outcome.food_eaten.is_none());
    }

    #[test]
    fn test_wraps_at_right_edge() {
        let original = snake(&[(19, 10), (18, 10)]);
        let outcome = move_snake(
            &original,
            Direction::Right,
            Position::new(5, 5),
            20,
            &[],
            &mut rng(),
        )
        .unwrap();

        assert_eq!(outcome.snake.head(), Position::new(0, 10));
        assert_eq!(outcome.snake.len(), 2);
    }

    #[test]
    fn test_wraps_at_top_edge() {
        let original = snake(&[(4, 0)]);
        let outcome = move_snake(
            &original,
            Direction::Up,
            Position::new(5, 5),
            20,
            &[],
            &mut rng(),
        )
        .unwrap();

        assert_eq!(outcome.snake.head(), Position::new(4, 19));
    }

    #[test]
    fn test_obstacle_bounces_snake() {
        let original = snake(&[(5, 5), (4, 5)]);
        let obstacles = [Position::new(6, 5)];

        // Food behind the obstacle must not be eaten either
        let outcome = move_snake(
            &original,
            Direction::Right,
            Position::new(6, 5),
            20,
            &obstacles,
            &mut rng(),
        )
        .unwrap();

        assert_eq!(outcome.snake, original);
        assert!(outcome.food_eaten.is_none());
    }

    #[test]
    fn test_new_food_avoids_obstacles() {
        // 2x2 grid: snake grows into the last free cell besides one obstacle
        let original = snake(&[(0, 0)]);
        let obstacles = [Position::new(1, 1)];
        let outcome = move_snake(
            &original,
            Direction::Right,
            Position::new(1, 0),
            2,
            &obstacles,
            &mut rng(),
        )
        .unwrap();

        let eaten = outcome.food_eaten.unwrap();
        assert_eq!(eaten.new_food_position, Position::new(0, 1));
    }

    #[test]
    fn test_eating_last_free_cell_reports_no_space() {
        let original = snake(&[(0, 0), (0, 1), (1, 1)]);
        let result = move_snake(
            &original,
            Direction::Right,
            Position::new(1, 0),
            2,
            &[],
            &mut rng(),
        );

        assert_eq!(result, Err(GameError::NoSpaceAvailable { grid_size: 2 }));
    }
}
