use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use super::{
    action::{Action, Direction},
    collision::detect_collision,
    config::GameConfig,
    difficulty::award_points,
    error::{GameError, GameResult},
    food::generate_food,
    movement::move_snake,
    state::{CollisionType, Food, FoodType, GameState, Position, Snake},
};

/// Food consumed during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FoodReward {
    /// Replacement food, already typed for the current difficulty
    pub new_food: Food,
    pub base_points: u32,
    /// Points actually added to the score
    pub points_awarded: u32,
}

/// Information about a step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepInfo {
    /// Whether the snake moved or grew this step
    pub moved: bool,
    pub food: Option<FoodReward>,
    /// Type of collision if one occurred
    pub collision_type: Option<CollisionType>,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepResult {
    /// Whether the game has terminated
    pub terminated: bool,
    /// Additional information about the step
    pub info: StepInfo,
}

impl StepResult {
    fn idle(terminated: bool) -> Self {
        Self {
            terminated,
            info: StepInfo {
                moved: false,
                food: None,
                collision_type: None,
            },
        }
    }
}

/// The game engine that handles all game logic
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> GameResult<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self { config, rng })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Build a fresh game: centred snake, initial food, then obstacles
    pub fn new_game(&mut self) -> GameResult<GameState> {
        let grid_size = self.config.grid_size;
        let difficulty = self.config.difficulty;
        let centre = (grid_size / 2) as i32;

        let snake = Snake::new(
            Position::new(centre, centre),
            Direction::Right,
            difficulty.initial_snake_length(),
            grid_size,
        );

        let food = generate_food(grid_size, &snake.body, FoodType::Regular, &mut self.rng)?;

        let obstacles = if difficulty.has_obstacles() {
            self.place_obstacles(&snake, food.position)
        } else {
            Vec::new()
        };

        debug!(
            grid_size,
            ?difficulty,
            snake_len = snake.len(),
            obstacles = obstacles.len(),
            "new game"
        );

        Ok(GameState::new(
            snake,
            food,
            obstacles,
            grid_size,
            self.config.speed.base_interval_ms(0),
        ))
    }

    /// Independent random draws; those landing on the snake, the food or an
    /// earlier obstacle are dropped.
    fn place_obstacles(&mut self, snake: &Snake, food: Position) -> Vec<Position> {
        let size = self.config.grid_size as i32;
        let mut obstacles: Vec<Position> = Vec::with_capacity(self.config.obstacle_count);

        for _ in 0..self.config.obstacle_count {
            let pos = Position::new(self.rng.gen_range(0..size), self.rng.gen_range(0..size));
            if !snake.contains(pos) && pos != food && !obstacles.contains(&pos) {
                obstacles.push(pos);
            }
        }

        obstacles
    }

    /// Apply a direction change to the state's direction slot.
    /// Returns whether the heading changed.
    pub fn apply_action(&self, state: &mut GameState, action: Action) -> bool {
        let resolved = action.resolve(state.direction);
        let changed = resolved != state.direction;
        state.direction = resolved;
        changed
    }

    /// Execute one tick: move, score, respeed, then check for collisions.
    ///
    /// Fails with [`GameError::NoSpaceAvailable`] when the snake eats food
    /// and no cell is left for the replacement; the state is marked as no
    /// longer running and the snake is left where it was.
    pub fn step(&mut self, state: &mut GameState) -> GameResult<StepResult> {
        if !state.running {
            return Ok(StepResult::idle(true));
        }
        if state.direction == Direction::None {
            return Ok(StepResult::idle(false));
        }

        let outcome = match move_snake(
            &state.snake,
            state.direction,
            state.food.position,
            state.grid_size,
            &state.obstacles,
            &mut self.rng,
        ) {
            Ok(outcome) => outcome,
            Err(err @ GameError::NoSpaceAvailable { .. }) => {
                state.running = false;
                return Err(err);
            }
            Err(err) => return Err(err),
        };

        let moved = outcome.snake != state.snake;
        state.snake = outcome.snake;
        state.ticks += 1;

        let food = outcome.food_eaten.map(|eaten| {
            let food_type = self.config.difficulty.roll_food_type(&mut self.rng);
            state.food = Food::new(eaten.new_food_position, food_type);

            let points_awarded = award_points(eaten.base_points, state.food.food_type);
            state.score += points_awarded;
            state.tick_interval_ms = self.config.speed.base_interval_ms(state.score);

            debug!(
                score = state.score,
                points_awarded,
                ?food_type,
                x = eaten.new_food_position.x,
                y = eaten.new_food_position.y,
                "food eaten"
            );

            FoodReward {
                new_food: state.food,
                base_points: eaten.base_points,
                points_awarded,
            }
        });

        let collision_type = detect_collision(&state.snake, state.grid_size, &state.obstacles);
        if collision_type.is_some() {
            state.running = false;
        }

        Ok(StepResult {
            terminated: collision_type.is_some(),
            info: StepInfo {
                moved,
                food,
                collision_type,
            },
        })
    }
}
