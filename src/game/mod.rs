//! Core game logic module for Snake
//!
//! This module contains all the simulation logic without any I/O, timing or
//! rendering dependencies. The [`session`](crate::session) module drives it
//! on a timer.

pub mod action;
pub mod collision;
pub mod config;
pub mod difficulty;
pub mod engine;
pub mod error;
pub mod food;
pub mod movement;
pub mod state;

// Re-export commonly used types
pub use action::{Action, Direction};
pub use collision::{detect_collision, is_collision};
pub use config::GameConfig;
pub use difficulty::{award_points, Difficulty, SpeedCurve};
pub use engine::{FoodReward, GameEngine, StepInfo, StepResult};
pub use error::{GameError, GameResult};
pub use food::generate_food;
pub use movement::{move_snake, FoodEaten, MoveOutcome, BASE_FOOD_POINTS};
pub use state::{CollisionType, Food, FoodType, GameState, Position, Snake};
