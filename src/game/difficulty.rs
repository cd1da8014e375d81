//! Difficulty levels and the score-driven speed curve

use clap::ValueEnum;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::state::FoodType;

/// Game difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    /// Scales the base tick interval (higher is slower)
    pub fn speed_multiplier(&self) -> f32 {
        match self {
            Difficulty::Easy => 0.7,
            Difficulty::Normal => 1.0,
            Difficulty::Hard => 1.3,
        }
    }

    /// Percent chance that freshly spawned food is golden
    pub fn golden_food_chance(&self) -> u32 {
        match self {
            Difficulty::Easy => 30,
            Difficulty::Normal => 20,
            Difficulty::Hard => 10,
        }
    }

    /// Number of segments the snake starts with
    pub fn initial_snake_length(&self) -> usize {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Normal => 3,
            Difficulty::Hard => 5,
        }
    }

    pub fn has_obstacles(&self) -> bool {
        matches!(self, Difficulty::Hard)
    }

    /// Decide the type of the next food item
    pub fn roll_food_type<R: Rng + ?Sized>(&self, rng: &mut R) -> FoodType {
        if rng.gen_range(0..100) < self.golden_food_chance() {
            FoodType::Golden
        } else {
            FoodType::Regular
        }
    }
}

/// Points credited for a food event.
///
/// The multiplier comes from the food that was just spawned, not the one
/// that was eaten.
pub fn award_points(base_points: u32, spawned: FoodType) -> u32 {
    base_points * spawned.multiplier()
}

/// How the base tick interval shrinks as the score grows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedCurve {
    /// Interval at score zero
    pub base_interval_ms: u64,
    /// Floor the interval never drops below
    pub min_interval_ms: u64,
    /// Score granularity of each speed-up
    pub speedup_every_points: u32,
    pub speedup_step_ms: u64,
}

impl Default for SpeedCurve {
    fn default() -> Self {
        Self {
            base_interval_ms: 300,
            min_interval_ms: 80,
            speedup_every_points: 5,
            speedup_step_ms: 5,
        }
    }
}

impl SpeedCurve {
    /// `max(min, base - floor(score / every) * step)`
    pub fn base_interval_ms(&self, score: u32) -> u64 {
        let steps = u64::from(score / self.speedup_every_points.max(1));
        self.base_interval_ms
            .saturating_sub(steps.saturating_mul(self.speedup_step_ms))
            .max(self.min_interval_ms)
    }

    /// Effective delay before the next tick, truncated to whole milliseconds
    pub fn tick_delay_ms(&self, score: u32, difficulty: Difficulty) -> u64 {
        scale_interval(self.base_interval_ms(score), difficulty)
    }

    pub fn tick_delay(&self, score: u32, difficulty: Difficulty) -> Duration {
        Duration::from_millis(self.tick_delay_ms(score, difficulty))
    }
}

/// Apply the difficulty multiplier to a base interval
pub fn scale_interval(interval_ms: u64, difficulty: Difficulty) -> u64 {
    (interval_ms as f32 * difficulty.speed_multiplier()) as u64
}
