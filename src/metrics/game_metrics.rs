use std::time::{Duration, Instant};

use crate::game::FoodType;
use crate::session::{GameEvent, SessionOutcome};

/// Statistics gathered across the games of one process
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub high_score: u32,
    pub games_played: u32,
    pub food_eaten: u32,
    pub golden_spawned: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            high_score: 0,
            games_played: 0,
            food_eaten: 0,
            golden_spawned: 0,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.start_time.elapsed();
    }

    pub fn on_game_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
    }

    pub fn on_event(&mut self, event: &GameEvent) {
        if let GameEvent::FoodEaten { food_type, .. } = event {
            self.food_eaten += 1;
            if *food_type == FoodType::Golden {
                self.golden_spawned += 1;
            }
        }
    }

    /// Record a finished session. Stopped sessions do not count as played.
    pub fn on_session_end(&mut self, outcome: &SessionOutcome) {
        self.update();
        if matches!(outcome, SessionOutcome::Stopped { .. }) {
            return;
        }

        self.games_played += 1;
        if outcome.score() > self.high_score {
            self.high_score = outcome.score();
        }
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
