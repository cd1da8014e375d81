use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::difficulty::{scale_interval, Difficulty, SpeedCurve};
use super::error::{GameError, GameResult};

/// Configuration for a game session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width and height of the square, wrap-around grid
    pub grid_size: usize,
    pub difficulty: Difficulty,
    /// Seconds counted down before the snake starts moving
    pub countdown_secs: u32,
    /// Poll interval while the game is paused
    pub pause_poll_ms: u64,
    /// Random obstacle draws on difficulties that place obstacles
    pub obstacle_count: usize,
    pub speed: SpeedCurve,
    /// Seed for reproducible games; random when absent
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 20,
            difficulty: Difficulty::Normal,
            countdown_secs: 3,
            pause_poll_ms: 100,
            obstacle_count: 5,
            speed: SpeedCurve::default(),
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size and difficulty
    pub fn new(grid_size: usize, difficulty: Difficulty) -> Self {
        Self {
            grid_size,
            difficulty,
            ..Default::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check that a game can be set up with this configuration
    pub fn validate(&self) -> GameResult<()> {
        if self.grid_size == 0 {
            return Err(GameError::InvalidConfig("grid_size must be positive".into()));
        }
        if self.grid_size > i32::MAX as usize {
            return Err(GameError::InvalidConfig(format!(
                "grid_size {} does not fit grid coordinates",
                self.grid_size
            )));
        }
        let length = self.difficulty.initial_snake_length();
        if self.grid_size < length {
            return Err(GameError::InvalidConfig(format!(
                "grid_size {} cannot hold an initial snake of {} segments",
                self.grid_size, length
            )));
        }
        if self.pause_poll_ms == 0 {
            return Err(GameError::InvalidConfig(
                "pause_poll_ms must be positive".into(),
            ));
        }
        // The fastest tick after the difficulty multiplier must not round to 0
        if scale_interval(self.speed.min_interval_ms, self.difficulty) == 0 {
            return Err(GameError::InvalidConfig(format!(
                "min_interval_ms {} rounds to a zero tick delay on {:?}",
                self.speed.min_interval_ms, self.difficulty
            )));
        }
        if self.speed.speedup_every_points == 0 {
            return Err(GameError::InvalidConfig(
                "speedup_every_points must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Load a configuration from a JSON file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config: Self =
            serde_json::from_str(&json).context("Failed to deserialize config")?;
        config.validate()?;
        Ok(config)
    }

    /// Save the configuration as pretty JSON, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }
        let json = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write config to {:?}", path))?;
        Ok(())
    }
}
