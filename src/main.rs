use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;
use std::time::Duration;
use swipe_snake::game::{Difficulty, GameConfig};
use swipe_snake::metrics::GameMetrics;
use swipe_snake::session::{GameEvent, GameSession, SessionOutcome};
use tokio::time::interval;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "swipe-snake")]
#[command(version, about = "Headless snake simulation steered by random swipes")]
struct Cli {
    /// JSON config file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum)]
    difficulty: Option<Difficulty>,

    /// Width and height of the wrap-around grid
    #[arg(long)]
    grid_size: Option<usize>,

    /// Seed for reproducible games
    #[arg(long)]
    seed: Option<u64>,

    /// Milliseconds between simulated swipe gestures
    #[arg(long, default_value = "450")]
    gesture_ms: u64,

    /// Number of games to play back to back
    #[arg(long, default_value = "1")]
    games: u32,

    /// Write the effective configuration to this path before playing
    #[arg(long)]
    save_config: Option<PathBuf>,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };

        if let Some(difficulty) = self.difficulty {
            config.difficulty = difficulty;
        }
        if let Some(grid_size) = self.grid_size {
            config.grid_size = grid_size;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        config.validate().context("Invalid game configuration")?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = cli.game_config()?;

    if let Some(path) = &cli.save_config {
        config.save(path)?;
        info!(?path, "configuration saved");
    }

    let mut metrics = GameMetrics::new();
    for game in 0..cli.games {
        let mut game_config = config.clone();
        game_config.seed = config.seed.map(|seed| seed.wrapping_add(u64::from(game)));

        let outcome = play(game_config, Duration::from_millis(cli.gesture_ms), &mut metrics).await?;
        println!("game {}: {:?} after {}", game + 1, outcome, metrics.format_time());

        if matches!(outcome, SessionOutcome::Stopped { .. }) {
            break;
        }
    }

    info!(
        games_played = metrics.games_played,
        high_score = metrics.high_score,
        food_eaten = metrics.food_eaten,
        "finished"
    );

    Ok(())
}

/// Run one session, feeding it random swipes until it ends or Ctrl+C
async fn play(
    config: GameConfig,
    gesture_every: Duration,
    metrics: &mut GameMetrics,
) -> Result<SessionOutcome> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed ^ 0x5eed),
        None => StdRng::from_entropy(),
    };

    metrics.on_game_start();
    let mut handle = GameSession::spawn(config).context("Failed to start game")?;
    let controller = handle.controller();
    let mut gestures = interval(gesture_every);

    loop {
        tokio::select! {
            // Session events; the channel closes when the session ends
            event = handle.next_event() => match event {
                Some(event) => {
                    metrics.on_event(&event);
                    if let GameEvent::FoodEaten { score, food_type, .. } = event {
                        info!(score, ?food_type, "food eaten");
                    }
                }
                None => break,
            },

            // Simulated gesture input
            _ = gestures.tick() => {
                let dx = rng.gen_range(-40.0..40.0);
                let dy = rng.gen_range(-40.0..40.0);
                controller.swipe(dx, dy);
            }

            // Handle Ctrl+C
            _ = tokio::signal::ctrl_c() => {
                controller.stop();
            }
        }
    }

    let outcome = handle.join().await.context("Game task failed")?;
    metrics.on_session_end(&outcome);
    Ok(outcome)
}
