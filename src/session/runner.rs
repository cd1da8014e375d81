//! The tick scheduler: countdown, running, paused and terminal phases
//!
//! A session is a single tokio task that exclusively owns the
//! [`GameEngine`] and its [`GameState`]. It suspends on timed waits only,
//! applying incoming commands while it waits, and publishes an immutable
//! [`GameSnapshot`] after every change it applies.

use serde::Serialize;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info, warn};

use super::handle::{Command, Controller, GameEvent, SessionHandle, SessionOutcome};
use crate::game::{
    Action, CollisionType, Direction, GameConfig, GameEngine, GameError, GameResult, GameState,
};

/// Length of one countdown step
const COUNTDOWN_STEP: Duration = Duration::from_secs(1);

/// Session state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    /// Seconds left before the snake starts moving
    Countdown(u32),
    Running,
    Paused,
    GameOver,
    BoardFull,
    Stopped,
}

impl Phase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::GameOver | Phase::BoardFull | Phase::Stopped)
    }
}

/// Immutable copy of the session published after each applied change
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameSnapshot {
    pub phase: Phase,
    pub state: GameState,
}

pub struct GameSession {
    engine: GameEngine,
    state: GameState,
    phase: Phase,
    collision: Option<CollisionType>,
    commands: mpsc::UnboundedReceiver<Command>,
    events: mpsc::UnboundedSender<GameEvent>,
    snapshots: watch::Sender<GameSnapshot>,
}

impl GameSession {
    /// Start a new game on the current tokio runtime.
    ///
    /// Fails when the configuration is invalid or the grid has no room for
    /// the first food item.
    pub fn spawn(config: GameConfig) -> GameResult<SessionHandle> {
        let mut engine = GameEngine::new(config)?;
        let state = engine.new_game()?;
        Self::spawn_with_state(engine, state)
    }

    /// Start a session from a prepared state, e.g. a scripted scenario.
    ///
    /// The state must hold a non-empty snake on the engine's grid.
    pub fn spawn_with_state(engine: GameEngine, mut state: GameState) -> GameResult<SessionHandle> {
        let grid_size = engine.config().grid_size;
        if state.grid_size != grid_size {
            return Err(GameError::InvalidConfig(format!(
                "state grid_size {} does not match configured grid_size {}",
                state.grid_size, grid_size
            )));
        }
        if state.snake.is_empty() {
            return Err(GameError::InvalidConfig("snake has no segments".into()));
        }
        if !state.snake.body.iter().all(|segment| segment.is_on_grid(grid_size)) {
            return Err(GameError::InvalidConfig("snake segment off the grid".into()));
        }

        let countdown = engine.config().countdown_secs;
        state.direction = Direction::None;
        state.running = true;
        state.paused = false;

        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshot_rx) = watch::channel(GameSnapshot {
            phase: Phase::Countdown(countdown),
            state: state.clone(),
        });

        let mut session = Self {
            engine,
            state,
            phase: Phase::Countdown(countdown),
            collision: None,
            commands: command_rx,
            events: event_tx,
            snapshots: snapshot_tx,
        };
        if countdown == 0 {
            session.start_running();
        }

        let task = tokio::spawn(session.run());
        Ok(SessionHandle::new(
            Controller::new(command_tx),
            snapshot_rx,
            event_rx,
            task,
        ))
    }

    async fn run(mut self) -> SessionOutcome {
        info!(
            difficulty = ?self.engine.config().difficulty,
            grid_size = self.state.grid_size,
            "session started"
        );

        loop {
            let waited = self.phase;
            if waited.is_terminal() {
                return self.outcome();
            }

            let delay = match waited {
                Phase::Countdown(_) => COUNTDOWN_STEP,
                Phase::Paused => Duration::from_millis(self.engine.config().pause_poll_ms),
                _ => self
                    .engine
                    .config()
                    .speed
                    .tick_delay(self.state.score, self.engine.config().difficulty),
            };

            if !self.wait(delay).await {
                self.phase = Phase::Stopped;
                info!(score = self.state.score, "session stopped");
                return self.outcome();
            }

            self.advance(waited);
        }
    }

    /// Sleep for `delay`, applying commands as they arrive without
    /// restarting the timer. Returns false when the session must stop.
    async fn wait(&mut self, delay: Duration) -> bool {
        let sleep = tokio::time::sleep(delay);
        tokio::pin!(sleep);

        loop {
            tokio::select! {
                _ = &mut sleep => return true,
                command = self.commands.recv() => match command {
                    Some(Command::Stop) | None => return false,
                    Some(command) => self.handle_command(command),
                },
            }
        }
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::Turn(direction) => self.turn(direction.into()),
            Command::Swipe { dx, dy } => self.turn(Action::Move(Direction::from_swipe(dx, dy))),
            Command::TogglePause => self.toggle_pause(),
            Command::Stop => {}
        }
    }

    fn turn(&mut self, action: Action) {
        if self.phase != Phase::Running {
            return;
        }
        if self.engine.apply_action(&mut self.state, action) {
            debug!(direction = ?self.state.direction, "direction changed");
            self.publish();
        }
    }

    fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            Phase::Running => Phase::Paused,
            Phase::Paused => Phase::Running,
            _ => return,
        };
        self.state.paused = self.phase == Phase::Paused;
        info!(paused = self.state.paused, "pause toggled");
        self.publish();
    }

    /// Apply whatever the elapsed wait was for. A tick only happens when the
    /// session was running for the whole wait and still is.
    fn advance(&mut self, waited: Phase) {
        match (waited, self.phase) {
            (Phase::Countdown(left), Phase::Countdown(_)) => {
                let left = left.saturating_sub(1);
                if left == 0 {
                    self.start_running();
                } else {
                    self.phase = Phase::Countdown(left);
                    debug!(left, "countdown");
                    self.publish();
                }
            }
            (Phase::Running, Phase::Running) => self.tick(),
            _ => {}
        }
    }

    fn start_running(&mut self) {
        self.phase = Phase::Running;
        self.state.direction = Direction::Right;
        info!("countdown finished, snake released");
        self.publish();
    }

    fn tick(&mut self) {
        let mut pending = Vec::with_capacity(2);

        match self.engine.step(&mut self.state) {
            Ok(result) => {
                if let Some(reward) = result.info.food {
                    pending.push(GameEvent::FoodEaten {
                        new_food_position: reward.new_food.position,
                        base_points: reward.base_points,
                        food_type: reward.new_food.food_type,
                        points_awarded: reward.points_awarded,
                        score: self.state.score,
                    });
                }
                if let Some(collision) = result.info.collision_type {
                    self.phase = Phase::GameOver;
                    self.collision = Some(collision);
                    info!(score = self.state.score, ?collision, "game over");
                    pending.push(GameEvent::GameOver {
                        final_score: self.state.score,
                        collision,
                    });
                }
            }
            Err(GameError::NoSpaceAvailable { grid_size }) => {
                self.phase = Phase::BoardFull;
                warn!(score = self.state.score, grid_size, "board full, no room for food");
                pending.push(GameEvent::BoardFull {
                    final_score: self.state.score,
                });
            }
            Err(err) => {
                error!(%err, "tick failed");
                self.state.running = false;
                self.phase = Phase::Stopped;
            }
        }

        // Observers see the finished tick before any of its events
        self.publish();
        for event in pending {
            let _ = self.events.send(event);
        }
    }

    fn publish(&self) {
        self.snapshots.send_replace(GameSnapshot {
            phase: self.phase,
            state: self.state.clone(),
        });
    }

    fn outcome(&self) -> SessionOutcome {
        match (self.phase, self.collision) {
            (Phase::GameOver, Some(collision)) => SessionOutcome::GameOver {
                final_score: self.state.score,
                collision,
            },
            (Phase::BoardFull, _) => SessionOutcome::BoardFull {
                final_score: self.state.score,
            },
            _ => SessionOutcome::Stopped {
                score: self.state.score,
            },
        }
    }
}
