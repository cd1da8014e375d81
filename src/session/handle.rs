//! The surface a running session exposes to input producers and observers

use tokio::sync::{mpsc, watch};
use tokio::task::{JoinError, JoinHandle};

use super::runner::GameSnapshot;
use crate::game::{CollisionType, Direction, FoodType, Position};

/// Requests pushed into a running session
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Turn to a direction; reversals are ignored
    Turn(Direction),
    /// Drag gesture; the dominant axis picks the direction
    Swipe { dx: f32, dy: f32 },
    TogglePause,
    Stop,
}

/// Notifications emitted by a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    FoodEaten {
        new_food_position: Position,
        base_points: u32,
        /// Type of the replacement food
        food_type: FoodType,
        points_awarded: u32,
        score: u32,
    },
    GameOver {
        final_score: u32,
        collision: CollisionType,
    },
    /// The snake filled the grid; no cell was left for new food
    BoardFull { final_score: u32 },
}

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    GameOver {
        final_score: u32,
        collision: CollisionType,
    },
    BoardFull {
        final_score: u32,
    },
    /// Stopped from outside before the game ended
    Stopped {
        score: u32,
    },
}

impl SessionOutcome {
    pub fn score(&self) -> u32 {
        match *self {
            SessionOutcome::GameOver { final_score, .. } => final_score,
            SessionOutcome::BoardFull { final_score } => final_score,
            SessionOutcome::Stopped { score } => score,
        }
    }
}

/// Cloneable sender for input producers such as gesture handlers.
///
/// Sends return `false` once the session has finished.
#[derive(Debug, Clone)]
pub struct Controller {
    commands: mpsc::UnboundedSender<Command>,
}

impl Controller {
    pub(crate) fn new(commands: mpsc::UnboundedSender<Command>) -> Self {
        Self { commands }
    }

    pub fn send(&self, command: Command) -> bool {
        self.commands.send(command).is_ok()
    }

    pub fn turn(&self, direction: Direction) -> bool {
        self.send(Command::Turn(direction))
    }

    pub fn swipe(&self, dx: f32, dy: f32) -> bool {
        self.send(Command::Swipe { dx, dy })
    }

    pub fn toggle_pause(&self) -> bool {
        self.send(Command::TogglePause)
    }

    pub fn stop(&self) -> bool {
        self.send(Command::Stop)
    }
}

/// Owner's handle on a spawned session.
///
/// Dropping the handle (and every [`Controller`] cloned from it) stops the
/// session at its next suspension point.
pub struct SessionHandle {
    controller: Controller,
    snapshots: watch::Receiver<GameSnapshot>,
    events: mpsc::UnboundedReceiver<GameEvent>,
    task: JoinHandle<SessionOutcome>,
}

impl SessionHandle {
    pub(crate) fn new(
        controller: Controller,
        snapshots: watch::Receiver<GameSnapshot>,
        events: mpsc::UnboundedReceiver<GameEvent>,
        task: JoinHandle<SessionOutcome>,
    ) -> Self {
        Self {
            controller,
            snapshots,
            events,
            task,
        }
    }

    pub fn controller(&self) -> Controller {
        self.controller.clone()
    }

    pub fn turn(&self, direction: Direction) -> bool {
        self.controller.turn(direction)
    }

    pub fn swipe(&self, dx: f32, dy: f32) -> bool {
        self.controller.swipe(dx, dy)
    }

    pub fn toggle_pause(&self) -> bool {
        self.controller.toggle_pause()
    }

    pub fn stop(&self) -> bool {
        self.controller.stop()
    }

    /// Latest fully applied state
    pub fn snapshot(&self) -> GameSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Receiver that is notified after every applied change
    pub fn subscribe(&self) -> watch::Receiver<GameSnapshot> {
        self.snapshots.clone()
    }

    /// Next event, or `None` once the session has ended and all events
    /// were drained
    pub async fn next_event(&mut self) -> Option<GameEvent> {
        self.events.recv().await
    }

    pub fn try_next_event(&mut self) -> Option<GameEvent> {
        self.events.try_recv().ok()
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Cancel the session task without waiting for a suspension point
    pub fn abort(&self) {
        self.task.abort();
    }

    /// Wait for the session to end. The session keeps running until it
    /// finishes on its own or is stopped through a [`Controller`].
    pub async fn join(self) -> Result<SessionOutcome, JoinError> {
        let Self {
            controller, task, ..
        } = self;
        let outcome = task.await;
        drop(controller);
        outcome
    }
}
