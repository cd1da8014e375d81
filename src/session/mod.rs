//! Async game loop driving the simulation core on a timer

pub mod handle;
pub mod runner;

pub use handle::{Command, Controller, GameEvent, SessionHandle, SessionOutcome};
pub use runner::{GameSession, GameSnapshot, Phase};
