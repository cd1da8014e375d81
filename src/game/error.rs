use thiserror::Error;

/// Errors raised by the simulation core
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// Every cell of the grid is taken, so no food can be placed
    #[error("no free cell left on a {grid_size}x{grid_size} grid")]
    NoSpaceAvailable { grid_size: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type GameResult<T> = Result<T, GameError>;
