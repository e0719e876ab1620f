use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("invalid board configuration")]
    InvalidConfiguration,
    #[error("coordinates outside the board")]
    OutOfBounds,
    #[error("target cell cannot be acted on in its current state")]
    InvalidTargetState,
    #[error("session already ended, no new moves are accepted")]
    SessionTerminal,
}

pub type Result<T> = core::result::Result<T, GameError>;
