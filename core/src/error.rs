use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("coordinates outside the board")]
    OutOfBounds,
    #[error("mine count must be positive and leave at least one safe cell")]
    InvalidMineCount,
    #[error("mines are already placed for this session")]
    MinesAlreadyPlaced,
}

pub type Result<T> = std::result::Result<T, GameError>;
