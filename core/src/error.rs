use thiserror::Error;

use crate::Difficulty;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board must have at least one row and one column")]
    EmptyBoard,
    #[error("Too many mines, at least one cell must be safe")]
    TooManyMines,
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("No configuration for difficulty {0}")]
    UnknownDifficulty(Difficulty),
}

pub type Result<T> = core::result::Result<T, GameError>;
