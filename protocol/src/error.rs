use minesweep_core::{Difficulty, GameError};
use std::path::PathBuf;
use thiserror::Error;

/// Reasons a score submission is refused before it reaches storage.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    #[error("Invalid difficulty level: {0}")]
    UnknownDifficulty(String),
    #[error("Invalid score: {0}")]
    InvalidScore(i64),
}

#[derive(Error, Debug)]
pub enum LeaderboardError {
    #[error(transparent)]
    Rejected(#[from] SubmissionError),
    #[error("Leaderboard unavailable: {0}")]
    Unavailable(String),
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Could not access record file {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed record data")]
    Json(#[from] serde_json::Error),
    #[error("Record store unavailable: {0}")]
    Unavailable(String),
}

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Could not read settings file {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed settings")]
    Toml(#[from] toml::de::Error),
    #[error("Unknown difficulty level: {0}")]
    UnknownDifficulty(String),
    #[error("Invalid configuration for {difficulty}")]
    InvalidDifficulty {
        difficulty: Difficulty,
        #[source]
        source: GameError,
    },
}
