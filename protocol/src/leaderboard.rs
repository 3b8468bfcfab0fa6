use minesweep_core::{BoardGenerator, Difficulty, GameSession, GameStatus};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use time::OffsetDateTime;

use crate::*;

/// A score as it arrives over the wire, every field may be missing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSubmission {
    pub username: Option<String>,
    pub difficulty: Option<String>,
    pub score: Option<i64>,
}

impl RawSubmission {
    pub fn validate(self) -> Result<ScoreSubmission, SubmissionError> {
        let username = self
            .username
            .filter(|name| !name.is_empty())
            .ok_or(SubmissionError::MissingField("username"))?;
        let difficulty = self
            .difficulty
            .filter(|difficulty| !difficulty.is_empty())
            .ok_or(SubmissionError::MissingField("difficulty"))?;
        let score = self.score.ok_or(SubmissionError::MissingField("score"))?;

        let difficulty = difficulty
            .parse::<Difficulty>()
            .map_err(|_| SubmissionError::UnknownDifficulty(difficulty))?;
        let score = u32::try_from(score).map_err(|_| SubmissionError::InvalidScore(score))?;

        Ok(ScoreSubmission {
            username,
            difficulty,
            score,
        })
    }
}

/// A validated `(username, difficulty, elapsed)` triple of a won game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSubmission {
    pub username: String,
    pub difficulty: Difficulty,
    pub score: u32,
}

impl TryFrom<RawSubmission> for ScoreSubmission {
    type Error = SubmissionError;

    fn try_from(raw: RawSubmission) -> Result<Self, Self::Error> {
        raw.validate()
    }
}

/// A stored score, lower is better.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub id: u64,
    pub username: String,
    pub difficulty: Difficulty,
    pub score: u32,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub id: u64,
    pub message: String,
}

impl From<&ScoreEntry> for SubmitResponse {
    fn from(entry: &ScoreEntry) -> Self {
        Self {
            id: entry.id,
            message: "Score saved successfully".to_owned(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl From<&LeaderboardError> for ErrorResponse {
    fn from(err: &LeaderboardError) -> Self {
        Self {
            error: err.to_string(),
        }
    }
}

/// Score storage ranked ascending per difficulty.
pub trait Leaderboard {
    fn submit(&mut self, submission: ScoreSubmission) -> Result<ScoreEntry, LeaderboardError>;

    /// Best `limit` entries for `difficulty`, lowest score first.
    fn top(&self, difficulty: Difficulty, limit: usize) -> Result<Vec<ScoreEntry>, LeaderboardError>;

    /// Validates a wire submission first, rejected ones never reach storage.
    fn submit_raw(&mut self, raw: RawSubmission) -> Result<ScoreEntry, LeaderboardError> {
        let submission = raw.validate()?;
        self.submit(submission)
    }

    fn top_all(
        &self,
        limit: usize,
    ) -> Result<BTreeMap<Difficulty, Vec<ScoreEntry>>, LeaderboardError> {
        Difficulty::ALL
            .into_iter()
            .map(|difficulty| {
                self.top(difficulty, limit)
                    .map(|entries| (difficulty, entries))
            })
            .collect()
    }
}

/// In-process leaderboard, entries live as long as the value.
#[derive(Clone, Debug, Default)]
pub struct MemoryLeaderboard {
    entries: Vec<ScoreEntry>,
    next_id: u64,
}

impl MemoryLeaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Leaderboard for MemoryLeaderboard {
    fn submit(&mut self, submission: ScoreSubmission) -> Result<ScoreEntry, LeaderboardError> {
        self.next_id += 1;
        let entry = ScoreEntry {
            id: self.next_id,
            username: submission.username,
            difficulty: submission.difficulty,
            score: submission.score,
            created_at: OffsetDateTime::now_utc(),
        };
        log::debug!(
            "Stored score {} for {} on {}",
            entry.score,
            entry.username,
            entry.difficulty
        );
        self.entries.push(entry.clone());
        Ok(entry)
    }

    fn top(&self, difficulty: Difficulty, limit: usize) -> Result<Vec<ScoreEntry>, LeaderboardError> {
        let mut entries: Vec<_> = self
            .entries
            .iter()
            .filter(|entry| entry.difficulty == difficulty)
            .cloned()
            .collect();
        entries.sort_by_key(|entry| (entry.score, entry.id));
        entries.truncate(limit);
        Ok(entries)
    }
}

/// Sends a won game to the leaderboard, any failure is logged and dropped.
pub fn submit_win<L, G>(
    leaderboard: &mut L,
    username: &str,
    session: &GameSession<G>,
) -> Option<ScoreEntry>
where
    L: Leaderboard + ?Sized,
    G: BoardGenerator,
{
    if session.status() != GameStatus::Won {
        return None;
    }

    let raw = RawSubmission {
        username: Some(username.to_owned()),
        difficulty: Some(session.difficulty().name().to_owned()),
        score: Some(session.elapsed().into()),
    };
    match leaderboard.submit_raw(raw) {
        Ok(entry) => Some(entry),
        Err(err) => {
            log::warn!("Score submission failed: {}", err);
            None
        }
    }
}
