use minesweep_core::{Difficulty, DifficultyTable, GameConfig};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::*;

/// Settings file layout:
///
/// ```toml
/// records_path = "records.json"
///
/// [leaderboard]
/// top_n = 5
///
/// [difficulties.easy]
/// rows = 8
/// cols = 8
/// mines = 10
/// ```
///
/// Every section is optional, difficulties that are not listed keep their default board.
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub difficulties: DifficultyTable,
    pub leaderboard: LeaderboardSettings,
    pub records_path: Option<PathBuf>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LeaderboardSettings {
    /// How many entries a ranking query returns.
    pub top_n: usize,
}

impl Default for LeaderboardSettings {
    fn default() -> Self {
        Self { top_n: 5 }
    }
}

impl LeaderboardSettings {
    pub fn top<L: Leaderboard + ?Sized>(
        &self,
        leaderboard: &L,
        difficulty: Difficulty,
    ) -> Result<Vec<ScoreEntry>, LeaderboardError> {
        leaderboard.top(difficulty, self.top_n)
    }

    pub fn top_all<L: Leaderboard + ?Sized>(
        &self,
        leaderboard: &L,
    ) -> Result<BTreeMap<Difficulty, Vec<ScoreEntry>>, LeaderboardError> {
        leaderboard.top_all(self.top_n)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawSettings {
    difficulties: BTreeMap<String, GameConfig>,
    leaderboard: LeaderboardSettings,
    records_path: Option<PathBuf>,
}

impl Settings {
    pub fn from_toml_str(data: &str) -> Result<Self, SettingsError> {
        let raw: RawSettings = toml::from_str(data)?;

        let mut difficulties = DifficultyTable::default();
        for (name, config) in raw.difficulties {
            let difficulty = name
                .parse::<Difficulty>()
                .map_err(|_| SettingsError::UnknownDifficulty(name))?;
            difficulties
                .insert(difficulty, config)
                .map_err(|source| SettingsError::InvalidDifficulty { difficulty, source })?;
        }

        Ok(Self {
            difficulties,
            leaderboard: raw.leaderboard,
            records_path: raw.records_path,
        })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_owned(),
            source,
        })?;
        let settings = Self::from_toml_str(&data)?;
        log::debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// File-backed record store when `records_path` is set.
    pub fn record_store(&self) -> Option<JsonFileRecordStore> {
        self.records_path.clone().map(JsonFileRecordStore::new)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulties: DifficultyTable::default(),
            leaderboard: LeaderboardSettings::default(),
            records_path: None,
        }
    }
}
