use alloc::collections::BTreeMap;
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::*;

/// Closed set of named board configurations.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Medium, Self::Hard];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::Easy
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ParseDifficultyError;

impl fmt::Display for ParseDifficultyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unknown difficulty, expected one of: easy, medium, hard")
    }
}

impl core::error::Error for ParseDifficultyError {}

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.name() == s)
            .ok_or(ParseDifficultyError)
    }
}

/// Caller-supplied mapping from difficulty to board configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DifficultyTable {
    configs: BTreeMap<Difficulty, GameConfig>,
}

impl DifficultyTable {
    pub const EASY: GameConfig = GameConfig::new_unchecked(9, 9, 10);
    pub const MEDIUM: GameConfig = GameConfig::new_unchecked(16, 16, 40);
    pub const HARD: GameConfig = GameConfig::new_unchecked(16, 30, 99);

    /// An empty table, to be filled with [`DifficultyTable::insert`].
    pub fn empty() -> Self {
        Self {
            configs: BTreeMap::new(),
        }
    }

    /// Adds or replaces the configuration for `difficulty`, validating it first.
    pub fn insert(&mut self, difficulty: Difficulty, config: GameConfig) -> Result<()> {
        config.validate()?;
        self.configs.insert(difficulty, config);
        Ok(())
    }

    pub fn get(&self, difficulty: Difficulty) -> Result<GameConfig> {
        self.configs
            .get(&difficulty)
            .copied()
            .ok_or(GameError::UnknownDifficulty(difficulty))
    }

    pub fn contains(&self, difficulty: Difficulty) -> bool {
        self.configs.contains_key(&difficulty)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Difficulty, GameConfig)> + '_ {
        self.configs.iter().map(|(&difficulty, &config)| (difficulty, config))
    }

    /// Checks every entry, useful after deserializing a table from an untrusted source.
    pub fn validate(&self) -> Result<()> {
        self.configs.values().try_for_each(GameConfig::validate)
    }
}

impl Default for DifficultyTable {
    fn default() -> Self {
        Self {
            configs: BTreeMap::from([
                (Difficulty::Easy, Self::EASY),
                (Difficulty::Medium, Self::MEDIUM),
                (Difficulty::Hard, Self::HARD),
            ]),
        }
    }
}
