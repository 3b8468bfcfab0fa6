use alloc::collections::BTreeMap;
use serde::{Deserialize, Serialize};

use crate::Difficulty;

/// Best winning time per difficulty, the only state that outlives a single game.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BestRecords {
    records: BTreeMap<Difficulty, u32>,
}

impl BestRecords {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, difficulty: Difficulty) -> Option<u32> {
        self.records.get(&difficulty).copied()
    }

    /// Stores `elapsed` if there is no record yet or it is strictly better, returns whether it did.
    pub fn submit(&mut self, difficulty: Difficulty, elapsed: u32) -> bool {
        match self.records.get(&difficulty) {
            Some(&best) if best <= elapsed => false,
            _ => {
                self.records.insert(difficulty, elapsed);
                true
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Difficulty, u32)> + '_ {
        self.records.iter().map(|(&difficulty, &elapsed)| (difficulty, elapsed))
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<(Difficulty, u32)> for BestRecords {
    fn from_iter<T: IntoIterator<Item = (Difficulty, u32)>>(iter: T) -> Self {
        let mut records = Self::new();
        for (difficulty, elapsed) in iter {
            records.submit(difficulty, elapsed);
        }
        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_strictly_better_times_replace_a_record() {
        let mut records = BestRecords::new();

        assert!(records.submit(Difficulty::Easy, 37));
        assert!(!records.submit(Difficulty::Easy, 52));
        assert!(!records.submit(Difficulty::Easy, 37));
        assert_eq!(records.get(Difficulty::Easy), Some(37));

        assert!(records.submit(Difficulty::Easy, 20));
        assert_eq!(records.get(Difficulty::Easy), Some(20));
    }

    #[test]
    fn records_are_kept_per_difficulty() {
        let records: BestRecords = [(Difficulty::Hard, 300), (Difficulty::Easy, 12), (Difficulty::Hard, 250)]
            .into_iter()
            .collect();

        assert_eq!(records.get(Difficulty::Easy), Some(12));
        assert_eq!(records.get(Difficulty::Medium), None);
        assert_eq!(records.get(Difficulty::Hard), Some(250));
    }
}
