use minesweep_core::{BestRecords, BoardGenerator, GameSession};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::*;

/// Key-value storage for best records, keyed by difficulty.
pub trait RecordStore {
    fn load(&self) -> Result<BestRecords, StoreError>;
    fn save(&mut self, records: &BestRecords) -> Result<(), StoreError>;
}

#[derive(Clone, Debug, Default)]
pub struct MemoryRecordStore {
    records: BestRecords,
}

impl MemoryRecordStore {
    pub fn new(records: BestRecords) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &BestRecords {
        &self.records
    }
}

impl RecordStore for MemoryRecordStore {
    fn load(&self) -> Result<BestRecords, StoreError> {
        Ok(self.records.clone())
    }

    fn save(&mut self, records: &BestRecords) -> Result<(), StoreError> {
        self.records = records.clone();
        Ok(())
    }
}

/// Records kept as a JSON object such as `{"easy": 37}`.
#[derive(Clone, Debug)]
pub struct JsonFileRecordStore {
    path: PathBuf,
}

impl JsonFileRecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl RecordStore for JsonFileRecordStore {
    /// A missing file is the same as no records yet.
    fn load(&self) -> Result<BestRecords, StoreError> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(BestRecords::new()),
            Err(err) => return Err(self.io_error(err)),
        };
        Ok(serde_json::from_str(&data)?)
    }

    fn save(&mut self, records: &BestRecords) -> Result<(), StoreError> {
        let data = serde_json::to_string_pretty(records)?;
        fs::write(&self.path, data).map_err(|err| self.io_error(err))
    }
}

/// Reads records once at session start, a failing store means no records.
pub fn load_best_records<S: RecordStore + ?Sized>(store: &S) -> BestRecords {
    match store.load() {
        Ok(records) => records,
        Err(err) => {
            log::warn!("Could not load best records, starting without: {}", err);
            BestRecords::new()
        }
    }
}

/// Writes records after a game whose win improved them, returns whether anything was stored.
pub fn persist_if_improved<S, G>(store: &mut S, session: &GameSession<G>) -> bool
where
    S: RecordStore + ?Sized,
    G: BoardGenerator,
{
    if !session.is_new_record() {
        return false;
    }

    match store.save(session.best_records()) {
        Ok(()) => true,
        Err(err) => {
            log::warn!("Could not save best records: {}", err);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minesweep_core::{Board, Difficulty, DifficultyTable, GameConfig};
    use std::process;

    struct BrokenStore;

    impl RecordStore for BrokenStore {
        fn load(&self) -> Result<BestRecords, StoreError> {
            Err(StoreError::Unavailable("read-only filesystem".to_owned()))
        }

        fn save(&mut self, _: &BestRecords) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("read-only filesystem".to_owned()))
        }
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("minesweep-{}-{}.json", name, process::id()))
    }

    fn session_won_in(
        elapsed: u32,
        records: BestRecords,
    ) -> GameSession<impl BoardGenerator> {
        let mut table = DifficultyTable::empty();
        table
            .insert(Difficulty::Easy, GameConfig::new(1, 2, 1).unwrap())
            .unwrap();
        let generator = |_: GameConfig| Board::from_mine_coords((1, 2), &[(0, 0)]);
        let mut session = GameSession::new(table, Difficulty::Easy, generator, records).unwrap();
        for _ in 0..elapsed {
            session.tick();
        }
        session.reveal((0, 1)).unwrap();
        session
    }

    #[test]
    fn broken_store_degrades_to_no_records() {
        assert!(load_best_records(&BrokenStore).is_empty());

        let session = session_won_in(10, BestRecords::new());
        assert!(!persist_if_improved(&mut BrokenStore, &session));
        assert_eq!(session.best_record(Difficulty::Easy), Some(10));
    }

    #[test]
    fn only_improved_records_are_written() {
        let mut store = MemoryRecordStore::default();

        let first = session_won_in(37, load_best_records(&store));
        assert!(persist_if_improved(&mut store, &first));
        assert_eq!(store.records().get(Difficulty::Easy), Some(37));

        let second = session_won_in(52, load_best_records(&store));
        assert!(!persist_if_improved(&mut store, &second));
        assert_eq!(store.records().get(Difficulty::Easy), Some(37));
    }

    #[test]
    fn json_file_round_trip() {
        let path = temp_path("round-trip");
        let mut store = JsonFileRecordStore::new(&path);
        let records: BestRecords = [(Difficulty::Easy, 37), (Difficulty::Hard, 412)]
            .into_iter()
            .collect();

        store.save(&records).unwrap();
        let raw = fs::read_to_string(&path).unwrap();
        let loaded = store.load().unwrap();
        fs::remove_file(&path).unwrap();

        assert!(raw.contains("\"easy\": 37"));
        assert_eq!(loaded, records);
    }

    #[test]
    fn json_file_missing_means_empty() {
        let store = JsonFileRecordStore::new(temp_path("missing"));

        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn json_file_garbage_is_an_error_but_not_fatal() {
        let path = temp_path("garbage");
        fs::write(&path, "not json").unwrap();
        let store = JsonFileRecordStore::new(&path);

        let result = store.load();
        let records = load_best_records(&store);
        fs::remove_file(&path).unwrap();

        assert!(matches!(result, Err(StoreError::Json(_))));
        assert!(records.is_empty());
    }
}
