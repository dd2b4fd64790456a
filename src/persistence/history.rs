use super::kv::KeyValueStore;
use crate::clock::Clock;
use crate::domain::{DailyHistoryLog, HistoryEntry};
use anyhow::Result;
use chrono::NaiveDate;
use std::rc::Rc;
use thiserror::Error;

/// Key of the persisted daily log
pub const HISTORY_KEY: &str = "daily-history";

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("corrupt history record: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Decode a persisted record
pub fn decode_log(raw: &str) -> Result<DailyHistoryLog, HistoryError> {
    Ok(serde_json::from_str(raw)?)
}

/// Today's completed sessions, mirrored to the key-value store on every change
pub struct DailyHistoryStore<S: KeyValueStore> {
    log: DailyHistoryLog,
    store: S,
    clock: Rc<dyn Clock>,
}

impl<S: KeyValueStore> DailyHistoryStore<S> {
    /// Hydrate from the persisted record. A stale or corrupt record is erased.
    pub fn load(store: S, clock: Rc<dyn Clock>) -> Result<Self> {
        let today = clock.today();
        let mut history = Self {
            log: DailyHistoryLog::empty(today),
            store,
            clock,
        };

        let raw = match history.store.get(HISTORY_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Ok(history),
            Err(e) => {
                log::warn!("Failed to read history, starting empty: {:#}", e);
                if let Err(e) = history.store.remove(HISTORY_KEY) {
                    log::error!("Failed to erase unreadable history: {:#}", e);
                }
                return Ok(history);
            }
        };

        match decode_log(&raw) {
            Ok(stored) if stored.is_for(today) => {
                log::info!("Loaded {} session(s) for {}", stored.entries.len(), today);
                history.log = stored;
            }
            Ok(stored) => {
                log::info!("Discarding history from {} (today is {})", stored.date, today);
                history.store.remove(HISTORY_KEY)?;
            }
            Err(e) => {
                log::warn!("Failed to parse history, starting empty: {}", e);
                history.store.remove(HISTORY_KEY)?;
            }
        }

        Ok(history)
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.log.entries
    }

    pub fn len(&self) -> usize {
        self.log.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.entries.is_empty()
    }

    pub fn date(&self) -> NaiveDate {
        self.log.date
    }

    #[cfg(test)]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Reset the log when the calendar day has moved on. Returns true if it rolled over.
    pub fn roll_over_if_stale(&mut self) -> Result<bool> {
        let today = self.clock.today();
        if self.log.is_for(today) {
            return Ok(false);
        }

        log::info!("Day changed from {} to {}, starting a new history", self.log.date, today);
        self.log = DailyHistoryLog::empty(today);
        self.store.remove(HISTORY_KEY)?;
        Ok(true)
    }

    /// Prepend a finished session and persist the whole log
    pub fn append(&mut self, entry: HistoryEntry) -> Result<()> {
        self.roll_over_if_stale()?;
        self.log.push_front(entry);
        self.persist()
    }

    /// Empty the log and erase the persisted record
    pub fn clear(&mut self) -> Result<()> {
        self.log.entries.clear();
        self.store.remove(HISTORY_KEY)?;
        log::info!("History cleared");
        Ok(())
    }

    fn persist(&mut self) -> Result<()> {
        let json = serde_json::to_string(&self.log)?;
        self.store.set(HISTORY_KEY, &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::testing::ManualClock;
    use crate::domain::Mode;
    use crate::persistence::kv::testing::MemoryStore;
    use crate::persistence::kv::FileStore;
    use pretty_assertions::assert_eq;

    fn clock_on(day: u32) -> Rc<ManualClock> {
        Rc::new(ManualClock::at(2024, 1, day, 9, 30, 0))
    }

    fn entry(name: &str, clock: &ManualClock) -> HistoryEntry {
        HistoryEntry::new(name.to_string(), Mode::Focus, 1500, clock.now())
    }

    fn stored_log(store: &MemoryStore) -> DailyHistoryLog {
        decode_log(&store.get(HISTORY_KEY).unwrap().unwrap()).unwrap()
    }

    #[test]
    fn test_load_without_record() {
        let clock = clock_on(2);
        let history = DailyHistoryStore::load(MemoryStore::new(), clock).unwrap();
        assert!(history.is_empty());
        assert_eq!(history.date(), NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
    }

    #[test]
    fn test_append_prepends_and_persists() {
        let clock = clock_on(2);
        let mut history = DailyHistoryStore::load(MemoryStore::new(), clock.clone()).unwrap();

        history.append(entry("first", &clock)).unwrap();
        history.append(entry("second", &clock)).unwrap();

        let names: Vec<_> = history.entries().iter().map(|e| e.session_name.as_str()).collect();
        assert_eq!(names, vec!["second", "first"]);

        let persisted = stored_log(history.store());
        assert_eq!(persisted.date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(persisted.entries, history.entries());
    }

    #[test]
    fn test_load_same_day_hydrates() {
        let clock = clock_on(2);
        let mut history = DailyHistoryStore::load(MemoryStore::new(), clock.clone()).unwrap();
        history.append(entry("Write spec", &clock)).unwrap();
        let store = history.store().clone();

        let reloaded = DailyHistoryStore::load(store, clock).unwrap();
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.entries()[0].session_name, "Write spec");
    }

    #[test]
    fn test_load_stale_record_is_erased() {
        let mut store = MemoryStore::new();
        store
            .set(
                HISTORY_KEY,
                r#"{"date":"2024-01-01","items":[{"sessionName":"old","mode":"focus","duration":1500,"finishedAt":"11:00:00 PM"}]}"#,
            )
            .unwrap();

        let history = DailyHistoryStore::load(store, clock_on(2)).unwrap();
        assert!(history.is_empty());
        assert!(!history.store().contains(HISTORY_KEY));
    }

    #[test]
    fn test_load_corrupt_record_is_erased() {
        for raw in ["not json", r#"{"items":[]}"#, r#"{"date":"2024-01-02","items":[{"mode":"nap"}]}"#] {
            let mut store = MemoryStore::new();
            store.set(HISTORY_KEY, raw).unwrap();

            let history = DailyHistoryStore::load(store, clock_on(2)).unwrap();
            assert!(history.is_empty());
            assert!(!history.store().contains(HISTORY_KEY));
        }
    }

    #[test]
    fn test_clear_always_empties_and_erases() {
        let clock = clock_on(2);

        let mut empty = DailyHistoryStore::load(MemoryStore::new(), clock.clone()).unwrap();
        empty.clear().unwrap();
        assert!(empty.is_empty());
        assert!(!empty.store().contains(HISTORY_KEY));

        let mut history = DailyHistoryStore::load(MemoryStore::new(), clock.clone()).unwrap();
        history.append(entry("a", &clock)).unwrap();
        history.append(entry("b", &clock)).unwrap();
        history.clear().unwrap();
        assert!(history.is_empty());
        assert!(!history.store().contains(HISTORY_KEY));
    }

    #[test]
    fn test_append_after_midnight_starts_new_day() {
        let clock = Rc::new(ManualClock::at(2024, 1, 1, 23, 59, 0));
        let mut history = DailyHistoryStore::load(MemoryStore::new(), clock.clone()).unwrap();
        history.append(entry("late", &clock)).unwrap();

        clock.advance_secs(120);
        history.append(entry("early", &clock)).unwrap();

        assert_eq!(history.len(), 1);
        assert_eq!(history.entries()[0].session_name, "early");
        assert_eq!(stored_log(history.store()).date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
    }

    #[test]
    fn test_roll_over_if_stale() {
        let clock = Rc::new(ManualClock::at(2024, 1, 1, 23, 59, 0));
        let mut history = DailyHistoryStore::load(MemoryStore::new(), clock.clone()).unwrap();
        history.append(entry("late", &clock)).unwrap();

        assert!(!history.roll_over_if_stale().unwrap());

        clock.advance_secs(120);
        assert!(history.roll_over_if_stale().unwrap());
        assert!(history.is_empty());
        assert!(!history.store().contains(HISTORY_KEY));
    }

    #[test]
    fn test_load_non_utf8_file_is_erased() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(temp_dir.path()).unwrap();
        let path = store.path_for(HISTORY_KEY);
        std::fs::write(&path, [0xff, 0xfe, 0x7b]).unwrap();

        let mut history = DailyHistoryStore::load(store, clock_on(2)).unwrap();
        assert!(history.is_empty());
        assert!(!path.exists());

        // Still usable afterwards
        let clock = clock_on(2);
        history.append(entry("fresh", &clock)).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_file_backed_history_survives_reload() {
        let temp_dir = tempfile::tempdir().unwrap();
        let clock = clock_on(2);

        let mut history = DailyHistoryStore::load(FileStore::new(temp_dir.path()).unwrap(), clock.clone()).unwrap();
        history.append(entry("persisted", &clock)).unwrap();

        let reloaded = DailyHistoryStore::load(FileStore::new(temp_dir.path()).unwrap(), clock).unwrap();
        assert_eq!(reloaded.entries()[0].session_name, "persisted");
        assert_eq!(reloaded.entries()[0].finished_at, "9:30:00 AM");
    }
}
