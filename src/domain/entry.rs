use super::enums::Mode;
use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Format used for `finished_at`, e.g. "10:15:32 AM"
pub const FINISHED_AT_FORMAT: &str = "%-I:%M:%S %p";

/// Format used for the log date, e.g. "2024-01-02"
pub const LOG_DATE_FORMAT: &str = "%Y-%m-%d";

/// Label recorded when the session was left unnamed
pub const DEFAULT_SESSION_NAME: &str = "Untitled";

/// A completed session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(rename = "sessionName")]
    pub session_name: String,
    pub mode: Mode,
    /// Seconds actually counted down
    #[serde(rename = "duration")]
    pub duration_secs: u32,
    #[serde(rename = "finishedAt")]
    pub finished_at: String,
}

impl HistoryEntry {
    pub fn new(session_name: String, mode: Mode, duration_secs: u32, finished_at: DateTime<Local>) -> Self {
        Self {
            session_name,
            mode,
            duration_secs,
            finished_at: finished_at.format(FINISHED_AT_FORMAT).to_string(),
        }
    }
}

/// Today's completed sessions, newest first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyHistoryLog {
    #[serde(with = "log_date")]
    pub date: NaiveDate,
    #[serde(rename = "items", default)]
    pub entries: Vec<HistoryEntry>,
}

impl DailyHistoryLog {
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            entries: Vec::new(),
        }
    }

    /// Check whether this log belongs to `today`
    pub fn is_for(&self, today: NaiveDate) -> bool {
        self.date == today
    }

    /// Prepend an entry (newest first)
    pub fn push_front(&mut self, entry: HistoryEntry) {
        self.entries.insert(0, entry);
    }
}

mod log_date {
    use super::LOG_DATE_FORMAT;
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format(LOG_DATE_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(&raw, LOG_DATE_FORMAT).map_err(serde::de::Error::custom)
    }
}
