pub mod entry;
pub mod enums;
pub mod views;

pub use entry::{DailyHistoryLog, HistoryEntry, DEFAULT_SESSION_NAME};
pub use enums::{Mode, TimerStatus, UiMode};
pub use views::{format_clock, format_duration, format_total, progress_percent, short_time, window_title};
