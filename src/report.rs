use crate::domain::{format_duration, format_total, short_time, HistoryEntry, Mode};
use chrono::NaiveDate;

/// Totals over a day's history
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HistorySummary {
    pub sessions: usize,
    pub focus_sessions: usize,
    pub focus_secs: u32,
    pub break_secs: u32,
}

impl HistorySummary {
    /// One-line summary, e.g. "3 sessions (2 focus) · 50m focused · 5m break"
    pub fn describe(&self) -> String {
        format!(
            "{} session{} ({} focus) · {} focused · {} break",
            self.sessions,
            if self.sessions == 1 { "" } else { "s" },
            self.focus_sessions,
            format_total(self.focus_secs),
            format_total(self.break_secs)
        )
    }
}

/// Calculate totals for a list of entries
pub fn summarize(entries: &[HistoryEntry]) -> HistorySummary {
    let mut summary = HistorySummary::default();

    for entry in entries {
        summary.sessions += 1;
        match entry.mode {
            Mode::Focus => {
                summary.focus_sessions += 1;
                summary.focus_secs += entry.duration_secs;
            }
            Mode::ShortBreak | Mode::LongBreak => {
                summary.break_secs += entry.duration_secs;
            }
        }
    }

    summary
}

/// Plain-text listing used by `galaxy history`
pub fn render_history(date: NaiveDate, entries: &[HistoryEntry]) -> String {
    let mut out = String::new();

    out.push_str(&format!("Task History - {}\n\n", date));

    if entries.is_empty() {
        out.push_str("No sessions recorded today.\n");
        return out;
    }

    for entry in entries {
        out.push_str(&format!(
            "{:>8}  {:<11}  {:>8}  {}\n",
            short_time(&entry.finished_at),
            entry.mode.name(),
            format_duration(entry.duration_secs),
            entry.session_name
        ));
    }

    out.push('\n');
    out.push_str(&summarize(entries).describe());
    out.push('\n');
    out
}
