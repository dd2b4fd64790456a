use crate::domain::{HistoryEntry, Mode, UiMode};
use crate::persistence::{DailyHistoryStore, KeyValueStore};
use crate::report::{summarize, HistorySummary};
use crate::timer::Timer;

/// History backed by whichever key-value store the app was started with
pub type History = DailyHistoryStore<Box<dyn KeyValueStore>>;

/// Maximum characters accepted for a session name
pub const MAX_LABEL_LEN: usize = 60;

/// Main application state
pub struct AppState {
    pub timer: Timer,
    pub history: History,
    pub ui_mode: UiMode,
    pub label_input: String,
    pub status_message: Option<String>,
    pub history_scroll_offset: usize,
}

impl AppState {
    pub fn new(timer: Timer, history: History) -> Self {
        let label_input = timer.session_label().to_string();
        Self {
            timer,
            history,
            ui_mode: UiMode::Normal,
            label_input,
            status_message: None,
            history_scroll_offset: 0,
        }
    }

    /// Start, pause or resume the countdown
    pub fn toggle_run_pause(&mut self) {
        self.status_message = None;
        self.timer.toggle();
    }

    /// Stop the current session and record it
    pub fn stop_session(&mut self) {
        if !self.timer.can_stop() {
            self.status_message = Some("Nothing to stop - start a session first".to_string());
            return;
        }

        if let Some(entry) = self.timer.stop(true) {
            self.record(entry);
        }
    }

    /// Abandon the current session
    pub fn reset_timer(&mut self) {
        self.status_message = None;
        self.timer.reset();
    }

    pub fn select_mode(&mut self, mode: Mode) {
        if mode == self.timer.mode() {
            return;
        }

        if self.timer.change_mode(mode) {
            self.status_message = None;
        } else {
            self.status_message = Some("Mode is locked while a session is in progress".to_string());
        }
    }

    pub fn next_mode(&mut self) {
        self.select_mode(self.timer.mode().next());
    }

    pub fn previous_mode(&mut self) {
        self.select_mode(self.timer.mode().previous());
    }

    pub fn toggle_mute(&mut self) {
        self.timer.toggle_mute();
    }

    /// Open the session-name input (only before a session starts)
    pub fn start_edit_label(&mut self) {
        if self.timer.has_started() {
            self.status_message = Some("Session name is locked while a session is in progress".to_string());
            return;
        }

        self.label_input = self.timer.session_label().to_string();
        self.status_message = None;
        self.ui_mode = UiMode::EditingLabel;
    }

    pub fn label_add_char(&mut self, c: char) {
        if self.label_input.chars().count() < MAX_LABEL_LEN {
            self.label_input.push(c);
        }
    }

    pub fn label_backspace(&mut self) {
        self.label_input.pop();
    }

    pub fn submit_label(&mut self) {
        let label = self.label_input.trim().to_string();
        self.timer.set_session_label(label.clone());
        self.label_input = label;
        self.ui_mode = UiMode::Normal;
    }

    pub fn cancel_label(&mut self) {
        self.label_input = self.timer.session_label().to_string();
        self.ui_mode = UiMode::Normal;
    }

    /// Ask for confirmation before clearing (ignored when history is empty)
    pub fn request_clear_history(&mut self) {
        if self.history.is_empty() {
            return;
        }
        self.ui_mode = UiMode::ConfirmClear;
    }

    pub fn confirm_clear_history(&mut self) {
        if let Err(e) = self.history.clear() {
            log::error!("Failed to clear history: {:#}", e);
            self.status_message = Some(format!("Failed to clear history: {}", e));
        }
        self.reset_history_scroll();
        self.ui_mode = UiMode::Normal;
    }

    pub fn cancel_clear_history(&mut self) {
        self.ui_mode = UiMode::Normal;
    }

    /// Advance the countdown and roll the history over at midnight
    pub fn tick(&mut self) {
        match self.history.roll_over_if_stale() {
            Ok(true) => self.reset_history_scroll(),
            Ok(false) => {}
            Err(e) => log::error!("Failed to reset history for the new day: {:#}", e),
        }

        if let Some(entry) = self.timer.tick() {
            self.record(entry);
        }
    }

    fn record(&mut self, entry: HistoryEntry) {
        self.status_message = Some(format!(
            "Recorded \"{}\" ({})",
            entry.session_name,
            entry.mode.name()
        ));

        if let Err(e) = self.history.append(entry) {
            log::error!("Failed to save history: {:#}", e);
            self.status_message = Some(format!("Failed to save history: {}", e));
        }
        self.reset_history_scroll();
    }

    pub fn summary(&self) -> HistorySummary {
        summarize(self.history.entries())
    }

    pub fn scroll_history_up(&mut self) {
        if self.history_scroll_offset > 0 {
            self.history_scroll_offset -= 1;
        }
    }

    pub fn scroll_history_down(&mut self) {
        if self.history_scroll_offset + 1 < self.history.len() {
            self.history_scroll_offset += 1;
        }
    }

    pub fn reset_history_scroll(&mut self) {
        self.history_scroll_offset = 0;
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::audio::testing::RecordingAudio;
    use crate::clock::testing::ManualClock;
    use crate::domain::TimerStatus;
    use crate::persistence::{decode_log, MemoryStore, HISTORY_KEY};
    use pretty_assertions::assert_eq;
    use std::rc::Rc;

    pub fn create_test_app() -> (AppState, Rc<ManualClock>) {
        let clock = Rc::new(ManualClock::at(2024, 1, 2, 9, 0, 0));
        let timer = Timer::new(clock.clone(), Box::new(RecordingAudio::default()));
        let store: Box<dyn KeyValueStore> = Box::new(MemoryStore::new());
        let history = DailyHistoryStore::load(store, clock.clone()).unwrap();
        (AppState::new(timer, history), clock)
    }

    fn run_for(app: &mut AppState, clock: &ManualClock, secs: u64) {
        for _ in 0..secs {
            clock.advance_secs(1);
            app.tick();
        }
    }

    #[test]
    fn test_app_state_new() {
        let (app, _) = create_test_app();
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert!(app.history.is_empty());
        assert_eq!(app.timer.status(), TimerStatus::Idle);
    }

    #[test]
    fn test_stop_after_ten_seconds_records_entry() {
        let (mut app, clock) = create_test_app();

        app.start_edit_label();
        for c in "Write spec".chars() {
            app.label_add_char(c);
        }
        app.submit_label();

        app.toggle_run_pause();
        run_for(&mut app, &clock, 10);
        app.stop_session();

        assert_eq!(app.history.len(), 1);
        let entry = &app.history.entries()[0];
        assert_eq!(entry.session_name, "Write spec");
        assert_eq!(entry.mode, Mode::Focus);
        assert_eq!(entry.duration_secs, 10);
        assert_eq!(app.timer.secs_remaining(), 1500);

        let raw = app.history.store().get(HISTORY_KEY).unwrap().unwrap();
        let persisted = decode_log(&raw).unwrap();
        assert_eq!(persisted.entries, app.history.entries());
    }

    #[test]
    fn test_expiry_records_full_duration() {
        let (mut app, clock) = create_test_app();
        app.select_mode(Mode::ShortBreak);

        app.toggle_run_pause();
        run_for(&mut app, &clock, 305);

        assert_eq!(app.history.len(), 1);
        assert_eq!(app.history.entries()[0].duration_secs, 300);
        assert_eq!(app.history.entries()[0].session_name, "Untitled");
        assert_eq!(app.timer.status(), TimerStatus::Idle);
    }

    #[test]
    fn test_stop_when_idle_records_nothing() {
        let (mut app, _) = create_test_app();
        app.stop_session();
        assert!(app.history.is_empty());
        assert!(app.status_message.is_some());
    }

    #[test]
    fn test_mode_and_label_locked_once_started() {
        let (mut app, _) = create_test_app();
        app.toggle_run_pause();
        app.toggle_run_pause();

        app.next_mode();
        assert_eq!(app.timer.mode(), Mode::Focus);
        assert!(app.status_message.is_some());

        app.start_edit_label();
        assert_eq!(app.ui_mode, UiMode::Normal);

        app.reset_timer();
        app.next_mode();
        assert_eq!(app.timer.mode(), Mode::ShortBreak);
        app.previous_mode();
        app.previous_mode();
        assert_eq!(app.timer.mode(), Mode::LongBreak);
    }

    #[test]
    fn test_cancel_label_keeps_previous() {
        let (mut app, _) = create_test_app();
        app.start_edit_label();
        app.label_add_char('a');
        app.submit_label();

        app.start_edit_label();
        app.label_backspace();
        app.label_add_char('b');
        app.cancel_label();

        assert_eq!(app.timer.session_label(), "a");
        assert_eq!(app.label_input, "a");
    }

    #[test]
    fn test_label_length_is_capped() {
        let (mut app, _) = create_test_app();
        app.start_edit_label();
        for _ in 0..(MAX_LABEL_LEN + 10) {
            app.label_add_char('x');
        }
        app.submit_label();
        assert_eq!(app.timer.session_label().len(), MAX_LABEL_LEN);
    }

    #[test]
    fn test_clear_history_needs_confirmation() {
        let (mut app, _) = create_test_app();

        // Nothing to clear
        app.request_clear_history();
        assert_eq!(app.ui_mode, UiMode::Normal);

        app.toggle_run_pause();
        app.stop_session();
        app.request_clear_history();
        assert_eq!(app.ui_mode, UiMode::ConfirmClear);

        app.cancel_clear_history();
        assert_eq!(app.history.len(), 1);

        app.request_clear_history();
        app.confirm_clear_history();
        assert!(app.history.is_empty());
        assert!(app.history.store().get(HISTORY_KEY).unwrap().is_none());
        assert_eq!(app.ui_mode, UiMode::Normal);
    }

    #[test]
    fn test_tick_rolls_history_over_at_midnight() {
        let clock = Rc::new(ManualClock::at(2024, 1, 1, 23, 59, 58));
        let timer = Timer::new(clock.clone(), Box::new(RecordingAudio::default()));
        let store: Box<dyn KeyValueStore> = Box::new(MemoryStore::new());
        let history = DailyHistoryStore::load(store, clock.clone()).unwrap();
        let mut app = AppState::new(timer, history);

        app.toggle_run_pause();
        app.stop_session();
        assert_eq!(app.history.len(), 1);

        run_for(&mut app, &clock, 5);
        assert!(app.history.is_empty());
    }

    #[test]
    fn test_midnight_rollover_resets_scroll() {
        let clock = Rc::new(ManualClock::at(2024, 1, 1, 23, 59, 50));
        let timer = Timer::new(clock.clone(), Box::new(RecordingAudio::default()));
        let store: Box<dyn KeyValueStore> = Box::new(MemoryStore::new());
        let history = DailyHistoryStore::load(store, clock.clone()).unwrap();
        let mut app = AppState::new(timer, history);

        for _ in 0..3 {
            app.toggle_run_pause();
            app.stop_session();
        }
        app.scroll_history_down();
        app.scroll_history_down();
        assert_eq!(app.history_scroll_offset, 2);

        // Same day: offset kept
        app.tick();
        assert_eq!(app.history_scroll_offset, 2);

        clock.advance_secs(15);
        app.tick();
        assert!(app.history.is_empty());
        assert_eq!(app.history_scroll_offset, 0);
    }

    #[test]
    fn test_pause_between_ticks_keeps_elapsed_second() {
        let (mut app, clock) = create_test_app();
        app.toggle_run_pause();

        // Key press handled before the loop ticks
        clock.advance_millis(1250);
        app.toggle_run_pause();
        app.tick();

        assert_eq!(app.timer.status(), TimerStatus::Paused);
        assert_eq!(app.timer.secs_remaining(), 1499);
    }

    #[test]
    fn test_history_scroll_bounds() {
        let (mut app, _) = create_test_app();
        for _ in 0..3 {
            app.toggle_run_pause();
            app.stop_session();
        }

        app.scroll_history_up();
        assert_eq!(app.history_scroll_offset, 0);

        for _ in 0..5 {
            app.scroll_history_down();
        }
        assert_eq!(app.history_scroll_offset, 2);

        app.scroll_history_up();
        assert_eq!(app.history_scroll_offset, 1);
    }

    #[test]
    fn test_summary() {
        let (mut app, clock) = create_test_app();
        app.toggle_run_pause();
        run_for(&mut app, &clock, 60);
        app.stop_session();

        let summary = app.summary();
        assert_eq!(summary.sessions, 1);
        assert_eq!(summary.focus_secs, 60);
    }
}
