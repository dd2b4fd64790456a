use crate::audio::AudioCue;
use crate::clock::Clock;
use crate::domain::{format_clock, progress_percent, window_title, HistoryEntry, Mode, TimerStatus, DEFAULT_SESSION_NAME};
use crate::ticker::Ticker;
use std::rc::Rc;

/// Pomodoro countdown state machine.
///
/// The periodic handle is owned here and is only created or dropped by
/// `start`, `pause`, `stop` and `reset`, so there is never more than one.
pub struct Timer {
    mode: Mode,
    has_started: bool,
    secs_remaining: u32,
    session_label: String,
    default_label: String,
    muted: bool,
    ticker: Option<Ticker>,
    clock: Rc<dyn Clock>,
    audio: Box<dyn AudioCue>,
}

impl Timer {
    pub fn new(clock: Rc<dyn Clock>, audio: Box<dyn AudioCue>) -> Self {
        let mode = Mode::Focus;
        Self {
            mode,
            has_started: false,
            secs_remaining: mode.duration_secs(),
            session_label: String::new(),
            default_label: DEFAULT_SESSION_NAME.to_string(),
            muted: false,
            ticker: None,
            clock,
            audio,
        }
    }

    /// Label recorded for unnamed sessions
    pub fn with_default_label(mut self, label: impl Into<String>) -> Self {
        self.default_label = label.into();
        self
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_running(&self) -> bool {
        self.ticker.is_some()
    }

    pub fn has_started(&self) -> bool {
        self.has_started
    }

    pub fn secs_remaining(&self) -> u32 {
        self.secs_remaining
    }

    pub fn session_label(&self) -> &str {
        &self.session_label
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn status(&self) -> TimerStatus {
        if self.is_running() {
            TimerStatus::Running
        } else if self.has_started {
            TimerStatus::Paused
        } else {
            TimerStatus::Idle
        }
    }

    /// Stop is only permitted once a session has started (running or paused)
    pub fn can_stop(&self) -> bool {
        self.has_started
    }

    pub fn clock(&self) -> String {
        format_clock(self.secs_remaining)
    }

    pub fn progress_percent(&self) -> f64 {
        progress_percent(self.mode, self.secs_remaining)
    }

    pub fn window_title(&self) -> String {
        window_title(self.mode, self.secs_remaining, &self.session_label)
    }

    /// Begin counting down. No-op while already counting.
    pub fn start(&mut self) {
        if self.ticker.is_some() {
            return;
        }

        self.has_started = true;
        self.ticker = Some(Ticker::start(self.clock.instant()));
        self.audio.play();
        log::debug!("Timer started: {} at {}", self.mode.name(), self.clock());
    }

    /// Continue a paused session
    pub fn resume(&mut self) {
        self.start();
    }

    /// Halt the countdown, keeping the session open.
    /// A countdown that reaches zero here stays running so the next `tick` expires it.
    pub fn pause(&mut self) {
        self.drain();
        if self.secs_remaining == 0 && self.has_started {
            return;
        }

        if self.ticker.take().is_some() {
            log::debug!("Timer paused at {}", self.clock());
        }
        self.audio.pause();
    }

    /// Pause when running, otherwise start or resume
    pub fn toggle(&mut self) {
        if self.is_running() {
            self.pause();
        } else if self.has_started {
            self.resume();
        } else {
            self.start();
        }
    }

    /// Abandon the session without recording it
    pub fn reset(&mut self) {
        self.ticker = None;
        self.has_started = false;
        self.secs_remaining = self.mode.duration_secs();
        self.audio.pause();
        self.audio.reset();
        log::debug!("Timer reset: {}", self.mode.name());
    }

    /// End the session and produce its history entry.
    /// Returns `None` when no session has started.
    pub fn stop(&mut self, manual: bool) -> Option<HistoryEntry> {
        if !self.has_started {
            return None;
        }

        self.drain();
        self.ticker = None;
        self.has_started = false;
        self.audio.pause();
        self.audio.reset();

        let session_name = if self.session_label.trim().is_empty() {
            self.default_label.clone()
        } else {
            self.session_label.clone()
        };
        self.audio.notify(&session_name);

        let duration_secs = self.mode.duration_secs() - self.secs_remaining;
        let entry = HistoryEntry::new(session_name, self.mode, duration_secs, self.clock.now());
        self.secs_remaining = self.mode.duration_secs();

        log::info!(
            "Session finished ({}): {} {} after {}s",
            if manual { "stopped" } else { "expired" },
            entry.session_name,
            self.mode.to_tag(),
            duration_secs
        );

        Some(entry)
    }

    /// Switch preset. Rejected once a session has started.
    pub fn change_mode(&mut self, mode: Mode) -> bool {
        if self.has_started {
            return false;
        }

        self.ticker = None;
        self.mode = mode;
        self.secs_remaining = mode.duration_secs();
        true
    }

    /// Set the session label. Rejected once a session has started.
    pub fn set_session_label(&mut self, label: impl Into<String>) -> bool {
        if self.has_started {
            return false;
        }

        self.session_label = label.into();
        true
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        self.audio.set_muted(muted);
    }

    pub fn toggle_mute(&mut self) {
        self.set_muted(!self.muted);
    }

    /// Consume elapsed seconds. Returns the entry when the countdown expires.
    pub fn tick(&mut self) -> Option<HistoryEntry> {
        if self.ticker.is_none() {
            return None;
        }

        self.drain();

        if self.secs_remaining == 0 && self.has_started {
            return self.stop(false);
        }
        None
    }

    /// Count whole seconds elapsed on the handle since it last fired
    fn drain(&mut self) {
        if let Some(ticker) = self.ticker.as_mut() {
            let due = ticker.due(self.clock.instant());
            self.secs_remaining = self.secs_remaining.saturating_sub(due);
        }
    }
}
