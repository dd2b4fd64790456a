use serde::{Deserialize, Serialize};

/// Timer preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    #[serde(rename = "focus", alias = "pomodoro")]
    Focus,
    #[serde(rename = "short-break", alias = "short")]
    ShortBreak,
    #[serde(rename = "long-break", alias = "long")]
    LongBreak,
}

impl Mode {
    /// Fixed length of this preset in seconds
    pub fn duration_secs(&self) -> u32 {
        match self {
            Mode::Focus => 25 * 60,
            Mode::ShortBreak => 5 * 60,
            Mode::LongBreak => 15 * 60,
        }
    }

    /// Get the display name for this mode
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Focus => "Pomodoro",
            Mode::ShortBreak => "Short Break",
            Mode::LongBreak => "Long Break",
        }
    }

    /// Name used in the persisted history record
    pub fn to_tag(&self) -> &'static str {
        match self {
            Mode::Focus => "focus",
            Mode::ShortBreak => "short-break",
            Mode::LongBreak => "long-break",
        }
    }

    /// Get all modes in tab order
    pub fn all() -> &'static [Mode] {
        &[Mode::Focus, Mode::ShortBreak, Mode::LongBreak]
    }

    /// Next tab, wrapping around
    pub fn next(&self) -> Mode {
        match self {
            Mode::Focus => Mode::ShortBreak,
            Mode::ShortBreak => Mode::LongBreak,
            Mode::LongBreak => Mode::Focus,
        }
    }

    /// Previous tab, wrapping around
    pub fn previous(&self) -> Mode {
        match self {
            Mode::Focus => Mode::LongBreak,
            Mode::ShortBreak => Mode::Focus,
            Mode::LongBreak => Mode::ShortBreak,
        }
    }
}

/// Runtime status of the timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerStatus {
    Idle,
    Running,
    Paused,
}

impl TimerStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "IDLE",
            Self::Running => "RUNNING",
            Self::Paused => "PAUSED",
        }
    }
}

/// UI mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    EditingLabel,
    ConfirmClear,
}
