//! Audio cues for the timer.
//! The terminal build has no ambient track; the only sound is the stop cue,
//! the terminal bell plus a desktop notification on macOS.

use std::io::Write;

#[cfg(target_os = "macos")]
use std::process::Command;

/// Audio capability injected into the timer
pub trait AudioCue {
    /// Start or resume ambient playback
    fn play(&mut self);
    /// Pause ambient playback, keeping its position
    fn pause(&mut self);
    /// Rewind ambient playback to the beginning
    fn reset(&mut self);
    fn set_muted(&mut self, muted: bool);
    /// One-shot sound when a session ends
    fn notify(&mut self, session_name: &str);
}

/// Terminal-backed audio: bell and notification on stop, no ambient track
#[derive(Debug)]
pub struct TerminalAudio {
    pub muted: bool,
}

impl TerminalAudio {
    pub fn new(muted: bool) -> Self {
        Self { muted }
    }
}

impl AudioCue for TerminalAudio {
    fn play(&mut self) {}
    fn pause(&mut self) {}
    fn reset(&mut self) {}

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn notify(&mut self, session_name: &str) {
        if self.muted {
            return;
        }

        let mut stdout = std::io::stdout();
        if let Err(e) = stdout.write_all(b"\x07").and_then(|_| stdout.flush()) {
            log::debug!("Failed to ring terminal bell: {}", e);
        }

        notify_session_done(session_name);
    }
}

/// Audio that never makes a sound
#[derive(Debug, Default)]
pub struct SilentAudio;

impl AudioCue for SilentAudio {
    fn play(&mut self) {}
    fn pause(&mut self) {}
    fn reset(&mut self) {}
    fn set_muted(&mut self, _muted: bool) {}
    fn notify(&mut self, _session_name: &str) {}
}

/// Send a desktop notification when a session ends
fn notify_session_done(session_name: &str) {
    #[cfg(target_os = "macos")]
    {
        let script = format!(
            r#"display notification "{}" with title "Galaxy Timer - Session Finished""#,
            session_name.replace('"', "\\\"")
        );

        // Don't wait for the script; the UI thread keeps drawing
        if let Err(e) = Command::new("osascript").arg("-e").arg(&script).spawn() {
            log::warn!("Failed to send desktop notification: {}", e);
        }
    }

    #[cfg(not(target_os = "macos"))]
    {
        // No-op on other platforms
        let _ = session_name;
    }
}
