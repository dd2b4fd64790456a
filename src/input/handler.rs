use crate::app::AppState;
use crate::domain::{Mode, UiMode};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Handle keyboard input events. Returns true when the app should quit.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return true;
    }

    match app.ui_mode {
        UiMode::Normal => handle_normal_mode(app, key),
        UiMode::EditingLabel => handle_label_mode(app, key),
        UiMode::ConfirmClear => handle_confirm_clear_mode(app, key),
    }
}

/// Handle keys in normal mode
fn handle_normal_mode(app: &mut AppState, key: KeyEvent) -> bool {
    match key.code {
        // Mode tabs
        KeyCode::Char('1') => app.select_mode(Mode::Focus),
        KeyCode::Char('2') => app.select_mode(Mode::ShortBreak),
        KeyCode::Char('3') => app.select_mode(Mode::LongBreak),
        KeyCode::Tab | KeyCode::Right => app.next_mode(),
        KeyCode::BackTab | KeyCode::Left => app.previous_mode(),

        // Start / pause
        KeyCode::Char(' ') | KeyCode::Enter => app.toggle_run_pause(),

        KeyCode::Char('r') | KeyCode::Char('R') => app.reset_timer(),
        KeyCode::Char('s') | KeyCode::Char('S') => app.stop_session(),
        KeyCode::Char('m') | KeyCode::Char('M') => app.toggle_mute(),
        KeyCode::Char('n') | KeyCode::Char('N') => app.start_edit_label(),
        KeyCode::Char('c') | KeyCode::Char('C') => app.request_clear_history(),

        // Scroll history
        KeyCode::Up => app.scroll_history_up(),
        KeyCode::Down => app.scroll_history_down(),

        // Quit
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return true,

        _ => {}
    }
    false
}

/// Handle keys while typing the session name
fn handle_label_mode(app: &mut AppState, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Enter => app.submit_label(),
        KeyCode::Esc => app.cancel_label(),
        KeyCode::Backspace => app.label_backspace(),
        KeyCode::Char(c) => app.label_add_char(c),
        _ => {}
    }
    false
}

/// Handle keys in the clear-history confirmation
fn handle_confirm_clear_mode(app: &mut AppState, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_clear_history(),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.cancel_clear_history(),
        _ => {}
    }
    false
}
