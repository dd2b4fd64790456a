use crate::app::AppState;
use crate::domain::UiMode;
use crate::ui::styles::hint_style;
use ratatui::{layout::Rect, text::{Line, Span}, widgets::Paragraph, Frame};

/// Render the keybindings hint bar
pub fn render_keybindings(f: &mut Frame, app: &AppState, area: Rect) {
    let hints = match app.ui_mode {
        UiMode::EditingLabel => Line::from(vec![
            Span::raw(" type a session name   "),
            Span::raw("Enter save   "),
            Span::raw("Esc cancel"),
        ]),
        UiMode::ConfirmClear => Line::from(vec![
            Span::raw(" y clear   "),
            Span::raw("n keep"),
        ]),
        UiMode::Normal => Line::from(vec![
            Span::raw(" 1/2/3 or Tab mode   "),
            Span::raw("Space start/pause   "),
            Span::raw("s stop   "),
            Span::raw("r reset   "),
            Span::raw("n name   "),
            Span::raw("m mute   "),
            Span::raw("c clear   "),
            Span::raw("↑/↓ scroll   "),
            Span::raw("q quit"),
        ]),
    };

    let paragraph = Paragraph::new(hints).style(hint_style());
    f.render_widget(paragraph, area);
}
