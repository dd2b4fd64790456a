pub mod history_pane;
pub mod keybindings;
pub mod layout;
pub mod modal;
pub mod styles;
pub mod timer_pane;

use crate::app::AppState;
use history_pane::render_history_pane;
use keybindings::render_keybindings;
use layout::create_layout;
use modal::render_confirm_clear_modal;
use ratatui::{text::Span, widgets::Paragraph, Frame};
use styles::message_style;
use timer_pane::render_timer_pane;

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, app: &AppState) {
    let size = f.size();
    let layout = create_layout(size);

    render_keybindings(f, app, layout.keybindings_area);
    render_timer_pane(f, app, layout.timer_area);
    render_history_pane(f, app, layout.history_area);

    if let Some(message) = &app.status_message {
        let status = Paragraph::new(Span::styled(format!(" {}", message), message_style()));
        f.render_widget(status, layout.status_area);
    }

    render_confirm_clear_modal(f, app, size);
}
