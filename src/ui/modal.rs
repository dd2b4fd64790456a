use crate::app::AppState;
use crate::domain::UiMode;
use crate::ui::{
    layout::create_modal_area,
    styles::{modal_bg_style, modal_title_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the clear-history confirmation
pub fn render_confirm_clear_modal(f: &mut Frame, app: &AppState, area: Rect) {
    if app.ui_mode != UiMode::ConfirmClear {
        return;
    }

    let modal_area = create_modal_area(area);

    // Clear the area behind the modal
    f.render_widget(Clear, modal_area);

    let lines = vec![
        Line::raw(""),
        Line::raw(format!(
            "  Remove all {} session(s) recorded today?",
            app.history.len()
        )),
        Line::raw(""),
        Line::from(vec![
            Span::styled("  [y]", modal_title_style()),
            Span::raw(" Clear  "),
            Span::styled("[n]", modal_title_style()),
            Span::raw(" Keep"),
        ]),
    ];

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(" Clear History ", modal_title_style()))
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}
