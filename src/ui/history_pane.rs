use crate::app::AppState;
use crate::domain::{format_duration, short_time, HistoryEntry};
use crate::ui::styles::{border_style, default_style, hint_style, muted_text_style, title_style};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// One row: name on the first line, "<Mode> - Xm Ys" and the finish time below
fn create_history_item(entry: &HistoryEntry) -> ListItem<'_> {
    let title = Line::from(Span::styled(entry.session_name.as_str(), default_style()));
    let detail = Line::from(vec![
        Span::styled(
            format!("{} - {}", entry.mode.name(), format_duration(entry.duration_secs)),
            muted_text_style(),
        ),
        Span::raw("  "),
        Span::styled(short_time(&entry.finished_at), hint_style()),
    ]);
    ListItem::new(vec![title, detail])
}

/// Render today's history pane
pub fn render_history_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let count = app.history.len();
    let title = if app.history_scroll_offset > 0 {
        format!(" Task History ({}) [scrolled +{}] ", count, app.history_scroll_offset)
    } else {
        format!(" Task History ({}) ", count)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(title, title_style()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Entries
            Constraint::Length(1), // Summary
            Constraint::Length(1), // Clear hint
        ])
        .split(inner);

    if app.history.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            "No sessions yet today.",
            hint_style(),
        )));
        f.render_widget(empty, chunks[0]);
        return;
    }

    let items: Vec<ListItem> = app
        .history
        .entries()
        .iter()
        .skip(app.history_scroll_offset)
        .map(create_history_item)
        .collect();
    f.render_widget(List::new(items), chunks[0]);

    let summary = Paragraph::new(Line::from(Span::styled(
        app.summary().describe(),
        muted_text_style(),
    )));
    f.render_widget(summary, chunks[1]);

    let clear_hint = Paragraph::new(Line::from(Span::styled("c clear history", hint_style())));
    f.render_widget(clear_hint, chunks[2]);
}
