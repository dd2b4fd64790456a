use crate::app::AppState;
use crate::domain::{Mode, TimerStatus, UiMode};
use crate::ui::styles::{
    border_style, clock_style, default_style, gauge_style, idle_style, locked_tab_style,
    modal_title_style, muted_text_style, paused_style, running_style, selected_tab_style,
    title_style,
};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Tabs},
    Frame,
};

fn status_style(status: TimerStatus) -> Style {
    match status {
        TimerStatus::Running => running_style(),
        TimerStatus::Paused => paused_style(),
        TimerStatus::Idle => idle_style(),
    }
}

/// Render the countdown pane
pub fn render_timer_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let timer = &app.timer;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(" Galaxy Timer ", title_style()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Mode tabs
            Constraint::Length(1),
            Constraint::Length(1), // Clock
            Constraint::Length(1), // Session name
            Constraint::Length(1),
            Constraint::Length(1), // Gauge
            Constraint::Length(1),
            Constraint::Length(1), // Status + mute
            Constraint::Length(1),
            Constraint::Length(1), // Session name input
            Constraint::Min(0),
        ])
        .split(inner);

    // Mode tabs, dimmed once a session has started
    let titles: Vec<Line> = Mode::all().iter().map(|m| Line::from(m.name())).collect();
    let selected = Mode::all()
        .iter()
        .position(|m| *m == timer.mode())
        .unwrap_or(0);
    let tabs = Tabs::new(titles)
        .select(selected)
        .style(if timer.has_started() { locked_tab_style() } else { default_style() })
        .highlight_style(selected_tab_style())
        .divider(" ");
    f.render_widget(tabs, chunks[0]);

    let clock = Paragraph::new(Line::from(Span::styled(timer.clock(), clock_style())))
        .alignment(Alignment::Center);
    f.render_widget(clock, chunks[2]);

    let label = if timer.session_label().is_empty() {
        "No Session Name"
    } else {
        timer.session_label()
    };
    let label = Paragraph::new(Line::from(Span::styled(label, muted_text_style())))
        .alignment(Alignment::Center);
    f.render_widget(label, chunks[3]);

    let percent = timer.progress_percent().clamp(0.0, 100.0);
    let gauge = Gauge::default()
        .gauge_style(gauge_style())
        .ratio(percent / 100.0)
        .label(format!("{:.0}%", percent));
    f.render_widget(gauge, chunks[5]);

    let status = timer.status();
    let mut spans = vec![
        Span::styled(format!("[{}]", status.label()), status_style(status)),
        Span::raw("  "),
        Span::styled(
            if timer.is_muted() { "🔇 muted" } else { "🔊 sound on" },
            muted_text_style(),
        ),
    ];
    if !timer.can_stop() {
        spans.push(Span::styled("  (stop unavailable)", muted_text_style()));
    }
    f.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        chunks[7],
    );

    f.render_widget(Paragraph::new(label_input_line(app)), chunks[9]);
}

/// Session name field; shows a cursor while editing
fn label_input_line(app: &AppState) -> Line<'_> {
    if app.ui_mode == UiMode::EditingLabel {
        return Line::from(vec![
            Span::raw("Session name: "),
            Span::styled(app.label_input.as_str(), modal_title_style()),
            Span::styled("█", modal_title_style()),
        ]);
    }

    let hint = if app.timer.has_started() {
        " (locked)"
    } else {
        " (n to edit)"
    };
    let value = if app.timer.session_label().is_empty() {
        "optional"
    } else {
        app.timer.session_label()
    };
    Line::from(vec![
        Span::raw("Session name: "),
        Span::styled(value, default_style()),
        Span::styled(hint, muted_text_style()),
    ])
}
