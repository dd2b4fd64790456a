use ratatui::style::{Color, Modifier, Style};

/// Default text style
pub fn default_style() -> Style {
    Style::default().fg(Color::White)
}

/// Selected mode tab
pub fn selected_tab_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::LightCyan)
        .add_modifier(Modifier::BOLD)
}

/// Mode tabs once a session has started
pub fn locked_tab_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Running status badge style
pub fn running_style() -> Style {
    Style::default()
        .fg(Color::Magenta)
        .add_modifier(Modifier::BOLD)
}

/// Paused status badge style
pub fn paused_style() -> Style {
    Style::default().fg(Color::Yellow)
}

/// Idle status badge style
pub fn idle_style() -> Style {
    Style::default().fg(Color::Gray)
}

/// Countdown digits
pub fn clock_style() -> Style {
    Style::default()
        .fg(Color::LightBlue)
        .add_modifier(Modifier::BOLD)
}

/// Title style for panes
pub fn title_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

/// Border style
pub fn border_style() -> Style {
    Style::default().fg(Color::Gray)
}

/// Modal background style
pub fn modal_bg_style() -> Style {
    Style::default().bg(Color::DarkGray).fg(Color::White)
}

/// Modal title style
pub fn modal_title_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

/// Keybinding hint style
pub fn hint_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Progress gauge style (blue to cyan)
pub fn gauge_style() -> Style {
    Style::default().fg(Color::Cyan).bg(Color::DarkGray)
}

/// Secondary text (mode and duration in history rows)
pub fn muted_text_style() -> Style {
    Style::default().fg(Color::Gray)
}

/// Status line message
pub fn message_style() -> Style {
    Style::default().fg(Color::Yellow)
}
