use super::enums::Mode;

/// Format remaining seconds as "MM:SS"
pub fn format_clock(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Format a recorded duration as "Xm Ys"
pub fn format_duration(secs: u32) -> String {
    format!("{}m {}s", secs / 60, secs % 60)
}

/// Format a total as "Xh Ym" or "Xm" for summaries
pub fn format_total(secs: u32) -> String {
    let total_mins = secs / 60;
    if total_mins < 60 {
        format!("{}m", total_mins)
    } else {
        let hours = total_mins / 60;
        let mins = total_mins % 60;
        if mins == 0 {
            format!("{}h", hours)
        } else {
            format!("{}h {}m", hours, mins)
        }
    }
}

/// Drop the seconds from a "H:MM:SS AM" time, keeping the period
pub fn short_time(finished_at: &str) -> String {
    let mut parts = finished_at.splitn(2, ' ');
    let time = parts.next().unwrap_or_default();
    let period = parts.next();

    let mut fields = time.split(':');
    let (hour, minute) = match (fields.next(), fields.next()) {
        (Some(h), Some(m)) => (h, m),
        _ => return finished_at.to_string(),
    };

    match period {
        Some(p) => format!("{}:{} {}", hour, minute, p),
        None => format!("{}:{}", hour, minute),
    }
}

/// Percentage of the mode's duration already counted down (0.0 to 100.0)
pub fn progress_percent(mode: Mode, secs_remaining: u32) -> f64 {
    let total = mode.duration_secs() as f64;
    let elapsed = total - secs_remaining.min(mode.duration_secs()) as f64;
    elapsed / total * 100.0
}

/// Terminal title, e.g. "24:59 - Pomodoro | Write spec"
pub fn window_title(mode: Mode, secs_remaining: u32, label: &str) -> String {
    let clock = format_clock(secs_remaining);
    if label.is_empty() {
        format!("{} - {}", clock, mode.name())
    } else {
        format!("{} - {} | {}", clock, mode.name(), label)
    }
}
