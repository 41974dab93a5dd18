//! Dashboard utilities — status styling and status bar formatting.

use ratatui::style::{Color, Modifier, Style};

use crate::dashboard::StatusKind;

/// Colour for a status line.
pub fn status_style(kind: StatusKind) -> Style {
    match kind {
        StatusKind::Info => Style::default().fg(Color::Yellow),
        StatusKind::Success => Style::default().fg(Color::Green),
        StatusKind::Error => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    }
}

/// Format the in-flight request count for the status bar.
pub fn format_in_flight(count: usize) -> String {
    match count {
        0 => "idle".into(),
        1 => "1 request".into(),
        n => format!("{n} requests"),
    }
}

/// Cut `text` to at most `width` characters, marking the cut with an ellipsis.
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(width - 1).collect();
    out.push('\u{2026}');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_in_flight_counts() {
        assert_eq!(format_in_flight(0), "idle");
        assert_eq!(format_in_flight(1), "1 request");
        assert_eq!(format_in_flight(4), "4 requests");
    }

    #[test]
    fn truncate_short_untouched() {
        assert_eq!(truncate("abc", 5), "abc");
    }

    #[test]
    fn truncate_long_gets_ellipsis() {
        assert_eq!(truncate("abcdef", 4), "abc\u{2026}");
        assert_eq!(truncate("abcdef", 0), "");
    }

    #[test]
    fn error_style_is_red() {
        assert_eq!(status_style(StatusKind::Error).fg, Some(Color::Red));
    }
}
