//! Color palette and shared styles
//!
//! Log colors use the same xterm-256 indices as the web console this UI
//! descends from, so log output looks identical across both.

use ratatui::style::{Color, Modifier, Style};
use tonforge_core::LogKind;

/// Console color for a log kind (xterm-256 indexed)
pub fn log_color(kind: LogKind) -> Color {
    Color::Indexed(kind.color_index())
}

/// Style for a console line of the given kind
pub fn log_style(kind: LogKind) -> Style {
    Style::default().fg(log_color(kind))
}

/// Style for the grey timestamp segment
pub fn timestamp_style() -> Style {
    Style::default().fg(Color::Indexed(LogKind::Grey.color_index()))
}

/// Border style for the focused pane
pub fn focused_border() -> Style {
    Style::default().fg(Color::Cyan)
}

/// Border style for unfocused panes
pub fn border() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Highlight style for the selected row in lists and the tree
pub fn selection() -> Style {
    Style::default()
        .bg(Color::Indexed(237))
        .add_modifier(Modifier::BOLD)
}

/// Dimmed style for system files
pub fn system_file() -> Style {
    Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::ITALIC)
}

/// Style for directory rows
pub fn directory() -> Style {
    Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD)
}

/// Style for status bar hints
pub fn hint() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Style for error notices
pub fn notice_error() -> Style {
    Style::default()
        .fg(Color::Indexed(196))
        .add_modifier(Modifier::BOLD)
}

/// Style for success notices
pub fn notice_success() -> Style {
    Style::default()
        .fg(Color::Indexed(40))
        .add_modifier(Modifier::BOLD)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_colors_match_web_indices() {
        assert_eq!(log_color(LogKind::Grey), Color::Indexed(243));
        assert_eq!(log_color(LogKind::Success), Color::Indexed(40));
        assert_eq!(log_color(LogKind::Error), Color::Indexed(196));
        assert_eq!(log_color(LogKind::Warning), Color::Indexed(214));
        assert_eq!(log_color(LogKind::Info), Color::Indexed(33));
    }
}
