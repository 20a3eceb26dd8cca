//! Console pane widget
//!
//! Renders the console's visible lines with the log color map and the grey
//! trailing timestamp segment, honoring the scroll offset.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use tonforge_app::state::AppState;
use tonforge_core::LogFilter;

use crate::theme;

/// Console view over the app's console state
pub struct ConsoleView<'a> {
    state: &'a AppState,
    focused: bool,
}

impl<'a> ConsoleView<'a> {
    pub fn new(state: &'a AppState, focused: bool) -> Self {
        Self { state, focused }
    }

    fn title(filter: &LogFilter) -> String {
        if filter.is_active() || !filter.text.is_empty() {
            let mut title = format!(" Console [{}] ", filter.display_name());
            if !filter.text.is_empty() {
                title.push_str(&format!("/{} ", filter.text));
            }
            title
        } else {
            " Console ".to_string()
        }
    }
}

impl Widget for ConsoleView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let console = &self.state.console;
        let border_style = if self.focused {
            theme::focused_border()
        } else {
            theme::border()
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(Self::title(&console.filter));
        let inner = block.inner(area);
        block.render(area, buf);

        let offset = console.scroll.offset;
        let visible = inner.height as usize;
        let show_timestamps = self.state.settings.ui.show_timestamps;

        let lines: Vec<Line> = console
            .lines()
            .iter()
            .skip(offset)
            .take(visible)
            .map(|line| {
                let mut spans = vec![Span::styled(line.text.clone(), theme::log_style(line.kind))];
                if show_timestamps && !line.stamp.is_empty() {
                    spans.push(Span::styled(
                        format!("  {}", line.stamp),
                        theme::timestamp_style(),
                    ));
                }
                Line::from(spans)
            })
            .collect();

        Paragraph::new(lines).render(inner, buf);

        // Scroll position indicator in the bottom-right corner
        let total = console.lines().len();
        if total > visible && area.width > 12 {
            let indicator = format!(" {}/{} ", (offset + visible).min(total), total);
            let x = area.x + area.width - indicator.len() as u16 - 1;
            let y = area.y + area.height - 1;
            buf.set_string(x, y, &indicator, Style::default().fg(ratatui::style::Color::DarkGray));
        }
    }
}
