//! Shared confirmation dialog overlay

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use crate::theme;
use crate::widgets::project_selector::centered;

pub struct ConfirmDialog<'a> {
    title: &'a str,
    lines: Vec<String>,
}

impl<'a> ConfirmDialog<'a> {
    pub fn new(title: &'a str, lines: Vec<String>) -> Self {
        Self { title, lines }
    }
}

impl Widget for ConfirmDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = (self.lines.len() as u16) + 4;
        let popup = centered(area, 56, height);
        Clear.render(popup, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme::notice_error())
            .title(format!(" {} ", self.title));
        let inner = block.inner(popup);
        block.render(popup, buf);

        let mut lines: Vec<Line> = self.lines.into_iter().map(Line::from).collect();
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "y confirm · n cancel",
            theme::hint(),
        )));
        Paragraph::new(lines).render(inner, buf);
    }
}
