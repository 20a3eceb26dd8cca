//! Project selector overlay
//!
//! Lists projects most-recently-created first, with create/import entry
//! points and the delete confirmation handled by the shared confirm dialog.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use tonforge_app::state::AppState;
use tonforge_app::SelectorInput;

use crate::theme;

pub struct ProjectSelector<'a> {
    state: &'a AppState,
}

impl<'a> ProjectSelector<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }
}

/// Center a popup of the given size inside `area`
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

impl Widget for ProjectSelector<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = centered(area, 52, 16);
        Clear.render(popup, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme::focused_border())
            .title(" Projects ");
        let inner = block.inner(popup);
        block.render(popup, buf);

        let state = self.state;
        let mut lines: Vec<Line> = Vec::new();

        if let Some((input, buffer)) = &state.selector.input {
            let prompt = match input {
                SelectorInput::Name => "project name",
                SelectorInput::GitUrl => "repository url",
                SelectorInput::LocalPath => "directory path",
            };
            lines.push(Line::from(Span::styled(
                format!("{prompt}: {buffer}▏"),
                theme::focused_border(),
            )));
        } else if state.store.is_empty() {
            lines.push(Line::from(Span::styled(
                "Begin by initiating a new project",
                theme::hint(),
            )));
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(
                "n new · g git import · i local import",
                theme::hint(),
            )));
        } else {
            // Most recently created first
            for (idx, project) in state.store.list_projects().iter().rev().enumerate() {
                let marker = if state.current_project == Some(project.id) {
                    "* "
                } else {
                    "  "
                };
                let label = format!("{marker}{} - {}", project.name, project.language);
                let style = if idx == state.selector.selected {
                    theme::selection()
                } else {
                    ratatui::style::Style::default()
                };
                lines.push(Line::from(Span::styled(label, style)));
            }
        }

        Paragraph::new(lines).render(inner, buf);
    }
}
