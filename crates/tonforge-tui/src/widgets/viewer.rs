//! Read-only file viewer pane
//!
//! Stands in for the embedded code editor, which is an external concern;
//! this pane only displays the open file's content.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::{Block, Borders, Paragraph, Widget},
};

use tonforge_app::state::AppState;

use crate::theme;

pub struct ViewerPane<'a> {
    state: &'a AppState,
    focused: bool,
}

impl<'a> ViewerPane<'a> {
    pub fn new(state: &'a AppState, focused: bool) -> Self {
        Self { state, focused }
    }
}

impl Widget for ViewerPane<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            theme::focused_border()
        } else {
            theme::border()
        };

        let title = match &self.state.open_file {
            Some(path) => {
                let file_type =
                    tonforge_core::file_type_from_name(tonforge_core::file_name(path));
                if file_type.label().is_empty() {
                    format!(" {path} ")
                } else {
                    format!(" {path} [{}] ", file_type.label())
                }
            }
            None => " Editor ".to_string(),
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(title);
        let inner = block.inner(area);
        block.render(area, buf);

        let content = self
            .state
            .open_file
            .as_ref()
            .and_then(|path| {
                self.state
                    .current_project()
                    .and_then(|project| project.files.read(path).ok())
            })
            .map(str::to_string);

        match content {
            Some(content) => Paragraph::new(content).render(inner, buf),
            None => Paragraph::new("Select a file in the tree to open it.")
                .style(theme::hint())
                .render(inner, buf),
        }
    }
}
