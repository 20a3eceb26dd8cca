//! File tree pane widget
//!
//! Renders the visible rows of the current project's tree with expansion
//! markers, selection highlight, and the inline rename/create input.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use tonforge_app::state::AppState;
use tonforge_core::FileKind;
use tonforge_app::file_tree::{PendingKind, TreeRow};

use crate::theme;

pub struct FileTreeView<'a> {
    state: &'a AppState,
    focused: bool,
}

impl<'a> FileTreeView<'a> {
    pub fn new(state: &'a AppState, focused: bool) -> Self {
        Self { state, focused }
    }

    fn row_line(&self, row: &TreeRow, selected: bool) -> Line<'static> {
        let indent = "  ".repeat(row.depth);
        let marker = match row.kind {
            FileKind::Directory if row.expanded => "▾ ",
            FileKind::Directory => "▸ ",
            FileKind::File => "  ",
        };

        let style = if row.system {
            theme::system_file()
        } else if row.kind == FileKind::Directory {
            theme::directory()
        } else {
            ratatui::style::Style::default()
        };
        let style = if selected { style.patch(theme::selection()) } else { style };

        Line::from(vec![
            Span::raw(indent),
            Span::styled(format!("{marker}{}", row.text), style),
        ])
    }
}

impl Widget for FileTreeView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            theme::focused_border()
        } else {
            theme::border()
        };

        let title = match self.state.current_project() {
            Some(project) => format!(" {} ({}) ", project.name, project.language),
            None => " Files ".to_string(),
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(title);
        let inner = block.inner(area);
        block.render(area, buf);

        let Some(project) = self.state.current_project() else {
            Paragraph::new("No project open. Press 'p' to pick one.")
                .style(theme::hint())
                .render(inner, buf);
            return;
        };

        let tree = &self.state.tree;
        let rows = tree.visible_rows(&project.files);
        let mut lines: Vec<Line> = Vec::with_capacity(rows.len() + 1);

        for (idx, row) in rows.iter().enumerate() {
            let selected = self.focused && idx == tree.selected;
            lines.push(self.row_line(row, selected));

            // Inline input rendered where the edit will land
            if let Some(pending) = &tree.pending {
                let here = match pending.kind {
                    PendingKind::Rename => pending.target == row.path,
                    PendingKind::Create(_) => pending.target == row.path,
                };
                if here {
                    let prompt = match pending.kind {
                        PendingKind::Rename => "rename: ",
                        PendingKind::Create(FileKind::File) => "new file: ",
                        PendingKind::Create(FileKind::Directory) => "new folder: ",
                    };
                    lines.push(Line::from(vec![
                        Span::raw("  ".repeat(row.depth + 1)),
                        Span::styled(
                            format!("{prompt}{}▏", pending.buffer),
                            theme::focused_border(),
                        ),
                    ]));
                }
            }
        }

        // Root-level create input when nothing matched a row
        if let Some(pending) = &tree.pending {
            if matches!(pending.kind, PendingKind::Create(_)) && pending.target.is_empty() {
                let prompt = match pending.kind {
                    PendingKind::Create(FileKind::Directory) => "new folder: ",
                    _ => "new file: ",
                };
                lines.push(Line::from(Span::styled(
                    format!("{prompt}{}▏", pending.buffer),
                    theme::focused_border(),
                )));
            }
        }

        // Keep the selection in view
        let visible = inner.height as usize;
        let skip = tree.selected.saturating_sub(visible.saturating_sub(1));
        let lines: Vec<Line> = lines.into_iter().skip(skip).collect();

        Paragraph::new(lines).render(inner, buf);
    }
}
