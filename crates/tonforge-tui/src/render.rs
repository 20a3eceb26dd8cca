//! Frame composition

use ratatui::layout::{Constraint, Layout};
use ratatui::Frame;

use tonforge_app::state::{AppState, FocusPane, UiMode};

use crate::widgets::{
    ConfirmDialog, ConsoleView, FileTreeView, ProjectSelector, StatusBar, ViewerPane,
};

/// Draw the whole frame
pub fn draw(frame: &mut Frame, state: &mut AppState) {
    let area = frame.area();
    let ratio = state.settings.ui.console_ratio.clamp(10, 80);

    let rows = Layout::vertical([
        Constraint::Min(5),
        Constraint::Percentage(ratio),
        Constraint::Length(1),
    ])
    .split(area);
    let main = Layout::horizontal([Constraint::Length(32), Constraint::Min(20)]).split(rows[0]);

    // Report the viewport to the console before borrowing it for rendering
    let console_height = rows[1].height.saturating_sub(2) as usize;
    let total = state.console.lines().len();
    state.console.scroll.update_viewport(console_height, total);

    let tree_focused = state.focus == FocusPane::Tree
        && matches!(state.ui_mode, UiMode::Normal | UiMode::InlineEdit);
    frame.render_widget(FileTreeView::new(state, tree_focused), main[0]);
    frame.render_widget(
        ViewerPane::new(state, state.focus == FocusPane::Viewer),
        main[1],
    );
    frame.render_widget(
        ConsoleView::new(state, state.focus == FocusPane::Console),
        rows[1],
    );
    frame.render_widget(StatusBar::new(state), rows[2]);

    match state.ui_mode {
        UiMode::ProjectSelector | UiMode::SelectorInput => {
            frame.render_widget(ProjectSelector::new(state), area);
        }
        UiMode::ConfirmDeleteProject => {
            frame.render_widget(ProjectSelector::new(state), area);
            let name = state
                .store
                .list_projects()
                .iter()
                .rev()
                .nth(state.selector.selected)
                .map(|p| p.name.clone())
                .unwrap_or_default();
            frame.render_widget(
                ConfirmDialog::new(
                    "Delete project?",
                    vec![
                        format!("Delete '{name}'?"),
                        "This action is irreversible!".to_string(),
                        "All files and folders will be deleted.".to_string(),
                    ],
                ),
                area,
            );
        }
        UiMode::ConfirmQuit => {
            frame.render_widget(
                ConfirmDialog::new(
                    "Quit?",
                    vec!["A transaction is still pending.".to_string()],
                ),
                area,
            );
        }
        _ => {}
    }
}
