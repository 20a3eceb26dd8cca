//! File tree handlers - navigation, activation, and inline edits
//!
//! Every mutation failure is converted to an `error` log entry on the bus;
//! nothing here throws past the update loop, and the edit lock is released
//! on every exit path.

use tonforge_core::{FileKind, LogEntry};

use crate::file_tree::{PendingEdit, PendingKind};
use crate::state::{AppState, UiMode};

use super::{UpdateAction, UpdateResult};

pub fn handle_tree_up(state: &mut AppState) -> UpdateResult {
    state.tree.select_up();
    UpdateResult::none()
}

pub fn handle_tree_down(state: &mut AppState) -> UpdateResult {
    if let Some(project) = state.current_project() {
        let files = project.files.clone();
        state.tree.select_down(&files);
    }
    UpdateResult::none()
}

/// Activate the selected row. Directories toggle and do not open; files
/// open and do not toggle. The node kind gates which branch runs.
pub fn handle_tree_activate(state: &mut AppState) -> UpdateResult {
    let Some(project) = state.current_project() else {
        return UpdateResult::none();
    };
    let Some(path) = state.tree.selected_path(&project.files) else {
        return UpdateResult::none();
    };
    let is_directory = project
        .files
        .node(&path)
        .map(|n| n.is_directory())
        .unwrap_or(false);

    if is_directory {
        state.tree.toggle(&path);
    } else {
        state.open_file = Some(path);
        state.focus = crate::state::FocusPane::Viewer;
    }
    UpdateResult::none()
}

/// Begin inline rename of the selected node. Rejected silently when the
/// node is a system file or another edit is open.
pub fn handle_start_rename(state: &mut AppState) -> UpdateResult {
    let Some(project) = state.current_project() else {
        return UpdateResult::none();
    };
    let node = state
        .tree
        .selected_path(&project.files)
        .and_then(|path| project.files.node(&path))
        .cloned();
    if let Some(node) = node {
        if state.tree.start_rename(&node) {
            state.ui_mode = UiMode::InlineEdit;
        }
    }
    UpdateResult::none()
}

/// Begin inline creation under the selected directory (or the project root
/// when a file row is selected).
pub fn handle_start_create(state: &mut AppState, kind: FileKind) -> UpdateResult {
    let Some(project) = state.current_project() else {
        return UpdateResult::none();
    };
    let node = state
        .tree
        .selected_path(&project.files)
        .and_then(|path| project.files.node(&path))
        .cloned();

    let started = match node {
        Some(ref node) if node.is_directory() => state.tree.start_create(Some(node), kind),
        Some(ref node) if node.is_system_file() => false,
        _ => state.tree.start_create(None, kind),
    };
    if started {
        state.ui_mode = UiMode::InlineEdit;
    }
    UpdateResult::none()
}

/// Delete the selected node and, for directories, its whole subtree
pub fn handle_delete(state: &mut AppState) -> UpdateResult {
    let Some(project_id) = state.current_project else {
        return UpdateResult::none();
    };
    let Some(path) = state
        .current_project()
        .and_then(|p| state.tree.selected_path(&p.files))
    else {
        return UpdateResult::none();
    };

    let outcome = state.store.delete_file(project_id, &path);

    match outcome {
        Ok(removed) => {
            tracing::info!("deleted '{path}' ({removed} node(s))");
            state.tree.forget_subtree(&path);
            if state
                .open_file
                .as_ref()
                .is_some_and(|open| open == &path || open.starts_with(&format!("{path}/")))
            {
                state.open_file = None;
            }
            if let Some(project) = state.current_project() {
                let files = project.files.clone();
                state.tree.clamp_selection(&files);
            }
            UpdateResult::action(UpdateAction::SaveStore)
        }
        Err(e) => {
            state.emit_log(LogEntry::error(e.to_string()));
            UpdateResult::none()
        }
    }
}

/// Character typed into the open inline edit
pub fn handle_edit_input(state: &mut AppState, c: char) -> UpdateResult {
    if let Some(pending) = state.tree.pending.as_mut() {
        pending.buffer.push(c);
    }
    UpdateResult::none()
}

pub fn handle_edit_backspace(state: &mut AppState) -> UpdateResult {
    if let Some(pending) = state.tree.pending.as_mut() {
        pending.buffer.pop();
    }
    UpdateResult::none()
}

/// Cancel the open inline edit, releasing the lock
pub fn handle_edit_cancel(state: &mut AppState) -> UpdateResult {
    state.tree.cancel_edit();
    state.ui_mode = UiMode::Normal;
    UpdateResult::none()
}

/// Commit the open inline edit. Failures become `error` log entries; the
/// tree is left in a consistent unedited state either way.
pub fn handle_edit_commit(state: &mut AppState) -> UpdateResult {
    state.ui_mode = UiMode::Normal;
    let Some(pending) = state.tree.take_pending() else {
        return UpdateResult::none();
    };
    let Some(project_id) = state.current_project else {
        return UpdateResult::none();
    };

    let PendingEdit {
        target,
        kind,
        buffer,
    } = pending;

    let outcome = match kind {
        PendingKind::Rename => {
            let renamed = state.store.rename_file(project_id, &target, &buffer);
            match renamed {
                Ok(new_path) => {
                    state.tree.rewrite_prefix(&target, &new_path);
                    if let Some(open) = state.open_file.take() {
                        let prefix = format!("{target}/");
                        state.open_file = Some(if open == target {
                            new_path.clone()
                        } else if let Some(suffix) = open.strip_prefix(&prefix) {
                            format!("{new_path}/{suffix}")
                        } else {
                            open
                        });
                    }
                    Ok(())
                }
                Err(e) => Err(e),
            }
        }
        PendingKind::Create(file_kind) => {
            let path = if target.is_empty() {
                buffer.clone()
            } else {
                format!("{target}/{buffer}")
            };
            state.store.new_file_or_folder(project_id, &path, file_kind)
        }
    };

    match outcome {
        Ok(()) => UpdateResult::action(UpdateAction::SaveStore),
        Err(e) => {
            state.emit_log(LogEntry::error(e.to_string()));
            UpdateResult::none()
        }
    }
}
