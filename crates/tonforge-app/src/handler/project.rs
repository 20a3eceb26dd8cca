//! Project selector and lifecycle handlers
//!
//! Project-level failures surface as transient notices (toasts), not log
//! entries, matching how the original separates the two.

use std::path::{Path, PathBuf};

use tonforge_chain::Notice;
use tonforge_core::{ContractLanguage, LogEntry};
use uuid::Uuid;

use crate::message::SelectorInput;
use crate::state::{AppState, UiMode};

use super::{Task, UpdateAction, UpdateResult};

/// Id of the project the selector cursor points at. The display list is
/// reversed so the most recently created project comes first.
fn selected_project_id(state: &AppState) -> Option<Uuid> {
    let projects = state.store.list_projects();
    projects
        .iter()
        .rev()
        .nth(state.selector.selected)
        .map(|p| p.id)
}

pub fn handle_open_selector(state: &mut AppState) -> UpdateResult {
    state.selector.selected = 0;
    state.selector.input = None;
    state.ui_mode = UiMode::ProjectSelector;
    UpdateResult::none()
}

pub fn handle_close_selector(state: &mut AppState) -> UpdateResult {
    state.selector.input = None;
    state.ui_mode = UiMode::Normal;
    UpdateResult::none()
}

pub fn handle_selector_up(state: &mut AppState) -> UpdateResult {
    state.selector.selected = state.selector.selected.saturating_sub(1);
    UpdateResult::none()
}

pub fn handle_selector_down(state: &mut AppState) -> UpdateResult {
    let count = state.store.list_projects().len();
    if count > 0 && state.selector.selected + 1 < count {
        state.selector.selected += 1;
    }
    UpdateResult::none()
}

/// Open the highlighted project and return to the workbench
pub fn handle_project_open(state: &mut AppState) -> UpdateResult {
    let Some(id) = selected_project_id(state) else {
        state.last_notice = Some(Notice::error("Project not found"));
        return UpdateResult::none();
    };
    let name = match state.store.get(id) {
        Ok(project) => project.name.clone(),
        Err(_) => {
            state.last_notice = Some(Notice::error("Project not found"));
            return UpdateResult::none();
        }
    };
    state.open_project(id);
    state.ui_mode = UiMode::Normal;
    state.emit_log(LogEntry::info(format!("Project '{name}' opened")));
    UpdateResult::none()
}

pub fn handle_request_delete(state: &mut AppState) -> UpdateResult {
    if selected_project_id(state).is_some() {
        state.ui_mode = UiMode::ConfirmDeleteProject;
    }
    UpdateResult::none()
}

pub fn handle_cancel_delete(state: &mut AppState) -> UpdateResult {
    state.ui_mode = UiMode::ProjectSelector;
    UpdateResult::none()
}

/// Delete the highlighted project and its files, permanently
pub fn handle_confirm_delete(state: &mut AppState) -> UpdateResult {
    state.ui_mode = UiMode::ProjectSelector;
    let Some(id) = selected_project_id(state) else {
        return UpdateResult::none();
    };

    match state.store.delete_project(id) {
        Ok(removed) => {
            if state.current_project == Some(id) {
                state.current_project = None;
                state.open_file = None;
            }
            let count = state.store.list_projects().len();
            if count == 0 {
                state.selector.selected = 0;
            } else if state.selector.selected >= count {
                state.selector.selected = count - 1;
            }
            tracing::info!("deleted project '{}'", removed.name);
            UpdateResult::action(UpdateAction::SaveStore)
        }
        Err(e) => {
            tracing::warn!("delete project failed: {e}");
            state.last_notice = Some(Notice::error("Failed to delete project"));
            UpdateResult::none()
        }
    }
}

/// Begin capturing a selector text input (new name / git url / local path)
pub fn handle_start_input(state: &mut AppState, input: SelectorInput) -> UpdateResult {
    state.selector.input = Some((input, String::new()));
    state.ui_mode = UiMode::SelectorInput;
    UpdateResult::none()
}

pub fn handle_input_char(state: &mut AppState, c: char) -> UpdateResult {
    if let Some((_, buffer)) = state.selector.input.as_mut() {
        buffer.push(c);
    }
    UpdateResult::none()
}

pub fn handle_input_backspace(state: &mut AppState) -> UpdateResult {
    if let Some((_, buffer)) = state.selector.input.as_mut() {
        buffer.pop();
    }
    UpdateResult::none()
}

pub fn handle_input_cancel(state: &mut AppState) -> UpdateResult {
    state.selector.input = None;
    state.ui_mode = UiMode::ProjectSelector;
    UpdateResult::none()
}

/// Commit the selector input: create, import, or clone
pub fn handle_input_commit(state: &mut AppState) -> UpdateResult {
    let Some((input, buffer)) = state.selector.input.take() else {
        state.ui_mode = UiMode::ProjectSelector;
        return UpdateResult::none();
    };
    state.ui_mode = UiMode::ProjectSelector;
    let value = buffer.trim().to_string();

    match input {
        SelectorInput::Name => match state.store.create_blank(&value, ContractLanguage::Func) {
            Ok(project) => {
                let id = project.id;
                state.open_project(id);
                state.ui_mode = UiMode::Normal;
                state.emit_log(LogEntry::success(format!("Project '{value}' created")));
                UpdateResult::action(UpdateAction::SaveStore)
            }
            Err(e) => {
                state.last_notice = Some(Notice::error(e.to_string()));
                UpdateResult::none()
            }
        },
        SelectorInput::LocalPath => {
            let dir = PathBuf::from(&value);
            let name = dir
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| "imported".to_string());
            match state.store.import_dir(&name, &dir) {
                Ok(project) => {
                    let id = project.id;
                    state.open_project(id);
                    state.ui_mode = UiMode::Normal;
                    state.emit_log(LogEntry::success(format!("Project '{name}' imported")));
                    UpdateResult::action(UpdateAction::SaveStore)
                }
                Err(e) => {
                    state.last_notice = Some(Notice::error(e.to_string()));
                    UpdateResult::none()
                }
            }
        }
        SelectorInput::GitUrl => {
            if value.is_empty() {
                state.last_notice = Some(Notice::error("Repository URL cannot be empty"));
                return UpdateResult::none();
            }
            let name = repo_name_from_url(&value);
            let dest = clone_scratch_dir().join(&name);
            state.emit_log(LogEntry::info(format!("Cloning {value}...")));
            UpdateResult::action(UpdateAction::SpawnTask(Task::GitImport {
                url: value,
                name,
                dest,
            }))
        }
    }
}

/// A background import (git clone) finished
pub fn handle_project_imported(
    state: &mut AppState,
    name: String,
    result: std::result::Result<PathBuf, String>,
) -> UpdateResult {
    match result {
        Ok(dir) => {
            let imported = state.store.import_dir(&name, &dir);
            // The clone scratch dir is disposable either way
            let _ = std::fs::remove_dir_all(&dir);
            match imported {
                Ok(project) => {
                    let id = project.id;
                    state.open_project(id);
                    state.ui_mode = UiMode::Normal;
                    state.emit_log(LogEntry::success(format!("Project '{name}' imported")));
                    UpdateResult::action(UpdateAction::SaveStore)
                }
                Err(e) => {
                    state.emit_log(LogEntry::error(e.to_string()));
                    UpdateResult::none()
                }
            }
        }
        Err(message) => {
            state.emit_log(LogEntry::error(format!("Import failed: {message}")));
            UpdateResult::none()
        }
    }
}

/// Derive a project name from a repository URL
fn repo_name_from_url(url: &str) -> String {
    let tail = url
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or("imported");
    let name = tail.trim_end_matches(".git");
    if name.is_empty() {
        "imported".to_string()
    } else {
        name.to_string()
    }
}

/// Scratch area for git clones, wiped after import
fn clone_scratch_dir() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| Path::new(".").to_path_buf());
    base.join("tonforge").join("imports")
}
