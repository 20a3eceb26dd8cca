//! Main update function - handles state transitions (TEA pattern)

use crate::message::Message;
use crate::state::{AppState, UiMode};

use super::{console, contract, file_tree, keys, project, UpdateResult};

/// Process a message and update state
/// Returns optional follow-up message and/or action
pub fn update(state: &mut AppState, message: Message) -> UpdateResult {
    match message {
        Message::RequestQuit => {
            state.request_quit();
            UpdateResult::none()
        }

        Message::Quit => {
            state.phase = crate::state::AppPhase::Quitting;
            UpdateResult::none()
        }

        Message::ConfirmQuit => {
            state.confirm_quit();
            UpdateResult::none()
        }

        Message::CancelQuit => {
            state.cancel_quit();
            UpdateResult::none()
        }

        Message::Key(key) => {
            if let Some(msg) = keys::handle_key(state, key) {
                UpdateResult::message(msg)
            } else {
                UpdateResult::none()
            }
        }

        Message::Tick => UpdateResult::none(),

        // ─────────────────────────────────────────────────────────
        // Console pipeline (bus-forwarded)
        // ─────────────────────────────────────────────────────────
        Message::ConsoleLog(entry) => console::handle_console_log(state, entry),
        Message::ConsoleClear => console::handle_console_clear(state),
        Message::ConsoleRaw(text) => console::handle_console_raw(state, text),
        Message::SplitResized => console::handle_split_resized(state),

        // ─────────────────────────────────────────────────────────
        // Console controls
        // ─────────────────────────────────────────────────────────
        Message::ClearLogs => console::handle_clear_logs(state),
        Message::CycleLogFilter => console::handle_cycle_filter(state),
        Message::StartSearch => console::handle_start_search(state),
        Message::CancelSearch => console::handle_cancel_search(state),
        Message::CommitSearch => console::handle_commit_search(state),
        Message::RunDeferredSearch { query } => console::handle_deferred_search(state, query),

        Message::ScrollUp => console::handle_scroll_up(state),
        Message::ScrollDown => console::handle_scroll_down(state),
        Message::ScrollToTop => console::handle_scroll_to_top(state),
        Message::ScrollToBottom => console::handle_scroll_to_bottom(state),
        Message::PageUp => console::handle_page_up(state),
        Message::PageDown => console::handle_page_down(state),

        // ─────────────────────────────────────────────────────────
        // Layout
        // ─────────────────────────────────────────────────────────
        Message::FocusNext => {
            state.focus = state.focus.next();
            UpdateResult::none()
        }
        Message::GrowConsole => resize_console(state, 5),
        Message::ShrinkConsole => resize_console(state, -5),

        // ─────────────────────────────────────────────────────────
        // File tree
        // ─────────────────────────────────────────────────────────
        Message::TreeUp => file_tree::handle_tree_up(state),
        Message::TreeDown => file_tree::handle_tree_down(state),
        Message::TreeActivate => file_tree::handle_tree_activate(state),
        Message::TreeStartRename => file_tree::handle_start_rename(state),
        Message::TreeStartCreate { kind } => file_tree::handle_start_create(state, kind),
        Message::TreeDelete => file_tree::handle_delete(state),

        // ─────────────────────────────────────────────────────────
        // Text input routing (mode decides which buffer is active)
        // ─────────────────────────────────────────────────────────
        Message::EditInput { c } => match state.ui_mode {
            UiMode::InlineEdit => file_tree::handle_edit_input(state, c),
            UiMode::SearchInput => {
                state.console.search_buffer.push(c);
                UpdateResult::none()
            }
            UiMode::MethodInput => {
                state.method_buffer.push(c);
                UpdateResult::none()
            }
            UiMode::SelectorInput => project::handle_input_char(state, c),
            _ => UpdateResult::none(),
        },
        Message::EditBackspace => match state.ui_mode {
            UiMode::InlineEdit => file_tree::handle_edit_backspace(state),
            UiMode::SearchInput => {
                state.console.search_buffer.pop();
                UpdateResult::none()
            }
            UiMode::MethodInput => {
                state.method_buffer.pop();
                UpdateResult::none()
            }
            UiMode::SelectorInput => project::handle_input_backspace(state),
            _ => UpdateResult::none(),
        },
        Message::EditCommit => match state.ui_mode {
            UiMode::InlineEdit => file_tree::handle_edit_commit(state),
            UiMode::SearchInput => console::handle_commit_search(state),
            UiMode::MethodInput => UpdateResult::message(Message::CallGetter {
                method: state.method_buffer.trim().to_string(),
            }),
            UiMode::SelectorInput => project::handle_input_commit(state),
            _ => UpdateResult::none(),
        },
        Message::EditCancel => match state.ui_mode {
            UiMode::InlineEdit => file_tree::handle_edit_cancel(state),
            UiMode::SearchInput => console::handle_cancel_search(state),
            UiMode::MethodInput => {
                state.method_buffer.clear();
                state.ui_mode = UiMode::Normal;
                UpdateResult::none()
            }
            UiMode::SelectorInput => project::handle_input_cancel(state),
            _ => UpdateResult::none(),
        },

        // ─────────────────────────────────────────────────────────
        // Projects
        // ─────────────────────────────────────────────────────────
        Message::OpenProjectSelector => project::handle_open_selector(state),
        Message::CloseProjectSelector => project::handle_close_selector(state),
        Message::ProjectUp => project::handle_selector_up(state),
        Message::ProjectDown => project::handle_selector_down(state),
        Message::ProjectOpen => project::handle_project_open(state),
        Message::RequestDeleteProject => project::handle_request_delete(state),
        Message::ConfirmDeleteProject => project::handle_confirm_delete(state),
        Message::CancelDeleteProject => project::handle_cancel_delete(state),
        Message::StartSelectorInput { input } => project::handle_start_input(state, input),
        Message::ProjectImported { name, result } => {
            project::handle_project_imported(state, name, result)
        }

        // ─────────────────────────────────────────────────────────
        // Contract operations
        // ─────────────────────────────────────────────────────────
        Message::Deploy => contract::handle_deploy(state),
        Message::SendToContract => contract::handle_send(state),
        Message::StartCallGetter => contract::handle_start_call(state),
        Message::CallGetter { method } => contract::handle_call(state, method),
        Message::DeployFinished { address } => contract::handle_deploy_finished(state, address),
        Message::SendFinished => contract::handle_send_finished(state),
        Message::CallFinished { method, value } => {
            contract::handle_call_finished(state, method, value)
        }
        Message::Notice(notice) => contract::handle_notice(state, notice),
    }
}

/// Adjust the console split ratio and announce the change on the bus so
/// listeners refit their geometry.
fn resize_console(state: &mut AppState, delta: i32) -> UpdateResult {
    let ratio = i32::from(state.settings.ui.console_ratio) + delta;
    state.settings.ui.console_ratio = ratio.clamp(10, 80) as u16;
    state.bus.emit(tonforge_core::Event::SplitDragEnd);
    UpdateResult::none()
}
