//! Console pipeline and filter/search handlers

use tonforge_core::{Event, LogEntry};

use crate::state::{AppState, UiMode};

use super::{Task, UpdateAction, UpdateResult};

/// `LOG` arrived: append and print one entry
pub fn handle_console_log(state: &mut AppState, entry: LogEntry) -> UpdateResult {
    state.console.append(entry);
    UpdateResult::none()
}

/// `LOG_CLEAR` arrived: clear the visible pane only
pub fn handle_console_clear(state: &mut AppState) -> UpdateResult {
    state.console.clear_pane();
    UpdateResult::none()
}

/// `TEST_CASE_LOG` arrived: raw write
pub fn handle_console_raw(state: &mut AppState, text: String) -> UpdateResult {
    state.console.raw_write(&text);
    UpdateResult::none()
}

/// `ON_SPLIT_DRAG_END` arrived: refit to the viewport the renderer last
/// reported. A not-yet-ready pane swallows this.
pub fn handle_split_resized(state: &mut AppState) -> UpdateResult {
    let visible = state.console.scroll.visible_lines;
    state.console.refit(visible);
    UpdateResult::none()
}

/// User cleared the logs: drop history and reset the pane, announcing the
/// clear on the bus for any other listeners
pub fn handle_clear_logs(state: &mut AppState) -> UpdateResult {
    state.console.clear_all();
    state.bus.emit(Event::LogClear);
    UpdateResult::none()
}

/// Cycle the kind filter. A non-empty replay defers the search until the
/// render settles; an empty one searches immediately.
pub fn handle_cycle_filter(state: &mut AppState) -> UpdateResult {
    let replayed = state.console.cycle_filter_kind();
    tracing::debug!(
        filter = state.console.filter.display_name(),
        replayed,
        "log filter cycled"
    );

    let query = state.console.filter.text.clone();
    if query.is_empty() {
        return UpdateResult::none();
    }
    if replayed > 0 {
        UpdateResult::action(UpdateAction::SpawnTask(Task::DeferredSearch { query }))
    } else {
        state.console.search_forward(&query);
        UpdateResult::none()
    }
}

/// Enter search input mode, seeding the buffer with the active query
pub fn handle_start_search(state: &mut AppState) -> UpdateResult {
    state.console.search_buffer = state.console.filter.text.clone();
    state.ui_mode = UiMode::SearchInput;
    UpdateResult::none()
}

/// Leave search input mode without applying the buffer
pub fn handle_cancel_search(state: &mut AppState) -> UpdateResult {
    state.console.search_buffer.clear();
    state.ui_mode = UiMode::Normal;
    UpdateResult::none()
}

/// Apply the typed query and jump to the next match
pub fn handle_commit_search(state: &mut AppState) -> UpdateResult {
    state.console.filter.text = state.console.search_buffer.clone();
    state.ui_mode = UiMode::Normal;
    let query = state.console.filter.text.clone();
    state.console.search_forward(&query);
    UpdateResult::none()
}

/// Deferred search fired after the render-settle delay. A miss is
/// non-fatal and leaves the view unchanged.
pub fn handle_deferred_search(state: &mut AppState, query: String) -> UpdateResult {
    state.console.search_forward(&query);
    UpdateResult::none()
}

// ─────────────────────────────────────────────────────────
// Scroll handlers
// ─────────────────────────────────────────────────────────

pub fn handle_scroll_up(state: &mut AppState) -> UpdateResult {
    state.console.scroll.scroll_up(1);
    UpdateResult::none()
}

pub fn handle_scroll_down(state: &mut AppState) -> UpdateResult {
    let total = state.console.lines().len();
    state.console.scroll.scroll_down(1, total);
    UpdateResult::none()
}

pub fn handle_scroll_to_top(state: &mut AppState) -> UpdateResult {
    state.console.scroll.scroll_to_top();
    UpdateResult::none()
}

pub fn handle_scroll_to_bottom(state: &mut AppState) -> UpdateResult {
    let total = state.console.lines().len();
    state.console.scroll.scroll_to_bottom(total);
    UpdateResult::none()
}

pub fn handle_page_up(state: &mut AppState) -> UpdateResult {
    state.console.scroll.page_up();
    UpdateResult::none()
}

pub fn handle_page_down(state: &mut AppState) -> UpdateResult {
    let total = state.console.lines().len();
    state.console.scroll.page_down(total);
    UpdateResult::none()
}
