//! Handler-level tests driving the update() loop

use std::sync::{Arc, Mutex};

use tonforge_core::{Channel, ContractLanguage, Event, EventBus, FileKind, LogKind};

use crate::config::Settings;
use crate::handler::{update, Task, UpdateAction};
use crate::message::Message;
use crate::state::{AppState, FocusPane, UiMode};
use crate::store::ProjectStore;

struct Fixture {
    state: AppState,
    /// Log entries emitted on the bus `LOG` channel
    logged: Arc<Mutex<Vec<(LogKind, String)>>>,
    _dir: tempfile::TempDir,
}

fn fixture_with_project() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let bus = Arc::new(EventBus::new());

    let logged = Arc::new(Mutex::new(Vec::new()));
    {
        let logged = Arc::clone(&logged);
        bus.subscribe(Channel::Log, move |event| {
            if let Event::Log(entry) = event {
                logged.lock().unwrap().push((entry.kind, entry.text.clone()));
            }
        });
    }

    let mut store = ProjectStore::open(dir.path().join("projects.json")).unwrap();
    let id = store
        .create_blank("fixture", ContractLanguage::Func)
        .unwrap()
        .id;

    let mut state = AppState::new(store, Settings::default(), bus);
    state.open_project(id);
    state.console.init();

    Fixture {
        state,
        logged,
        _dir: dir,
    }
}

fn select_row(state: &mut AppState, path: &str) {
    let project = state.current_project().unwrap();
    let rows = state.tree.visible_rows(&project.files);
    let idx = rows
        .iter()
        .position(|row| row.path == path)
        .unwrap_or_else(|| panic!("row '{path}' not visible"));
    state.tree.selected = idx;
}

fn errors(fx: &Fixture) -> Vec<String> {
    fx.logged
        .lock()
        .unwrap()
        .iter()
        .filter(|(kind, _)| *kind == LogKind::Error)
        .map(|(_, text)| text.clone())
        .collect()
}

// ─────────────────────────────────────────────────────────
// Edit lock
// ─────────────────────────────────────────────────────────

#[test]
fn test_single_inline_edit_across_the_tree() {
    let mut fx = fixture_with_project();
    fx.state.focus = FocusPane::Tree;

    select_row(&mut fx.state, "main.fc");
    update(&mut fx.state, Message::TreeStartRename);
    assert_eq!(fx.state.ui_mode, UiMode::InlineEdit);
    let first_target = fx.state.tree.pending.as_ref().unwrap().target.clone();

    // Second edit while the first is open: no-op
    select_row(&mut fx.state, "test.spec.js");
    update(&mut fx.state, Message::TreeStartRename);
    assert_eq!(fx.state.tree.pending.as_ref().unwrap().target, first_target);

    // Cancelling releases the lock and permits the next edit
    update(&mut fx.state, Message::EditCancel);
    assert!(fx.state.tree.pending.is_none());
    assert!(!fx.state.tree.lock.is_active());
    assert_eq!(fx.state.ui_mode, UiMode::Normal);

    select_row(&mut fx.state, "main.fc");
    update(&mut fx.state, Message::TreeStartRename);
    assert!(fx.state.tree.pending.is_some());
}

#[test]
fn test_failed_commit_logs_error_and_releases_lock() {
    let mut fx = fixture_with_project();
    select_row(&mut fx.state, "main.fc");
    update(&mut fx.state, Message::TreeStartRename);

    // Empty names are invalid
    fx.state.tree.pending.as_mut().unwrap().buffer = String::new();
    update(&mut fx.state, Message::EditCommit);

    // Failure surfaced as an error log entry, not a crash
    assert!(!errors(&fx).is_empty());
    // Lock released, edit closed, tree untouched
    assert!(!fx.state.tree.lock.is_active());
    assert!(fx.state.tree.pending.is_none());
    assert!(fx.state.current_project().unwrap().files.contains("main.fc"));
}

// ─────────────────────────────────────────────────────────
// Reserved system files
// ─────────────────────────────────────────────────────────

#[test]
fn test_reserved_file_rejects_delete_without_mutation() {
    let mut fx = fixture_with_project();
    let nodes_before = fx.state.current_project().unwrap().files.len();

    select_row(&mut fx.state, "setting.json");
    update(&mut fx.state, Message::TreeDelete);

    assert!(errors(&fx)[0].contains("system file"));
    assert_eq!(
        fx.state.current_project().unwrap().files.len(),
        nodes_before
    );
}

#[test]
fn test_reserved_file_rejects_rename_start() {
    let mut fx = fixture_with_project();
    select_row(&mut fx.state, "setting.json");
    update(&mut fx.state, Message::TreeStartRename);

    // No edit opened, no lock taken
    assert!(fx.state.tree.pending.is_none());
    assert!(!fx.state.tree.lock.is_active());
    assert_eq!(fx.state.ui_mode, UiMode::Normal);
}

// ─────────────────────────────────────────────────────────
// Row activation branching
// ─────────────────────────────────────────────────────────

#[test]
fn test_directory_activation_toggles_and_does_not_open() {
    let mut fx = fixture_with_project();
    let id = fx.state.current_project.unwrap();
    fx.state
        .store
        .get_mut(id)
        .unwrap()
        .files
        .insert("contracts", FileKind::Directory)
        .unwrap();

    select_row(&mut fx.state, "contracts");
    update(&mut fx.state, Message::TreeActivate);
    assert!(fx.state.tree.expanded.contains("contracts"));
    assert!(fx.state.open_file.is_none());

    select_row(&mut fx.state, "contracts");
    update(&mut fx.state, Message::TreeActivate);
    assert!(!fx.state.tree.expanded.contains("contracts"));
}

#[test]
fn test_file_activation_opens_and_does_not_toggle() {
    let mut fx = fixture_with_project();
    select_row(&mut fx.state, "main.fc");
    update(&mut fx.state, Message::TreeActivate);

    assert_eq!(fx.state.open_file.as_deref(), Some("main.fc"));
    assert!(fx.state.tree.expanded.is_empty());
}

// ─────────────────────────────────────────────────────────
// Create flow
// ─────────────────────────────────────────────────────────

#[test]
fn test_create_under_collapsed_directory_auto_expands() {
    let mut fx = fixture_with_project();
    let id = fx.state.current_project.unwrap();
    fx.state
        .store
        .get_mut(id)
        .unwrap()
        .files
        .insert("contracts", FileKind::Directory)
        .unwrap();

    select_row(&mut fx.state, "contracts");
    update(
        &mut fx.state,
        Message::TreeStartCreate {
            kind: FileKind::File,
        },
    );
    assert!(fx.state.tree.expanded.contains("contracts"));

    for c in "new.fc".chars() {
        update(&mut fx.state, Message::EditInput { c });
    }
    let result = update(&mut fx.state, Message::EditCommit);
    assert!(matches!(result.action, Some(UpdateAction::SaveStore)));
    assert!(fx
        .state
        .current_project()
        .unwrap()
        .files
        .contains("contracts/new.fc"));
}

#[test]
fn test_create_duplicate_logs_invalid_path() {
    let mut fx = fixture_with_project();
    select_row(&mut fx.state, "main.fc");
    update(
        &mut fx.state,
        Message::TreeStartCreate {
            kind: FileKind::File,
        },
    );
    // Selected row is a file, so creation lands at the project root
    for c in "main.fc".chars() {
        update(&mut fx.state, Message::EditInput { c });
    }
    update(&mut fx.state, Message::EditCommit);

    assert!(errors(&fx)[0].contains("already exists"));
    assert!(!fx.state.tree.lock.is_active());
}

// ─────────────────────────────────────────────────────────
// Console filter replay through the update loop
// ─────────────────────────────────────────────────────────

#[test]
fn test_filter_replay_through_messages() {
    let mut fx = fixture_with_project();
    fx.state.console.clear_all();

    update(
        &mut fx.state,
        Message::ConsoleLog(tonforge_core::LogEntry::error("a")),
    );
    update(
        &mut fx.state,
        Message::ConsoleLog(tonforge_core::LogEntry::info("b")),
    );
    update(
        &mut fx.state,
        Message::ConsoleLog(tonforge_core::LogEntry::error("c")),
    );

    let replayed = fx.state.console.set_filter_kind(Some(LogKind::Error));
    assert_eq!(replayed, 2);
    let texts: Vec<_> = fx
        .state
        .console
        .lines()
        .iter()
        .map(|l| l.text.clone())
        .collect();
    assert_eq!(texts, vec!["a", "c"]);
}

#[test]
fn test_filter_cycle_with_query_defers_search() {
    let mut fx = fixture_with_project();
    fx.state.console.filter.text = "deploy".to_string();
    update(
        &mut fx.state,
        Message::ConsoleLog(tonforge_core::LogEntry::grey("deploy step one")),
    );

    // all -> grey replays one entry, so the search is deferred
    let result = update(&mut fx.state, Message::CycleLogFilter);
    match result.action {
        Some(UpdateAction::SpawnTask(Task::DeferredSearch { query })) => {
            assert_eq!(query, "deploy");
        }
        other => panic!("expected deferred search, got {other:?}"),
    }
}

// ─────────────────────────────────────────────────────────
// Projects
// ─────────────────────────────────────────────────────────

#[test]
fn test_delete_project_requires_confirmation() {
    let mut fx = fixture_with_project();
    update(&mut fx.state, Message::OpenProjectSelector);
    update(&mut fx.state, Message::RequestDeleteProject);
    assert_eq!(fx.state.ui_mode, UiMode::ConfirmDeleteProject);

    update(&mut fx.state, Message::CancelDeleteProject);
    assert_eq!(fx.state.ui_mode, UiMode::ProjectSelector);
    assert_eq!(fx.state.store.list_projects().len(), 1);

    update(&mut fx.state, Message::RequestDeleteProject);
    update(&mut fx.state, Message::ConfirmDeleteProject);
    assert!(fx.state.store.is_empty());
    assert!(fx.state.current_project.is_none());
}

#[test]
fn test_new_blank_project_flow() {
    let mut fx = fixture_with_project();
    update(&mut fx.state, Message::OpenProjectSelector);
    update(
        &mut fx.state,
        Message::StartSelectorInput {
            input: crate::message::SelectorInput::Name,
        },
    );
    for c in "wallet".chars() {
        update(&mut fx.state, Message::EditInput { c });
    }
    let result = update(&mut fx.state, Message::EditCommit);

    assert!(matches!(result.action, Some(UpdateAction::SaveStore)));
    assert_eq!(fx.state.store.list_projects().len(), 2);
    assert_eq!(fx.state.ui_mode, UiMode::Normal);
    let current = fx.state.current_project().unwrap();
    assert_eq!(current.name, "wallet");
}

// ─────────────────────────────────────────────────────────
// Contract operations
// ─────────────────────────────────────────────────────────

#[test]
fn test_deploy_without_artifacts_logs_error() {
    let mut fx = fixture_with_project();
    let result = update(&mut fx.state, Message::Deploy);
    assert!(result.action.is_none());
    assert!(!fx.state.tx_in_flight);
    assert!(errors(&fx)[0].contains("not found"));
}

#[test]
fn test_deploy_with_artifacts_spawns_task() {
    let mut fx = fixture_with_project();
    let id = fx.state.current_project.unwrap();
    {
        let files = &mut fx.state.store.get_mut(id).unwrap().files;
        files.insert("artifacts", FileKind::Directory).unwrap();
        files.insert("artifacts/code.boc", FileKind::File).unwrap();
        files.insert("artifacts/data.boc", FileKind::File).unwrap();
        files
            .write("artifacts/code.boc", "te6ccgEBAQEAAgAAAA==")
            .unwrap();
        files
            .write("artifacts/data.boc", "te6ccgEBAQEAAgAAAA==")
            .unwrap();
    }

    let result = update(&mut fx.state, Message::Deploy);
    assert!(matches!(
        result.action,
        Some(UpdateAction::SpawnTask(Task::Deploy { .. }))
    ));
    assert!(fx.state.tx_in_flight);
}

#[test]
fn test_quit_confirmation_guards_inflight_transaction() {
    let mut fx = fixture_with_project();
    fx.state.tx_in_flight = true;
    update(&mut fx.state, Message::RequestQuit);
    assert_eq!(fx.state.ui_mode, UiMode::ConfirmQuit);
    assert_eq!(fx.state.phase, crate::state::AppPhase::Running);

    update(&mut fx.state, Message::CancelQuit);
    assert_eq!(fx.state.ui_mode, UiMode::Normal);

    update(&mut fx.state, Message::RequestQuit);
    update(&mut fx.state, Message::ConfirmQuit);
    assert_eq!(fx.state.phase, crate::state::AppPhase::Quitting);
}
