//! Application state (Model in TEA pattern)

use std::sync::Arc;

use uuid::Uuid;

use tonforge_chain::{Address, Notice};
use tonforge_core::{Event, EventBus, LogEntry, Project};

use crate::config::Settings;
use crate::console::ConsoleState;
use crate::file_tree::FileTreeState;
use crate::message::SelectorInput;
use crate::store::ProjectStore;

/// Application lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppPhase {
    #[default]
    Running,
    Quitting,
}

/// Current UI mode/screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiMode {
    /// Normal workbench: tree, viewer, console
    #[default]
    Normal,

    /// An inline rename/create input is open in the tree
    InlineEdit,

    /// Capturing the console search query
    SearchInput,

    /// Capturing a get-method name
    MethodInput,

    /// Project selector overlay
    ProjectSelector,

    /// Capturing a selector text input (name/url/path)
    SelectorInput,

    /// Delete-project confirmation dialog
    ConfirmDeleteProject,

    /// Quit confirmation dialog
    ConfirmQuit,
}

/// Which pane owns keyboard navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusPane {
    #[default]
    Tree,
    Viewer,
    Console,
}

impl FocusPane {
    pub fn next(self) -> Self {
        match self {
            FocusPane::Tree => FocusPane::Viewer,
            FocusPane::Viewer => FocusPane::Console,
            FocusPane::Console => FocusPane::Tree,
        }
    }
}

/// Project selector overlay state
#[derive(Debug, Default)]
pub struct SelectorState {
    /// Index into the reversed (most-recent-first) project list
    pub selected: usize,
    /// Open text input, if any
    pub input: Option<(SelectorInput, String)>,
}

/// Top-level application state
#[derive(Debug)]
pub struct AppState {
    pub phase: AppPhase,
    pub ui_mode: UiMode,
    pub focus: FocusPane,
    pub settings: Settings,

    /// Process-wide event bus shared with background tasks and the runner
    pub bus: Arc<EventBus>,

    pub store: ProjectStore,
    /// Id of the project currently open in the workbench
    pub current_project: Option<Uuid>,

    pub tree: FileTreeState,
    pub console: ConsoleState,
    pub selector: SelectorState,

    /// File open in the viewer pane
    pub open_file: Option<String>,
    /// Buffer for the get-method input
    pub method_buffer: String,

    /// Latest transient notification for the status bar
    pub last_notice: Option<Notice>,
    /// A deploy/send was submitted and has not reported back yet
    pub tx_in_flight: bool,
    /// Address of the most recently deployed contract
    pub last_deployed: Option<Address>,
}

impl AppState {
    pub fn new(store: ProjectStore, settings: Settings, bus: Arc<EventBus>) -> Self {
        Self {
            phase: AppPhase::Running,
            ui_mode: UiMode::Normal,
            focus: FocusPane::Tree,
            settings,
            bus,
            store,
            current_project: None,
            tree: FileTreeState::new(),
            console: ConsoleState::new(),
            selector: SelectorState::default(),
            open_file: None,
            method_buffer: String::new(),
            last_notice: None,
            tx_in_flight: false,
            last_deployed: None,
        }
    }

    /// The currently open project, if any
    pub fn current_project(&self) -> Option<&Project> {
        self.current_project.and_then(|id| self.store.get(id).ok())
    }

    /// Emit a log entry onto the bus (`LOG` channel). The console picks it
    /// up through the runner's forwarding subscription.
    pub fn emit_log(&self, entry: LogEntry) {
        self.bus.emit(Event::Log(entry));
    }

    pub fn request_quit(&mut self) {
        if self.tx_in_flight {
            self.ui_mode = UiMode::ConfirmQuit;
        } else {
            self.phase = AppPhase::Quitting;
        }
    }

    pub fn confirm_quit(&mut self) {
        self.phase = AppPhase::Quitting;
    }

    pub fn cancel_quit(&mut self) {
        if self.ui_mode == UiMode::ConfirmQuit {
            self.ui_mode = UiMode::Normal;
        }
    }

    /// Open a project: point the workbench at it and reset per-project view
    /// state
    pub fn open_project(&mut self, id: Uuid) {
        self.current_project = Some(id);
        self.tree = FileTreeState::new();
        self.open_file = None;
        self.last_deployed = None;
    }
}
