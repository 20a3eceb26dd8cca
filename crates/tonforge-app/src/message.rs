//! Message types for the application (TEA pattern)

use std::path::PathBuf;

use tonforge_chain::{Address, Notice};
use tonforge_core::{FileKind, LogEntry};

use crate::input_key::InputKey;

/// Which value a selector text input is capturing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorInput {
    /// Name for a new blank project
    Name,
    /// Repository URL for a git import
    GitUrl,
    /// Directory path for a local import
    LocalPath,
}

/// All possible messages/actions in the application
#[derive(Debug, Clone)]
pub enum Message {
    /// Keyboard event from terminal
    Key(InputKey),

    /// Tick event for periodic updates
    Tick,

    /// Request to quit (may show confirmation dialog)
    RequestQuit,

    /// Force quit without confirmation (Ctrl+C, signal handler)
    Quit,

    /// Confirm quit from confirmation dialog
    ConfirmQuit,

    /// Cancel quit from confirmation dialog
    CancelQuit,

    // ─────────────────────────────────────────────────────────
    // Console Pipeline (forwarded from the EventBus by the runner)
    // ─────────────────────────────────────────────────────────
    /// `LOG` - append one formatted entry
    ConsoleLog(LogEntry),
    /// `LOG_CLEAR` - clear the visible pane
    ConsoleClear,
    /// `TEST_CASE_LOG` - raw unformatted output
    ConsoleRaw(String),
    /// `ON_SPLIT_DRAG_END` - refit the console geometry
    SplitResized,

    // ─────────────────────────────────────────────────────────
    // Console Controls
    // ─────────────────────────────────────────────────────────
    /// Clear the log history and the visible pane
    ClearLogs,
    /// Cycle the kind filter (all → grey → ... → info → all)
    CycleLogFilter,
    /// Enter search input mode
    StartSearch,
    /// Leave search input mode without applying
    CancelSearch,
    /// Apply the typed search query
    CommitSearch,
    /// Run the post-replay search after the render-settle delay
    RunDeferredSearch { query: String },

    // ─────────────────────────────────────────────────────────
    // Scroll Messages
    // ─────────────────────────────────────────────────────────
    /// Scroll console up one line
    ScrollUp,
    /// Scroll console down one line
    ScrollDown,
    /// Scroll to top of console
    ScrollToTop,
    /// Scroll to bottom of console
    ScrollToBottom,
    /// Page up in console
    PageUp,
    /// Page down in console
    PageDown,

    // ─────────────────────────────────────────────────────────
    // Layout Messages
    // ─────────────────────────────────────────────────────────
    /// Cycle keyboard focus between panes
    FocusNext,
    /// Grow the console split
    GrowConsole,
    /// Shrink the console split
    ShrinkConsole,

    // ─────────────────────────────────────────────────────────
    // File Tree Messages
    // ─────────────────────────────────────────────────────────
    /// Move tree selection up
    TreeUp,
    /// Move tree selection down
    TreeDown,
    /// Activate the selected row (toggle directory / open file)
    TreeActivate,
    /// Begin inline rename of the selected node
    TreeStartRename,
    /// Begin inline creation under the selected directory
    TreeStartCreate { kind: FileKind },
    /// Delete the selected node
    TreeDelete,

    // ─────────────────────────────────────────────────────────
    // Text Input Messages (inline edit / search / selector inputs)
    // ─────────────────────────────────────────────────────────
    /// Character typed into the active input
    EditInput { c: char },
    /// Backspace in the active input
    EditBackspace,
    /// Commit the active input
    EditCommit,
    /// Cancel the active input
    EditCancel,

    // ─────────────────────────────────────────────────────────
    // Project Messages
    // ─────────────────────────────────────────────────────────
    /// Open the project selector
    OpenProjectSelector,
    /// Close the project selector
    CloseProjectSelector,
    /// Move selector selection up
    ProjectUp,
    /// Move selector selection down
    ProjectDown,
    /// Open the selected project
    ProjectOpen,
    /// Ask for confirmation before deleting the selected project
    RequestDeleteProject,
    /// Delete the selected project (confirmed)
    ConfirmDeleteProject,
    /// Dismiss the delete confirmation
    CancelDeleteProject,
    /// Begin capturing a selector text input
    StartSelectorInput { input: SelectorInput },
    /// A background import finished
    ProjectImported {
        name: String,
        result: std::result::Result<PathBuf, String>,
    },

    // ─────────────────────────────────────────────────────────
    // Contract Messages
    // ─────────────────────────────────────────────────────────
    /// Deploy the current project's build artifacts
    Deploy,
    /// Send the message cell to the last deployed contract
    SendToContract,
    /// Enter get-method input mode
    StartCallGetter,
    /// Invoke a get method on the last deployed contract
    CallGetter { method: String },
    /// Deploy task finished
    DeployFinished { address: Option<Address> },
    /// Send task finished
    SendFinished,
    /// Get-method task finished
    CallFinished {
        method: String,
        value: Option<String>,
    },
    /// A user-facing notification from a background task
    Notice(Notice),
}
