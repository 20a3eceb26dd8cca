//! Key event handlers for UI modes

use tonforge_core::FileKind;

use crate::input_key::InputKey;
use crate::message::{Message, SelectorInput};
use crate::state::{AppState, FocusPane, UiMode};

/// Map a key press to a message based on the current UI mode
pub fn handle_key(state: &AppState, key: InputKey) -> Option<Message> {
    // Ctrl+C force-quits from every mode
    if key == InputKey::CharCtrl('c') {
        return Some(Message::Quit);
    }

    match state.ui_mode {
        UiMode::Normal => normal_keys(state, key),
        UiMode::InlineEdit
        | UiMode::SearchInput
        | UiMode::MethodInput
        | UiMode::SelectorInput => input_keys(key),
        UiMode::ProjectSelector => selector_keys(key),
        UiMode::ConfirmDeleteProject => confirm_delete_keys(key),
        UiMode::ConfirmQuit => confirm_quit_keys(key),
    }
}

/// Any text-capturing mode shares the same four messages; the update
/// function routes them to the active buffer.
fn input_keys(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Char(c) => Some(Message::EditInput { c }),
        InputKey::Backspace => Some(Message::EditBackspace),
        InputKey::Enter => Some(Message::EditCommit),
        InputKey::Esc => Some(Message::EditCancel),
        _ => None,
    }
}

fn normal_keys(state: &AppState, key: InputKey) -> Option<Message> {
    match key {
        InputKey::Char('q') => Some(Message::RequestQuit),
        InputKey::Tab => Some(Message::FocusNext),
        InputKey::Char('p') => Some(Message::OpenProjectSelector),

        // Console controls
        InputKey::Char('c') => Some(Message::ClearLogs),
        InputKey::Char('f') => Some(Message::CycleLogFilter),
        InputKey::Char('/') => Some(Message::StartSearch),
        InputKey::Char('+') => Some(Message::GrowConsole),
        InputKey::Char('-') => Some(Message::ShrinkConsole),

        // Contract operations
        InputKey::Char('D') => Some(Message::Deploy),
        InputKey::Char('M') => Some(Message::SendToContract),
        InputKey::Char('G') => Some(Message::StartCallGetter),

        // Focus-dependent navigation
        InputKey::Up => match state.focus {
            FocusPane::Tree => Some(Message::TreeUp),
            FocusPane::Console => Some(Message::ScrollUp),
            FocusPane::Viewer => None,
        },
        InputKey::Down => match state.focus {
            FocusPane::Tree => Some(Message::TreeDown),
            FocusPane::Console => Some(Message::ScrollDown),
            FocusPane::Viewer => None,
        },
        InputKey::Enter if state.focus == FocusPane::Tree => Some(Message::TreeActivate),
        InputKey::PageUp if state.focus == FocusPane::Console => Some(Message::PageUp),
        InputKey::PageDown if state.focus == FocusPane::Console => Some(Message::PageDown),
        InputKey::Home if state.focus == FocusPane::Console => Some(Message::ScrollToTop),
        InputKey::End if state.focus == FocusPane::Console => Some(Message::ScrollToBottom),

        // Tree mutations
        InputKey::Char('r') if state.focus == FocusPane::Tree => Some(Message::TreeStartRename),
        InputKey::Char('n') if state.focus == FocusPane::Tree => Some(Message::TreeStartCreate {
            kind: FileKind::File,
        }),
        InputKey::Char('N') if state.focus == FocusPane::Tree => Some(Message::TreeStartCreate {
            kind: FileKind::Directory,
        }),
        InputKey::Char('d') | InputKey::Delete if state.focus == FocusPane::Tree => {
            Some(Message::TreeDelete)
        }

        _ => None,
    }
}

fn selector_keys(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Up => Some(Message::ProjectUp),
        InputKey::Down => Some(Message::ProjectDown),
        InputKey::Enter => Some(Message::ProjectOpen),
        InputKey::Esc | InputKey::Char('p') => Some(Message::CloseProjectSelector),
        InputKey::Char('d') | InputKey::Delete => Some(Message::RequestDeleteProject),
        InputKey::Char('n') => Some(Message::StartSelectorInput {
            input: SelectorInput::Name,
        }),
        InputKey::Char('g') => Some(Message::StartSelectorInput {
            input: SelectorInput::GitUrl,
        }),
        InputKey::Char('i') => Some(Message::StartSelectorInput {
            input: SelectorInput::LocalPath,
        }),
        InputKey::Char('q') => Some(Message::RequestQuit),
        _ => None,
    }
}

fn confirm_delete_keys(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Enter | InputKey::Char('y') => Some(Message::ConfirmDeleteProject),
        InputKey::Esc | InputKey::Char('n') => Some(Message::CancelDeleteProject),
        _ => None,
    }
}

fn confirm_quit_keys(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Enter | InputKey::Char('y') => Some(Message::ConfirmQuit),
        InputKey::Esc | InputKey::Char('n') => Some(Message::CancelQuit),
        _ => None,
    }
}
