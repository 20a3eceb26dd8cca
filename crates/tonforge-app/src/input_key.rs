//! Terminal-agnostic key representation
//!
//! Keeps the app crate free of a crossterm dependency; the TUI layer
//! converts real terminal events into these.

/// A single key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKey {
    Char(char),
    CharCtrl(char),
    Enter,
    Esc,
    Tab,
    BackTab,
    Backspace,
    Delete,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    F(u8),
}
