//! tonforge-app - Application state and orchestration for TON Forge
//!
//! This crate implements the TEA (The Elm Architecture) pattern for state
//! management: a [`Message`] enum, an [`AppState`] model, and an
//! [`update`](handler::update) function returning follow-up messages and
//! background actions. It also owns the project store, the console state,
//! and the file-tree view state.

pub mod config;
pub mod console;
pub mod file_tree;
pub mod handler;
pub mod input_key;
pub mod message;
pub mod state;
pub mod store;

// Re-export primary types
pub use handler::{update, Task, UpdateAction, UpdateResult};
pub use input_key::InputKey;
pub use message::{Message, SelectorInput};
pub use state::{AppPhase, AppState, FocusPane, UiMode};
pub use store::ProjectStore;

// Re-export chain types for the TUI
pub use tonforge_chain::{Network, Notice, NoticeKind};
