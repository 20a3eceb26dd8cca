//! Handler module - TEA update function and event handlers
//!
//! Organized into submodules:
//! - `update`: Main update() function and message dispatch
//! - `keys`: Key event handlers for UI modes
//! - `console`: Console pipeline and filter/search handlers
//! - `file_tree`: Tree navigation and inline-edit handlers
//! - `project`: Project selector and lifecycle handlers
//! - `contract`: Deploy/send/call handlers

pub(crate) mod console;
pub(crate) mod contract;
pub(crate) mod file_tree;
pub(crate) mod keys;
pub(crate) mod project;
pub(crate) mod update;

#[cfg(test)]
mod tests;

use std::path::PathBuf;

use tonforge_chain::{Address, CellBoc};

use crate::message::Message;

// Re-export main entry point
pub use update::update;

/// Actions that the event loop should perform after update
#[derive(Debug, Clone)]
pub enum UpdateAction {
    /// Spawn a background task
    SpawnTask(Task),

    /// Persist the project store to disk
    SaveStore,
}

/// Background tasks to spawn
#[derive(Debug, Clone)]
pub enum Task {
    /// Deploy a contract from its code/data cells
    Deploy { code: CellBoc, data: CellBoc },

    /// Send the message cell to a deployed contract
    SendMessage { payload: CellBoc, address: Address },

    /// Invoke a read-only get method
    CallGetter { address: Address, method: String },

    /// Clone a git repository for import
    GitImport {
        url: String,
        name: String,
        dest: PathBuf,
    },

    /// Wait for the render to settle, then run the console search
    DeferredSearch { query: String },
}

/// Result of processing a message
#[derive(Debug, Default)]
pub struct UpdateResult {
    /// Optional follow-up message to process
    pub message: Option<Message>,
    /// Optional action for the event loop to perform
    pub action: Option<UpdateAction>,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn message(msg: Message) -> Self {
        Self {
            message: Some(msg),
            action: None,
        }
    }

    pub fn action(action: UpdateAction) -> Self {
        Self {
            message: None,
            action: Some(action),
        }
    }
}
