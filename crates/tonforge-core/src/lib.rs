//! # tonforge-core - Core Domain Types
//!
//! Foundation crate for TON Forge. Provides domain types, error handling,
//! the event bus, log entry types, and the project/file-tree model.
//!
//! This crate has **zero internal dependencies** -- it only depends on
//! external crates (serde, chrono, thiserror, uuid, tracing).
//!
//! ## Public API
//!
//! ### Log Types (`log`)
//! - [`LogEntry`] - A console log line with kind and optional timestamp
//! - [`LogKind`] - Entry category (Grey, Success, Error, Warning, Info)
//! - [`LogFilter`] - Kind/text filter state for the console view
//!
//! ### Events (`events`)
//! - [`EventBus`] - Typed in-process publish/subscribe registry
//! - [`Event`] / [`Channel`] - Payloads and channels (`LOG`, `LOG_CLEAR`,
//!   `TEST_CASE_LOG`, `ON_SPLIT_DRAG_END`)
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum with `fatal` vs `recoverable` classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ### Projects (`project`)
//! - [`Project`] - A named tree of files plus metadata
//! - [`FileTree`] / [`FileNode`] - Path-keyed tree with cascading operations
//! - [`RESERVED_FILES`] - System files that reject structural edits
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use tonforge_core::prelude::*;
//! ```

pub mod error;
pub mod events;
pub mod log;
pub mod logging;
pub mod project;

/// Prelude for common imports used throughout all TON Forge crates
pub mod prelude {
    pub use super::error::{Error, Result, ResultExt};
    pub use tracing::{debug, error, info, instrument, trace, warn};
}

// Re-export commonly used types at crate root for convenience
pub use error::{Error, Result, ResultExt};
pub use events::{Channel, Event, EventBus, HandlerId};
pub use log::{LogEntry, LogFilter, LogKind, CURSOR_RESET};
pub use project::{
    file_name, file_type_from_name, is_reserved, parent_path, ContractLanguage, FileKind,
    FileNode, FileTree, FileType, Project, RESERVED_FILES,
};
