//! tonforge-tui - Terminal UI for TON Forge
//!
//! Ratatui front-end over `tonforge-app`: event polling, frame rendering,
//! and the runner loop that wires the event bus, background tasks, and the
//! chain stack together.

pub mod event;
pub mod render;
pub mod runner;
pub mod terminal;
pub mod theme;
pub mod widgets;

pub use runner::run;
