//! Log entry types for the console pipeline

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Escape sequence that rewrites the current console line in place.
///
/// Entries whose text starts with this sequence are progress/spinner style
/// updates and overwrite the current line instead of appending a new one.
pub const CURSOR_RESET: &str = "\x1b[2K\r";

/// Category of a log entry, which also selects its display color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogKind {
    Grey,
    Success,
    Error,
    Warning,
    Info,
}

impl LogKind {
    /// Wire/display name of the kind
    pub fn as_str(&self) -> &'static str {
        match self {
            LogKind::Grey => "grey",
            LogKind::Success => "success",
            LogKind::Error => "error",
            LogKind::Warning => "warning",
            LogKind::Info => "info",
        }
    }

    /// xterm-256 color index used when rendering this kind
    pub fn color_index(&self) -> u8 {
        match self {
            LogKind::Grey => 243,
            LogKind::Success => 40,
            LogKind::Error => 196,
            LogKind::Warning => 214,
            LogKind::Info => 33,
        }
    }
}

/// A single console log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    /// Wall-clock timestamp; `None` suppresses the timestamp segment
    pub timestamp: Option<DateTime<Local>>,
    pub kind: LogKind,
    pub text: String,
}

impl LogEntry {
    /// Create a new log entry stamped with the current local time
    pub fn new(kind: LogKind, text: impl Into<String>) -> Self {
        Self {
            timestamp: Some(Local::now()),
            kind,
            text: text.into(),
        }
    }

    /// Create an entry without a timestamp (banner/continuation lines)
    pub fn unstamped(kind: LogKind, text: impl Into<String>) -> Self {
        Self {
            timestamp: None,
            kind,
            text: text.into(),
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(LogKind::Info, text)
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(LogKind::Success, text)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(LogKind::Error, text)
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(LogKind::Warning, text)
    }

    pub fn grey(text: impl Into<String>) -> Self {
        Self::new(LogKind::Grey, text)
    }

    /// Format the timestamp for display, empty when unstamped
    pub fn formatted_time(&self) -> String {
        match self.timestamp {
            Some(ts) => ts.format("%H:%M:%S").to_string(),
            None => String::new(),
        }
    }

    /// Whether this entry overwrites the current line instead of appending
    pub fn is_inline_update(&self) -> bool {
        self.text.starts_with(CURSOR_RESET)
    }

    /// Entry text with the cursor-reset prefix stripped
    pub fn visible_text(&self) -> &str {
        self.text.strip_prefix(CURSOR_RESET).unwrap_or(&self.text)
    }

    pub fn is_error(&self) -> bool {
        self.kind == LogKind::Error
    }
}

/// Console filter state - which kinds are replayed and the search query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogFilter {
    /// `None` means 'all'
    pub kind: Option<LogKind>,
    /// Forward text search query applied after a replay
    pub text: String,
}

impl LogFilter {
    /// Check if a log entry passes the kind filter
    pub fn matches(&self, entry: &LogEntry) -> bool {
        match self.kind {
            None => true,
            Some(kind) => entry.kind == kind,
        }
    }

    /// Check if any kind filter is active (not 'all')
    pub fn is_active(&self) -> bool {
        self.kind.is_some()
    }

    /// Cycle to the next kind filter option (wraps around through 'all')
    pub fn cycle_kind(&mut self) {
        self.kind = match self.kind {
            None => Some(LogKind::Grey),
            Some(LogKind::Grey) => Some(LogKind::Success),
            Some(LogKind::Success) => Some(LogKind::Error),
            Some(LogKind::Error) => Some(LogKind::Warning),
            Some(LogKind::Warning) => Some(LogKind::Info),
            Some(LogKind::Info) => None,
        };
    }

    /// User-facing label for the active kind filter
    pub fn display_name(&self) -> &'static str {
        match self.kind {
            None => "all",
            Some(kind) => kind.as_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_entry_creation() {
        let entry = LogEntry::info("Build started");
        assert_eq!(entry.kind, LogKind::Info);
        assert_eq!(entry.text, "Build started");
        assert!(entry.timestamp.is_some());
    }

    #[test]
    fn test_unstamped_entry_has_empty_time() {
        let entry = LogEntry::unstamped(LogKind::Grey, "banner");
        assert!(entry.timestamp.is_none());
        assert_eq!(entry.formatted_time(), "");
    }

    #[test]
    fn test_formatted_time_shape() {
        let entry = LogEntry::success("done");
        let time = entry.formatted_time();
        assert_eq!(time.len(), 8);
        assert!(time.contains(':'));
    }

    #[test]
    fn test_inline_update_detection() {
        let spinner = LogEntry::grey(format!("{CURSOR_RESET}Compiling... /"));
        assert!(spinner.is_inline_update());
        assert_eq!(spinner.visible_text(), "Compiling... /");

        let plain = LogEntry::grey("Compiling...");
        assert!(!plain.is_inline_update());
        assert_eq!(plain.visible_text(), "Compiling...");
    }

    #[test]
    fn test_kind_names_and_colors() {
        assert_eq!(LogKind::Grey.as_str(), "grey");
        assert_eq!(LogKind::Success.as_str(), "success");
        assert_eq!(LogKind::Error.as_str(), "error");
        assert_eq!(LogKind::Warning.as_str(), "warning");
        assert_eq!(LogKind::Info.as_str(), "info");

        assert_eq!(LogKind::Grey.color_index(), 243);
        assert_eq!(LogKind::Success.color_index(), 40);
        assert_eq!(LogKind::Error.color_index(), 196);
        assert_eq!(LogKind::Warning.color_index(), 214);
        assert_eq!(LogKind::Info.color_index(), 33);
    }

    #[test]
    fn test_filter_all_matches_everything() {
        let filter = LogFilter::default();
        assert!(!filter.is_active());
        for entry in [
            LogEntry::info("a"),
            LogEntry::error("b"),
            LogEntry::grey("c"),
        ] {
            assert!(filter.matches(&entry));
        }
    }

    #[test]
    fn test_filter_single_kind() {
        let filter = LogFilter {
            kind: Some(LogKind::Error),
            text: String::new(),
        };
        assert!(filter.is_active());
        assert!(filter.matches(&LogEntry::error("boom")));
        assert!(!filter.matches(&LogEntry::info("fine")));
    }

    #[test]
    fn test_filter_cycle_wraps() {
        let mut filter = LogFilter::default();
        for _ in 0..6 {
            filter.cycle_kind();
        }
        assert_eq!(filter.kind, None);
        assert_eq!(filter.display_name(), "all");
    }
}
