//! Console (log view) state - pane lines, history buffer, filter replay
//!
//! The pane models the terminal widget of the original UI: an append-only
//! list of rendered lines with xterm-style `write`/`writeln` semantics,
//! including in-place overwrite for progress updates. History is the
//! session-scoped entry buffer that filter changes replay from.

use tonforge_core::{LogEntry, LogFilter, LogKind, CURSOR_RESET};

/// Pane lifecycle; guards against double-initialization on remount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaneLifecycle {
    #[default]
    Uninitialized,
    Initializing,
    Ready,
    Disposed,
}

/// One rendered console line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaneLine {
    pub kind: LogKind,
    pub text: String,
    /// Pre-formatted local time, empty for unstamped/raw lines
    pub stamp: String,
}

/// Scroll state for the console viewport
#[derive(Debug, Clone)]
pub struct ScrollState {
    /// Current vertical scroll offset from top
    pub offset: usize,
    /// Whether auto-scroll is enabled (follow new content)
    pub auto_scroll: bool,
    /// Visible lines (set during render)
    pub visible_lines: usize,
}

impl Default for ScrollState {
    fn default() -> Self {
        Self {
            offset: 0,
            auto_scroll: true,
            visible_lines: 0,
        }
    }
}

impl ScrollState {
    fn max_offset(&self, total: usize) -> usize {
        total.saturating_sub(self.visible_lines)
    }

    pub fn scroll_up(&mut self, n: usize) {
        self.offset = self.offset.saturating_sub(n);
        self.auto_scroll = false;
    }

    pub fn scroll_down(&mut self, n: usize, total: usize) {
        let max = self.max_offset(total);
        self.offset = (self.offset + n).min(max);
        if self.offset >= max {
            self.auto_scroll = true;
        }
    }

    pub fn scroll_to_top(&mut self) {
        self.offset = 0;
        self.auto_scroll = false;
    }

    pub fn scroll_to_bottom(&mut self, total: usize) {
        self.offset = self.max_offset(total);
        self.auto_scroll = true;
    }

    pub fn page_up(&mut self) {
        self.scroll_up(self.visible_lines.saturating_sub(2));
    }

    pub fn page_down(&mut self, total: usize) {
        self.scroll_down(self.visible_lines.saturating_sub(2), total);
    }

    /// Update with new viewport size, following the tail when auto-scrolling
    pub fn update_viewport(&mut self, visible: usize, total: usize) {
        self.visible_lines = visible;
        if self.auto_scroll {
            self.offset = self.max_offset(total);
        } else {
            self.offset = self.offset.min(self.max_offset(total));
        }
    }
}

/// Console state: lifecycle + rendered pane + entry history + filter
#[derive(Debug, Default)]
pub struct ConsoleState {
    lifecycle: PaneLifecycle,
    lines: Vec<PaneLine>,
    history: Vec<LogEntry>,
    pub filter: LogFilter,
    pub scroll: ScrollState,
    /// Query being typed while search input mode is active
    pub search_buffer: String,
}

impl ConsoleState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Initialize the pane and write the welcome line. Idempotent: a second
    /// call is a no-op, as is initializing a disposed pane.
    pub fn init(&mut self) {
        if self.lifecycle != PaneLifecycle::Uninitialized {
            return;
        }
        self.lifecycle = PaneLifecycle::Initializing;
        self.writeln(LogEntry::unstamped(LogKind::Info, "Welcome to TON Forge"));
        self.lifecycle = PaneLifecycle::Ready;
    }

    /// Tear down the subscription side of the console. The pane contents
    /// are deliberately retained (see DESIGN.md).
    pub fn dispose(&mut self) {
        self.lifecycle = PaneLifecycle::Disposed;
    }

    pub fn lifecycle(&self) -> PaneLifecycle {
        self.lifecycle
    }

    pub fn is_ready(&self) -> bool {
        self.lifecycle == PaneLifecycle::Ready
    }

    pub fn lines(&self) -> &[PaneLine] {
        &self.lines
    }

    pub fn history(&self) -> &[LogEntry] {
        &self.history
    }

    /// Append an entry: record it in history and print it to the pane.
    ///
    /// Printing is unconditional even while a kind filter is active; the
    /// filter only drives replays.
    pub fn append(&mut self, entry: LogEntry) {
        self.history.push(entry.clone());
        self.print(&entry);
    }

    /// Print one formatted entry without touching history
    fn print(&mut self, entry: &LogEntry) {
        if !self.is_ready() {
            return;
        }
        let line = PaneLine {
            kind: entry.kind,
            text: entry.visible_text().to_string(),
            stamp: entry.formatted_time(),
        };
        if entry.is_inline_update() && !self.lines.is_empty() {
            let last = self.lines.len() - 1;
            self.lines[last] = line;
        } else {
            self.lines.push(line);
        }
        self.follow_tail();
    }

    fn writeln(&mut self, entry: LogEntry) {
        self.lines.push(PaneLine {
            kind: entry.kind,
            text: entry.visible_text().to_string(),
            stamp: entry.formatted_time(),
        });
        self.follow_tail();
    }

    /// Raw unformatted write (interactive test-runner output). Respects the
    /// cursor-reset overwrite and appends continuation text to the current
    /// line the way a terminal would.
    pub fn raw_write(&mut self, text: &str) {
        if !self.is_ready() {
            return;
        }
        let (overwrite, text) = match text.strip_prefix(CURSOR_RESET) {
            Some(rest) => (true, rest),
            None => (false, text),
        };

        let mut segments = text.split('\n');
        let first = segments.next().unwrap_or_default();
        if overwrite && !self.lines.is_empty() {
            let last = self.lines.len() - 1;
            self.lines[last] = raw_line(first);
        } else if let Some(last) = self.lines.last_mut() {
            last.text.push_str(first);
        } else {
            self.lines.push(raw_line(first));
        }
        for segment in segments {
            self.lines.push(raw_line(segment.trim_end_matches('\r')));
        }
        self.follow_tail();
    }

    /// Clear the visible pane only (`LOG_CLEAR`)
    pub fn clear_pane(&mut self) {
        self.lines.clear();
        self.scroll.offset = 0;
        self.scroll.auto_scroll = true;
    }

    /// Clear the history buffer and the visible pane (user "clear logs")
    pub fn clear_all(&mut self) {
        self.history.clear();
        self.clear_pane();
    }

    /// Switch the kind filter, clearing the pane and replaying the matching
    /// subset of history in original order.
    ///
    /// Returns the number of replayed entries; 0 when the kind is unchanged
    /// (no replay happens then).
    pub fn set_filter_kind(&mut self, kind: Option<LogKind>) -> usize {
        if self.filter.kind == kind {
            return 0;
        }
        self.filter.kind = kind;
        self.clear_pane();

        let matching: Vec<LogEntry> = self
            .history
            .iter()
            .filter(|entry| self.filter.matches(entry))
            .cloned()
            .collect();
        for entry in &matching {
            self.print(entry);
        }
        matching.len()
    }

    /// Cycle to the next kind filter, returning the number of replayed
    /// entries
    pub fn cycle_filter_kind(&mut self) -> usize {
        let mut next = self.filter.clone();
        next.cycle_kind();
        self.set_filter_kind(next.kind)
    }

    /// Forward case-insensitive text search from the current scroll
    /// position. Positions the viewport at the match; a miss leaves the
    /// view unchanged.
    pub fn search_forward(&mut self, query: &str) -> Option<usize> {
        if query.is_empty() {
            return None;
        }
        let needle = query.to_lowercase();
        let start = self.scroll.offset;
        let hit = self
            .lines
            .iter()
            .enumerate()
            .skip(start)
            .chain(self.lines.iter().enumerate().take(start))
            .find(|(_, line)| line.text.to_lowercase().contains(&needle))
            .map(|(idx, _)| idx)?;
        self.scroll.offset = hit;
        self.scroll.auto_scroll = false;
        Some(hit)
    }

    /// Recompute viewport geometry after a split resize. Swallowed when the
    /// pane is not ready yet.
    pub fn refit(&mut self, visible_lines: usize) {
        if !self.is_ready() {
            return;
        }
        self.scroll.update_viewport(visible_lines, self.lines.len());
    }

    fn follow_tail(&mut self) {
        if self.scroll.auto_scroll {
            self.scroll.offset = self.scroll.max_offset(self.lines.len());
        }
    }
}

fn raw_line(text: &str) -> PaneLine {
    PaneLine {
        kind: LogKind::Grey,
        text: text.to_string(),
        stamp: String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready_console() -> ConsoleState {
        let mut console = ConsoleState::new();
        console.init();
        console
    }

    fn texts(console: &ConsoleState) -> Vec<&str> {
        console.lines().iter().map(|l| l.text.as_str()).collect()
    }

    #[test]
    fn test_init_writes_welcome_once() {
        let mut console = ConsoleState::new();
        console.init();
        console.init();
        assert_eq!(texts(&console), vec!["Welcome to TON Forge"]);
        assert!(console.is_ready());
    }

    #[test]
    fn test_append_before_init_keeps_history_only() {
        let mut console = ConsoleState::new();
        console.append(LogEntry::info("early"));
        assert!(console.lines().is_empty());
        assert_eq!(console.history().len(), 1);
    }

    #[test]
    fn test_append_prints_and_records() {
        let mut console = ready_console();
        console.append(LogEntry::success("built"));
        assert_eq!(texts(&console), vec!["Welcome to TON Forge", "built"]);
        assert_eq!(console.history().len(), 1);
        assert_eq!(console.lines()[1].kind, LogKind::Success);
        assert!(!console.lines()[1].stamp.is_empty());
    }

    #[test]
    fn test_inline_update_overwrites_current_line() {
        let mut console = ready_console();
        console.append(LogEntry::grey("Compiling... |"));
        console.append(LogEntry::grey(format!("{CURSOR_RESET}Compiling... /")));
        console.append(LogEntry::grey(format!("{CURSOR_RESET}Compiling... -")));
        assert_eq!(
            texts(&console),
            vec!["Welcome to TON Forge", "Compiling... -"]
        );
        // History keeps every update
        assert_eq!(console.history().len(), 3);
    }

    #[test]
    fn test_filter_replay_renders_matching_subset_in_order() {
        let mut console = ready_console();
        console.append(LogEntry::error("a"));
        console.append(LogEntry::info("b"));
        console.append(LogEntry::error("c"));

        let replayed = console.set_filter_kind(Some(LogKind::Error));
        assert_eq!(replayed, 2);
        assert_eq!(texts(&console), vec!["a", "c"]);

        let replayed = console.set_filter_kind(None);
        assert_eq!(replayed, 3);
        assert_eq!(texts(&console), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_filter_same_kind_does_not_replay() {
        let mut console = ready_console();
        console.append(LogEntry::error("a"));
        assert_eq!(console.set_filter_kind(None), 0);
        // Pane untouched, welcome still present
        assert_eq!(texts(&console)[0], "Welcome to TON Forge");
    }

    #[test]
    fn test_new_entries_print_while_filter_active() {
        let mut console = ready_console();
        console.set_filter_kind(Some(LogKind::Error));
        console.append(LogEntry::info("not an error"));
        assert_eq!(texts(&console), vec!["not an error"]);
    }

    #[test]
    fn test_clear_pane_keeps_history() {
        let mut console = ready_console();
        console.append(LogEntry::info("kept in history"));
        console.clear_pane();
        assert!(console.lines().is_empty());
        assert_eq!(console.history().len(), 1);
    }

    #[test]
    fn test_clear_all_resets_both() {
        let mut console = ready_console();
        console.append(LogEntry::info("gone"));
        console.clear_all();
        assert!(console.lines().is_empty());
        assert!(console.history().is_empty());
    }

    #[test]
    fn test_raw_write_appends_to_current_line() {
        let mut console = ready_console();
        console.raw_write("running 3 tests");
        console.raw_write(" ... ok\nall passed");
        assert_eq!(
            texts(&console),
            vec!["Welcome to TON Forgerunning 3 tests ... ok", "all passed"]
        );
    }

    #[test]
    fn test_raw_write_overwrite() {
        let mut console = ready_console();
        console.raw_write("spinner |");
        console.raw_write(&format!("{CURSOR_RESET}spinner /"));
        let last = console.lines().last().unwrap();
        assert_eq!(last.text, "spinner /");
    }

    #[test]
    fn test_search_forward_positions_and_misses_silently() {
        let mut console = ready_console();
        for i in 0..20 {
            console.append(LogEntry::info(format!("line {i}")));
        }
        console.append(LogEntry::error("the needle"));
        console.scroll.scroll_to_top();

        let hit = console.search_forward("NEEDLE");
        assert_eq!(hit, Some(21));
        assert_eq!(console.scroll.offset, 21);

        let offset_before = console.scroll.offset;
        assert!(console.search_forward("absent").is_none());
        assert_eq!(console.scroll.offset, offset_before);
    }

    #[test]
    fn test_search_empty_query_is_noop() {
        let mut console = ready_console();
        console.append(LogEntry::info("something"));
        assert!(console.search_forward("").is_none());
    }

    #[test]
    fn test_refit_swallowed_before_ready() {
        let mut console = ConsoleState::new();
        console.refit(10);
        assert_eq!(console.scroll.visible_lines, 0);

        console.init();
        console.refit(10);
        assert_eq!(console.scroll.visible_lines, 10);
    }

    #[test]
    fn test_auto_scroll_follows_tail() {
        let mut console = ready_console();
        console.refit(5);
        for i in 0..20 {
            console.append(LogEntry::info(format!("line {i}")));
        }
        // 21 lines total, 5 visible
        assert_eq!(console.scroll.offset, 16);

        console.scroll.scroll_up(3);
        assert!(!console.scroll.auto_scroll);
        let pinned = console.scroll.offset;
        console.append(LogEntry::info("more"));
        assert_eq!(console.scroll.offset, pinned);
    }

    #[test]
    fn test_dispose_retains_pane_contents() {
        let mut console = ready_console();
        console.append(LogEntry::info("kept"));
        console.dispose();
        assert_eq!(console.lifecycle(), PaneLifecycle::Disposed);
        assert_eq!(console.lines().len(), 2);
        // A disposed pane is not re-initializable
        console.init();
        assert_eq!(console.lifecycle(), PaneLifecycle::Disposed);
    }
}
