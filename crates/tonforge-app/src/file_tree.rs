//! File tree presentation state - selection, expansion, and the edit lock
//!
//! The edit lock is an explicit flag owned by this component: at most one
//! inline rename/create may be open across the whole tree, and starting a
//! second one while the first is uncommitted is a no-op.

use std::collections::HashSet;

use tonforge_core::{FileKind, FileNode, FileTree};

/// Global inline-edit lock
#[derive(Debug, Default)]
pub struct EditLock {
    active: bool,
}

impl EditLock {
    /// Try to take the lock; `false` when another edit is already open
    pub fn try_acquire(&mut self) -> bool {
        if self.active {
            return false;
        }
        self.active = true;
        true
    }

    pub fn release(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

/// What the open inline edit will do on commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingKind {
    Rename,
    Create(FileKind),
}

/// An open inline edit and its input buffer
#[derive(Debug, Clone)]
pub struct PendingEdit {
    /// Node being renamed, or the directory ("" = root) receiving the new
    /// entry
    pub target: String,
    pub kind: PendingKind,
    pub buffer: String,
}

/// Per-node actions exposed by the action menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeAction {
    Rename,
    NewFile,
    NewFolder,
    Delete,
}

/// Capability-gated action list: system files expose nothing, directories
/// the full set, plain files rename/delete.
pub fn allowed_actions(node: &FileNode) -> Vec<NodeAction> {
    if node.is_system_file() {
        return Vec::new();
    }
    if node.is_directory() {
        return vec![
            NodeAction::Rename,
            NodeAction::NewFile,
            NodeAction::NewFolder,
            NodeAction::Delete,
        ];
    }
    vec![NodeAction::Rename, NodeAction::Delete]
}

/// A visible tree row
#[derive(Debug, Clone)]
pub struct TreeRow {
    pub path: String,
    pub text: String,
    pub kind: FileKind,
    pub depth: usize,
    pub expanded: bool,
    pub system: bool,
}

/// File tree view state
#[derive(Debug, Default)]
pub struct FileTreeState {
    pub expanded: HashSet<String>,
    pub selected: usize,
    pub lock: EditLock,
    pub pending: Option<PendingEdit>,
}

impl FileTreeState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flatten the tree into visible rows: expanded directories only,
    /// directories before files, names alphabetical within each group.
    pub fn visible_rows(&self, tree: &FileTree) -> Vec<TreeRow> {
        let mut rows = Vec::new();
        self.collect_rows(tree, "", 0, &mut rows);
        rows
    }

    fn collect_rows(&self, tree: &FileTree, dir: &str, depth: usize, rows: &mut Vec<TreeRow>) {
        let mut children: Vec<&FileNode> = tree.children(dir).collect();
        children.sort_by(|a, b| {
            b.is_directory()
                .cmp(&a.is_directory())
                .then_with(|| a.text.cmp(&b.text))
        });

        for node in children {
            let expanded = self.expanded.contains(&node.path);
            rows.push(TreeRow {
                path: node.path.clone(),
                text: node.text.clone(),
                kind: node.kind,
                depth,
                expanded,
                system: node.is_system_file(),
            });
            if node.is_directory() && expanded {
                self.collect_rows(tree, &node.path, depth + 1, rows);
            }
        }
    }

    /// Path of the currently selected row
    pub fn selected_path(&self, tree: &FileTree) -> Option<String> {
        self.visible_rows(tree)
            .get(self.selected)
            .map(|row| row.path.clone())
    }

    pub fn select_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_down(&mut self, tree: &FileTree) {
        let rows = self.visible_rows(tree).len();
        if rows > 0 && self.selected + 1 < rows {
            self.selected += 1;
        }
    }

    pub fn clamp_selection(&mut self, tree: &FileTree) {
        let rows = self.visible_rows(tree).len();
        if rows == 0 {
            self.selected = 0;
        } else if self.selected >= rows {
            self.selected = rows - 1;
        }
    }

    pub fn toggle(&mut self, path: &str) {
        if !self.expanded.remove(path) {
            self.expanded.insert(path.to_string());
        }
    }

    /// Begin an inline rename of `node`.
    ///
    /// No-op (returns `false`) when the node exposes no rename action or
    /// another inline edit is already open.
    pub fn start_rename(&mut self, node: &FileNode) -> bool {
        if !allowed_actions(node).contains(&NodeAction::Rename) {
            return false;
        }
        if !self.lock.try_acquire() {
            return false;
        }
        self.pending = Some(PendingEdit {
            target: node.path.clone(),
            kind: PendingKind::Rename,
            buffer: node.text.clone(),
        });
        true
    }

    /// Begin inline creation of a `kind` entry under `dir` (`None` = root).
    ///
    /// A collapsed target directory is auto-expanded first.
    pub fn start_create(&mut self, dir: Option<&FileNode>, kind: FileKind) -> bool {
        if let Some(node) = dir {
            let wanted = match kind {
                FileKind::File => NodeAction::NewFile,
                FileKind::Directory => NodeAction::NewFolder,
            };
            if !allowed_actions(node).contains(&wanted) {
                return false;
            }
        }
        if !self.lock.try_acquire() {
            return false;
        }
        let target = match dir {
            Some(node) => {
                if !self.expanded.contains(&node.path) {
                    self.expanded.insert(node.path.clone());
                }
                node.path.clone()
            }
            None => String::new(),
        };
        self.pending = Some(PendingEdit {
            target,
            kind: PendingKind::Create(kind),
            buffer: String::new(),
        });
        true
    }

    /// Abort the open edit, releasing the lock
    pub fn cancel_edit(&mut self) {
        self.pending = None;
        self.lock.release();
    }

    /// Take the open edit for committing, releasing the lock
    pub fn take_pending(&mut self) -> Option<PendingEdit> {
        let pending = self.pending.take();
        self.lock.release();
        pending
    }

    /// Rewrite expansion entries after a rename cascaded a path prefix
    pub fn rewrite_prefix(&mut self, old_path: &str, new_path: &str) {
        let old_prefix = format!("{old_path}/");
        self.expanded = self
            .expanded
            .drain()
            .map(|path| {
                if path == old_path {
                    new_path.to_string()
                } else if let Some(suffix) = path.strip_prefix(&old_prefix) {
                    format!("{new_path}/{suffix}")
                } else {
                    path
                }
            })
            .collect();
    }

    /// Drop expansion entries under a deleted path
    pub fn forget_subtree(&mut self, path: &str) {
        let prefix = format!("{path}/");
        self.expanded
            .retain(|p| p != path && !p.starts_with(&prefix));
    }
}
