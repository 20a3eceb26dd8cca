//! Project and virtual file-tree model
//!
//! A project is a named tree of files. Nodes are stored flat; the
//! `/`-delimited path doubles as the parent linkage, so a directory's path
//! is a strict prefix of every descendant path. Rename and delete cascade
//! over that prefix.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};

/// System files that reject structural edits (rename/delete/new-sibling)
/// while staying readable. Exact-match on the file name.
pub const RESERVED_FILES: [&str; 4] = [
    "message.cell.ts",
    "stateInit.cell.ts",
    "test.spec.js",
    "setting.json",
];

/// Check a file name against the reserved blocklist
pub fn is_reserved(name: &str) -> bool {
    RESERVED_FILES.contains(&name)
}

/// Last segment of a `/`-delimited path
pub fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Everything before the last segment; empty for root-level nodes
pub fn parent_path(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) => &path[..idx],
        None => "",
    }
}

/// Editor classification of a file, derived from its extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Func,
    Tact,
    TypeScript,
    JavaScript,
    Json,
    Markdown,
    Unknown,
}

impl FileType {
    /// Short label shown next to an open file
    pub fn label(&self) -> &'static str {
        match self {
            FileType::Func => "func",
            FileType::Tact => "tact",
            FileType::TypeScript => "ts",
            FileType::JavaScript => "js",
            FileType::Json => "json",
            FileType::Markdown => "md",
            FileType::Unknown => "",
        }
    }
}

/// Classify a file by the extension of its name
pub fn file_type_from_name(name: &str) -> FileType {
    match name.rsplit('.').next().unwrap_or("") {
        "fc" | "func" => FileType::Func,
        "tact" => FileType::Tact,
        "ts" => FileType::TypeScript,
        "js" => FileType::JavaScript,
        "json" => FileType::Json,
        "md" => FileType::Markdown,
        _ => FileType::Unknown,
    }
}

/// Contract source language of a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContractLanguage {
    #[default]
    Func,
    Tact,
}

impl std::fmt::Display for ContractLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContractLanguage::Func => write!(f, "func"),
            ContractLanguage::Tact => write!(f, "tact"),
        }
    }
}

/// Whether a node is a file or a directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    File,
    Directory,
}

/// A single node in a project's file tree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileNode {
    /// Unique within the tree, stable across renames
    pub id: u64,
    /// Full `/`-delimited path, unique within the tree
    pub path: String,
    /// Display name (last path segment)
    pub text: String,
    pub kind: FileKind,
    /// File body; always empty for directories
    #[serde(default)]
    pub content: String,
}

impl FileNode {
    pub fn is_directory(&self) -> bool {
        self.kind == FileKind::Directory
    }

    pub fn is_system_file(&self) -> bool {
        is_reserved(&self.text)
    }
}

/// Flat path-keyed file tree with cascading rename/delete
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileTree {
    nodes: Vec<FileNode>,
    next_id: u64,
}

impl FileTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> &[FileNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, path: &str) -> Option<&FileNode> {
        self.nodes.iter().find(|n| n.path == path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.node(path).is_some()
    }

    /// Direct children of a directory path (empty string = root level)
    pub fn children<'a>(&'a self, dir: &'a str) -> impl Iterator<Item = &'a FileNode> {
        let prefix_len = if dir.is_empty() { 0 } else { dir.len() + 1 };
        self.nodes.iter().filter(move |n| {
            let under = if dir.is_empty() {
                true
            } else {
                n.path.len() > dir.len() + 1 && n.path.starts_with(dir) && n.path.as_bytes()[dir.len()] == b'/'
            };
            under && !n.path[prefix_len..].contains('/')
        })
    }

    /// Insert a new empty node at `path`.
    ///
    /// Fails with `InvalidPath` when the parent directory does not exist or a
    /// sibling already occupies `path`, and with `Reserved` when the new
    /// name matches a system file.
    pub fn insert(&mut self, path: &str, kind: FileKind) -> Result<&FileNode> {
        let path = path.trim_matches('/');
        if path.is_empty() {
            return Err(Error::invalid_path("path cannot be empty"));
        }
        let name = file_name(path);
        if name.is_empty() || path.contains("//") {
            return Err(Error::invalid_path(format!("malformed path '{path}'")));
        }
        if is_reserved(name) {
            return Err(Error::reserved(name));
        }

        let parent = parent_path(path);
        if !parent.is_empty() {
            match self.node(parent) {
                Some(dir) if dir.is_directory() => {}
                Some(_) => {
                    return Err(Error::invalid_path(format!(
                        "'{parent}' is not a directory"
                    )))
                }
                None => {
                    return Err(Error::invalid_path(format!("'{parent}' does not exist")))
                }
            }
        }
        if self.contains(path) {
            return Err(Error::invalid_path(format!("'{path}' already exists")));
        }

        let id = self.next_id;
        self.next_id += 1;
        self.nodes.push(FileNode {
            id,
            path: path.to_string(),
            text: name.to_string(),
            kind,
            content: String::new(),
        });
        Ok(self.nodes.last().expect("just pushed"))
    }

    /// Rename the node at `path` to `new_name`, rewriting every descendant
    /// path to the new prefix.
    ///
    /// Returns the node's new path.
    pub fn rename(&mut self, path: &str, new_name: &str) -> Result<String> {
        let node = self.node(path).ok_or_else(|| Error::not_found(path))?;
        if node.is_system_file() {
            return Err(Error::reserved(&node.text));
        }
        if new_name.is_empty() {
            return Err(Error::invalid_name("name cannot be empty"));
        }
        if new_name.contains('/') {
            return Err(Error::invalid_name(format!(
                "'{new_name}' may not contain '/'"
            )));
        }
        // Name-based blocklist: allowing this rename would mint a node that
        // can never be edited again.
        if is_reserved(new_name) {
            return Err(Error::reserved(new_name));
        }

        let parent = parent_path(path);
        let new_path = if parent.is_empty() {
            new_name.to_string()
        } else {
            format!("{parent}/{new_name}")
        };
        if new_path != path && self.contains(&new_path) {
            return Err(Error::invalid_name(format!("'{new_path}' already exists")));
        }

        let old_prefix = format!("{path}/");
        for node in &mut self.nodes {
            if node.path == path {
                node.path = new_path.clone();
                node.text = new_name.to_string();
            } else if let Some(suffix) = node.path.strip_prefix(&old_prefix) {
                node.path = format!("{new_path}/{suffix}");
            }
        }
        Ok(new_path)
    }

    /// Delete the node at `path` and, for directories, all descendants.
    ///
    /// Returns the number of removed nodes.
    pub fn delete(&mut self, path: &str) -> Result<usize> {
        let node = self.node(path).ok_or_else(|| Error::not_found(path))?;
        if node.is_system_file() {
            return Err(Error::reserved(&node.text));
        }

        let prefix = format!("{path}/");
        let before = self.nodes.len();
        self.nodes
            .retain(|n| n.path != path && !n.path.starts_with(&prefix));
        Ok(before - self.nodes.len())
    }

    /// Read a file's content. System files are readable like any other.
    pub fn read(&self, path: &str) -> Result<&str> {
        let node = self.node(path).ok_or_else(|| Error::not_found(path))?;
        if node.is_directory() {
            return Err(Error::invalid_path(format!("'{path}' is a directory")));
        }
        Ok(&node.content)
    }

    /// Replace a file's content. Content edits are not structural, so
    /// system files accept them.
    pub fn write(&mut self, path: &str, content: impl Into<String>) -> Result<()> {
        let node = self
            .nodes
            .iter_mut()
            .find(|n| n.path == path)
            .ok_or_else(|| Error::not_found(path))?;
        if node.is_directory() {
            return Err(Error::invalid_path(format!("'{path}' is a directory")));
        }
        node.content = content.into();
        Ok(())
    }

    /// Insert a node bypassing the reserved-name guard. Used only when
    /// scaffolding project templates, which must create the system files.
    pub fn insert_unchecked(&mut self, path: &str, kind: FileKind, content: impl Into<String>) {
        let id = self.next_id;
        self.next_id += 1;
        self.nodes.push(FileNode {
            id,
            path: path.to_string(),
            text: file_name(path).to_string(),
            kind,
            content: content.into(),
        });
    }
}

/// A named project owning one file tree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    pub language: ContractLanguage,
    pub files: FileTree,
    pub created_at: DateTime<Local>,
}

impl Project {
    pub fn new(name: impl Into<String>, language: ContractLanguage) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            language,
            files: FileTree::new(),
            created_at: Local::now(),
        }
    }
}
