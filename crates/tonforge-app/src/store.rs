//! Project store - the single owner of project/file data
//!
//! Projects live in memory and persist as one JSON document in the user
//! data dir, guarded by an advisory lock so two instances do not clobber
//! each other. All tree mutations go through here so every failure mode
//! maps onto the error taxonomy.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use uuid::Uuid;

use tonforge_core::prelude::*;
use tonforge_core::{ContractLanguage, FileKind, FileTree, Project};

const MAIN_FC_TEMPLATE: &str = r#"#include "stdlib.fc";

() recv_internal(int my_balance, int msg_value, cell in_msg_full, slice in_msg_body) impure {
    ;; contract entry point
}
"#;

const MESSAGE_CELL_TEMPLATE: &str = r#"import { beginCell } from 'ton-core';

export function buildMessage() {
  return beginCell().storeUint(0, 32).endCell();
}
"#;

const STATE_INIT_TEMPLATE: &str = r#"import { beginCell } from 'ton-core';

export function buildDataCell() {
  return beginCell().storeUint(0, 64).endCell();
}
"#;

const TEST_SPEC_TEMPLATE: &str = r#"describe('contract', () => {
  it('deploys', async () => {});
});
"#;

const SETTING_TEMPLATE: &str = "{\n  \"network\": \"testnet\"\n}\n";

/// In-memory project set with JSON persistence
#[derive(Debug)]
pub struct ProjectStore {
    projects: Vec<Project>,
    path: PathBuf,
}

impl ProjectStore {
    /// Open the store at `path`, loading existing projects if the file is
    /// there
    pub fn open(path: PathBuf) -> Result<Self> {
        let projects = match std::fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self { projects, path })
    }

    /// Default store location under the user data dir
    pub fn default_path() -> PathBuf {
        let base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        base.join("tonforge").join("projects.json")
    }

    /// Persist all projects. Writes to a sibling temp file and renames so a
    /// crash never leaves a truncated store.
    pub fn save(&self) -> Result<()> {
        let parent = self
            .path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        std::fs::create_dir_all(&parent)?;

        let _lock = StoreLock::take(&parent)?;

        let tmp = self.path.with_extension("json.tmp");
        let raw = serde_json::to_string_pretty(&self.projects)?;
        std::fs::write(&tmp, raw)?;
        std::fs::rename(&tmp, &self.path)?;
        debug!("saved {} project(s) to {}", self.projects.len(), self.path.display());
        Ok(())
    }

    /// Projects in creation order (most recently created last; the UI
    /// reverses for display)
    pub fn list_projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn get(&self, id: Uuid) -> Result<&Project> {
        self.projects
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| Error::not_found(id.to_string()))
    }

    pub fn get_mut(&mut self, id: Uuid) -> Result<&mut Project> {
        self.projects
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| Error::not_found(id.to_string()))
    }

    /// Remove a project and all its file data. Absence is an error, never a
    /// silent success.
    pub fn delete_project(&mut self, id: Uuid) -> Result<Project> {
        let idx = self
            .projects
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| Error::not_found(id.to_string()))?;
        Ok(self.projects.remove(idx))
    }

    /// Create a blank project scaffolded with the standard template files
    pub fn create_blank(
        &mut self,
        name: impl Into<String>,
        language: ContractLanguage,
    ) -> Result<&Project> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(Error::invalid_name("project name cannot be empty"));
        }

        let mut project = Project::new(name.trim(), language);
        scaffold(&mut project.files);
        self.projects.push(project);
        Ok(self.projects.last().expect("just pushed"))
    }

    /// Insert a new empty file or directory at `path` in a project
    pub fn new_file_or_folder(&mut self, id: Uuid, path: &str, kind: FileKind) -> Result<()> {
        self.get_mut(id)?.files.insert(path, kind).map(|_| ())
    }

    /// Rename a node, cascading the new prefix over its descendants.
    /// Returns the node's new path.
    pub fn rename_file(&mut self, id: Uuid, path: &str, new_name: &str) -> Result<String> {
        self.get_mut(id)?.files.rename(path, new_name)
    }

    /// Delete a node and, for directories, its whole subtree
    pub fn delete_file(&mut self, id: Uuid, path: &str) -> Result<usize> {
        self.get_mut(id)?.files.delete(path)
    }

    /// Import a project from a directory on disk
    pub fn import_dir(&mut self, name: impl Into<String>, dir: &Path) -> Result<&Project> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(Error::invalid_name("project name cannot be empty"));
        }
        if !dir.is_dir() {
            return Err(Error::invalid_path(format!(
                "'{}' is not a directory",
                dir.display()
            )));
        }

        let mut project = Project::new(name.trim(), ContractLanguage::Func);
        import_into(&mut project.files, dir, "")?;
        self.projects.push(project);
        Ok(self.projects.last().expect("just pushed"))
    }
}

/// Advisory lock file held while the store file is rewritten
struct StoreLock {
    file: File,
}

impl StoreLock {
    fn take(dir: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(dir.join(".projects.lock"))?;
        file.lock_exclusive()?;
        Ok(Self { file })
    }
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        let _ = fs2::FileExt::unlock(&self.file);
    }
}

/// Populate a fresh tree with the standard project skeleton. The four
/// system files bypass the reserved-name guard by design.
fn scaffold(tree: &mut FileTree) {
    tree.insert_unchecked("main.fc", FileKind::File, MAIN_FC_TEMPLATE);
    tree.insert_unchecked("message.cell.ts", FileKind::File, MESSAGE_CELL_TEMPLATE);
    tree.insert_unchecked("stateInit.cell.ts", FileKind::File, STATE_INIT_TEMPLATE);
    tree.insert_unchecked("test.spec.js", FileKind::File, TEST_SPEC_TEMPLATE);
    tree.insert_unchecked("setting.json", FileKind::File, SETTING_TEMPLATE);
}

/// Recursively copy a directory into the tree. Hidden entries and VCS
/// metadata are skipped; file bodies are read lossily so a stray non-UTF-8
/// byte cannot abort the import.
fn import_into(tree: &mut FileTree, dir: &Path, prefix: &str) -> Result<()> {
    let mut entries: Vec<_> = std::fs::read_dir(dir)?.collect::<std::io::Result<_>>()?;
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let name = entry.file_name().to_string_lossy().to_string();
        if name.starts_with('.') {
            continue;
        }
        let path = if prefix.is_empty() {
            name.clone()
        } else {
            format!("{prefix}/{name}")
        };
        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            tree.insert_unchecked(&path, FileKind::Directory, "");
            import_into(tree, &entry.path(), &path)?;
        } else if file_type.is_file() {
            let bytes = std::fs::read(entry.path())?;
            tree.insert_unchecked(&path, FileKind::File, String::from_utf8_lossy(&bytes));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (tempfile::TempDir, ProjectStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = ProjectStore::open(dir.path().join("projects.json")).unwrap();
        (dir, store)
    }

    #[test]
    fn test_create_blank_scaffolds_system_files() {
        let (_dir, mut store) = temp_store();
        let project = store.create_blank("counter", ContractLanguage::Func).unwrap();

        assert_eq!(project.name, "counter");
        for name in tonforge_core::RESERVED_FILES {
            assert!(project.files.contains(name), "missing {name}");
        }
        assert!(project.files.contains("main.fc"));
    }

    #[test]
    fn test_create_blank_rejects_empty_name() {
        let (_dir, mut store) = temp_store();
        assert!(matches!(
            store.create_blank("   ", ContractLanguage::Func).unwrap_err(),
            Error::InvalidName { .. }
        ));
    }

    #[test]
    fn test_list_is_creation_ordered() {
        let (_dir, mut store) = temp_store();
        store.create_blank("first", ContractLanguage::Func).unwrap();
        store.create_blank("second", ContractLanguage::Tact).unwrap();

        let names: Vec<_> = store.list_projects().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second"]);
    }

    #[test]
    fn test_delete_project_requires_existence() {
        let (_dir, mut store) = temp_store();
        let id = store
            .create_blank("doomed", ContractLanguage::Func)
            .unwrap()
            .id;

        let removed = store.delete_project(id).unwrap();
        assert_eq!(removed.name, "doomed");

        // Deleting again signals NotFound rather than silently succeeding
        assert!(matches!(
            store.delete_project(id).unwrap_err(),
            Error::NotFound { .. }
        ));
    }

    #[test]
    fn test_save_and_reload_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("projects.json");

        let mut store = ProjectStore::open(path.clone()).unwrap();
        let id = store
            .create_blank("persisted", ContractLanguage::Tact)
            .unwrap()
            .id;
        store
            .get_mut(id)
            .unwrap()
            .files
            .write("main.fc", ";; edited")
            .unwrap();
        store.save().unwrap();

        let reloaded = ProjectStore::open(path).unwrap();
        let project = reloaded.get(id).unwrap();
        assert_eq!(project.name, "persisted");
        assert_eq!(project.language, ContractLanguage::Tact);
        assert_eq!(project.files.read("main.fc").unwrap(), ";; edited");
    }

    #[test]
    fn test_import_dir_copies_tree() {
        let src = tempfile::tempdir().unwrap();
        std::fs::create_dir(src.path().join("lib")).unwrap();
        std::fs::write(src.path().join("main.fc"), "() main() {}").unwrap();
        std::fs::write(src.path().join("lib/utils.fc"), ";; utils").unwrap();
        std::fs::create_dir(src.path().join(".git")).unwrap();
        std::fs::write(src.path().join(".git/HEAD"), "ref").unwrap();

        let (_dir, mut store) = temp_store();
        let project = store.import_dir("imported", src.path()).unwrap();

        assert!(project.files.contains("main.fc"));
        assert!(project.files.contains("lib"));
        assert_eq!(project.files.read("lib/utils.fc").unwrap(), ";; utils");
        // VCS metadata skipped
        assert!(!project.files.contains(".git"));
    }

    #[test]
    fn test_import_missing_dir_is_invalid_path() {
        let (_dir, mut store) = temp_store();
        assert!(matches!(
            store
                .import_dir("x", Path::new("/definitely/not/here"))
                .unwrap_err(),
            Error::InvalidPath { .. }
        ));
    }

    #[test]
    fn test_open_missing_file_starts_empty() {
        let (_dir, store) = temp_store();
        assert!(store.is_empty());
    }
}
