//! Project durability.
//!
//! The project collection persists as one document with get/set-whole-
//! collection semantics: callers load the full list at startup and save the
//! full list after mutations. There is no per-project patching and no
//! merging; the last writer wins, which matches the single-process ownership
//! of the [`crate::store::CanvasStore`].

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use pinboard_core::errors::PersistError;

use crate::model::Project;

/// Durable storage for the whole project collection.
pub trait ProjectPersistence: Send + Sync {
    /// Load every stored project. An empty store yields an empty list.
    fn load(&self) -> Result<Vec<Project>, PersistError>;

    /// Replace the stored collection with `projects`.
    fn save(&self, projects: &[Project]) -> Result<(), PersistError>;
}

/// JSON-file persistence: the whole collection serialized as one pretty-
/// printed document.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store backed by the file at `path`. The file need not exist
    /// yet; it is created on the first save.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProjectPersistence for JsonFileStore {
    fn load(&self) -> Result<Vec<Project>, PersistError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no saved projects, starting empty");
                return Ok(Vec::new());
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to read projects");
                return Err(e.into());
            }
        };
        let projects: Vec<Project> = serde_json::from_str(&raw)?;
        debug!(path = %self.path.display(), count = projects.len(), "projects loaded");
        Ok(projects)
    }

    fn save(&self, projects: &[Project]) -> Result<(), PersistError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let raw = serde_json::to_string_pretty(projects)?;
        fs::write(&self.path, raw)?;
        debug!(path = %self.path.display(), count = projects.len(), "projects saved");
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CanvasItem, WebContent};
    use crate::store::CanvasStore;
    use assert_matches::assert_matches;

    #[test]
    fn loading_from_an_absent_file_yields_an_empty_list() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("projects.json"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn save_then_load_round_trips_the_collection() {
        let dir = tempfile::tempdir().unwrap();
        let file = JsonFileStore::new(dir.path().join("projects.json"));

        let store = CanvasStore::new();
        let project = store.create_project("thesis").unwrap();
        store
            .add_item(
                &project.id,
                CanvasItem::web(WebContent::new("Page", "https://x.test", "snip")),
            )
            .unwrap();
        store
            .add_item(&project.id, CanvasItem::note("remember this"))
            .unwrap();

        file.save(&store.snapshot()).unwrap();
        let loaded = file.load().unwrap();

        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].name, "thesis");
        assert_eq!(loaded[0].items.len(), 2);
        assert_eq!(loaded[0].id, project.id);
    }

    #[test]
    fn save_creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let file = JsonFileStore::new(dir.path().join("nested/state/projects.json"));
        file.save(&[]).unwrap();
        assert!(file.path().exists());
    }

    #[test]
    fn save_replaces_the_previous_collection() {
        let dir = tempfile::tempdir().unwrap();
        let file = JsonFileStore::new(dir.path().join("projects.json"));

        let store = CanvasStore::new();
        store.create_project("a").unwrap();
        store.create_project("b").unwrap();
        file.save(&store.snapshot()).unwrap();

        let first = store.snapshot()[0].id.clone();
        let _ = store.delete_project(&first);
        file.save(&store.snapshot()).unwrap();

        assert_eq!(file.load().unwrap().len(), 1);
    }

    #[test]
    fn corrupt_documents_surface_a_serde_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("projects.json");
        fs::write(&path, "{ not json").unwrap();
        let file = JsonFileStore::new(path);
        assert_matches!(file.load(), Err(PersistError::Serde(_)));
    }
}
