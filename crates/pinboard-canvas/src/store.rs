//! The canvas item store.
//!
//! [`CanvasStore`] owns the mapping from project to ordered item collection
//! and is the single shared mutable resource in the system. Every mutation
//! is one whole-operation write under one lock acquisition — that is the
//! "transaction" unit — so enrichment updates arriving from different
//! in-flight fetches interleave only *between* store operations, never
//! during one.
//!
//! Mutations that can race a concurrent removal (`move_item`,
//! `remove_item`, `update_enrichment`) absorb a missing target silently
//! instead of erroring: a late enrichment result for a deleted item must
//! never resurrect it. Operations that reference a project a caller claims
//! exists (`add_item`) do surface `ProjectNotFound`.

use parking_lot::RwLock;

use pinboard_core::errors::{StoreError, MAX_PROJECTS};
use pinboard_core::geometry::Point;
use pinboard_core::ids::{ItemId, ProjectId};

use crate::model::{CanvasItem, ContentStatus, Project};

/// Owns all projects and their canvas items.
#[derive(Debug, Default)]
pub struct CanvasStore {
    projects: RwLock<Vec<Project>>,
}

impl CanvasStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with an existing collection (e.g. from
    /// persistence).
    #[must_use]
    pub fn from_projects(projects: Vec<Project>) -> Self {
        Self {
            projects: RwLock::new(projects),
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Project operations
    // ─────────────────────────────────────────────────────────────────────

    /// Create a project.
    ///
    /// The name is trimmed before validation. Fails with
    /// [`StoreError::Validation`] on an empty name and
    /// [`StoreError::QuotaExceeded`] when [`MAX_PROJECTS`] already exist;
    /// both rejections leave the store unchanged.
    pub fn create_project(&self, name: &str) -> Result<Project, StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::Validation("Project name is required".into()));
        }

        let mut projects = self.projects.write();
        if projects.len() >= MAX_PROJECTS {
            return Err(StoreError::QuotaExceeded {
                limit: MAX_PROJECTS,
            });
        }

        let project = Project::new(name);
        projects.push(project.clone());
        Ok(project)
    }

    /// Delete a project and all its items, permanently.
    ///
    /// Returns whether a project was removed.
    pub fn delete_project(&self, id: &ProjectId) -> bool {
        let mut projects = self.projects.write();
        let before = projects.len();
        projects.retain(|p| &p.id != id);
        projects.len() != before
    }

    /// Number of projects currently in the store.
    #[must_use]
    pub fn project_count(&self) -> usize {
        self.projects.read().len()
    }

    /// A cloned view of one project, if it exists.
    #[must_use]
    pub fn project(&self, id: &ProjectId) -> Option<Project> {
        self.projects.read().iter().find(|p| &p.id == id).cloned()
    }

    /// A consistent cloned snapshot of the whole collection.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Project> {
        self.projects.read().clone()
    }

    /// Replace the whole collection (persistence restore).
    pub fn replace_all(&self, projects: Vec<Project>) {
        *self.projects.write() = projects;
    }

    // ─────────────────────────────────────────────────────────────────────
    // Item operations
    // ─────────────────────────────────────────────────────────────────────

    /// Append an item to a project's canvas.
    ///
    /// Insertion order is z-order for rendering and otherwise not
    /// semantically significant.
    pub fn add_item(&self, project_id: &ProjectId, item: CanvasItem) -> Result<(), StoreError> {
        let mut projects = self.projects.write();
        let project = projects
            .iter_mut()
            .find(|p| &p.id == project_id)
            .ok_or_else(|| StoreError::ProjectNotFound(project_id.clone()))?;
        project.items.push(item);
        Ok(())
    }

    /// Replace an item's position.
    ///
    /// Silent no-op when the project or item no longer exists — a move may
    /// race a concurrent removal.
    pub fn move_item(&self, project_id: &ProjectId, item_id: &ItemId, position: Point) {
        let mut projects = self.projects.write();
        if let Some(item) = find_item(&mut projects, project_id, item_id) {
            item.position = position;
        }
    }

    /// Delete an item. Idempotent: removing an absent item is not an error.
    pub fn remove_item(&self, project_id: &ProjectId, item_id: &ItemId) {
        let mut projects = self.projects.write();
        if let Some(project) = projects.iter_mut().find(|p| &p.id == project_id) {
            project.items.retain(|i| &i.id != item_id);
        }
    }

    /// Replace an item's enrichment status and text atomically as a unit.
    ///
    /// Silent no-op when the item was removed before the update arrived, and
    /// on note items (they carry no enrichment state). This is the
    /// idempotent-absorb rule that stands in for fetch cancellation.
    pub fn update_enrichment(
        &self,
        project_id: &ProjectId,
        item_id: &ItemId,
        status: ContentStatus,
        text: Option<String>,
    ) {
        let mut projects = self.projects.write();
        if let Some(item) = find_item(&mut projects, project_id, item_id) {
            if let Some(enrichment) = item.enrichment_mut() {
                enrichment.set(status, text);
            }
        }
    }
}

fn find_item<'a>(
    projects: &'a mut [Project],
    project_id: &ProjectId,
    item_id: &ItemId,
) -> Option<&'a mut CanvasItem> {
    projects
        .iter_mut()
        .find(|p| &p.id == project_id)?
        .items
        .iter_mut()
        .find(|i| &i.id == item_id)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
