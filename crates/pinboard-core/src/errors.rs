//! Error types for the Pinboard core.
//!
//! Built on [`thiserror`]:
//!
//! - [`StoreError`]: canvas item store rejections. These surface to the
//!   caller and leave the store unchanged.
//! - [`PersistError`]: failures of the durable project-collection store.
//!
//! Enrichment failures are deliberately *not* represented here — a failed
//! content fetch always resolves into a terminal `error` status on the item
//! rather than an error the caller must handle.

use thiserror::Error;

use crate::ids::ProjectId;

/// Maximum number of projects that may exist at once (system-wide).
pub const MAX_PROJECTS: usize = 5;

/// Canvas item store rejection.
///
/// Every variant rejects the operation with no state change.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The referenced project does not exist.
    #[error("project {0} not found")]
    ProjectNotFound(ProjectId),

    /// Creating another project would exceed [`MAX_PROJECTS`].
    #[error("project limit reached (max {limit})")]
    QuotaExceeded {
        /// The enforced limit.
        limit: usize,
    },

    /// The input failed validation (e.g. empty project name).
    #[error("{0}")]
    Validation(String),
}

/// Failure of the durable project-collection store.
#[derive(Debug, Error)]
pub enum PersistError {
    /// Reading or writing the backing file failed.
    #[error("persistence I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The stored collection could not be (de)serialized.
    #[error("persistence serialization failed: {0}")]
    Serde(#[from] serde_json::Error),
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
