//! The enrichment orchestrator.
//!
//! For every enrichable item placed on a canvas, the orchestrator drives the
//! item through `loading → loaded | error` exactly once, on its own tokio
//! task, without blocking item creation or any other item's enrichment.
//!
//! There is no cancellation: if an item is removed mid-fetch the fetch still
//! completes and its result is discarded by the store's idempotent-absorb
//! rule. The orchestrator never checks whether the item still exists before
//! writing, and it never holds a reference to an item across the await —
//! only the IDs travel into the task.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use pinboard_core::errors::StoreError;
use pinboard_core::ids::ProjectId;

use crate::model::{CanvasItem, ContentStatus};
use crate::store::CanvasStore;

/// Terminal message when an enrichable item has no URL to fetch.
pub const NO_URL_MESSAGE: &str = "No URL available to fetch.";

/// Terminal message for any failed fetch. The underlying cause is logged,
/// never stored on the item.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to load content.";

/// A content fetch failure. The orchestrator treats every failure the same
/// way, so one message string is all the context this carries.
#[derive(Debug, Error)]
#[error("content fetch failed: {message}")]
pub struct FetchError {
    message: String,
}

impl FetchError {
    /// Create a fetch error with a diagnostic message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Capability contract for fetching the text content of a URL.
///
/// Supplied externally; the engine depends only on this contract. The call
/// may suspend for an unbounded, provider-bounded duration — any timeout is
/// the implementation's concern, the orchestrator imposes none.
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    /// Fetch the readable text content of `url`.
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// Drives per-item content enrichment against a [`CanvasStore`].
///
/// Holds no ownership of items: all writes go through the store's mutation
/// surface and are absorbed if the target has been removed.
pub struct EnrichmentOrchestrator {
    store: Arc<CanvasStore>,
    fetcher: Arc<dyn ContentFetcher>,
}

impl EnrichmentOrchestrator {
    /// Create an orchestrator bound to a store and a fetcher.
    #[must_use]
    pub fn new(store: Arc<CanvasStore>, fetcher: Arc<dyn ContentFetcher>) -> Self {
        Self { store, fetcher }
    }

    /// Add an item to a project and begin enriching it.
    ///
    /// This is the single entry point for placing search results and notes
    /// on a canvas: the item is appended first, then enrichment is scheduled
    /// for the variants that support it.
    pub fn place(
        &self,
        project_id: &ProjectId,
        item: CanvasItem,
    ) -> Result<Option<JoinHandle<()>>, StoreError> {
        self.store.add_item(project_id, item.clone())?;
        Ok(self.submit(project_id, &item))
    }

    /// Schedule enrichment of an already-stored item.
    ///
    /// Notes return `None` without touching any state. Items with no
    /// resolvable URL transition `loading → error` synchronously with
    /// [`NO_URL_MESSAGE`] and return `None` — there is nothing to await.
    /// Everything else gets its own task whose handle is returned (tests
    /// await it; production callers may drop it).
    pub fn submit(&self, project_id: &ProjectId, item: &CanvasItem) -> Option<JoinHandle<()>> {
        if !item.is_enrichable() {
            return None;
        }

        let project_id = project_id.clone();
        let item_id = item.id.clone();
        let url = item.fetch_url().unwrap_or_default().to_owned();

        // Loading must be observable before any terminal state, so it is
        // written synchronously before any network activity is scheduled.
        self.store
            .update_enrichment(&project_id, &item_id, ContentStatus::Loading, None);

        if url.is_empty() {
            self.store.update_enrichment(
                &project_id,
                &item_id,
                ContentStatus::Error,
                Some(NO_URL_MESSAGE.to_owned()),
            );
            return None;
        }

        let store = Arc::clone(&self.store);
        let fetcher = Arc::clone(&self.fetcher);
        Some(tokio::spawn(async move {
            match fetcher.fetch(&url).await {
                Ok(text) => {
                    debug!(item = %item_id, url = %url, bytes = text.len(), "content fetched");
                    store.update_enrichment(
                        &project_id,
                        &item_id,
                        ContentStatus::Loaded,
                        Some(text),
                    );
                }
                Err(e) => {
                    warn!(item = %item_id, url = %url, error = %e, "content fetch failed");
                    store.update_enrichment(
                        &project_id,
                        &item_id,
                        ContentStatus::Error,
                        Some(FETCH_FAILED_MESSAGE.to_owned()),
                    );
                }
            }
        }))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
