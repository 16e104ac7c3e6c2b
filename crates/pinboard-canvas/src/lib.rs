//! # pinboard-canvas
//!
//! The canvas item lifecycle and content-enrichment engine.
//!
//! - [`model`] — projects, canvas items (paper / web / note), enrichment state
//! - [`store`] — the [`store::CanvasStore`] owning all projects and items
//! - [`enrich`] — the [`enrich::EnrichmentOrchestrator`] driving per-item
//!   background content fetches
//! - [`context`] — aggregation of a project's items into one bounded text
//!   payload for question answering
//! - [`persist`] — get/set-whole-collection durability for the project list
//!
//! ## Crate Position
//!
//! Depends on `pinboard-core`. The concrete content fetcher and the search /
//! question-answering collaborators live in `pinboard-providers`.

#![deny(unsafe_code)]

pub mod context;
pub mod enrich;
pub mod model;
pub mod persist;
pub mod store;

pub use context::build_context;
pub use enrich::{ContentFetcher, EnrichmentOrchestrator, FetchError};
pub use model::{CanvasItem, ContentStatus, ItemContent, Project};
pub use persist::{JsonFileStore, ProjectPersistence};
pub use store::CanvasStore;
