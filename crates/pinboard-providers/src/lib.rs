//! # pinboard-providers
//!
//! External collaborators behind capability traits:
//!
//! - [`http`] — the [`http::HttpClient`] trait and its `reqwest` implementation
//! - [`html`] — HTML-to-text extraction for fetched pages
//! - [`fetch`] — the page [`fetch::PageFetcher`] implementing
//!   [`pinboard_canvas::ContentFetcher`]
//! - [`scholar`] — Semantic Scholar paper search
//! - [`assistant`] — Gemini-backed summarization, grounded Q&A, and
//!   search-grounded web lookup
//!
//! Everything network-facing takes a configurable base URL so tests run
//! against a local mock server.

#![deny(unsafe_code)]

pub mod assistant;
pub mod errors;
pub mod fetch;
pub mod html;
pub mod http;
pub mod scholar;

pub use assistant::{GeminiClient, WebSearch, WebSearchResult};
pub use errors::ProviderError;
pub use fetch::PageFetcher;
pub use http::{HttpClient, HttpResponse, ReqwestHttpClient};
pub use scholar::SemanticScholarClient;
