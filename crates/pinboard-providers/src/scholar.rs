//! Semantic Scholar paper search.

use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;

use pinboard_canvas::model::PaperRecord;

use crate::errors::ProviderError;
use crate::html::is_challenge_page;
use crate::http::HttpClient;

const DEFAULT_BASE_URL: &str = "https://api.semanticscholar.org";
const SEARCH_FIELDS: &str = "title,abstract,authors,year,venue,url";

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Vec<PaperRecord>,
}

/// Client for the Semantic Scholar Graph search API.
pub struct SemanticScholarClient {
    http: Arc<dyn HttpClient>,
    base_url: String,
}

impl SemanticScholarClient {
    /// Create a client against the public API.
    #[must_use]
    pub fn new(http: Arc<dyn HttpClient>) -> Self {
        Self::with_base_url(http, DEFAULT_BASE_URL)
    }

    /// Create a client against an explicit base URL (tests).
    #[must_use]
    pub fn with_base_url(http: Arc<dyn HttpClient>, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// Search for papers matching `query`, returning at most `limit` records.
    ///
    /// An empty or whitespace-only query returns an empty list without
    /// issuing a request.
    pub async fn search_papers(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<PaperRecord>, ProviderError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let url = format!(
            "{}/graph/v1/paper/search?query={}&limit={limit}&fields={SEARCH_FIELDS}",
            self.base_url,
            urlencoding::encode(query),
        );

        let response = self.http.get(&url).await?;

        if is_challenge_page(&response.body) {
            return Err(ProviderError::Blocked);
        }
        if response.status != 200 {
            return Err(ProviderError::Status {
                status: response.status,
                url,
            });
        }

        let parsed: SearchResponse =
            serde_json::from_str(&response.body).map_err(ProviderError::invalid)?;
        debug!(query = %query, count = parsed.data.len(), "paper search completed");
        Ok(parsed.data)
    }
}
