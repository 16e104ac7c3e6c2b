//! Gemini-backed generative collaborator.
//!
//! Three operations: abstract summarization for newly placed papers,
//! context-grounded question answering over the aggregate payload built by
//! `pinboard_canvas::context`, and search-grounded web lookup that yields a
//! summary plus the source links behind it.
//!
//! Summarization degrades to fixed fallback text so paper placement never
//! fails on a flaky upstream; the other two surface their errors and leave
//! the fallback wording to the caller.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use crate::errors::ProviderError;
use crate::http::HttpClient;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Returned by [`GeminiClient::summarize_abstract`] when there is nothing to
/// summarize.
pub const NO_ABSTRACT_MESSAGE: &str = "No abstract available to summarize.";

/// Returned by [`GeminiClient::summarize_abstract`] when the upstream call
/// fails.
pub const SUMMARY_FAILED_MESSAGE: &str = "Could not generate summary due to an error.";

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: CandidateContent,
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Deserialize)]
struct GroundingChunk {
    web: Option<WebChunk>,
}

#[derive(Deserialize)]
struct WebChunk {
    #[serde(default)]
    uri: String,
    #[serde(default)]
    title: String,
}

/// One source link surfaced by search grounding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebSearchResult {
    /// Page title as reported by the grounding chunk.
    pub title: String,
    /// Resolvable page URI.
    pub uri: String,
}

/// Outcome of a grounded web search.
#[derive(Debug, Clone)]
pub struct WebSearch {
    /// Generated summary of the query results.
    pub summary: String,
    /// Source links backing the summary, in grounding order.
    pub results: Vec<WebSearchResult>,
}

/// Client for the Gemini `generateContent` API.
pub struct GeminiClient {
    http: Arc<dyn HttpClient>,
    api_key: String,
    base_url: String,
    model: String,
}

impl GeminiClient {
    /// Create a client against the public API.
    #[must_use]
    pub fn new(http: Arc<dyn HttpClient>, api_key: impl Into<String>) -> Self {
        Self::with_base_url(http, api_key, DEFAULT_BASE_URL)
    }

    /// Create a client against an explicit base URL (tests).
    #[must_use]
    pub fn with_base_url(
        http: Arc<dyn HttpClient>,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            http,
            api_key: api_key.into(),
            base_url: base_url.into(),
            model: DEFAULT_MODEL.into(),
        }
    }

    /// Summarize an academic abstract in a few sentences.
    ///
    /// Never fails: an empty abstract and an upstream error each map to
    /// their fixed fallback text.
    pub async fn summarize_abstract(&self, abstract_text: &str) -> String {
        if abstract_text.is_empty() {
            return NO_ABSTRACT_MESSAGE.to_owned();
        }

        let prompt = format!(
            "You are an expert research assistant. Concisely summarize the following \
             academic abstract for a researcher. Focus on the core problem, methodology, \
             key findings, and contributions. The summary should be clear, informative, \
             and no more than 4 sentences.\n\nAbstract: \"{abstract_text}\"\nSummary:"
        );

        match self.generate(&prompt).await {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "abstract summarization failed");
                SUMMARY_FAILED_MESSAGE.to_owned()
            }
        }
    }

    /// Answer a question grounded in the given context payload.
    pub async fn answer(&self, context: &str, question: &str) -> Result<String, ProviderError> {
        let prompt = format!(
            "Based on the following context, please answer the user's question. \
             If the context doesn't contain the answer, state that you don't have \
             enough information from the provided text.\n\n\
             Context:\n---\n{context}\n---\n\nUser Question: {question}"
        );
        self.generate(&prompt).await
    }

    /// Run a search-grounded query: a generated summary plus the web sources
    /// it was grounded in.
    ///
    /// Grounding chunks without a resolvable link are dropped; a response
    /// without grounding metadata yields a summary with no sources.
    pub async fn search_web(&self, query: &str) -> Result<WebSearch, ProviderError> {
        let prompt = format!(
            "Provide a brief summary and a list of the top 5 most relevant \
             web links for the query: \"{query}\""
        );
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "tools": [{ "googleSearch": {} }],
        });

        let parsed = self.request(&body).await?;
        let candidate = parsed
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::InvalidResponse("no candidates in response".into()))?;
        let summary = candidate
            .content
            .parts
            .first()
            .map(|p| p.text.clone())
            .ok_or_else(|| ProviderError::InvalidResponse("no text in response".into()))?;
        let results = candidate
            .grounding_metadata
            .map(|m| m.grounding_chunks)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|chunk| chunk.web)
            .filter(|web| !web.uri.is_empty() && !web.title.is_empty())
            .map(|web| WebSearchResult {
                title: web.title,
                uri: web.uri,
            })
            .collect();
        Ok(WebSearch { summary, results })
    }

    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
        });
        let parsed = self.request(&body).await?;
        parsed
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.clone())
            .ok_or_else(|| ProviderError::InvalidResponse("no candidates in response".into()))
    }

    async fn request(&self, body: &serde_json::Value) -> Result<GenerateResponse, ProviderError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        let response = self.http.post_json(&url, body).await?;
        if response.status != 200 {
            return Err(ProviderError::Status {
                status: response.status,
                url,
            });
        }

        serde_json::from_str(&response.body).map_err(ProviderError::invalid)
    }
}
