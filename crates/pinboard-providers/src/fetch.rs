//! The page content fetcher.
//!
//! Implements [`pinboard_canvas::ContentFetcher`]: fetch a URL, reject
//! challenge pages and non-success statuses, and return the readable text.
//! A page that parses but yields nothing readable is still a *successful*
//! fetch; its fixed fallback text becomes the item's loaded content.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use pinboard_canvas::{ContentFetcher, FetchError};

use crate::html::{extract_page, is_challenge_page};
use crate::http::HttpClient;

/// Fetches a page over HTTP and reduces it to readable text.
pub struct PageFetcher {
    http: Arc<dyn HttpClient>,
}

impl PageFetcher {
    /// Create a fetcher over the given HTTP client.
    #[must_use]
    pub fn new(http: Arc<dyn HttpClient>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl ContentFetcher for PageFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .http
            .get(url)
            .await
            .map_err(|e| FetchError::new(e.to_string()))?;

        if response.status != 200 {
            return Err(FetchError::new(format!(
                "HTTP {} for {url}",
                response.status
            )));
        }

        if is_challenge_page(&response.body) {
            return Err(FetchError::new(
                "the request was blocked by a security service",
            ));
        }

        let text = extract_page(&response.body);
        debug!(url = %url, chars = text.chars().count(), "page extracted");
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ProviderError;
    use crate::html::NO_READABLE_CONTENT;
    use crate::http::HttpResponse;

    struct MockHttp {
        handler: Box<dyn Fn(&str) -> Result<HttpResponse, String> + Send + Sync>,
    }

    #[async_trait]
    impl HttpClient for MockHttp {
        async fn get(&self, url: &str) -> Result<HttpResponse, ProviderError> {
            (self.handler)(url).map_err(ProviderError::Http)
        }

        async fn post_json(
            &self,
            _url: &str,
            _body: &serde_json::Value,
        ) -> Result<HttpResponse, ProviderError> {
            unreachable!("the page fetcher never posts")
        }
    }

    fn html_response(body: &str) -> HttpResponse {
        HttpResponse {
            status: 200,
            body: body.into(),
            content_type: Some("text/html".into()),
        }
    }

    #[tokio::test]
    async fn readable_page_yields_its_text() {
        let body = "<html><body><p>Readable body.</p></body></html>".to_owned();
        let fetcher = PageFetcher::new(Arc::new(MockHttp {
            handler: Box::new(move |_| Ok(html_response(&body))),
        }));
        let text = fetcher.fetch("https://x.test").await.unwrap();
        assert!(text.contains("Readable body."));
    }

    #[tokio::test]
    async fn page_chrome_never_reaches_the_fetched_text() {
        let fetcher = PageFetcher::new(Arc::new(MockHttp {
            handler: Box::new(|_| {
                Ok(html_response(
                    "<html><head><title>Site Chrome</title></head><body><p>Body text.</p></body></html>",
                ))
            }),
        }));
        let text = fetcher.fetch("https://x.test").await.unwrap();
        assert!(text.contains("Body text."));
        assert!(!text.contains("Site Chrome"));
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let fetcher = PageFetcher::new(Arc::new(MockHttp {
            handler: Box::new(|_| {
                Ok(HttpResponse {
                    status: 404,
                    body: "not found".into(),
                    content_type: None,
                })
            }),
        }));
        let err = fetcher.fetch("https://x.test/missing").await.unwrap_err();
        assert!(err.to_string().contains("HTTP 404"));
    }

    #[tokio::test]
    async fn transport_failure_is_an_error() {
        let fetcher = PageFetcher::new(Arc::new(MockHttp {
            handler: Box::new(|_| Err("connection reset".into())),
        }));
        assert!(fetcher.fetch("https://x.test").await.is_err());
    }

    #[tokio::test]
    async fn challenge_page_is_rejected() {
        let fetcher = PageFetcher::new(Arc::new(MockHttp {
            handler: Box::new(|_| {
                Ok(html_response(
                    "<html><head><title>Attention Required! | Cloudflare</title></head></html>",
                ))
            }),
        }));
        let err = fetcher.fetch("https://x.test").await.unwrap_err();
        assert!(err.to_string().contains("security service"));
    }

    #[tokio::test]
    async fn unreadable_page_succeeds_with_the_fallback_text() {
        let fetcher = PageFetcher::new(Arc::new(MockHttp {
            handler: Box::new(|_| Ok(html_response("<html><body></body></html>"))),
        }));
        let text = fetcher.fetch("https://x.test").await.unwrap();
        assert_eq!(text, NO_READABLE_CONTENT);
    }
}
