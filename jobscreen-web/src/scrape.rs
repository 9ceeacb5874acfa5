//! Job posting fetcher
//!
//! Downloads a page and reduces it to its visible text. Any failure
//! (network, timeout, non-2xx status, undecodable body) yields an empty
//! string; the caller turns that into a user-facing warning.

use scraper::{node::Node, Html};
use std::time::Duration;
use thiserror::Error;

const USER_AGENT: &str = "Mozilla/5.0";

/// Elements whose text never reaches the user
const HIDDEN_ELEMENTS: [&str; 3] = ["script", "style", "noscript"];

/// Fetch failures, logged and then swallowed by [`PageFetcher::fetch_text`]
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("Body error: {0}")]
    BodyError(String),
}

/// HTTP client for job posting pages
#[derive(Clone)]
pub struct PageFetcher {
    http_client: reqwest::Client,
}

impl PageFetcher {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::NetworkError(e.to_string()))?;

        Ok(Self { http_client })
    }

    /// Visible text of the page at `url`, or an empty string on any failure
    pub async fn fetch_text(&self, url: &str) -> String {
        let url = normalize_url(url);
        match self.try_fetch(&url).await {
            Ok(text) => {
                tracing::debug!(url = %url, chars = text.len(), "Fetched job posting");
                text
            }
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "URL fetch error");
                String::new()
            }
        }
    }

    async fn try_fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::BodyError(e.to_string()))?;

        Ok(visible_text(&body))
    }
}

/// Prefix `http://` when no scheme is present
pub fn normalize_url(url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("http://{}", url)
    }
}

/// Text nodes outside script/style/noscript, trimmed and joined by single spaces
pub fn visible_text(html: &str) -> String {
    let document = Html::parse_document(html);

    let pieces: Vec<&str> = document
        .root_element()
        .descendants()
        .filter_map(|node| match node.value() {
            Node::Text(text) => {
                let hidden = node.ancestors().any(|ancestor| {
                    ancestor
                        .value()
                        .as_element()
                        .is_some_and(|el| HIDDEN_ELEMENTS.contains(&el.name()))
                });
                (!hidden).then_some(&**text)
            }
            _ => None,
        })
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .collect();

    pieces.join(" ").trim().to_string()
}
