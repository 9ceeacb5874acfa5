//! jobscreen-web library
//!
//! Screens job postings for signs of fraud: extracts display fields and
//! keyword meta features from the posting text, combines them with
//! TF-IDF features and asks a pre-trained linear classifier for a verdict.

use axum::Router;
use jobscreen_common::Config;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod error;
pub mod extract;
pub mod inference;
pub mod input;
pub mod model;
pub mod scrape;

pub use crate::error::{ApiError, ApiResult};

use crate::scrape::{FetchError, PageFetcher};

/// Application state shared across HTTP handlers
///
/// Read-only after startup. Model artifacts are loaded per request, not held here.
#[derive(Clone)]
pub struct AppState {
    /// Resolved configuration (artifact paths, signing key)
    pub config: Arc<Config>,
    /// Client used for job links
    pub fetcher: PageFetcher,
}

impl AppState {
    /// Create new application state
    pub fn new(config: Config) -> Result<Self, FetchError> {
        let fetcher = PageFetcher::new(config.fetch_timeout())?;
        Ok(Self {
            config: Arc::new(config),
            fetcher,
        })
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    Router::new()
        .route("/", get(api::show_form).post(api::submit_form))
        .route("/api/screen", post(api::screen_posting_json))
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
