//! HTTP handlers for jobscreen-web

pub mod form;
pub mod health;
pub mod screen;
pub mod ui;

pub use form::{show_form, submit_form};
pub use health::health_routes;
pub use screen::screen_posting_json;

use tracing::warn;

use crate::inference::{screen_posting, ScreenError, ScreeningReport};
use crate::input::{resolve_input, PostingInput, EMPTY_FETCH_MESSAGE, EMPTY_INPUT_MESSAGE};
use crate::AppState;

/// Turn the two form fields into posting text
///
/// Fetches the page when a URL was given. `Err` carries the warning to
/// show the user; inference must not run in that case.
pub(crate) async fn posting_text(
    state: &AppState,
    job_post: &str,
    job_url: &str,
) -> Result<String, &'static str> {
    match resolve_input(job_post, job_url) {
        PostingInput::Text(text) => Ok(text),
        PostingInput::Url(url) => {
            let text = state.fetcher.fetch_text(&url).await;
            if text.is_empty() {
                warn!(url = %url, "No text extracted from job link");
                Err(EMPTY_FETCH_MESSAGE)
            } else {
                Ok(text)
            }
        }
        PostingInput::Empty => {
            warn!("Rejected submission with no text and no link");
            Err(EMPTY_INPUT_MESSAGE)
        }
    }
}

/// Run the screening pipeline off the async runtime
///
/// Artifact loading reads files from disk on every request.
pub(crate) async fn run_screening(
    state: &AppState,
    text: String,
) -> Result<ScreeningReport, ScreenError> {
    let paths = state.config.artifact_paths();
    tokio::task::spawn_blocking(move || screen_posting(&text, &paths))
        .await
        .map_err(|e| ScreenError::Internal(format!("screening task failed: {}", e)))?
}
