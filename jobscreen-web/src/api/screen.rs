//! JSON screening endpoint
//!
//! Same pipeline as the form, for programmatic callers.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use super::{posting_text, run_screening};
use crate::error::{ApiError, ApiResult};
use crate::extract::{ExtractedFields, MetaFeatures};
use crate::AppState;

/// Request body for POST /api/screen
#[derive(Debug, Default, Deserialize)]
pub struct ScreenRequest {
    #[serde(default)]
    pub job_post: String,
    #[serde(default)]
    pub job_url: String,
}

/// Response body for POST /api/screen
#[derive(Debug, Serialize)]
pub struct ScreenResponse {
    /// "FAKE Job Posting" or "Genuine Job"
    pub verdict: &'static str,
    pub is_fake: bool,
    /// Present only when the classifier exposes probabilities
    pub fake_probability: Option<f64>,
    pub fields: ExtractedFields,
    pub meta: MetaFeatures,
}

/// POST /api/screen
pub async fn screen_posting_json(
    State(state): State<AppState>,
    Json(request): Json<ScreenRequest>,
) -> ApiResult<Json<ScreenResponse>> {
    let text = posting_text(&state, &request.job_post, &request.job_url)
        .await
        .map_err(|warning| ApiError::EmptyInput(warning.to_string()))?;

    let report = run_screening(&state, text).await?;
    let verdict = report.prediction.verdict;

    Ok(Json(ScreenResponse {
        verdict: verdict.label(),
        is_fake: verdict.is_fake(),
        fake_probability: report.prediction.fake_probability,
        fields: report.fields,
        meta: report.meta,
    }))
}
