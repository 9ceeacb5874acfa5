//! Form routes
//!
//! GET / renders the form plus any pending flash messages.
//! POST / screens the submitted posting. Early rejections (empty input,
//! missing artifacts) store a signed flash cookie and redirect back to
//! GET /; prediction failures render the page directly with an error.

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
    Form,
};
use jobscreen_common::flash::{decode_flash, encode_flash, FlashMessage, FLASH_COOKIE};
use serde::Deserialize;
use tracing::{error, info};

use super::ui::{render_page, PageView};
use super::{posting_text, run_screening};
use crate::inference::ScreenError;
use crate::AppState;

/// Urlencoded form body
#[derive(Debug, Default, Deserialize)]
pub struct JobForm {
    #[serde(default)]
    pub job_post: String,
    #[serde(default)]
    pub job_url: String,
}

/// GET /
pub async fn show_form(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let cookie = flash_cookie_value(&headers);
    let messages = cookie
        .as_deref()
        .and_then(|value| decode_flash(value, &state.config.secret_key))
        .unwrap_or_default();

    let page = Html(render_page(&PageView {
        messages: &messages,
        ..Default::default()
    }));

    if cookie.is_some() {
        // Consume the flash cookie whether or not it verified
        (
            [(header::SET_COOKIE, clear_cookie_header())],
            page,
        )
            .into_response()
    } else {
        page.into_response()
    }
}

/// POST /
pub async fn submit_form(State(state): State<AppState>, Form(form): Form<JobForm>) -> Response {
    let text = match posting_text(&state, &form.job_post, &form.job_url).await {
        Ok(text) => text,
        Err(warning) => {
            return redirect_with_flash(&state, FlashMessage::warning(warning));
        }
    };

    match run_screening(&state, text).await {
        Ok(report) => {
            info!(
                verdict = report.prediction.verdict.label(),
                fake_probability = ?report.prediction.fake_probability,
                "Screened job posting"
            );
            Html(render_page(&PageView {
                job_post: &form.job_post,
                job_url: &form.job_url,
                report: Some(&report),
                ..Default::default()
            }))
            .into_response()
        }
        Err(ScreenError::Artifact(e)) => {
            redirect_with_flash(&state, FlashMessage::error(e.to_string()))
        }
        Err(e) => {
            let messages = [FlashMessage::error(e.to_string())];
            Html(render_page(&PageView {
                messages: &messages,
                job_post: &form.job_post,
                job_url: &form.job_url,
                report: None,
            }))
            .into_response()
        }
    }
}

/// 303 to GET / carrying `message` in a signed cookie
fn redirect_with_flash(state: &AppState, message: FlashMessage) -> Response {
    let value = encode_flash(&[message], &state.config.secret_key);
    let cookie = format!("{}={}; Path=/; HttpOnly; SameSite=Lax", FLASH_COOKIE, value);

    let mut response = StatusCode::SEE_OTHER.into_response();
    let headers = response.headers_mut();
    headers.insert(header::LOCATION, HeaderValue::from_static("/"));
    match HeaderValue::from_str(&cookie) {
        Ok(value) => {
            headers.insert(header::SET_COOKIE, value);
        }
        Err(e) => error!("Flash cookie is not a valid header value: {}", e),
    }
    response
}

fn clear_cookie_header() -> String {
    format!("{}=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax", FLASH_COOKIE)
}

/// Value of the flash cookie in the request, if present
fn flash_cookie_value(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == FLASH_COOKIE)
        .map(|(_, value)| value.to_string())
}
