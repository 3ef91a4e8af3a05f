use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, State},
    routing::post,
    Json, Router,
};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::{error::RelayError, state::AppState};

use super::dto::AnalysisRequest;
use super::normalize::normalize_reply;
use super::prompt::{build_user_message, SYSTEM_INSTRUCTION};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/analyze", post(analyze))
        // Base64 label photos; roughly 4/3 of the raw image size.
        .layer(DefaultBodyLimit::max(20 * 1024 * 1024))
}

/// POST /analyze { mode, content, mimeType? }
///
/// One upstream completion call per request; the parsed reply is returned
/// verbatim after the top-level shape check.
#[instrument(skip(state, body))]
pub async fn analyze(
    State(state): State<AppState>,
    body: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Result<Json<Value>, RelayError> {
    let Json(request) = body.map_err(|e| RelayError::InvalidRequest(e.body_text()))?;
    let request = request.validate()?;

    let client = state
        .completion
        .as_ref()
        .ok_or_else(|| RelayError::Configuration("GEMINI_API_KEY is not set".into()))?;

    let message = build_user_message(&request);
    debug!(mode = ?request.mode, model = client.model_name(), "calling completion service");

    let raw = client.complete(SYSTEM_INSTRUCTION, &message).await.map_err(|e| {
        warn!(error = %e, "completion call failed");
        RelayError::from(e)
    })?;

    let parsed = normalize_reply(&raw).map_err(|e| {
        warn!(reply_len = raw.len(), "upstream reply was not the expected JSON");
        e
    })?;

    Ok(Json(parsed))
}
