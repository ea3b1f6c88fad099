//! Axum route handler for the Prediction API.

use axum::{
    body::{Body, Bytes},
    extract::State,
    http::header::{CACHE_CONTROL, CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use posting::JobPosting;
use serde::Deserialize;
use tracing::debug;

use crate::errors::AppError;
use crate::prediction::relay::open_relay;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct PredictRequest {
    #[serde(default)]
    pub posting: Option<JobPosting>,
}

/// POST /api/predict
///
/// Streams the model's salary estimate as `text/plain`. A body that is not a
/// `{posting}` object with at least a `title` is treated as a missing posting.
pub async fn handle_predict(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, AppError> {
    let request = serde_json::from_slice::<PredictRequest>(&body).unwrap_or_else(|e| {
        debug!("Rejecting predict body: {e}");
        PredictRequest::default()
    });
    let posting = request.posting.ok_or(AppError::MissingInput)?;

    let stream = open_relay(state.llm.as_ref(), &posting).await?;

    Ok((
        [
            (CONTENT_TYPE, "text/plain; charset=utf-8"),
            (CACHE_CONTROL, "no-cache"),
        ],
        Body::from_stream(stream),
    )
        .into_response())
}
