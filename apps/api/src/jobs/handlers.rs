//! Axum route handler for the Job API.

use axum::{body::Bytes, extract::State, Json};
use serde::Deserialize;
use tracing::debug;

use crate::errors::AppError;
use crate::jobs::{fetch_posting, JobLookup};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct JobRequest {
    pub url: String,
}

/// POST /api/job
///
/// Resolves an Ashby job page URL to its posting. A body without a string
/// `url` gets the same 400 as a URL that does not parse.
pub async fn handle_job(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<JobLookup>, AppError> {
    let request: JobRequest = serde_json::from_slice(&body).map_err(|e| {
        debug!("Rejecting job body: {e}");
        AppError::InvalidUrl
    })?;

    let lookup = fetch_posting(state.job_board.as_ref(), &request.url).await?;
    Ok(Json(lookup))
}
