//! Job lookup: resolves an Ashby job page URL to its posting record.
//!
//! Flow: parse_ashby_url → JobBoard::list_jobs(board) → match by posting id.
//! One outbound call per lookup, never retried.

pub mod ashby;
pub mod handlers;

use async_trait::async_trait;
use posting::{parse_ashby_url, JobPosting};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum JobError {
    #[error("URL is not an Ashby job posting")]
    InvalidUrl,

    #[error("job board returned status {status}")]
    UpstreamUnavailable { status: u16 },

    #[error("posting {posting_id} not found on board")]
    NotFound { posting_id: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("malformed job board response: {0}")]
    Parse(String),
}

/// Source of job board listings. `AppState` carries an `Arc<dyn JobBoard>`
/// so handlers never talk to Ashby directly.
#[async_trait]
pub trait JobBoard: Send + Sync {
    /// Returns every job on `board` as raw JSON records, compensation included.
    async fn list_jobs(&self, board: &str) -> Result<Vec<Value>, JobError>;
}

/// Successful lookup, serialized as the `/api/job` response body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobLookup {
    pub posting: JobPosting,
    pub board_name: String,
    pub posting_id: String,
}

/// Resolves `url` to the matching posting on its board.
pub async fn fetch_posting(board: &dyn JobBoard, url: &str) -> Result<JobLookup, JobError> {
    let parsed = parse_ashby_url(url).ok_or(JobError::InvalidUrl)?;
    debug!(board = %parsed.board, posting_id = %parsed.posting_id, "Looking up posting");

    let jobs = board.list_jobs(&parsed.board).await?;

    let record = jobs
        .into_iter()
        .find(|job| job.get("id").and_then(Value::as_str) == Some(parsed.posting_id.as_str()))
        .ok_or_else(|| JobError::NotFound {
            posting_id: parsed.posting_id.clone(),
        })?;

    // Only the matched record has to fit the schema; siblings are never decoded.
    let posting: JobPosting =
        serde_json::from_value(record).map_err(|e| JobError::Parse(e.to_string()))?;

    info!(board = %parsed.board, title = %posting.title, "Resolved job posting");

    Ok(JobLookup {
        posting,
        board_name: parsed.board,
        posting_id: parsed.posting_id,
    })
}
