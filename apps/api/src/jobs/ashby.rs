use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::{JobBoard, JobError};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct JobBoardListing {
    #[serde(default)]
    jobs: Vec<Value>,
}

/// Client for Ashby's public posting API.
#[derive(Clone)]
pub struct AshbyClient {
    client: Client,
    api_base: String,
}

impl AshbyClient {
    pub fn new(client: Client, api_base: impl Into<String>) -> Self {
        Self {
            client,
            api_base: api_base.into().trim_end_matches('/').to_string(),
        }
    }

    fn board_url(&self, board: &str) -> String {
        format!("{}/posting-api/job-board/{board}", self.api_base)
    }
}

#[async_trait]
impl JobBoard for AshbyClient {
    async fn list_jobs(&self, board: &str) -> Result<Vec<Value>, JobError> {
        let url = self.board_url(board);
        debug!("GET {url}");

        let response = self
            .client
            .get(&url)
            .query(&[("includeCompensation", "true")])
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Ashby returned {status} for board '{board}'");
            return Err(JobError::UpstreamUnavailable {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let listing: JobBoardListing =
            serde_json::from_slice(&body).map_err(|e| JobError::Parse(e.to_string()))?;

        debug!("Board '{board}' lists {} jobs", listing.jobs.len());
        Ok(listing.jobs)
    }
}
