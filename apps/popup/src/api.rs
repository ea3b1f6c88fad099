use bytes::Bytes;
use futures::stream::BoxStream;
use futures::{StreamExt, TryStreamExt};
use posting::JobPosting;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::ClientError;

/// Fallback when a failed `/api/job` response carries no `{error}` message.
const DEFAULT_LOOKUP_ERROR: &str = "Failed to fetch";

#[derive(Debug, Serialize)]
struct JobRequest<'a> {
    url: &'a str,
}

#[derive(Debug, Serialize)]
struct PredictRequest<'a> {
    posting: &'a JobPosting,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// `/api/job` success body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobLookup {
    pub posting: JobPosting,
    pub board_name: String,
    pub posting_id: String,
}

/// HTTP client for the prediction API.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base: String,
}

impl ApiClient {
    pub fn new(client: Client, base: impl Into<String>) -> Self {
        Self {
            client,
            base: base.into().trim_end_matches('/').to_string(),
        }
    }

    /// POST /api/job
    pub async fn lookup_job(&self, url: &str) -> Result<JobLookup, ClientError> {
        let response = self
            .client
            .post(format!("{}/api/job", self.base))
            .json(&JobRequest { url })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .map(|body| body.error)
                .unwrap_or_else(|_| DEFAULT_LOOKUP_ERROR.to_string());
            warn!("Job lookup failed with {status}: {message}");
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let lookup: JobLookup = response.json().await?;
        debug!(board = %lookup.board_name, posting_id = %lookup.posting_id, "Job loaded");
        Ok(lookup)
    }

    /// POST /api/predict
    ///
    /// Resolves once response headers arrive; the body is returned unread as
    /// a chunk stream.
    pub async fn predict(
        &self,
        posting: &JobPosting,
    ) -> Result<BoxStream<'static, Result<Bytes, ClientError>>, ClientError> {
        let response = self
            .client
            .post(format!("{}/api/predict", self.base))
            .json(&PredictRequest { posting })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Prediction request failed with {status}");
            return Err(ClientError::PredictionFailed {
                status: status.as_u16(),
            });
        }

        Ok(response
            .bytes_stream()
            .map_err(ClientError::StreamInterrupted)
            .boxed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_lookup_job_sends_url_and_parses_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/job"))
            .and(body_json(json!({"url": "https://jobs.ashbyhq.com/acme/1"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "posting": {"title": "Engineer", "isRemote": true},
                "boardName": "acme",
                "postingId": "1"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let api = ApiClient::new(Client::new(), format!("{}/", server.uri()));
        let lookup = api.lookup_job("https://jobs.ashbyhq.com/acme/1").await.unwrap();

        assert_eq!(lookup.posting.title, "Engineer");
        assert!(lookup.posting.remote());
        assert_eq!(lookup.board_name, "acme");
    }

    #[tokio::test]
    async fn test_lookup_error_uses_server_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/job"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({"error": "Job posting not found"})),
            )
            .mount(&server)
            .await;

        let api = ApiClient::new(Client::new(), server.uri());
        let err = api.lookup_job("https://jobs.ashbyhq.com/acme/2").await.unwrap_err();

        assert_eq!(err.to_string(), "Job posting not found");
    }

    #[tokio::test]
    async fn test_lookup_error_without_body_uses_fallback() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let api = ApiClient::new(Client::new(), server.uri());
        let err = api.lookup_job("https://jobs.ashbyhq.com/acme/2").await.unwrap_err();

        assert!(matches!(err, ClientError::Api { status: 502, .. }));
        assert_eq!(err.to_string(), DEFAULT_LOOKUP_ERROR);
    }

    #[tokio::test]
    async fn test_predict_streams_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/predict"))
            .and(body_json(json!({"posting": {"title": "Engineer"}})))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw("$120k – $150k", "text/plain; charset=utf-8"),
            )
            .mount(&server)
            .await;

        let api = ApiClient::new(Client::new(), server.uri());
        let posting = JobPosting {
            title: "Engineer".to_string(),
            ..Default::default()
        };
        let chunks: Vec<Bytes> = api.predict(&posting).await.unwrap().try_collect().await.unwrap();

        assert_eq!(chunks.concat(), "$120k – $150k".as_bytes());
    }

    #[tokio::test]
    async fn test_predict_non_success_is_prediction_failed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "boom"})))
            .mount(&server)
            .await;

        let api = ApiClient::new(Client::new(), server.uri());
        let posting = JobPosting {
            title: "Engineer".to_string(),
            ..Default::default()
        };
        let err = match api.predict(&posting).await {
            Ok(_) => panic!("expected predict to fail"),
            Err(e) => e,
        };

        assert_eq!(err.to_string(), "Prediction failed");
    }
}
