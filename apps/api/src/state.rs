use std::sync::Arc;

use crate::jobs::JobBoard;
use crate::llm_client::CompletionStreamer;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Holds no mutable data: each request is an independent lookup or relay.
#[derive(Clone)]
pub struct AppState {
    /// Job board backend. Default: `AshbyClient`.
    pub job_board: Arc<dyn JobBoard>,
    /// Token streamer behind `/api/predict`. Default: `LlmClient`.
    pub llm: Arc<dyn CompletionStreamer>,
}
