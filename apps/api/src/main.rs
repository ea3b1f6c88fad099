mod config;
mod errors;
mod jobs;
mod llm_client;
mod prediction;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::jobs::ashby::AshbyClient;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Salary Predictor API v{}", env!("CARGO_PKG_VERSION"));

    // One connection pool for both upstreams. No overall request timeout:
    // a prediction stream lasts as long as the model keeps writing.
    let http = reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .build()?;

    let job_board = AshbyClient::new(http.clone(), config.ashby_api_base.clone());
    info!("Job board client initialized ({})", config.ashby_api_base);

    let llm = LlmClient::new(
        http,
        config.anthropic_api_key.clone(),
        config.anthropic_api_url.clone(),
    );
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let state = AppState {
        job_board: Arc::new(job_board),
        llm: Arc::new(llm),
    };

    // The extension popup calls from its own origin.
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
