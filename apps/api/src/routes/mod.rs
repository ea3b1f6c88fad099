pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::jobs::handlers::handle_job;
use crate::prediction::handlers::handle_predict;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/job", post(handle_job))
        .route("/api/predict", post(handle_predict))
        .with_state(state)
}
