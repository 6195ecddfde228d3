use axum::{extract::State, response::Response, routing::get, Router};
use std::sync::Arc;

use crate::webserver::{state::AppState, utils::success_response};

/// Cache diagnostics, both paths serve the same performance report
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/status", get(cache_performance))
        .route("/performance", get(cache_performance))
}

/// GET /cache/status, GET /cache/performance
async fn cache_performance(State(state): State<Arc<AppState>>) -> Response {
    success_response(state.aggregator.cache_performance().await)
}
