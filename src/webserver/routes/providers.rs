use axum::{extract::State, response::Response, routing::get, Router};
use std::sync::Arc;

use crate::webserver::{state::AppState, utils::success_response};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/providers/stats", get(provider_stats))
}

/// GET /api/v1/providers/stats
async fn provider_stats(State(state): State<Arc<AppState>>) -> Response {
    success_response(state.api_manager.get_all_stats().await)
}
