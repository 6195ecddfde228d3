use axum::{extract::State, http::StatusCode, response::Response, routing::get, Router};
use serde::Serialize;
use std::sync::Arc;

use crate::{
    logger::{self, LogTag},
    tokenomics::TokenomicsData,
    webserver::{
        state::AppState,
        utils::{error_response, success_response},
    },
};

#[derive(Debug, Clone, Serialize)]
pub struct TokenomicsResponse {
    pub message: String,
    pub data: TokenomicsData,
}

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/tokenomics", get(get_tokenomics))
}

/// GET /api/v1/tokenomics
async fn get_tokenomics(State(state): State<Arc<AppState>>) -> Response {
    match state.aggregator.aggregate().await {
        Ok(data) => success_response(TokenomicsResponse {
            message: "Market data retrieved successfully".to_string(),
            data,
        }),
        Err(e) => {
            logger::error(LogTag::Webserver, &format!("Tokenomics request failed: {}", e));
            error_response(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string())
        }
    }
}
