/// Webserver middleware
use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

use crate::logger::{self, LogTag};

/// Log method, path, status and latency of every request
///
/// Successful requests are logged at debug level (`--debug-webserver`);
/// server errors are always logged.
pub async fn request_logger(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;

    let status = response.status();
    let message = format!(
        "{} {} -> {} in {:.1}ms",
        method,
        path,
        status.as_u16(),
        started.elapsed().as_secs_f64() * 1000.0
    );
    if status.is_server_error() {
        logger::error(LogTag::Webserver, &message);
    } else {
        logger::debug(LogTag::Webserver, &message);
    }

    response
}
