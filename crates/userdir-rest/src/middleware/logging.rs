//! Request logging middleware.

use axum::{body::Body, http::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{info, warn};

/// Emits one event per request with method, uri, status and duration.
/// Client errors are logged at `warn`.
pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    let response = next.run(request).await;

    let duration_ms = start.elapsed().as_millis();
    let status = response.status().as_u16();

    if response.status().is_client_error() {
        warn!(
            target: "userdir::http",
            method = %method,
            uri = %uri,
            status,
            duration_ms = %duration_ms,
            "HTTP request rejected"
        );
    } else {
        info!(
            target: "userdir::http",
            method = %method,
            uri = %uri,
            status,
            duration_ms = %duration_ms,
            "HTTP request completed"
        );
    }

    response
}
