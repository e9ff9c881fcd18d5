use super::request_id::REQUEST_ID_HEADER;
use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{info, warn};

/// One structured `metrics` event per request, tagged with the request id.
/// Server errors are raised to warn so staging failures stand out.
pub async fn metrics_middleware(req: Request, next: Next) -> Response {
    let started = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    let request_id = req
        .headers()
        .get(&REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_owned();

    let response = next.run(req).await;

    let status = response.status().as_u16();
    let latency_ms = started.elapsed().as_millis() as u64;

    if response.status().is_server_error() {
        warn!(target: "metrics", %method, %path, %request_id, status, latency_ms, "request_failed");
    } else {
        info!(target: "metrics", %method, %path, %request_id, status, latency_ms, "request_completed");
    }

    response
}
