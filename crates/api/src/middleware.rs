use std::time::Instant;

use axum::{middleware::Next, response::Response};
use tracing::Instrument;

/// Wrap each request in a span and log its outcome.
pub async fn request_logging(
    req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    let span = tracing::info_span!("http_request", %method, %path);
    let started = Instant::now();

    let res = next.run(req).instrument(span.clone()).await;

    let status = res.status();
    let latency_ms = started.elapsed().as_millis() as u64;
    if status.is_server_error() {
        tracing::error!(parent: &span, status = status.as_u16(), latency_ms, "request failed");
    } else {
        tracing::info!(parent: &span, status = status.as_u16(), latency_ms, "request completed");
    }

    res
}
