use axum::{body::Body, extract::Request, middleware::Next, response::Response};
use std::time::Instant;

use crate::metrics::prometheus::{ACTIVE_REQUESTS, ERRORS_TOTAL, LATENCY, REQUESTS_TOTAL};

pub async fn metrics_middleware(req: Request<Body>, next: Next) -> Response {
    let start = Instant::now();

    ACTIVE_REQUESTS.inc();

    let response = next.run(req).await;

    ACTIVE_REQUESTS.dec();
    REQUESTS_TOTAL.inc();
    if response.status().is_client_error() || response.status().is_server_error() {
        ERRORS_TOTAL.inc();
    }

    LATENCY.observe(start.elapsed().as_secs_f64());

    response
}
