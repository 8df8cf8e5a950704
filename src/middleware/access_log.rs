use axum::{body::Body, extract::ConnectInfo, http::Request, middleware::Next, response::Response};
use chrono::Local;
use std::net::SocketAddr;
use std::time::Instant;
use tracing::{error, info};

use crate::handlers::utils::get_client_ip;
use crate::models::AccessLogMeta;

/// 访问日志中间件
///
/// 格式模仿 Nginx Combined Log Format，4xx/5xx 时附带 handler 注入的内部错误原因。
pub async fn access_log_middleware(req: Request<Body>, next: Next) -> Response {
    let start = Instant::now();

    let method = req.method().clone();
    let uri = req.uri().clone();
    let version = req.version();

    let addr = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ci| ci.0);
    let client_ip = get_client_ip(req.headers(), addr);

    let user_agent = req
        .headers()
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();

    let response = next.run(req).await;

    let latency = start.elapsed();
    let status = response.status();

    let body_bytes = response
        .headers()
        .get("content-length")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");

    let meta = response
        .extensions()
        .get::<AccessLogMeta>()
        .cloned()
        .unwrap_or_default();

    // IP - - [Time] "Method URI Version" Status Bytes "Referer" "UserAgent" Latency "Error"
    let time_str = Local::now().format("%d/%b/%Y:%H:%M:%S %z");
    let mut log_line = format!(
        "{} - - [{}] \"{} {} {:?}\" {} {} \"-\" \"{}\" {:.3}s {:?}",
        client_ip,
        time_str,
        method,
        uri,
        version,
        status.as_u16(),
        body_bytes,
        user_agent,
        latency.as_secs_f64(),
        meta.error.as_deref().unwrap_or("-"),
    );

    if status.is_server_error() || status.is_client_error() {
        match meta.request_body {
            Some(body) => log_line.push_str(&format!(" {:?}", body)),
            None => log_line.push_str(" \"-\""),
        }
        error!(target: "access_log", "{}", log_line);
    } else {
        info!(target: "access_log", "{}", log_line);
    }

    response
}
