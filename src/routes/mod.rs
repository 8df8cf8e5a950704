use crate::state::app_state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

pub mod analyze;
pub mod health;
pub mod metrics;
pub mod upload;

pub fn create_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/metrics", get(metrics::metrics_endpoint))
        .route("/api/analyze", post(analyze::handle_analyze))
        .route(
            "/api/upload/mux",
            get(upload::handle_upload_status).post(upload::handle_create_upload),
        )
        .with_state(app_state)
}
