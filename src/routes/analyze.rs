use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::info;

use crate::{
    handlers::{analyze_handler, utils::CustomJson},
    models::requests::AnalyzeRequest,
    state::app_state::AppState,
};

pub async fn handle_analyze(
    state: State<Arc<AppState>>,
    payload: CustomJson<AnalyzeRequest>,
) -> Response {
    info!("Handling audio analysis request");
    analyze_handler::handle_analyze(state, payload)
        .await
        .into_response()
}
