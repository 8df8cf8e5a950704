use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::info;

use crate::{handlers::upload_handler, state::app_state::AppState};

pub async fn handle_create_upload(state: State<Arc<AppState>>) -> Response {
    info!("Handling upload session creation");
    upload_handler::handle_create_upload(state)
        .await
        .into_response()
}

pub async fn handle_upload_status(
    state: State<Arc<AppState>>,
    query: Query<Vec<(String, String)>>,
) -> Response {
    info!("Handling upload status query");
    upload_handler::handle_upload_status(state, query)
        .await
        .into_response()
}
