use axum::{extract::State, Json};
use serde_json::Value;
use std::sync::Arc;
use tracing::error;
use validator::Validate;

use crate::{
    app_error::AppError, handlers::utils::CustomJson, models::requests::AnalyzeRequest,
    state::app_state::AppState,
};

pub const MISSING_URL: &str = "Missing URL";
pub const ANALYZE_FAILED: &str = "Failed to analyze audio";

/// 校验 `url` 后转发给音频分析服务，成功时原样返回其 JSON
pub async fn handle_analyze(
    State(app_state): State<Arc<AppState>>,
    CustomJson(payload): CustomJson<AnalyzeRequest>,
) -> Result<Json<Value>, AppError> {
    let url = match (payload.validate(), payload.url.as_deref()) {
        (Ok(()), Some(url)) => url,
        _ => return Err(AppError::BadRequest(MISSING_URL.to_string())),
    };

    let data = app_state.analyzer.analyze(url).await.map_err(|e| {
        error!("Analysis Proxy Error: {}", e);
        e.conceal(ANALYZE_FAILED)
    })?;

    Ok(Json(data))
}
