use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;
use tracing::{error, info};

use crate::{
    app_error::AppError,
    models::{
        mux::CreateUploadRequest,
        requests::UploadStatusQuery,
        responses::{UploadCreateResponse, UploadStatusResponse},
    },
    state::app_state::AppState,
};

pub const CREATE_FAILED: &str = "Error creating upload";
pub const MISSING_UPLOAD_ID: &str = "Missing uploadId";
pub const STATUS_FAILED: &str = "Failed to retrieve upload status";

/// 创建一个 Mux 直传会话，返回 `{id, url}` 供前端直接上传
pub async fn handle_create_upload(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<UploadCreateResponse>, AppError> {
    let request = CreateUploadRequest::public_mp4(app_state.upload_cors_origin.as_str());

    let upload = app_state
        .uploads
        .create_upload(&request)
        .await
        .map_err(|e| {
            error!("Error creating Mux upload: {}", e);
            e.conceal(CREATE_FAILED)
        })?;

    info!("Created upload session {}", upload.id);
    Ok(Json(UploadCreateResponse {
        id: upload.id,
        url: upload.url,
    }))
}

/// 查询上传状态；资源已创建时再取第一个 playback id
///
/// 每次调用都是对外部状态的一次即时读取，不做缓存
pub async fn handle_upload_status(
    State(app_state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<UploadStatusResponse>, AppError> {
    let query = UploadStatusQuery::from_pairs(pairs);
    let Some(upload_id) = query.upload_id() else {
        return Err(AppError::BadRequest(MISSING_UPLOAD_ID.to_string()));
    };

    let status = fetch_upload_status(&app_state, upload_id)
        .await
        .map_err(|e| {
            error!("Failed to retrieve upload {}: {}", upload_id, e);
            e.conceal(STATUS_FAILED)
        })?;

    Ok(Json(status))
}

async fn fetch_upload_status(
    app_state: &AppState,
    upload_id: &str,
) -> Result<UploadStatusResponse, AppError> {
    let upload = app_state.uploads.get_upload(upload_id).await?;

    // 空字符串同样视为资源尚未创建
    let playback_id = match upload.asset_id.as_deref().filter(|id| !id.is_empty()) {
        Some(asset_id) => {
            let asset = app_state.uploads.get_asset(asset_id).await?;
            asset.first_playback_id().map(str::to_string)
        }
        None => None,
    };

    Ok(UploadStatusResponse {
        status: upload.status,
        asset_id: upload.asset_id,
        playback_id,
    })
}
