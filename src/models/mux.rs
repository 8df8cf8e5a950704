//! Mux Video REST API 的请求/响应结构。只声明本服务实际用到的字段。
use serde::{Deserialize, Serialize};

/// Mux 所有响应都包在 `{"data": ...}` 中
#[derive(Debug, Clone, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackPolicy {
    Public,
    Signed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAssetSettings {
    pub playback_policy: Vec<PlaybackPolicy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mp4_support: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateUploadRequest {
    pub new_asset_settings: NewAssetSettings,
    pub cors_origin: String,
}

impl CreateUploadRequest {
    /// 公开播放 + 标准 MP4 的直传会话
    pub fn public_mp4(cors_origin: impl Into<String>) -> Self {
        Self {
            new_asset_settings: NewAssetSettings {
                playback_policy: vec![PlaybackPolicy::Public],
                mp4_support: Some("standard".to_string()),
            },
            cors_origin: cors_origin.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Upload {
    pub id: String,
    #[serde(default)]
    pub url: String,
    pub status: String,
    #[serde(default)]
    pub asset_id: Option<String>,
    #[serde(default)]
    pub cors_origin: Option<String>,
    #[serde(default)]
    pub timeout: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackId {
    pub id: String,
    #[serde(default)]
    pub policy: Option<PlaybackPolicy>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub playback_ids: Option<Vec<PlaybackId>>,
}

impl Asset {
    pub fn first_playback_id(&self) -> Option<&str> {
        self.playback_ids
            .as_ref()
            .and_then(|ids| ids.first())
            .map(|p| p.id.as_str())
    }
}
