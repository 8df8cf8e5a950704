use crate::client::analysis::{AudioAnalyzer, HttpAudioAnalyzer};
use crate::client::client_manager::ClientManager;
use crate::client::mux::{MuxClient, UploadProvider};
use crate::config::types::Config;
use std::sync::Arc;

/// 进程级共享状态：外部依赖在启动时构建一次，请求间只读复用
pub struct AppState {
    pub analyzer: Arc<dyn AudioAnalyzer>,
    pub uploads: Arc<dyn UploadProvider>,
    pub upload_cors_origin: String,
}

impl AppState {
    pub fn new(
        analyzer: Arc<dyn AudioAnalyzer>,
        uploads: Arc<dyn UploadProvider>,
        upload_cors_origin: impl Into<String>,
    ) -> Self {
        AppState {
            analyzer,
            uploads,
            upload_cors_origin: upload_cors_origin.into(),
        }
    }

    /// 根据配置构建真实的 HTTP 依赖
    pub fn from_config(config: &Config) -> Result<Self, Box<dyn std::error::Error>> {
        let client_manager = ClientManager::new(config)?;

        let analyzer = HttpAudioAnalyzer::new(
            client_manager.analysis_client(),
            &config.analysis.base_url,
        );
        let uploads = MuxClient::new(
            client_manager.mux_client(),
            &config.mux.base_url,
            &config.mux.token_id,
            &config.mux.token_secret,
        )?;

        Ok(Self::new(
            Arc::new(analyzer),
            Arc::new(uploads),
            config.mux.cors_origin.clone(),
        ))
    }
}
