use crate::app_error::AppError;
use crate::metrics::prometheus::UPSTREAM_FAILURES;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::info;

/// 音频分析服务的能力接口：`analyze(url) -> JSON`
#[async_trait]
pub trait AudioAnalyzer: Send + Sync {
    async fn analyze(&self, url: &str) -> Result<Value, AppError>;
}

/// 通过 HTTP 调用外部分析服务的 `POST /analyze`
pub struct HttpAudioAnalyzer {
    client: Client,
    base_url: String,
}

impl HttpAudioAnalyzer {
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn send(&self, url: &str) -> Result<Value, AppError> {
        let endpoint = format!("{}/analyze", self.base_url);

        // 单次请求，不重试；超时由 ClientManager 中的客户端配置决定
        let response = self
            .client
            .post(&endpoint)
            .header("Content-Type", "application/json")
            .json(&json!({ "url": url }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::UpstreamError(status, body));
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice::<Value>(&bytes).map_err(|e| AppError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl AudioAnalyzer for HttpAudioAnalyzer {
    async fn analyze(&self, url: &str) -> Result<Value, AppError> {
        info!("[Proxy] Analyzing audio from: {} via {}", url, self.base_url);
        let result = self.send(url).await;
        if result.is_err() {
            UPSTREAM_FAILURES.with_label_values(&["analysis"]).inc();
        }
        result
    }
}
