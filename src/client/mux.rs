use crate::app_error::AppError;
use crate::metrics::prometheus::UPSTREAM_FAILURES;
use crate::models::mux::{Asset, CreateUploadRequest, DataEnvelope, Upload};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

/// 视频平台的上传/资源能力接口
#[async_trait]
pub trait UploadProvider: Send + Sync {
    async fn create_upload(&self, request: &CreateUploadRequest) -> Result<Upload, AppError>;

    async fn get_upload(&self, upload_id: &str) -> Result<Upload, AppError>;

    async fn get_asset(&self, asset_id: &str) -> Result<Asset, AppError>;
}

/// Mux Video REST API 客户端，使用 token id / secret 做 Basic 认证
pub struct MuxClient {
    client: Client,
    base_url: Url,
    token_id: String,
    token_secret: String,
}

impl MuxClient {
    pub fn new(
        client: Client,
        base_url: &str,
        token_id: &str,
        token_secret: &str,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(format!("Mux base URL `{}` cannot be a base", base_url).into());
        }
        Ok(Self {
            client,
            base_url,
            token_id: token_id.to_string(),
            token_secret: token_secret.to_string(),
        })
    }

    /// 拼接 `/video/v1/...`，每个 id 作为单独的 path segment 转义
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(["video", "v1"]).extend(segments);
        }
        url
    }

    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, AppError> {
        let result = self.send::<T>(request).await;
        if result.is_err() {
            UPSTREAM_FAILURES.with_label_values(&["mux"]).inc();
        }
        result
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, AppError> {
        let response = request
            .basic_auth(&self.token_id, Some(&self.token_secret))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::UpstreamError(status, body));
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice::<DataEnvelope<T>>(&bytes)
            .map(|envelope| envelope.data)
            .map_err(|e| AppError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl UploadProvider for MuxClient {
    async fn create_upload(&self, request: &CreateUploadRequest) -> Result<Upload, AppError> {
        let url = self.endpoint(&["uploads"]);
        debug!("Creating Mux direct upload via {}", url);
        self.execute(self.client.post(url).json(request)).await
    }

    async fn get_upload(&self, upload_id: &str) -> Result<Upload, AppError> {
        let url = self.endpoint(&["uploads", upload_id]);
        debug!("Retrieving Mux upload {}", upload_id);
        self.execute(self.client.get(url)).await
    }

    async fn get_asset(&self, asset_id: &str) -> Result<Asset, AppError> {
        let url = self.endpoint(&["assets", asset_id]);
        debug!("Retrieving Mux asset {}", asset_id);
        self.execute(self.client.get(url)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> MuxClient {
        MuxClient::new(Client::new(), base, "id", "secret").unwrap()
    }

    #[test]
    fn test_endpoint_paths() {
        let mux = client("https://api.mux.com");
        assert_eq!(
            mux.endpoint(&["uploads"]).as_str(),
            "https://api.mux.com/video/v1/uploads"
        );
        assert_eq!(
            mux.endpoint(&["assets", "as_1"]).as_str(),
            "https://api.mux.com/video/v1/assets/as_1"
        );
    }

    #[test]
    fn test_endpoint_escapes_ids() {
        let mux = client("http://127.0.0.1:9000/");
        assert_eq!(
            mux.endpoint(&["uploads", "a/b c"]).as_str(),
            "http://127.0.0.1:9000/video/v1/uploads/a%2Fb%20c"
        );
    }

    #[test]
    fn test_rejects_invalid_base() {
        assert!(MuxClient::new(Client::new(), "not a url", "id", "secret").is_err());
        assert!(MuxClient::new(Client::new(), "mailto:ops@example.com", "id", "secret").is_err());
    }
}
