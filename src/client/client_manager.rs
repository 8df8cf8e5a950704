use crate::config::types::Config;
use reqwest::Client;
use std::time::Duration;

/// 每个上游依赖一个复用连接池的 HTTP 客户端，启动时构建，之后只读共享
pub struct ClientManager {
    analysis_client: Client,
    mux_client: Client,
}

impl ClientManager {
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let analysis_client = Client::builder()
            .timeout(Duration::from_secs(config.analysis.timeout_secs))
            .build()?;
        let mux_client = Client::builder()
            .timeout(Duration::from_secs(config.mux.timeout_secs))
            .build()?;
        Ok(ClientManager {
            analysis_client,
            mux_client,
        })
    }

    pub fn analysis_client(&self) -> Client {
        self.analysis_client.clone()
    }

    pub fn mux_client(&self) -> Client {
        self.mux_client.clone()
    }
}
