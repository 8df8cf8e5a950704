pub mod mux;
pub mod requests;
pub mod responses;

/// Handler 注入到 Response extensions 中，供访问日志读取
#[derive(Clone, Debug, Default)]
pub struct AccessLogMeta {
    pub error: Option<String>,
    pub request_body: Option<String>,
}
