use crate::models::AccessLogMeta;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::net::SocketAddr;

const HEADER_X_FORWARDED_FOR: &str = "x-forwarded-for";
const HEADER_X_REAL_IP: &str = "x-real-ip";

/// 从请求头中提取客户端真实 IP
///
/// 尝试顺序：
/// 1. `X-Forwarded-For`: 标准代理头，取第一个 IP
/// 2. `X-Real-IP`: Nginx 等常用头
/// 3. `SocketAddr`: TCP 连接的远端地址
pub fn get_client_ip(headers: &HeaderMap, addr: Option<SocketAddr>) -> String {
    if let Some(xff) = headers.get(HEADER_X_FORWARDED_FOR) {
        if let Ok(xff_str) = xff.to_str() {
            let raw_ip = xff_str.split(',').next().unwrap_or(xff_str).trim();
            return clean_ip(raw_ip);
        }
    }

    if let Some(xri) = headers.get(HEADER_X_REAL_IP) {
        if let Ok(xri_str) = xri.to_str() {
            return clean_ip(xri_str.trim());
        }
    }

    if let Some(addr) = addr {
        return clean_ip(&addr.ip().to_string());
    }

    "unknown".to_string()
}

// IPv4-mapped IPv6
fn clean_ip(ip: &str) -> String {
    ip.strip_prefix("::ffff:").unwrap_or(ip).to_string()
}

/// 自定义 JSON 提取器：反序列化失败时返回 `{"error": "Invalid request body"}` (400)，
/// 原始请求体写入访问日志
pub struct CustomJson<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for CustomJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = match Bytes::from_request(req, state).await {
            Ok(b) => b,
            Err(err) => return Err(err.into_response()),
        };

        match parse_object::<T>(&bytes) {
            Ok(data) => Ok(CustomJson(data)),
            Err(e) => {
                let mut response = (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "Invalid request body" })),
                )
                    .into_response();

                response.extensions_mut().insert(AccessLogMeta {
                    error: Some(format!("JSON Error: {}", e)),
                    request_body: Some(String::from_utf8_lossy(&bytes).to_string()),
                });

                Err(response)
            }
        }
    }
}

/// 请求体必须是 JSON 对象；derive 出的结构体也接受按位置填充的数组，这里先拦掉
fn parse_object<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, String> {
    // simd-json 需要可变 buffer
    let mut buf = bytes.to_vec();
    let value = simd_json::from_slice::<Value>(&mut buf).map_err(|e| e.to_string())?;
    if !value.is_object() {
        return Err("expected a JSON object".to_string());
    }
    serde_json::from_value::<T>(value).map_err(|e| e.to_string())
}
