use crate::models::AccessLogMeta;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;

/// 依赖失败且未指定对外文案时使用
const GENERIC_FAILURE: &str = "Internal server error";

#[derive(Debug)]
pub enum AppError {
    ReqwestError(reqwest::Error),
    UpstreamError(StatusCode, String), // upstream status, upstream body text
    InvalidResponse(String),
    BadRequest(String),
    ApiError(StatusCode, String),            // status_code, public message
    Concealed(&'static str, Box<AppError>), // public message, internal cause
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::ReqwestError(err) => write!(f, "External request failed: {}", err),
            AppError::UpstreamError(status, body) => {
                write!(f, "Upstream returned {}: {}", status, body)
            }
            AppError::InvalidResponse(msg) => write!(f, "Invalid upstream response: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::ApiError(status, message) => write!(f, "{}: {}", status, message),
            AppError::Concealed(public, cause) => write!(f, "{} ({})", public, cause),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::ReqwestError(err) => Some(err),
            AppError::Concealed(_, cause) => Some(cause.as_ref()),
            _ => None,
        }
    }
}

impl AppError {
    /// 对外只暴露 `public_message`，真实原因只写入访问日志
    pub fn conceal(self, public_message: &'static str) -> AppError {
        AppError::Concealed(public_message, Box::new(self))
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::ApiError(status, _) => *status,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let (error_message, log_detail) = match self {
            AppError::BadRequest(msg) | AppError::ApiError(_, msg) => (msg.clone(), msg),
            AppError::Concealed(public, cause) => (public.to_string(), cause.to_string()),
            // Dependency failures never leak details to the caller.
            dependency => return dependency.conceal(GENERIC_FAILURE).into_response(),
        };

        let mut response = (status, Json(json!({ "error": error_message }))).into_response();

        // Inject error details for access logging
        response.extensions_mut().insert(AccessLogMeta {
            error: Some(log_detail),
            request_body: None,
        });

        response
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::ReqwestError(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_bad_request_renders_message() {
        let response = AppError::BadRequest("Missing URL".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await, json!({ "error": "Missing URL" }));
    }

    #[tokio::test]
    async fn test_upstream_error_is_not_leaked() {
        let err = AppError::UpstreamError(StatusCode::BAD_GATEWAY, "secret stack".to_string());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let meta = response.extensions().get::<AccessLogMeta>().cloned().unwrap();
        assert!(meta.error.unwrap().contains("secret stack"));
        assert_eq!(
            body_json(response).await,
            json!({ "error": "Internal server error" })
        );
    }

    #[tokio::test]
    async fn test_conceal_uses_public_message() {
        let response = AppError::InvalidResponse("expected value at line 1".to_string())
            .conceal("Failed to analyze audio")
            .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let meta = response.extensions().get::<AccessLogMeta>().cloned().unwrap();
        assert!(meta.error.unwrap().contains("expected value at line 1"));
        assert_eq!(
            body_json(response).await,
            json!({ "error": "Failed to analyze audio" })
        );
    }
}
