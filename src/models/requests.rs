use serde::{Deserialize, Serialize};
use validator::Validate;

/// `POST /api/analyze` 的请求体
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AnalyzeRequest {
    #[validate(required, length(min = 1))]
    #[serde(default)]
    pub url: Option<String>,
}

/// `GET /api/upload/mux` 的查询参数
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadStatusQuery {
    pub upload_id: Option<String>,
}

impl UploadStatusQuery {
    /// 重复的 `uploadId` 取第一个值，其余参数忽略
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let upload_id = pairs
            .into_iter()
            .find(|(key, _)| key == "uploadId")
            .map(|(_, value)| value);
        Self { upload_id }
    }

    /// 空字符串与缺失等价
    pub fn upload_id(&self) -> Option<&str> {
        self.upload_id.as_deref().filter(|id| !id.is_empty())
    }
}
