//! 导入请求与响应

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::models::PlanData;

/// 导入成功时的提示
pub const SUCCESS_MESSAGE: &str = "指南导入成功！";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRequest {
    #[serde(default)]
    pub guide_url: Option<String>,
}

impl ImportRequest {
    pub fn new(guide_url: impl Into<String>) -> Self {
        Self {
            guide_url: Some(guide_url.into()),
        }
    }

    /// 返回去掉首尾空白后的 URL，缺失或为空时返回校验错误
    pub fn validated_url(&self) -> AppResult<&str> {
        self.guide_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or_else(|| AppError::validation("必须提供指南 URL。"))
    }
}

/// 导入结果
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ImportResponse {
    Success { message: String, plan: PlanData },
    Failure { error: String },
}

impl ImportResponse {
    pub fn success(plan: PlanData) -> Self {
        ImportResponse::Success {
            message: SUCCESS_MESSAGE.to_string(),
            plan,
        }
    }

    pub fn failure(err: &AppError) -> Self {
        ImportResponse::Failure {
            error: format!("导入指南失败: {}", err),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ImportResponse::Success { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_or_blank_url_is_a_validation_error() {
        let missing: ImportRequest = serde_json::from_str("{}").unwrap();
        assert!(matches!(missing.validated_url(), Err(AppError::Validation(_))));

        let blank = ImportRequest::new("   ");
        assert!(matches!(blank.validated_url(), Err(AppError::Validation(_))));
    }

    #[test]
    fn url_is_read_from_camel_case_field() {
        let req: ImportRequest =
            serde_json::from_str(r#"{"guideUrl": " https://example.com/guia "}"#).unwrap();
        assert_eq!(req.validated_url().unwrap(), "https://example.com/guia");
    }

    #[test]
    fn failure_carries_message_only() {
        let resp = ImportResponse::failure(&AppError::validation("必须提供指南 URL。"));
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["error"], "导入指南失败: 必须提供指南 URL。");
        assert!(json.get("plan").is_none());
        assert!(!resp.is_success());
    }
}
