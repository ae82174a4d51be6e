//! 图标嵌入服务
//!
//! 把远程图片下载下来转换为 data URI，失败时直接省略

use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tracing::{debug, warn};

const DEFAULT_CONTENT_TYPE: &str = "image/png";

/// 图标嵌入能力
#[allow(async_fn_in_trait)]
pub trait IconEmbedder {
    /// 返回 `data:<type>;base64,<data>`，任何失败都返回 `None`
    async fn embed(&self, url: &str) -> Option<String>;
}

/// 基于 reqwest 的实现
pub struct HttpIconEmbedder {
    client: reqwest::Client,
}

impl HttpIconEmbedder {
    pub fn new(timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                warn!("构建 HTTP 客户端失败，使用默认客户端: {}", e);
                reqwest::Client::new()
            });
        Self { client }
    }
}

impl IconEmbedder for HttpIconEmbedder {
    async fn embed(&self, url: &str) -> Option<String> {
        if url.is_empty() {
            return None;
        }

        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("⚠️ 下载图标失败 {}: {}", url, e);
                return None;
            }
        };

        if !response.status().is_success() {
            warn!("⚠️ 下载图标失败 {}: 状态码 {}", url, response.status());
            return None;
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();

        match response.bytes().await {
            Ok(bytes) => {
                debug!("图标已下载: {} ({} 字节, {})", url, bytes.len(), content_type);
                Some(to_data_uri(&content_type, &bytes))
            }
            Err(e) => {
                warn!("⚠️ 读取图标内容失败 {}: {}", url, e);
                None
            }
        }
    }
}

/// 不下载图标，始终省略
pub struct NoIcon;

impl IconEmbedder for NoIcon {
    async fn embed(&self, _url: &str) -> Option<String> {
        None
    }
}

pub fn to_data_uri(content_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", content_type, STANDARD.encode(bytes))
}
