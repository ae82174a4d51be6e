//! JS 执行器 - 基础设施层
//!
//! 持有唯一的 page 资源，暴露"执行 JS"以及导航/等待能力

use std::time::Duration;

use chromiumoxide::error::CdpError;
use chromiumoxide::Page;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use tokio::time::{sleep, timeout};
use tracing::debug;

use crate::error::{AppResult, NavigationError};
use crate::infrastructure::PageDriver;

/// JS 执行器
///
/// 职责：
/// - 持有唯一的 Page 资源
/// - 暴露 eval() 能力
/// - 不认识科目 / 主题
pub struct JsExecutor {
    page: Page,
    poll_interval: Duration,
}

impl JsExecutor {
    /// 创建新的 JS 执行器
    pub fn new(page: Page, poll_interval: Duration) -> Self {
        Self { page, poll_interval }
    }

    /// 执行 JS 代码并返回 JSON 结果
    pub async fn eval(&self, js_code: impl Into<String>) -> AppResult<JsonValue> {
        let result = self.page.evaluate(js_code.into()).await?;
        let json_value = result.into_value()?;
        Ok(json_value)
    }

    /// 执行 JS 代码并反序列化为指定类型
    pub async fn eval_as<T: DeserializeOwned>(&self, js_code: impl Into<String>) -> AppResult<T> {
        let json_value = self.eval(js_code).await?;
        let typed_value = serde_json::from_value(json_value)?;
        Ok(typed_value)
    }

    /// 选择器当前是否已出现在文档中
    async fn selector_present(&self, selector_list: &str) -> bool {
        let js_code = match serde_json::to_string(selector_list) {
            Ok(literal) => format!("document.querySelector({}) !== null", literal),
            Err(_) => return false,
        };
        // 页面仍在跳转时执行上下文可能已销毁，视为尚未出现
        self.eval_as::<bool>(js_code).await.unwrap_or(false)
    }
}

impl PageDriver for JsExecutor {
    async fn goto(&self, url: &str, load_timeout: Duration) -> Result<(), NavigationError> {
        debug!("导航到: {}", url);
        match timeout(load_timeout, self.page.goto(url)).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(CdpError::Timeout)) | Err(_) => Err(NavigationError::Timeout {
                url: url.to_string(),
                what: "页面加载".to_string(),
                timeout: load_timeout,
            }),
            Ok(Err(e)) => Err(NavigationError::Network {
                url: url.to_string(),
                message: e.to_string(),
            }),
        }
    }

    async fn wait_for_any(&self, selectors: &[&str], wait_timeout: Duration) -> Result<(), NavigationError> {
        let selector_list = selectors.join(", ");

        let poll = async {
            while !self.selector_present(&selector_list).await {
                sleep(self.poll_interval).await;
            }
        };

        let outcome = timeout(wait_timeout, poll).await;
        match outcome {
            Ok(()) => {
                debug!("结构标记已出现: {}", selector_list);
                Ok(())
            }
            Err(_) => Err(NavigationError::Timeout {
                url: self.current_url().await.unwrap_or_default(),
                what: selector_list,
                timeout: wait_timeout,
            }),
        }
    }

    async fn html(&self) -> AppResult<String> {
        self.eval_as::<String>("document.documentElement.outerHTML").await
    }

    async fn current_url(&self) -> Option<String> {
        self.page.url().await.ok().flatten()
    }
}
