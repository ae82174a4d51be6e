//! 会话导航
//!
//! 驱动同一个页面依次访问头部页面和各科目页面，等待已知的结构标记出现后
//! 取一次 HTML 快照，之后的提取都在快照上进行。

use std::time::Duration;

use tracing::debug;

use crate::config::Config;
use crate::error::{AppResult, NavigationError};
use crate::infrastructure::PageDriver;
use crate::models::HeaderData;
use crate::services::header_extractor;

/// 页面快照
#[derive(Debug, Clone)]
pub struct PageSnapshot {
    /// 实际页面地址，用于解析相对链接
    pub url: String,
    pub html: String,
}

impl PageSnapshot {
    /// 提取头部字段（软失败，缺失字段为空字符串）
    pub fn extract_header(&self) -> HeaderData {
        header_extractor::extract_header(&self.html, &self.url)
    }
}

/// 会话导航器
pub struct Navigator<'a, D: PageDriver> {
    driver: &'a D,
    page_load_timeout: Duration,
}

impl<'a, D: PageDriver> Navigator<'a, D> {
    pub fn new(driver: &'a D, config: &Config) -> Self {
        Self {
            driver,
            page_load_timeout: config.page_load_timeout(),
        }
    }

    /// 导航到 `url` 并等待任一结构标记出现
    pub async fn navigate_and_wait_for(
        &self,
        url: &str,
        markers: &[&str],
        marker_timeout: Duration,
    ) -> Result<(), NavigationError> {
        self.driver.goto(url, self.page_load_timeout).await?;
        self.driver.wait_for_any(markers, marker_timeout).await
    }

    /// 导航并返回快照
    pub async fn load(&self, url: &str, markers: &[&str], marker_timeout: Duration) -> AppResult<PageSnapshot> {
        self.navigate_and_wait_for(url, markers, marker_timeout).await?;
        let html = self.driver.html().await?;
        let actual_url = self
            .driver
            .current_url()
            .await
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| url.to_string());
        debug!("页面快照: {} ({} 字节)", actual_url, html.len());
        Ok(PageSnapshot { url: actual_url, html })
    }
}
