//! 浏览器会话
//!
//! 一次导入独占一个浏览器进程，`close` 释放进程和事件处理任务

use std::time::Duration;

use chromiumoxide::Browser;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::browser::headless;
use crate::config::Config;
use crate::error::{AppResult, NavigationError};
use crate::infrastructure::{JsExecutor, PageDriver, PageSession, SessionLauncher};

/// 持有浏览器进程的会话
pub struct ChromeSession {
    browser: Browser,
    executor: JsExecutor,
    handler_task: JoinHandle<()>,
}

impl PageDriver for ChromeSession {
    async fn goto(&self, url: &str, timeout: Duration) -> Result<(), NavigationError> {
        self.executor.goto(url, timeout).await
    }

    async fn wait_for_any(&self, selectors: &[&str], timeout: Duration) -> Result<(), NavigationError> {
        self.executor.wait_for_any(selectors, timeout).await
    }

    async fn html(&self) -> AppResult<String> {
        self.executor.html().await
    }

    async fn current_url(&self) -> Option<String> {
        self.executor.current_url().await
    }
}

impl PageSession for ChromeSession {
    async fn close(mut self) {
        debug!("正在关闭浏览器...");
        if let Err(e) = self.browser.close().await {
            warn!("⚠️ 关闭浏览器失败: {}", e);
        }
        if let Err(e) = self.browser.wait().await {
            warn!("⚠️ 等待浏览器进程退出失败: {}", e);
        }
        self.handler_task.abort();
        debug!("浏览器已关闭");
    }
}

/// 按配置启动无头 Chromium
pub struct ChromeLauncher {
    config: Config,
}

impl ChromeLauncher {
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

impl SessionLauncher for ChromeLauncher {
    type Session = ChromeSession;

    async fn launch(&self) -> AppResult<ChromeSession> {
        let (browser, page, handler_task) = headless::launch_headless_browser(&self.config).await?;
        Ok(ChromeSession {
            browser,
            executor: JsExecutor::new(page, self.config.selector_poll_interval()),
            handler_task,
        })
    }
}
