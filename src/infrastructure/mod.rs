//! 基础设施层
//!
//! 持有稀缺资源（浏览器页面），只向上暴露导航、等待和快照能力

pub mod fixture;
pub mod js_executor;

use std::time::Duration;

use crate::error::{AppResult, NavigationError};

pub use fixture::{FixtureLauncher, FixturePage, FixtureSession};
pub use js_executor::JsExecutor;

/// 单个浏览器页面的驱动能力
#[allow(async_fn_in_trait)]
pub trait PageDriver {
    /// 导航到 `url`，整页加载超过 `timeout` 视为超时
    async fn goto(&self, url: &str, timeout: Duration) -> Result<(), NavigationError>;

    /// 等待任意一个选择器在页面中出现
    async fn wait_for_any(&self, selectors: &[&str], timeout: Duration) -> Result<(), NavigationError>;

    /// 当前渲染后文档的 HTML 快照
    async fn html(&self) -> AppResult<String>;

    /// 当前页面地址（跳转后可能与请求地址不同）
    async fn current_url(&self) -> Option<String>;
}

/// 一次导入独占的浏览器会话
#[allow(async_fn_in_trait)]
pub trait PageSession: PageDriver {
    /// 释放会话，所有退出路径都必须调用
    async fn close(self);
}

/// 会话启动器
#[allow(async_fn_in_trait)]
pub trait SessionLauncher {
    type Session: PageSession;

    async fn launch(&self) -> AppResult<Self::Session>;
}
