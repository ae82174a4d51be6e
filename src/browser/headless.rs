use chromiumoxide::handler::viewport::Viewport;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, error, info};

use crate::config::Config;
use crate::error::{AppError, AppResult};

/// 启动浏览器并创建一个空白页面
///
/// # 返回
/// 浏览器、页面以及后台事件处理任务（关闭浏览器后需要中止）
pub async fn launch_headless_browser(config: &Config) -> AppResult<(Browser, Page, JoinHandle<()>)> {
    info!("🚀 启动无头浏览器...");

    let browser_config = browser_config(config)?;

    // 启动浏览器
    let (browser, mut handler) = Browser::launch(browser_config).await.map_err(|e| {
        error!("启动无头浏览器失败: {}", e);
        AppError::Browser(format!("启动无头浏览器失败: {}", e))
    })?;
    debug!("无头浏览器启动成功");

    // 在后台处理浏览器事件
    let handler_task = tokio::spawn(async move {
        while let Some(h) = handler.next().await {
            if h.is_err() {
                break;
            }
        }
    });

    // 添加短暂延迟以等待浏览器状态同步
    sleep(tokio::time::Duration::from_millis(300)).await;

    let page = browser.new_page("about:blank").await.map_err(|e| {
        error!("创建页面失败: {}", e);
        AppError::Browser(format!("创建页面失败: {}", e))
    })?;

    info!("✅ 无头浏览器已就绪");
    Ok((browser, page, handler_task))
}

/// 按配置构建浏览器参数
///
/// CDP 请求超时取页面加载超时，导航不会被处理器提前中止。
pub(crate) fn browser_config(config: &Config) -> AppResult<BrowserConfig> {
    let mut builder = BrowserConfig::builder()
        .no_sandbox()
        .request_timeout(config.page_load_timeout())
        .window_size(config.viewport_width, config.viewport_height)
        .viewport(Viewport {
            width: config.viewport_width,
            height: config.viewport_height,
            ..Viewport::default()
        })
        .args(vec![
            "--disable-gpu",           // 无头模式下禁用 GPU
            "--disable-dev-shm-usage", // 防止共享内存不足
        ]);

    builder = if config.headless {
        builder.new_headless_mode()
    } else {
        builder.with_head()
    };

    if let Some(executable) = config.chrome_executable.as_deref() {
        debug!("浏览器可执行文件: {}", executable);
        builder = builder.chrome_executable(executable);
    }

    builder.build().map_err(|e| {
        error!("配置无头浏览器失败: {}", e);
        AppError::Browser(format!("配置无头浏览器失败: {}", e))
    })
}
