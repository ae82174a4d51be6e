use std::path::PathBuf;
use std::time::Duration;

/// 应用程序错误类型
///
/// 导入流程中的致命错误。计数解析、头部字段提取和图标嵌入都是软失败，
/// 不会出现在这里。
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 调用方未认证
    #[error("未认证: {0}")]
    Auth(String),
    /// 请求参数校验失败
    #[error("{0}")]
    Validation(String),
    /// 页面导航或结构标记等待失败
    #[error(transparent)]
    Navigation(#[from] NavigationError),
    /// 页面结构缺失或无法解析
    #[error("页面内容提取失败: {0}")]
    Extraction(String),
    /// 写入计划文件失败
    #[error("写入文件失败 ({}): {source}", .path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// 浏览器启动或 CDP 调用失败
    #[error("浏览器错误: {0}")]
    Browser(String),
}

/// 导航错误
#[derive(Debug, thiserror::Error)]
pub enum NavigationError {
    /// 页面加载或结构标记在限定时间内未出现
    #[error("等待超时 ({url}, {}s): {what}", .timeout.as_secs())]
    Timeout {
        url: String,
        what: String,
        timeout: Duration,
    },
    /// 传输层失败
    #[error("导航到 {url} 失败: {message}")]
    Network { url: String, message: String },
}

// ========== 从常见错误类型转换 ==========

impl From<chromiumoxide::error::CdpError> for AppError {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        AppError::Browser(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Extraction(format!("JSON 解析失败: {}", err))
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建校验错误
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    /// 创建页面提取错误
    pub fn extraction(msg: impl Into<String>) -> Self {
        AppError::Extraction(msg.into())
    }

    /// 创建文件写入错误
    pub fn persistence(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AppError::Persistence {
            path: path.into(),
            source,
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
