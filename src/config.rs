use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// 默认配置文件名
pub const DEFAULT_CONFIG_FILE: &str = "guide_import.toml";

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 是否以无头模式启动浏览器
    pub headless: bool,
    /// 浏览器可执行文件路径（为空时由 chromiumoxide 自动查找）
    pub chrome_executable: Option<String>,
    /// 视口宽度
    pub viewport_width: u32,
    /// 视口高度
    pub viewport_height: u32,
    /// 整页加载超时（秒）
    pub page_load_timeout_secs: u64,
    /// 等待结构标记出现的超时（秒）
    pub selector_timeout_secs: u64,
    /// 轮询结构标记的间隔（毫秒）
    pub selector_poll_interval_ms: u64,
    /// 下载图标的超时（秒）
    pub icon_fetch_timeout_secs: u64,
    /// 数据根目录，每个用户在其下有独立子目录
    pub data_dir: PathBuf,
    /// 当前用户标识
    pub owner_id: Option<String>,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            headless: true,
            chrome_executable: None,
            viewport_width: 1280,
            viewport_height: 800,
            page_load_timeout_secs: 60,
            selector_timeout_secs: 30,
            selector_poll_interval_ms: 250,
            icon_fetch_timeout_secs: 15,
            data_dir: PathBuf::from("data"),
            owner_id: None,
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 读取配置文件（若存在）并应用环境变量覆盖
    pub fn load() -> AppResult<Self> {
        let path = std::env::var("GUIDE_IMPORT_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE));

        let base = if path.exists() {
            Self::from_toml_file(&path)?
        } else {
            Self::default()
        };
        Ok(base.with_env_overrides())
    }

    /// 从 TOML 文件加载，未出现的字段使用默认值
    pub fn from_toml_file(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AppError::validation(format!("无法读取配置文件 {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
            .map_err(|e| AppError::validation(format!("无法解析配置文件 {}: {}", path.display(), e)))
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    fn with_env_overrides(self) -> Self {
        Self {
            headless: env_parse("HEADLESS").unwrap_or(self.headless),
            chrome_executable: std::env::var("CHROME_EXECUTABLE").ok().or(self.chrome_executable),
            viewport_width: env_parse("VIEWPORT_WIDTH").unwrap_or(self.viewport_width),
            viewport_height: env_parse("VIEWPORT_HEIGHT").unwrap_or(self.viewport_height),
            page_load_timeout_secs: env_parse("PAGE_LOAD_TIMEOUT_SECS").unwrap_or(self.page_load_timeout_secs),
            selector_timeout_secs: env_parse("SELECTOR_TIMEOUT_SECS").unwrap_or(self.selector_timeout_secs),
            selector_poll_interval_ms: env_parse("SELECTOR_POLL_INTERVAL_MS").unwrap_or(self.selector_poll_interval_ms),
            icon_fetch_timeout_secs: env_parse("ICON_FETCH_TIMEOUT_SECS").unwrap_or(self.icon_fetch_timeout_secs),
            data_dir: std::env::var("DATA_DIR").map(PathBuf::from).unwrap_or(self.data_dir),
            owner_id: std::env::var("GUIDE_OWNER_ID").ok().or(self.owner_id),
            verbose_logging: env_parse("VERBOSE_LOGGING").unwrap_or(self.verbose_logging),
        }
    }

    pub fn page_load_timeout(&self) -> Duration {
        Duration::from_secs(self.page_load_timeout_secs)
    }

    pub fn selector_timeout(&self) -> Duration {
        Duration::from_secs(self.selector_timeout_secs)
    }

    pub fn selector_poll_interval(&self) -> Duration {
        Duration::from_millis(self.selector_poll_interval_ms)
    }

    pub fn icon_fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.icon_fetch_timeout_secs)
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}
