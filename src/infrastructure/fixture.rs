//! 内存页面夹具
//!
//! 用预先保存的 HTML 代替真实浏览器，用于离线回放和测试

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use scraper::{Html, Selector};

use crate::error::{AppError, AppResult, NavigationError};
use crate::infrastructure::{PageDriver, PageSession, SessionLauncher};

/// 某个地址的模拟结果
#[derive(Debug, Clone)]
pub enum FixturePage {
    /// 正常返回的页面
    Html(String),
    /// 传输层失败
    Unreachable,
    /// 整页加载超时
    LoadTimeout,
}

/// 会话的使用情况记录
#[derive(Debug, Clone, Default)]
pub struct SessionProbe {
    launched: Arc<AtomicUsize>,
    closed: Arc<AtomicUsize>,
    visits: Arc<Mutex<Vec<String>>>,
}

impl SessionProbe {
    pub fn launched(&self) -> usize {
        self.launched.load(Ordering::SeqCst)
    }

    pub fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }

    /// 按顺序访问过的地址
    pub fn visits(&self) -> Vec<String> {
        self.visits.lock().map(|v| v.clone()).unwrap_or_default()
    }
}

/// 内存中的会话
pub struct FixtureSession {
    pages: HashMap<String, FixturePage>,
    current: Mutex<Option<(String, String)>>,
    probe: SessionProbe,
}

impl FixtureSession {
    pub fn new(pages: HashMap<String, FixturePage>) -> Self {
        Self::with_probe(pages, SessionProbe::default())
    }

    fn with_probe(pages: HashMap<String, FixturePage>, probe: SessionProbe) -> Self {
        Self {
            pages,
            current: Mutex::new(None),
            probe,
        }
    }

    pub fn probe(&self) -> &SessionProbe {
        &self.probe
    }

    fn current(&self) -> Option<(String, String)> {
        self.current.lock().ok().and_then(|c| c.clone())
    }
}

impl PageDriver for FixtureSession {
    async fn goto(&self, url: &str, timeout: Duration) -> Result<(), NavigationError> {
        if let Ok(mut visits) = self.probe.visits.lock() {
            visits.push(url.to_string());
        }

        match self.pages.get(url) {
            Some(FixturePage::Html(html)) => {
                if let Ok(mut current) = self.current.lock() {
                    *current = Some((url.to_string(), html.clone()));
                }
                Ok(())
            }
            Some(FixturePage::LoadTimeout) => Err(NavigationError::Timeout {
                url: url.to_string(),
                what: "页面加载".to_string(),
                timeout,
            }),
            Some(FixturePage::Unreachable) | None => Err(NavigationError::Network {
                url: url.to_string(),
                message: "net::ERR_NAME_NOT_RESOLVED".to_string(),
            }),
        }
    }

    async fn wait_for_any(&self, selectors: &[&str], timeout: Duration) -> Result<(), NavigationError> {
        let (url, html) = self.current().unwrap_or_default();
        let doc = Html::parse_document(&html);
        let found = selectors
            .iter()
            .filter_map(|css| Selector::parse(css).ok())
            .any(|sel| doc.select(&sel).next().is_some());

        if found {
            Ok(())
        } else {
            Err(NavigationError::Timeout {
                url,
                what: selectors.join(", "),
                timeout,
            })
        }
    }

    async fn html(&self) -> AppResult<String> {
        self.current()
            .map(|(_, html)| html)
            .ok_or_else(|| AppError::extraction("页面尚未加载"))
    }

    async fn current_url(&self) -> Option<String> {
        self.current().map(|(url, _)| url)
    }
}

impl PageSession for FixtureSession {
    async fn close(self) {
        self.probe.closed.fetch_add(1, Ordering::SeqCst);
    }
}

/// 每次启动都返回一个新的内存会话
#[derive(Debug, Clone, Default)]
pub struct FixtureLauncher {
    pages: HashMap<String, FixturePage>,
    probe: SessionProbe,
}

impl FixtureLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: impl Into<String>, html: impl Into<String>) -> Self {
        self.pages.insert(url.into(), FixturePage::Html(html.into()));
        self
    }

    pub fn failing(mut self, url: impl Into<String>, page: FixturePage) -> Self {
        self.pages.insert(url.into(), page);
        self
    }

    pub fn probe(&self) -> SessionProbe {
        self.probe.clone()
    }
}

impl SessionLauncher for FixtureLauncher {
    type Session = FixtureSession;

    async fn launch(&self) -> AppResult<FixtureSession> {
        self.probe.launched.fetch_add(1, Ordering::SeqCst);
        Ok(FixtureSession::with_probe(self.pages.clone(), self.probe.clone()))
    }
}
