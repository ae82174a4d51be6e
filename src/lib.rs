//! # Guide Import
//!
//! 把第三方网站公开渲染的考试学习指南导入为规范化的分层学习计划
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有稀缺资源（Page），只暴露导航 / 等待 / 快照能力
//! - `browser/` - 启动和关闭无头 Chromium
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 纯提取与聚合：题目数、主题树、科目链接、头部字段、权重
//! - 以及图标嵌入、用户身份、计划存储
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - `Navigator` 驱动单个页面，`CrawlStage` 记录抓取阶段
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/guide_crawler` - 头部页面 → 逐个科目页面 → 计划
//! - `orchestrator/import_service` - 请求 → 会话 → 抓取 → 保存 → 响应

pub mod browser;
pub mod config;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use browser::ChromeLauncher;
pub use config::Config;
pub use error::{AppError, AppResult, NavigationError};
pub use infrastructure::{PageDriver, PageSession, SessionLauncher};
pub use models::{ImportRequest, ImportResponse, PlanData, Subject, Topic};
pub use orchestrator::{GuideCrawler, ImportService};
pub use workflow::{CrawlStage, Navigator};
