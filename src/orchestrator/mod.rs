//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `guide_crawler` - 指南抓取器
//! - 头部页面 → 科目链接 → 逐个科目页面 → 主题树 → 聚合
//! - 严格串行，第一个失败立即中止，不产生部分结果
//!
//! ### `import_service` - 导入服务
//! - 身份 → 参数校验 → 启动会话 → 抓取 → 保存 → 关闭会话
//! - 唯一持有浏览器会话的模块，所有退出路径都会关闭会话
//!
//! ## 层次关系
//!
//! ```text
//! import_service (请求 → 响应)
//!     ↓
//! guide_crawler (一次完整抓取)
//!     ↓
//! workflow::Navigator (页面导航 + 快照)
//!     ↓
//! services (提取 / 聚合 / 图标 / 存储)
//!     ↓
//! infrastructure (PageDriver)
//! ```

pub mod guide_crawler;
pub mod import_service;

pub use guide_crawler::{GuideCrawler, HEADER_MARKERS};
pub use import_service::ImportService;
