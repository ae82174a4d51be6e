//! 抓取阶段

use std::fmt::Display;

/// 一次导入所处的阶段
///
/// `Init → HeaderLoaded → SubjectsLinked → (SubjectLoaded → SubjectExtracted)* → Assembled → Persisted`，
/// 任何一步失败都进入 `Failed`。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlStage {
    Init,
    HeaderLoaded,
    SubjectsLinked,
    SubjectLoaded { index: usize },
    SubjectExtracted { index: usize },
    Assembled,
    Persisted,
    Failed,
}

impl Display for CrawlStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CrawlStage::Init => write!(f, "初始化"),
            CrawlStage::HeaderLoaded => write!(f, "头部页面已加载"),
            CrawlStage::SubjectsLinked => write!(f, "科目链接已收集"),
            CrawlStage::SubjectLoaded { index } => write!(f, "科目 #{} 页面已加载", index + 1),
            CrawlStage::SubjectExtracted { index } => write!(f, "科目 #{} 已提取", index + 1),
            CrawlStage::Assembled => write!(f, "计划已组装"),
            CrawlStage::Persisted => write!(f, "计划已保存"),
            CrawlStage::Failed => write!(f, "失败"),
        }
    }
}
