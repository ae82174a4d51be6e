use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::services::aggregator;

/// 科目颜色，按创建顺序循环分配
pub const SUBJECT_COLORS: [&str; 6] = [
    "#ef4444", "#3b82f6", "#22c55e", "#eab308", "#8b5cf6", "#ec4899",
];

/// 科目 id → (主题文本 → 题目数)
pub type TopicWeights = BTreeMap<String, BTreeMap<String, u32>>;

/// 大纲中的一个主题节点
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub topic_text: String,
    #[serde(default)]
    pub sub_topics: Vec<Topic>,
    #[serde(default)]
    pub question_count: u32,
    #[serde(default)]
    pub is_grouping_topic: bool,
}

impl Topic {
    /// 创建主题，`is_grouping_topic` 由子主题是否为空决定
    pub fn new(topic_text: impl Into<String>, question_count: u32, sub_topics: Vec<Topic>) -> Self {
        Self {
            topic_text: topic_text.into(),
            is_grouping_topic: !sub_topics.is_empty(),
            sub_topics,
            question_count,
        }
    }

    pub fn leaf(topic_text: impl Into<String>, question_count: u32) -> Self {
        Self::new(topic_text, question_count, Vec::new())
    }
}

/// 科目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub id: String,
    pub subject: String,
    pub color: String,
    pub topics: Vec<Topic>,
    pub total_topics_count: u32,
}

impl Subject {
    /// 创建科目
    ///
    /// # 参数
    /// - `name`: 科目名称
    /// - `topics`: 根级主题
    /// - `creation_index`: 本次导入中的创建序号（从 0 开始），决定颜色
    pub fn new(name: impl Into<String>, topics: Vec<Topic>, creation_index: usize) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            subject: name.into(),
            color: SUBJECT_COLORS[creation_index % SUBJECT_COLORS.len()].to_string(),
            total_topics_count: aggregator::compute_total(&topics),
            topics,
        }
    }
}

/// 头部页面上提取出的字段，未找到的字段为空字符串
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderData {
    pub name: String,
    pub cargo: String,
    pub edital: String,
    pub icon_url: String,
    pub banca: String,
}

/// 一次导入生成的完整学习计划
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanData {
    pub name: String,
    pub cargo: String,
    pub edital: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banca: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    pub subjects: Vec<Subject>,
    #[serde(default)]
    pub banca_topic_weights: TopicWeights,
}

impl PlanData {
    /// 组装计划，空的考试机构视为缺失
    pub fn assemble(header: HeaderData, icon_url: Option<String>, subjects: Vec<Subject>) -> Self {
        let banca_topic_weights = aggregator::extract_weights(&subjects);
        Self {
            name: header.name,
            cargo: header.cargo,
            edital: header.edital,
            banca: Some(header.banca).filter(|b| !b.is_empty()),
            icon_url,
            subjects,
            banca_topic_weights,
        }
    }

    pub fn total_topics(&self) -> u32 {
        self.subjects.iter().map(|s| s.total_topics_count).sum()
    }
}
