//! 题目数量解析
//!
//! 把 "uma questão" / "12 questões" 这类注释转换为整数，解析不了就是 0

use std::sync::LazyLock;

use regex::Regex;

/// 表示"一道题"的固定短语
pub const ONE_QUESTION_PHRASE: &str = "uma questão";

static RE_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("invalid regex: digits"));

/// 解析题目数量，永不失败
pub fn parse_count(text: &str) -> u32 {
    let normalized = text
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    if normalized.is_empty() {
        return 0;
    }
    if normalized == ONE_QUESTION_PHRASE {
        return 1;
    }

    RE_DIGITS
        .find(&normalized)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

/// 可选注释的便捷版本，缺失视为 0
pub fn parse_optional_count(text: Option<&str>) -> u32 {
    text.map(parse_count).unwrap_or(0)
}
