//! 文件名 slug

use std::sync::LazyLock;

use regex::Regex;

static RE_WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("invalid regex: whitespace"));

static RE_NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_\-]+").expect("invalid regex: non word"));

static RE_HYPHENS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-{2,}").expect("invalid regex: hyphens"));

/// 将计划名称转换为安全的文件名
///
/// 小写、空白折叠为单个 `-`、去掉 ASCII 字母数字、下划线和 `-` 以外的字符
/// （重音字母也会被去掉）、
/// 连续的 `-` 折叠为一个。结果是幂等的。
pub fn slugify(text: &str) -> String {
    let lower = text.trim().to_lowercase();
    let hyphenated = RE_WHITESPACE.replace_all(&lower, "-");
    let stripped = RE_NON_WORD.replace_all(&hyphenated, "");
    RE_HYPHENS.replace_all(&stripped, "-").into_owned()
}
