//! 主题树构建
//!
//! 先把渲染后的嵌套列表解析为 [`OutlineItem`] 树，再转换为 [`Topic`] 树。
//! 源站点的列表结构是：
//!
//! ```html
//! <ul>
//!   <li><span>Cap. 1</span><span class="capitulo-questoes"><span>10 questões</span></span></li>
//!   <ul>
//!     <li><span>Art. 1</span>...</li>
//!   </ul>
//! </ul>
//! ```
//!
//! 即子列表是 `li` 的下一个兄弟元素，而不是 `li` 的子元素。

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use crate::error::{AppError, AppResult};
use crate::models::Topic;
use crate::services::count_parser;

/// 科目页面大纲的根列表
pub const OUTLINE_ROOT_SELECTOR: &str = "div.caderno-guia-arvore-indice ul";

static OUTLINE_ROOT: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(OUTLINE_ROOT_SELECTOR).expect("invalid selector: outline root"));

static COUNT_ANNOTATION: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("span.capitulo-questoes > span").expect("invalid selector: count annotation")
});

/// 列表项的中间表示
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutlineItem {
    /// 列表项自身的标签（已去掉首尾空白，可能为空）
    pub label: String,
    /// 题目数注释原文
    pub count_text: Option<String>,
    /// 紧随其后的子列表
    pub children: Vec<OutlineItem>,
}

impl OutlineItem {
    pub fn new(label: impl Into<String>, count_text: Option<&str>) -> Self {
        Self {
            label: label.into(),
            count_text: count_text.map(str::to_string),
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<OutlineItem>) -> Self {
        self.children = children;
        self
    }
}

/// 从科目页面 HTML 中提取主题树
pub fn extract_topics(html: &str) -> AppResult<Vec<Topic>> {
    let outline = parse_outline(html)?;
    Ok(build_topics(&outline))
}

/// 解析科目页面中的大纲根列表
pub fn parse_outline(html: &str) -> AppResult<Vec<OutlineItem>> {
    let doc = Html::parse_document(html);
    let root = doc
        .select(&OUTLINE_ROOT)
        .next()
        .ok_or_else(|| AppError::extraction(format!("未找到主题大纲 ({})", OUTLINE_ROOT_SELECTOR)))?;
    Ok(parse_list(root))
}

fn parse_list(list: ElementRef) -> Vec<OutlineItem> {
    list.children()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == "li")
        .map(parse_item)
        .collect()
}

fn parse_item(li: ElementRef) -> OutlineItem {
    let label = li
        .children()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "span")
        .map(element_text)
        .unwrap_or_default();

    let count_text = li.select(&COUNT_ANNOTATION).next().map(element_text);

    let children = li
        .next_siblings()
        .find_map(ElementRef::wrap)
        .filter(|sibling| sibling.value().name() == "ul")
        .map(parse_list)
        .unwrap_or_default();

    OutlineItem {
        label,
        count_text,
        children,
    }
}

fn element_text(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// 把列表项序列转换为主题序列
///
/// 规则：
/// 1. 标签为空的项连同其子列表一起跳过
/// 2. 题目数来自注释，缺失为 0
/// 3. 子列表先递归处理
/// 4. 若本项题目数大于 0，且处理后的第一个子主题题目数与之相等，
///    则本项是源站点多包的一层，直接用子主题序列替换本项
pub fn build_topics(items: &[OutlineItem]) -> Vec<Topic> {
    let mut topics = Vec::with_capacity(items.len());

    for item in items {
        if item.label.is_empty() {
            continue;
        }

        let question_count = count_parser::parse_optional_count(item.count_text.as_deref());
        let child_topics = build_topics(&item.children);

        let is_redundant_wrapper = question_count > 0
            && child_topics
                .first()
                .is_some_and(|first| first.question_count == question_count);

        if is_redundant_wrapper {
            topics.extend(child_topics);
        } else {
            topics.push(Topic::new(item.label.clone(), question_count, child_topics));
        }
    }

    topics
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::aggregator::compute_total;

    fn item(label: &str, count: u32) -> OutlineItem {
        OutlineItem::new(label, Some(&format!("{} questões", count)))
    }

    #[test]
    fn wrapper_with_matching_only_child_is_elided() {
        let items = vec![item("Cap. 1", 5).with_children(vec![item("Art. 1", 5)])];

        assert_eq!(build_topics(&items), vec![Topic::leaf("Art. 1", 5)]);
    }

    #[test]
    fn differing_counts_keep_the_grouping_topic() {
        let items = vec![item("Cap. 1", 5).with_children(vec![item("Art. 1", 3)])];

        let topics = build_topics(&items);
        assert_eq!(topics, vec![Topic::new("Cap. 1", 5, vec![Topic::leaf("Art. 1", 3)])]);
        assert!(topics[0].is_grouping_topic);
    }

    #[test]
    fn zero_count_is_never_promoted() {
        let items = vec![OutlineItem::new("Cap. 1", None)
            .with_children(vec![OutlineItem::new("Art. 1", Some("0 questões"))])];

        let topics = build_topics(&items);
        assert_eq!(topics.len(), 1);
        assert_eq!(topics[0].topic_text, "Cap. 1");
        assert_eq!(topics[0].sub_topics, vec![Topic::leaf("Art. 1", 0)]);
    }

    #[test]
    fn promoted_children_are_spliced_in_place() {
        let items = vec![
            item("Antes", 1),
            item("Cap. 1", 4).with_children(vec![item("Art. 1", 4), item("Art. 2", 2)]),
            item("Depois", 1),
        ];

        let texts: Vec<_> = build_topics(&items)
            .into_iter()
            .map(|t| t.topic_text)
            .collect();
        assert_eq!(texts, ["Antes", "Art. 1", "Art. 2", "Depois"]);
    }

    #[test]
    fn empty_label_drops_item_and_its_children() {
        let items = vec![
            OutlineItem::new("", Some("3 questões")).with_children(vec![item("Órfão", 3)]),
            item("Art. 5", 1),
        ];

        let topics = build_topics(&items);
        assert_eq!(topics, vec![Topic::leaf("Art. 5", 1)]);
        assert_eq!(compute_total(&topics), 1);
    }

    #[test]
    fn cascading_wrappers_resolve_bottom_up() {
        let items = vec![item("Cap. 1", 10).with_children(vec![
            item("Art. 1", 10).with_children(vec![item("§ 1", 5), item("§ 2", 5)]),
        ])];

        let topics = build_topics(&items);
        assert_eq!(
            topics,
            vec![Topic::new(
                "Art. 1",
                10,
                vec![Topic::leaf("§ 1", 5), Topic::leaf("§ 2", 5)]
            )]
        );
        assert_eq!(compute_total(&topics), 3);
    }

    #[test]
    fn promotion_compares_against_first_processed_child() {
        // 第一个子项标签为空被跳过，比较对象变成 "Art. 2"
        let items = vec![item("Cap. 1", 2).with_children(vec![
            OutlineItem::new("", Some("7 questões")),
            item("Art. 2", 2),
        ])];

        assert_eq!(build_topics(&items), vec![Topic::leaf("Art. 2", 2)]);
    }

    #[test]
    fn parses_sibling_nested_lists_from_markup() {
        let html = r#"
            <html><body>
            <div class="caderno-guia-arvore-indice">
              <ul>
                <li><span>Cap. 1</span><span class="capitulo-questoes"><span>10 questões</span></span></li>
                <ul>
                  <li><span>Art. 1</span><span class="capitulo-questoes"><span>uma questão</span></span></li>
                </ul>
                <li><span>  Cap. 2  </span></li>
                <li><span></span></li>
              </ul>
            </div>
            </body></html>
        "#;

        let outline = parse_outline(html).unwrap();
        assert_eq!(outline.len(), 3);
        assert_eq!(outline[0].label, "Cap. 1");
        assert_eq!(outline[0].count_text.as_deref(), Some("10 questões"));
        assert_eq!(outline[0].children, vec![OutlineItem::new("Art. 1", Some("uma questão"))]);
        assert_eq!(outline[1].label, "Cap. 2");
        assert_eq!(outline[1].count_text, None);
        assert!(outline[1].children.is_empty());
        assert_eq!(outline[2].label, "");

        let topics = extract_topics(html).unwrap();
        assert_eq!(topics.len(), 2);
        assert_eq!(topics[0].sub_topics, vec![Topic::leaf("Art. 1", 1)]);
    }

    #[test]
    fn missing_outline_root_is_an_extraction_error() {
        let err = extract_topics("<html><body><p>nada</p></body></html>").unwrap_err();
        assert!(matches!(err, AppError::Extraction(_)));
    }
}
