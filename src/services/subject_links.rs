//! 科目链接收集
//!
//! 头部页面有两种已知布局，先尝试布局 A，没有匹配元素时再尝试布局 B。

use scraper::{ElementRef, Html, Selector};
use tracing::debug;
use url::Url;

/// "尚未分类"的占位科目，不导入
pub const UNCLASSIFIED_SUBJECT: &str = "Inéditas";

/// 有序的 科目名 → URL 映射
///
/// 重复的名称覆盖旧的 URL，但保留第一次出现的位置。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubjectLinks {
    entries: Vec<(String, String)>,
}

impl SubjectLinks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, url: impl Into<String>) {
        let name = name.into();
        let url = url.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => {
                debug!("科目名称重复，覆盖链接: {} -> {}", name, url);
                *slot = url;
            }
            None => self.entries.push((name, url)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, url)| url.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(name, url)| (name.as_str(), url.as_str()))
    }
}

/// 一种页面布局：容器选择器 + 名称/链接位置
struct LinkLayout {
    name: &'static str,
    item: &'static str,
    name_el: &'static str,
    anchor: &'static str,
}

const LAYOUTS: [LinkLayout; 2] = [
    LinkLayout {
        name: "guia-materia",
        item: "div.guia-materia-item",
        name_el: "h4.guia-materia-item-nome a",
        anchor: "h4.guia-materia-item-nome a",
    },
    LinkLayout {
        name: "cadernos",
        item: "div.cadernos-item",
        name_el: "span.cadernos-colunas-destaque",
        anchor: "a.cadernos-ver-detalhes",
    },
];

/// 从头部页面 HTML 收集科目链接
///
/// # 参数
/// - `html`: 头部页面快照
/// - `base_url`: 页面地址，用于解析相对链接
pub fn collect_subject_links(html: &str, base_url: &str) -> SubjectLinks {
    let doc = Html::parse_document(html);
    let base = Url::parse(base_url).ok();

    for layout in &LAYOUTS {
        let (Ok(item_sel), Ok(name_sel), Ok(anchor_sel)) = (
            Selector::parse(layout.item),
            Selector::parse(layout.name_el),
            Selector::parse(layout.anchor),
        ) else {
            continue;
        };

        let items: Vec<ElementRef> = doc.select(&item_sel).collect();
        if items.is_empty() {
            continue;
        }
        debug!("科目链接布局: {} ({} 个元素)", layout.name, items.len());

        let mut links = SubjectLinks::new();
        for item in items {
            let name = item
                .select(&name_sel)
                .next()
                .map(|el| el.text().collect::<String>().trim().to_string());
            let href = item
                .select(&anchor_sel)
                .next()
                .and_then(|a| a.value().attr("href"))
                .map(str::trim)
                .filter(|href| !href.is_empty());

            let (Some(name), Some(href)) = (name, href) else {
                continue;
            };
            if name.is_empty() || name == UNCLASSIFIED_SUBJECT {
                continue;
            }
            links.insert(name, resolve_href(base.as_ref(), href));
        }
        return links;
    }

    SubjectLinks::new()
}

/// 相对链接按页面地址解析，无法解析时保留原文
pub(crate) fn resolve_href(base: Option<&Url>, href: &str) -> String {
    base.and_then(|b| b.join(href).ok())
        .map(|u| u.to_string())
        .unwrap_or_else(|| href.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://www.example.com/guias/trf-1";

    #[test]
    fn duplicate_name_overwrites_url_but_keeps_position() {
        let mut links = SubjectLinks::new();
        links.insert("Português", "/a");
        links.insert("Direito Civil", "/b");
        links.insert("Português", "/c");

        let entries: Vec<_> = links.iter().collect();
        assert_eq!(entries, [("Português", "/c"), ("Direito Civil", "/b")]);
        assert_eq!(links.len(), 2);
    }

    #[test]
    fn layout_a_collects_in_document_order() {
        let html = r#"
            <div class="guia-materia-item"><h4 class="guia-materia-item-nome"><a href="/cadernos/1">Português</a></h4></div>
            <div class="guia-materia-item"><h4 class="guia-materia-item-nome"><a href="/cadernos/2"> Inéditas </a></h4></div>
            <div class="guia-materia-item"><h4 class="guia-materia-item-nome"><a href="https://outro.com/3">Direito Administrativo</a></h4></div>
            <div class="guia-materia-item"><h4 class="guia-materia-item-nome"><a>Sem link</a></h4></div>
            <div class="guia-materia-item"><h4 class="guia-materia-item-nome"><a href="/cadernos/1b">Português</a></h4></div>
            <div class="cadernos-item"><span class="cadernos-colunas-destaque">Ignorado</span><a class="cadernos-ver-detalhes" href="/x">ver</a></div>
        "#;

        let links = collect_subject_links(html, BASE);
        let entries: Vec<_> = links.iter().collect();
        assert_eq!(
            entries,
            [
                ("Português", "https://www.example.com/cadernos/1b"),
                ("Direito Administrativo", "https://outro.com/3"),
            ]
        );
    }

    #[test]
    fn falls_back_to_layout_b() {
        let html = r#"
            <div class="cadernos-item">
              <span class="cadernos-colunas-destaque"> Raciocínio Lógico </span>
              <a class="cadernos-ver-detalhes" href="/cadernos/10">ver detalhes</a>
            </div>
            <div class="cadernos-item">
              <span class="cadernos-colunas-destaque">Sem âncora</span>
            </div>
        "#;

        let links = collect_subject_links(html, BASE);
        assert_eq!(links.len(), 1);
        assert_eq!(
            links.get("Raciocínio Lógico"),
            Some("https://www.example.com/cadernos/10")
        );
    }

    #[test]
    fn layout_a_present_but_empty_does_not_fall_back() {
        let html = r#"
            <div class="guia-materia-item"><h4 class="guia-materia-item-nome"><a href="/1">Inéditas</a></h4></div>
            <div class="cadernos-item"><span class="cadernos-colunas-destaque">B</span><a class="cadernos-ver-detalhes" href="/b">ver</a></div>
        "#;

        assert!(collect_subject_links(html, BASE).is_empty());
    }

    #[test]
    fn no_known_layout_yields_empty_mapping() {
        assert!(collect_subject_links("<p>vazio</p>", BASE).is_empty());
    }

    #[test]
    fn unparseable_base_keeps_raw_href() {
        assert_eq!(resolve_href(Url::parse("not a url").ok().as_ref(), "/x"), "/x");
    }
}
