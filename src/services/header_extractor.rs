//! 头部字段提取
//!
//! 每个字段对应一组按顺序尝试的规则，取第一个非空结果；全部失败时为空字符串。

use scraper::{Html, Selector};
use url::Url;

use crate::models::HeaderData;
use crate::services::subject_links::resolve_href;

/// 单条提取规则
pub type ExtractRule = fn(&Html) -> Option<String>;

pub const NAME_RULES: &[ExtractRule] = &[guide_name, details_name, title_prefix];

pub const CARGO_RULES: &[ExtractRule] = &[guide_cargo, details_orgao];

pub const EDITAL_RULES: &[ExtractRule] = &[guide_edital];

pub const ICON_RULES: &[ExtractRule] = &[guide_logo, details_logo, alt_logo];

pub const BANCA_RULES: &[ExtractRule] = &[labeled_banca];

/// 按顺序尝试规则，返回第一个非空结果
pub fn resolve_field(doc: &Html, rules: &[ExtractRule]) -> String {
    rules
        .iter()
        .find_map(|rule| rule(doc).filter(|value| !value.is_empty()))
        .unwrap_or_default()
}

/// 从头部页面 HTML 提取所有字段，永不失败
///
/// 图标地址会按 `base_url` 解析为绝对地址。
pub fn extract_header(html: &str, base_url: &str) -> HeaderData {
    let doc = Html::parse_document(html);

    let icon = resolve_field(&doc, ICON_RULES);
    let icon_url = if icon.is_empty() {
        icon
    } else {
        resolve_href(Url::parse(base_url).ok().as_ref(), &icon)
    };

    HeaderData {
        name: resolve_field(&doc, NAME_RULES),
        cargo: resolve_field(&doc, CARGO_RULES),
        edital: resolve_field(&doc, EDITAL_RULES),
        icon_url,
        banca: resolve_field(&doc, BANCA_RULES),
    }
}

fn first_text(doc: &Html, css: &str) -> Option<String> {
    let selector = Selector::parse(css).ok()?;
    doc.select(&selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
}

fn first_attr(doc: &Html, css: &str, attr: &str) -> Option<String> {
    let selector = Selector::parse(css).ok()?;
    doc.select(&selector)
        .next()
        .and_then(|el| el.value().attr(attr))
        .map(|value| value.trim().to_string())
}

fn guide_name(doc: &Html) -> Option<String> {
    first_text(doc, "div.guias-cabecalho-concurso-nome")
}

fn details_name(doc: &Html) -> Option<String> {
    first_text(doc, "div.detalhes-cabecalho-informacoes-texto h1 span:not([class])")
}

fn guide_cargo(doc: &Html) -> Option<String> {
    first_text(doc, "div.guias-cabecalho-concurso-cargo")
}

fn details_orgao(doc: &Html) -> Option<String> {
    first_text(doc, "div.detalhes-cabecalho-informacoes-orgao")
}

fn guide_edital(doc: &Html) -> Option<String> {
    first_text(doc, "div.guias-cabecalho-concurso-edital")
}

fn guide_logo(doc: &Html) -> Option<String> {
    first_attr(doc, "div.guias-cabecalho-logo img", "src")
}

fn details_logo(doc: &Html) -> Option<String> {
    first_attr(doc, "div.detalhes-cabecalho-logotipo img", "src")
}

fn alt_logo(doc: &Html) -> Option<String> {
    first_attr(doc, r#"img[alt*="logotipo"]"#, "src")
}

/// 文档标题中第一个 `-` 之前的部分
fn title_prefix(doc: &Html) -> Option<String> {
    let title = first_text(doc, "title")?;
    let title = title.split_whitespace().collect::<Vec<_>>().join(" ");
    title.split('-').next().map(|part| part.trim().to_string())
}

/// `<span class="detalhes-campos">Banca</span><X>Cebraspe (CESPE)</X>` → "Cebraspe"
fn labeled_banca(doc: &Html) -> Option<String> {
    let selector = Selector::parse("span.detalhes-campos").ok()?;
    let label = doc
        .select(&selector)
        .find(|el| el.text().collect::<String>().trim() == "Banca")?;
    let value = label.next_siblings().find_map(scraper::ElementRef::wrap)?;
    let text = value.text().collect::<String>();
    text.split('(').next().map(|part| part.trim().to_string())
}
