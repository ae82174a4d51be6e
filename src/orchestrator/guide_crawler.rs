//! 指南抓取器 - 编排层
//!
//! 本模块负责一次完整的抓取：先访问头部页面，再按收集顺序逐个访问科目页面。
//! 同一个页面被依次复用，任何一步失败都会中止整个抓取。

use tracing::{debug, error, info};

use crate::config::Config;
use crate::error::AppResult;
use crate::infrastructure::PageDriver;
use crate::models::{PlanData, Subject};
use crate::services::topic_tree::{self, OUTLINE_ROOT_SELECTOR};
use crate::services::{subject_links, IconEmbedder};
use crate::utils::logging::truncate_text;
use crate::workflow::{CrawlStage, Navigator};

/// 头部页面的结构标记，任意一个出现即可
pub const HEADER_MARKERS: [&str; 3] = [
    "div.guias-cabecalho",
    "div.cadernos-agrupamento",
    "div.detalhes-cabecalho",
];

/// 指南抓取器
pub struct GuideCrawler<'a, D: PageDriver, I: IconEmbedder> {
    driver: &'a D,
    icons: &'a I,
    config: &'a Config,
    stage: CrawlStage,
}

impl<'a, D: PageDriver, I: IconEmbedder> GuideCrawler<'a, D, I> {
    pub fn new(driver: &'a D, icons: &'a I, config: &'a Config) -> Self {
        Self {
            driver,
            icons,
            config,
            stage: CrawlStage::Init,
        }
    }

    pub fn stage(&self) -> CrawlStage {
        self.stage
    }

    pub(crate) fn advance(&mut self, stage: CrawlStage) {
        debug!("阶段: {} → {}", self.stage, stage);
        self.stage = stage;
    }

    /// 抓取指南并组装计划
    ///
    /// 失败时进入 `Failed` 阶段并原样返回错误。
    pub async fn crawl(&mut self, guide_url: &str) -> AppResult<PlanData> {
        match self.run(guide_url).await {
            Ok(plan) => Ok(plan),
            Err(e) => {
                error!("❌ 抓取在阶段「{}」失败: {}", self.stage, e);
                self.advance(CrawlStage::Failed);
                Err(e)
            }
        }
    }

    async fn run(&mut self, guide_url: &str) -> AppResult<PlanData> {
        let navigator = Navigator::new(self.driver, self.config);
        let marker_timeout = self.config.selector_timeout();

        // ========== 头部页面 ==========
        info!("📄 正在加载头部页面: {}", guide_url);
        let header_page = navigator.load(guide_url, &HEADER_MARKERS, marker_timeout).await?;
        let header = header_page.extract_header();
        self.advance(CrawlStage::HeaderLoaded);
        info!(
            "✓ 头部信息: 名称「{}」 职位「{}」 公告「{}」 机构「{}」",
            header.name, header.cargo, header.edital, header.banca
        );

        let icon_url = if header.icon_url.is_empty() {
            None
        } else {
            debug!("图标地址: {}", truncate_text(&header.icon_url, 80));
            self.icons.embed(&header.icon_url).await
        };

        // ========== 科目链接 ==========
        let links = subject_links::collect_subject_links(&header_page.html, &header_page.url);
        self.advance(CrawlStage::SubjectsLinked);
        info!("✓ 找到 {} 个科目", links.len());

        // ========== 逐个科目 ==========
        let total = links.len();
        let mut subjects = Vec::with_capacity(total);
        for (index, (name, url)) in links.iter().enumerate() {
            info!("\n[科目 {}/{}] {}", index + 1, total, "─".repeat(30));
            info!("[科目 {}/{}] 正在抓取: {}", index + 1, total, name);

            let page = navigator.load(url, &[OUTLINE_ROOT_SELECTOR], marker_timeout).await?;
            self.advance(CrawlStage::SubjectLoaded { index });

            let topics = topic_tree::extract_topics(&page.html)?;
            let subject = Subject::new(name, topics, index);
            self.advance(CrawlStage::SubjectExtracted { index });
            info!(
                "[科目 {}/{}] ✓ {} 个根主题，共 {} 个主题",
                index + 1,
                total,
                subject.topics.len(),
                subject.total_topics_count
            );
            subjects.push(subject);
        }

        let plan = PlanData::assemble(header, icon_url, subjects);
        self.advance(CrawlStage::Assembled);
        Ok(plan)
    }
}
