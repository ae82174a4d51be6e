//! 导入服务 - 编排层
//!
//! ## 核心功能
//!
//! 1. **身份**：从身份提供者获取当前用户
//! 2. **校验**：请求必须包含指南 URL
//! 3. **资源管理**：每次导入启动一个浏览器会话，成功、失败都会关闭
//! 4. **抓取**：委托 `GuideCrawler`
//! 5. **保存**：整份计划一次性写入用户目录
//!
//! 错误只以消息的形式返回给调用方，不会返回部分计划。

use tracing::{error, info};

use crate::config::Config;
use crate::error::AppResult;
use crate::infrastructure::{PageSession, SessionLauncher};
use crate::models::{ImportRequest, ImportResponse, PlanData};
use crate::orchestrator::GuideCrawler;
use crate::services::{IconEmbedder, Identity, IdentityProvider, PlanStore};
use crate::utils::logging;
use crate::workflow::CrawlStage;

/// 导入服务
pub struct ImportService<L, I, P> {
    config: Config,
    launcher: L,
    icons: I,
    identity: P,
    store: PlanStore,
}

impl<L, I, P> ImportService<L, I, P>
where
    L: SessionLauncher,
    I: IconEmbedder,
    P: IdentityProvider,
{
    pub fn new(config: Config, launcher: L, icons: I, identity: P) -> Self {
        let store = PlanStore::new(config.data_dir.clone());
        Self {
            config,
            launcher,
            icons,
            identity,
            store,
        }
    }

    /// 处理一次导入请求，永不返回 `Err`
    pub async fn handle(&self, request: &ImportRequest) -> ImportResponse {
        match self.import(request).await {
            Ok(plan) => ImportResponse::success(plan),
            Err(e) => {
                error!("❌ 导入失败: {}", e);
                ImportResponse::failure(&e)
            }
        }
    }

    /// 执行导入并返回保存后的计划
    pub async fn import(&self, request: &ImportRequest) -> AppResult<PlanData> {
        let identity = self.identity.current()?;
        let guide_url = request.validated_url()?;

        logging::log_import_start(guide_url);

        let session = self.launcher.launch().await?;
        let mut crawler = GuideCrawler::new(&session, &self.icons, &self.config);
        let result = self.crawl_and_save(&mut crawler, guide_url, &identity).await;
        session.close().await;

        if let Ok(plan) = &result {
            logging::log_import_complete(&plan.name, plan.subjects.len(), plan.total_topics());
        }
        result
    }

    async fn crawl_and_save(
        &self,
        crawler: &mut GuideCrawler<'_, L::Session, I>,
        guide_url: &str,
        identity: &Identity,
    ) -> AppResult<PlanData> {
        let plan = crawler.crawl(guide_url).await?;

        match self.store.save(identity, &plan).await {
            Ok(path) => {
                crawler.advance(CrawlStage::Persisted);
                info!("✅ 计划「{}」已写入 {}", plan.name, path.display());
                Ok(plan)
            }
            Err(e) => {
                crawler.advance(CrawlStage::Failed);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::infrastructure::{FixtureLauncher, FixturePage};
    use crate::services::{ConfiguredIdentity, NoIcon};

    const GUIDE: &str = "https://www.example.com/guias/pf";

    fn config(data_dir: &std::path::Path) -> Config {
        Config {
            data_dir: data_dir.to_path_buf(),
            owner_id: Some("owner-7".to_string()),
            ..Config::default()
        }
    }

    fn service(
        config: Config,
        launcher: FixtureLauncher,
    ) -> ImportService<FixtureLauncher, NoIcon, ConfiguredIdentity> {
        let identity = ConfiguredIdentity::new(config.owner_id.clone());
        ImportService::new(config, launcher, NoIcon, identity)
    }

    #[tokio::test]
    async fn unauthenticated_request_never_launches_browser() {
        let tmp = tempfile::tempdir().unwrap();
        let launcher = FixtureLauncher::new();
        let probe = launcher.probe();
        let cfg = Config {
            owner_id: None,
            ..config(tmp.path())
        };

        let err = service(cfg, launcher).import(&ImportRequest::new(GUIDE)).await.unwrap_err();

        assert!(matches!(err, AppError::Auth(_)));
        assert_eq!(probe.launched(), 0);
    }

    #[tokio::test]
    async fn missing_url_is_rejected_before_launch() {
        let tmp = tempfile::tempdir().unwrap();
        let launcher = FixtureLauncher::new();
        let probe = launcher.probe();

        let response = service(config(tmp.path()), launcher)
            .handle(&ImportRequest::default())
            .await;

        assert!(!response.is_success());
        assert_eq!(probe.launched(), 0);
    }

    #[tokio::test]
    async fn navigation_failure_closes_session_and_writes_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let launcher = FixtureLauncher::new().failing(GUIDE, FixturePage::LoadTimeout);
        let probe = launcher.probe();

        let response = service(config(tmp.path()), launcher)
            .handle(&ImportRequest::new(GUIDE))
            .await;

        match response {
            ImportResponse::Failure { error } => assert!(error.starts_with("导入指南失败: ")),
            ImportResponse::Success { .. } => panic!("expected failure"),
        }
        assert_eq!(probe.launched(), 1);
        assert_eq!(probe.closed(), 1);
        assert!(!tmp.path().join("owner-7").exists());
    }

    #[tokio::test]
    async fn saved_plan_ends_in_persisted_stage() {
        let tmp = tempfile::tempdir().unwrap();
        let session = crate::infrastructure::FixtureSession::new(
            [(
                GUIDE.to_string(),
                FixturePage::Html(
                    r#"<div class="guias-cabecalho"><div class="guias-cabecalho-concurso-nome">PF</div></div>"#
                        .to_string(),
                ),
            )]
            .into_iter()
            .collect(),
        );
        let service = service(config(tmp.path()), FixtureLauncher::new());
        let identity = service.identity.current().unwrap();
        let mut crawler = GuideCrawler::new(&session, &service.icons, &service.config);

        let plan = service.crawl_and_save(&mut crawler, GUIDE, &identity).await.unwrap();

        assert_eq!(crawler.stage(), CrawlStage::Persisted);
        assert!(tmp.path().join("owner-7").join("pf.json").exists());
        assert_eq!(plan.name, "PF");
    }

    #[tokio::test]
    async fn persistence_failure_still_closes_session() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("arquivo");
        std::fs::write(&blocker, b"x").unwrap();
        let launcher = FixtureLauncher::new().page(
            GUIDE,
            r#"<div class="guias-cabecalho"><div class="guias-cabecalho-concurso-nome">PF</div></div>"#,
        );
        let probe = launcher.probe();

        let err = service(config(&blocker), launcher)
            .import(&ImportRequest::new(GUIDE))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Persistence { .. }));
        assert_eq!(probe.closed(), 1);
    }
}
