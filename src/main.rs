use anyhow::{Context, Result};
use guide_import::services::{ConfiguredIdentity, HttpIconEmbedder};
use guide_import::utils::logging;
use guide_import::{ChromeLauncher, Config, ImportRequest, ImportService};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::load().context("加载配置失败")?;

    // 初始化日志
    logging::init(config.verbose_logging);

    let request = ImportRequest {
        guide_url: std::env::args().nth(1).or_else(|| std::env::var("GUIDE_URL").ok()),
    };

    let service = ImportService::new(
        config.clone(),
        ChromeLauncher::new(config.clone()),
        HttpIconEmbedder::new(config.icon_fetch_timeout()),
        ConfiguredIdentity::new(config.owner_id.clone()),
    );

    let response = service.handle(&request).await;
    println!("{}", serde_json::to_string_pretty(&response)?);

    if !response.is_success() {
        std::process::exit(1);
    }
    Ok(())
}
