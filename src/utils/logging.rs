/// 日志工具模块
///
/// 提供日志初始化和输出的辅助函数
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化 tracing 日志
///
/// 优先使用 `RUST_LOG`，否则根据 `verbose` 选择 `debug` 或 `info`。
/// 重复调用不会报错（测试中多次初始化时只有第一次生效）。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// 记录导入开始信息
///
/// # 参数
/// - `guide_url`: 指南地址
pub fn log_import_start(guide_url: &str) {
    info!("{}", "=".repeat(60));
    info!("🚀 开始导入学习指南 - {}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"));
    info!("🔗 指南地址: {}", guide_url);
    info!("{}", "=".repeat(60));
}

/// 记录导入完成信息
///
/// # 参数
/// - `plan_name`: 计划名称
/// - `subjects`: 科目数量
/// - `topics`: 主题总数
pub fn log_import_complete(plan_name: &str, subjects: usize, topics: u32) {
    info!("\n{}", "=".repeat(60));
    info!("📊 导入完成统计");
    info!("完成时间: {}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"));
    info!("{}", "=".repeat(60));
    info!("📘 计划: {}", plan_name);
    info!("✅ 科目: {}", subjects);
    info!("🌲 主题: {}", topics);
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
