pub mod crawl_stage;
pub mod navigator;

pub use crawl_stage::CrawlStage;
pub use navigator::{Navigator, PageSnapshot};
