pub mod aggregator;
pub mod count_parser;
pub mod header_extractor;
pub mod icon_embedder;
pub mod identity;
pub mod plan_store;
pub mod subject_links;
pub mod topic_tree;

pub use icon_embedder::{HttpIconEmbedder, IconEmbedder, NoIcon};
pub use identity::{ConfiguredIdentity, Identity, IdentityProvider};
pub use plan_store::PlanStore;
pub use subject_links::SubjectLinks;
