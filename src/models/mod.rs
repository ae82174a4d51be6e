pub mod plan;
pub mod request;

pub use plan::{HeaderData, PlanData, Subject, Topic, TopicWeights, SUBJECT_COLORS};
pub use request::{ImportRequest, ImportResponse};
