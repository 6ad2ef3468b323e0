//! Services for validation, counting, aggregation and report assembly

pub mod aggregator;
pub mod chart;
pub mod counter;
pub mod date_format;
pub mod messages;
pub mod projects;
pub mod report;
pub mod validator;

pub use aggregator::Aggregator;
pub use counter::{IssueCounter, IssueIndex};
pub use date_format::{DateFormatter, PatternDateFormatter};
pub use messages::Messages;
pub use projects::{ProjectCatalog, ProjectLookup};
pub use report::CreationReport;
pub use validator::Validator;
