//! Type definitions for creation-report

mod error;
mod issue;
mod report;

pub use error::*;
pub use issue::*;
pub use report::*;
