pub mod load;
pub mod types;

pub use load::{collect_tests, load_summary};
pub use types::{Attachment, RunStats, Spec, Suite, TestError, TestResult, TestRunSummary, TestStatus};
