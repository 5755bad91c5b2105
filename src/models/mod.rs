pub mod dimension;
pub mod outcome;
pub mod report;
pub mod status;

pub use dimension::{DataSource, Dimension, DimensionReport, Finding, Recommendation};
pub use outcome::{TestOutcome, extract_tags};
pub use report::{ReportMetadata, RunSummary, UnifiedReportData};
pub use status::TestStatus;
