//! Pure aggregation of test outcomes and dimension reports into the unified
//! summary. Deterministic and idempotent; no I/O.

use chrono::Utc;

use crate::models::{
    Dimension, DimensionReport, ReportMetadata, RunSummary, TestOutcome, TestStatus,
    UnifiedReportData, dimension::clamp_score,
};

/// Overall health weights; they sum to exactly 1.0.
pub const WEIGHT_PASS_RATE: f64 = 0.35;
pub const WEIGHT_COVERAGE: f64 = 0.15;
pub const WEIGHT_PERFORMANCE: f64 = 0.15;
pub const WEIGHT_ACCESSIBILITY: f64 = 0.15;
pub const WEIGHT_SECURITY: f64 = 0.20;

fn dimension_score(dimensions: &[DimensionReport], dimension: Dimension) -> f64 {
    dimensions
        .iter()
        .find(|r| r.dimension == dimension)
        .map(|r| clamp_score(r.score()))
        .unwrap_or(0.0)
}

pub fn summarize(outcomes: &[TestOutcome], dimensions: &[DimensionReport]) -> RunSummary {
    let total = outcomes.len();
    let passed = outcomes.iter().filter(|o| o.status == TestStatus::Passed).count();
    let failed = outcomes.iter().filter(|o| o.status == TestStatus::Failed).count();
    let skipped = outcomes.iter().filter(|o| o.status == TestStatus::Skipped).count();

    let pass_rate = if total == 0 {
        0.0
    } else {
        passed as f64 / total as f64 * 100.0
    };

    let health_score = clamp_score(pass_rate) * WEIGHT_PASS_RATE
        + dimension_score(dimensions, Dimension::Coverage) * WEIGHT_COVERAGE
        + dimension_score(dimensions, Dimension::Performance) * WEIGHT_PERFORMANCE
        + dimension_score(dimensions, Dimension::Accessibility) * WEIGHT_ACCESSIBILITY
        + dimension_score(dimensions, Dimension::Security) * WEIGHT_SECURITY;

    RunSummary {
        total,
        passed,
        failed,
        skipped,
        pass_rate,
        duration_ms: outcomes.iter().map(|o| o.duration_ms).sum(),
        health_score,
    }
}

/// Assemble the aggregate root. The report is rebuilt fully on every
/// invocation; there is no incremental state.
pub fn build_report(
    outcomes: Vec<TestOutcome>,
    dimensions: Vec<DimensionReport>,
    metadata: ReportMetadata,
) -> UnifiedReportData {
    UnifiedReportData {
        summary: summarize(&outcomes, &dimensions),
        outcomes,
        dimensions,
        metadata,
        generated_at: Utc::now(),
    }
}
