use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::dimension::DimensionReport;
use super::outcome::TestOutcome;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    /// Percentage of passed tests, 0 when no tests ran.
    pub pass_rate: f64,
    pub duration_ms: u64,
    /// Fixed-weight composite of pass rate and the four dimension scores.
    pub health_score: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub project: String,
    pub version: String,
    pub environment: String,
    pub run_id: String,
}

/// The aggregate root: the sole unit of persistence, rebuilt fully on every
/// report-generation invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnifiedReportData {
    pub summary: RunSummary,
    pub outcomes: Vec<TestOutcome>,
    /// One report per dimension, in `Dimension::all()` order.
    pub dimensions: Vec<DimensionReport>,
    pub metadata: ReportMetadata,
    pub generated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::dimension::Dimension;

    #[test]
    fn report_round_trips_through_json() {
        let report = UnifiedReportData {
            summary: RunSummary {
                total: 3,
                passed: 2,
                failed: 1,
                skipped: 0,
                pass_rate: 66.7,
                duration_ms: 1200,
                health_score: 58.3,
            },
            outcomes: vec![TestOutcome {
                title: "loads @smoke".into(),
                tags: vec!["smoke".into()],
                ..TestOutcome::default()
            }],
            dimensions: vec![DimensionReport::measured(Dimension::Accessibility, 90.0)],
            metadata: ReportMetadata {
                project: "demo".into(),
                version: "1.0".into(),
                environment: "ci".into(),
                run_id: "20260829120000".into(),
            },
            generated_at: Utc::now(),
        };

        let json = serde_json::to_string(&report).unwrap();
        let back: UnifiedReportData = serde_json::from_str(&json).unwrap();
        assert_eq!(back.summary, report.summary);
        assert_eq!(back.outcomes.len(), 1);
        assert_eq!(back.dimensions[0].score(), 90.0);
        assert_eq!(back.metadata.run_id, "20260829120000");
        assert_eq!(back.generated_at, report.generated_at);
    }
}
