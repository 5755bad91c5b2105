use anyhow::{Context, Result};

use crate::models::UnifiedReportData;

pub fn to_json(report: &UnifiedReportData) -> Result<String> {
    serde_json::to_string_pretty(report).context("failed to serialize unified report")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::build_report;
    use crate::models::{Dimension, DimensionReport, ReportMetadata, UnifiedReportData};

    fn sample() -> UnifiedReportData {
        build_report(
            vec![],
            vec![DimensionReport::measured(Dimension::Security, 100.0)],
            ReportMetadata {
                project: "demo-app".into(),
                version: "2.1.0".into(),
                environment: "staging".into(),
                run_id: "20260829120000".into(),
            },
        )
    }

    #[test]
    fn json_contains_summary_and_metadata() {
        let rendered = to_json(&sample()).unwrap();
        assert!(rendered.contains("\"health_score\""));
        assert!(rendered.contains("\"project\": \"demo-app\""));
        assert!(rendered.contains("\"generated_at\""));
    }

    #[test]
    fn json_round_trips() {
        let report = sample();
        let rendered = to_json(&report).unwrap();
        let back: UnifiedReportData = serde_json::from_str(&rendered).unwrap();
        assert_eq!(back.summary, report.summary);
        assert_eq!(back.dimensions.len(), 1);
    }
}
