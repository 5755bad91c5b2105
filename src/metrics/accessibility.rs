//! Accessibility scoring from one rule-engine scan of the loaded page.

use serde::{Deserialize, Serialize};

use crate::models::{Dimension, DimensionReport, Finding};

/// Raw output of an accessibility rule scan: how many rules passed and the
/// violations that didn't.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccessibilityScan {
    pub passes: usize,
    #[serde(default)]
    pub violations: Vec<Violation>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Violation {
    pub id: String,
    /// Rule impact as reported by the engine (e.g. "critical", "serious").
    #[serde(default)]
    pub impact: String,
    #[serde(default)]
    pub description: String,
    /// Affected element count.
    #[serde(default)]
    pub nodes: usize,
}

/// Score = passes / (passes + violations) × 100; a clean scan is 100 even
/// when nothing passed (an empty page has nothing to violate).
pub fn report(scan: &AccessibilityScan) -> DimensionReport {
    let violations = scan.violations.len();
    let score = if violations == 0 {
        100.0
    } else {
        scan.passes as f64 / (scan.passes + violations) as f64 * 100.0
    };

    let mut report = DimensionReport::measured(Dimension::Accessibility, score);
    for violation in &scan.violations {
        report.findings.push(Finding {
            id: violation.id.clone(),
            severity: violation.impact.clone(),
            description: violation.description.clone(),
            element_count: violation.nodes,
        });
        if matches!(violation.impact.as_str(), "critical" | "serious") {
            report.recommend(format!(
                "Fix {} accessibility violation '{}' affecting {} element(s)",
                violation.impact, violation.id, violation.nodes
            ));
        }
    }
    report
}
