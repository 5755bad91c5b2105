//! Security scoring from three sub-checks run against the deployed page:
//! response header hygiene, input sanitization against a fixed payload set,
//! and a sweep for sensitive-looking tokens in page content and storage.

use serde::{Deserialize, Serialize};

use crate::models::{Dimension, DimensionReport, Finding};

pub const SUB_CHECK_COUNT: usize = 3;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SecurityAudit {
    pub headers: SubCheck,
    pub sanitization: SubCheck,
    pub token_exposure: SubCheck,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubCheck {
    pub passed: bool,
    /// What failed, e.g. the missing header names or the leaking payload.
    #[serde(default)]
    pub detail: String,
}

impl SecurityAudit {
    fn checks(&self) -> [(&'static str, &SubCheck, &'static str); SUB_CHECK_COUNT] {
        [
            (
                "security-headers",
                &self.headers,
                "Add the missing HTTP security headers",
            ),
            (
                "input-sanitization",
                &self.sanitization,
                "Sanitize user input before rendering it",
            ),
            (
                "token-exposure",
                &self.token_exposure,
                "Remove sensitive tokens from page content and storage",
            ),
        ]
    }
}

/// Score = passed sub-checks ÷ 3 × 100.
pub fn report(audit: &SecurityAudit) -> DimensionReport {
    let passed = audit.checks().iter().filter(|(_, c, _)| c.passed).count();
    let score = passed as f64 / SUB_CHECK_COUNT as f64 * 100.0;

    let mut report = DimensionReport::measured(Dimension::Security, score);
    for (id, check, advice) in audit.checks() {
        if check.passed {
            continue;
        }
        report.findings.push(Finding {
            id: id.into(),
            severity: "serious".into(),
            description: check.detail.clone(),
            element_count: 0,
        });
        report.recommend(advice);
    }
    report
}
