//! Performance scoring from the page's timing and request measurements.

use serde::{Deserialize, Serialize};

use crate::models::{Dimension, DimensionReport, Finding};

pub const LARGEST_PAINT_BUDGET_MS: f64 = 2500.0;
pub const FIRST_PAINT_BUDGET_MS: f64 = 1800.0;
pub const LOAD_BUDGET_MS: f64 = 5000.0;
pub const REQUEST_BUDGET: usize = 100;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageTimings {
    pub first_paint_ms: f64,
    pub largest_paint_ms: f64,
    /// Total load time until the load event.
    pub load_ms: f64,
    pub request_count: usize,
}

/// Start from 100 and subtract a fixed penalty for every exceeded budget;
/// floor at 0.
pub fn report(timings: &PageTimings) -> DimensionReport {
    let mut score = 100.0;
    let mut report = DimensionReport::measured(Dimension::Performance, score);

    let mut penalize = |report: &mut DimensionReport, penalty: f64, id: &str, detail: String| {
        score -= penalty;
        report.findings.push(Finding {
            id: id.into(),
            severity: "warning".into(),
            description: detail.clone(),
            element_count: 0,
        });
        report.recommend(detail);
    };

    if timings.largest_paint_ms > LARGEST_PAINT_BUDGET_MS {
        penalize(
            &mut report,
            20.0,
            "largest-paint",
            format!(
                "Largest paint took {:.0}ms (budget {:.0}ms); reduce above-the-fold payload",
                timings.largest_paint_ms, LARGEST_PAINT_BUDGET_MS
            ),
        );
    }
    if timings.first_paint_ms > FIRST_PAINT_BUDGET_MS {
        penalize(
            &mut report,
            15.0,
            "first-paint",
            format!(
                "First paint took {:.0}ms (budget {:.0}ms); inline critical CSS",
                timings.first_paint_ms, FIRST_PAINT_BUDGET_MS
            ),
        );
    }
    if timings.load_ms > LOAD_BUDGET_MS {
        penalize(
            &mut report,
            20.0,
            "load-time",
            format!(
                "Page load took {:.0}ms (budget {:.0}ms); defer non-critical scripts",
                timings.load_ms, LOAD_BUDGET_MS
            ),
        );
    }
    if timings.request_count > REQUEST_BUDGET {
        penalize(
            &mut report,
            20.0,
            "request-count",
            format!(
                "{} network requests (budget {}); bundle or cache static assets",
                timings.request_count, REQUEST_BUDGET
            ),
        );
    }

    report.set_score(score);
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn within_budget_scores_100() {
        let timings = PageTimings {
            first_paint_ms: 900.0,
            largest_paint_ms: 1800.0,
            load_ms: 3000.0,
            request_count: 40,
        };
        let report = report(&timings);
        assert_eq!(report.score(), 100.0);
        assert!(report.findings.is_empty());
    }

    #[test]
    fn each_exceeded_budget_costs_its_penalty() {
        let timings = PageTimings {
            first_paint_ms: 2000.0,  // −15
            largest_paint_ms: 3000.0, // −20
            load_ms: 4000.0,
            request_count: 50,
        };
        let report = report(&timings);
        assert_eq!(report.score(), 65.0);
        assert_eq!(report.findings.len(), 2);
        assert_eq!(report.recommendations.len(), 2);
    }

    #[test]
    fn all_budgets_exceeded_stacks_every_penalty() {
        let timings = PageTimings {
            first_paint_ms: 10_000.0,
            largest_paint_ms: 10_000.0,
            load_ms: 30_000.0,
            request_count: 500,
        };
        assert_eq!(report(&timings).score(), 25.0);
        assert_eq!(report(&timings).findings.len(), 4);
    }
}
