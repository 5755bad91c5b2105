//! Coverage scoring from per-resource covered byte ranges.
//!
//! The collector reports overlapping ranges when the same code runs more
//! than once, so covered bytes are counted as the length of the union of a
//! resource's ranges, never the sum.

use serde::{Deserialize, Serialize};

use crate::models::{Dimension, DimensionReport, Finding};

/// Half-open byte range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ByteRange {
    pub start: u64,
    pub end: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourceCoverage {
    pub url: String,
    pub total_bytes: u64,
    #[serde(default)]
    pub ranges: Vec<ByteRange>,
}

/// Length of the union of the given ranges (sort-and-merge sweep).
/// Idempotent under re-ordering and duplication of the input.
pub fn union_len(ranges: &[ByteRange]) -> u64 {
    let mut sorted: Vec<ByteRange> = ranges.iter().copied().filter(|r| r.end > r.start).collect();
    sorted.sort_by_key(|r| (r.start, r.end));

    let mut covered = 0;
    let mut open: Option<(u64, u64)> = None;
    for range in sorted {
        open = match open {
            Some((start, end)) if range.start <= end => Some((start, end.max(range.end))),
            Some((start, end)) => {
                covered += end - start;
                Some((range.start, range.end))
            }
            None => Some((range.start, range.end)),
        };
    }
    if let Some((start, end)) = open {
        covered += end - start;
    }
    covered
}

fn is_tooling(url: &str, tooling_patterns: &[String]) -> bool {
    tooling_patterns.iter().any(|p| url.contains(p.as_str()))
}

/// Score = uniquely covered bytes ÷ total source bytes × 100 across all
/// application resources; tooling resources are excluded by URL pattern.
pub fn report(resources: &[ResourceCoverage], tooling_patterns: &[String]) -> DimensionReport {
    let mut covered = 0u64;
    let mut total = 0u64;
    let mut worst: Option<(&ResourceCoverage, f64)> = None;

    for resource in resources {
        if is_tooling(&resource.url, tooling_patterns) {
            continue;
        }
        let resource_covered = union_len(&resource.ranges).min(resource.total_bytes);
        covered += resource_covered;
        total += resource.total_bytes;

        if resource.total_bytes > 0 {
            let pct = resource_covered as f64 / resource.total_bytes as f64 * 100.0;
            if worst.is_none_or(|(_, worst_pct)| pct < worst_pct) {
                worst = Some((resource, pct));
            }
        }
    }

    let score = if total == 0 {
        0.0
    } else {
        covered as f64 / total as f64 * 100.0
    };

    let mut report = DimensionReport::measured(Dimension::Coverage, score);
    if let Some((resource, pct)) = worst
        && pct < 50.0
    {
        report.findings.push(Finding {
            id: "low-resource-coverage".into(),
            severity: "info".into(),
            description: format!("{} is only {:.1}% covered", resource.url, pct),
            element_count: 1,
        });
        report.recommend(format!(
            "Add tests exercising {} ({:.1}% covered)",
            resource.url, pct
        ));
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(start: u64, end: u64) -> ByteRange {
        ByteRange { start, end }
    }

    #[test]
    fn overlapping_ranges_never_double_count() {
        // [0,10) then [5,15) covers 15 units, not 20.
        assert_eq!(union_len(&[range(0, 10), range(5, 15)]), 15);
    }

    #[test]
    fn union_is_idempotent_under_reordering() {
        let forward = union_len(&[range(0, 10), range(5, 15), range(20, 30)]);
        let shuffled = union_len(&[range(20, 30), range(5, 15), range(0, 10), range(5, 15)]);
        assert_eq!(forward, shuffled);
        assert_eq!(forward, 25);
    }

    #[test]
    fn empty_and_inverted_ranges_cover_nothing() {
        assert_eq!(union_len(&[]), 0);
        assert_eq!(union_len(&[range(5, 5), range(9, 3)]), 0);
    }

    #[test]
    fn score_sums_across_resources() {
        let resources = vec![
            ResourceCoverage {
                url: "https://app.example/main.js".into(),
                total_bytes: 100,
                ranges: vec![range(0, 60)],
            },
            ResourceCoverage {
                url: "https://app.example/vendor.js".into(),
                total_bytes: 100,
                ranges: vec![range(0, 20)],
            },
        ];
        let report = report(&resources, &[]);
        assert_eq!(report.score(), 40.0);
    }

    #[test]
    fn tooling_resources_are_excluded() {
        let resources = vec![
            ResourceCoverage {
                url: "https://app.example/main.js".into(),
                total_bytes: 100,
                ranges: vec![range(0, 80)],
            },
            ResourceCoverage {
                url: "https://app.example/node_modules/runtime.js".into(),
                total_bytes: 1000,
                ranges: vec![],
            },
        ];
        let report = report(&resources, &["node_modules".into()]);
        assert_eq!(report.score(), 80.0);
    }

    #[test]
    fn no_resources_scores_zero_without_panicking() {
        assert_eq!(report(&[], &[]).score(), 0.0);
    }

    #[test]
    fn covered_bytes_cap_at_resource_total() {
        // A collector bug can report ranges beyond the resource size; the
        // score must still stay within [0, 100].
        let resources = vec![ResourceCoverage {
            url: "https://app.example/main.js".into(),
            total_bytes: 50,
            ranges: vec![range(0, 200)],
        }];
        assert_eq!(report(&resources, &[]).score(), 100.0);
    }
}
