//! Best-effort recovery of dimension scores from captured console text.
//!
//! Strictly a fallback for runs where no structured report was attached:
//! scraped values only fill gaps, never overwrite a populated report, and
//! everything recovered here is tagged as scraped so the renderer can mark
//! it as inferred rather than authoritative.

use regex::Regex;
use tracing::debug;

use crate::models::{DataSource, Dimension, DimensionReport, Recommendation};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScrapedMetrics {
    pub accessibility: Option<f64>,
    pub performance: Option<f64>,
    pub coverage: Option<f64>,
    pub security: Option<f64>,
    pub recommendations: Vec<String>,
}

impl ScrapedMetrics {
    pub fn score_for(&self, dimension: Dimension) -> Option<f64> {
        match dimension {
            Dimension::Accessibility => self.accessibility,
            Dimension::Performance => self.performance,
            Dimension::Coverage => self.coverage,
            Dimension::Security => self.security,
        }
    }
}

fn score_pattern(label: &str) -> Regex {
    // "Accessibility Score: 93.5%"; the percent sign is optional, the label
    // match is case-insensitive. Fixed patterns; construction cannot fail.
    Regex::new(&format!(
        r"(?im)^.*{label}\s*score:\s*([0-9]+(?:\.[0-9]+)?)\s*%?"
    ))
    .unwrap()
}

fn first_capture(re: &Regex, text: &str) -> Option<f64> {
    re.captures(text)?.get(1)?.as_str().parse().ok()
}

/// Recover whatever scores and recommendations the console text contains.
/// Absent patterns simply yield `None`/empty; this never fails.
pub fn scrape(text: &str) -> ScrapedMetrics {
    let coverage = first_capture(&score_pattern("coverage"), text).or_else(|| {
        // Coverage is also logged without the "score" word: "Coverage: 72.4%".
        let re = Regex::new(r"(?im)^.*\bcoverage:\s*([0-9]+(?:\.[0-9]+)?)\s*%").unwrap();
        first_capture(&re, text)
    });

    let rec_re = Regex::new(r"(?im)^.*recommendation:\s*(.+)$").unwrap();
    let recommendations = rec_re
        .captures_iter(text)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    let metrics = ScrapedMetrics {
        accessibility: first_capture(&score_pattern("accessibility"), text),
        performance: first_capture(&score_pattern("performance"), text),
        coverage,
        security: first_capture(&score_pattern("security"), text),
        recommendations,
    };
    debug!(?metrics, "scraped stdout metrics");
    metrics
}

/// Fill unavailable dimension slots from scraped values. Populated reports
/// are left untouched. Scraped recommendation lines carry no dimension
/// attribution, so the list is attached to the first filled report only
/// instead of being repeated on every gap.
pub fn fill_gaps(reports: &mut [DimensionReport], scraped: &ScrapedMetrics) {
    let mut recommendations_placed = false;
    for report in reports.iter_mut() {
        if report.is_available() {
            continue;
        }
        let Some(score) = scraped.score_for(report.dimension) else {
            continue;
        };
        report.source = DataSource::Scraped;
        report.set_score(score);
        report.generated_at = chrono::Utc::now();
        if !recommendations_placed {
            report.recommendations = scraped
                .recommendations
                .iter()
                .map(|text| Recommendation {
                    text: text.clone(),
                    source: DataSource::Scraped,
                })
                .collect();
            recommendations_placed = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recovers_labelled_scores() {
        let text = "\
setup done
Accessibility Score: 93%
PERFORMANCE SCORE: 80.5
Coverage: 72.4%
Security Score: 66.7%
Recommendation: add missing alt text
Recommendation: bundle vendor scripts
";
        let metrics = scrape(text);
        assert_eq!(metrics.accessibility, Some(93.0));
        assert_eq!(metrics.performance, Some(80.5));
        assert_eq!(metrics.coverage, Some(72.4));
        assert_eq!(metrics.security, Some(66.7));
        assert_eq!(metrics.recommendations.len(), 2);
    }

    #[test]
    fn unrecognized_text_yields_defaults_without_error() {
        let metrics = scrape("no scores logged in this run");
        assert_eq!(metrics, ScrapedMetrics::default());
    }

    #[test]
    fn fill_gaps_only_touches_unavailable_reports() {
        let mut reports = vec![
            DimensionReport::measured(Dimension::Accessibility, 90.0),
            DimensionReport::unavailable(Dimension::Performance),
        ];
        let scraped = ScrapedMetrics {
            accessibility: Some(10.0),
            performance: Some(80.0),
            ..ScrapedMetrics::default()
        };
        fill_gaps(&mut reports, &scraped);

        assert_eq!(reports[0].score(), 90.0);
        assert_eq!(reports[0].source, DataSource::Measured);
        assert_eq!(reports[1].score(), 80.0);
        assert_eq!(reports[1].source, DataSource::Scraped);
    }

    #[test]
    fn scraped_recommendations_carry_the_fallback_tag() {
        let mut reports = vec![DimensionReport::unavailable(Dimension::Coverage)];
        let scraped = ScrapedMetrics {
            coverage: Some(70.0),
            recommendations: vec!["cover the checkout flow".into()],
            ..ScrapedMetrics::default()
        };
        fill_gaps(&mut reports, &scraped);
        assert_eq!(reports[0].recommendations[0].source, DataSource::Scraped);
    }

    #[test]
    fn recommendations_are_not_duplicated_across_filled_gaps() {
        let mut reports = vec![
            DimensionReport::unavailable(Dimension::Coverage),
            DimensionReport::unavailable(Dimension::Security),
        ];
        let scraped = ScrapedMetrics {
            coverage: Some(70.0),
            security: Some(100.0),
            recommendations: vec!["cache vendor bundles".into()],
            ..ScrapedMetrics::default()
        };
        fill_gaps(&mut reports, &scraped);

        assert_eq!(reports[0].recommendations.len(), 1);
        assert!(reports[1].recommendations.is_empty());
    }

    #[test]
    fn gap_without_scraped_value_stays_unavailable() {
        let mut reports = vec![DimensionReport::unavailable(Dimension::Security)];
        fill_gaps(&mut reports, &ScrapedMetrics::default());
        assert!(!reports[0].is_available());
    }
}
