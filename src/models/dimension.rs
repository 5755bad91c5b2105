use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Inspection category a report scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Accessibility,
    Performance,
    Coverage,
    Security,
}

impl Dimension {
    pub fn all() -> [Dimension; 4] {
        [
            Dimension::Accessibility,
            Dimension::Performance,
            Dimension::Coverage,
            Dimension::Security,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Dimension::Accessibility => "Accessibility",
            Dimension::Performance => "Performance",
            Dimension::Coverage => "Coverage",
            Dimension::Security => "Security",
        }
    }
}

/// Where a report's numbers came from. Scraped values are lower confidence
/// and must stay distinguishable from measured ones all the way into the
/// rendered report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Measured,
    Scraped,
    #[default]
    Unavailable,
}

/// One violation/issue surfaced by an inspection pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Finding {
    pub id: String,
    pub severity: String,
    pub description: String,
    /// Number of page elements the finding applies to.
    pub element_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub text: String,
    pub source: DataSource,
}

/// Per-dimension structured score-plus-findings result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DimensionReport {
    pub dimension: Dimension,
    /// Always within [0, 100]; use `set_score` to mutate.
    score: f64,
    pub findings: Vec<Finding>,
    pub recommendations: Vec<Recommendation>,
    pub source: DataSource,
    pub generated_at: DateTime<Utc>,
}

impl DimensionReport {
    pub fn measured(dimension: Dimension, score: f64) -> Self {
        let mut report = Self {
            dimension,
            score: 0.0,
            findings: Vec::new(),
            recommendations: Vec::new(),
            source: DataSource::Measured,
            generated_at: Utc::now(),
        };
        report.set_score(score);
        report
    }

    /// Explicit marker for a dimension whose underlying capability was
    /// missing. Callers never fail a run over one of these.
    pub fn unavailable(dimension: Dimension) -> Self {
        Self {
            dimension,
            score: 0.0,
            findings: Vec::new(),
            recommendations: Vec::new(),
            source: DataSource::Unavailable,
            generated_at: Utc::now(),
        }
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn set_score(&mut self, score: f64) {
        self.score = clamp_score(score);
    }

    pub fn recommend(&mut self, text: impl Into<String>) {
        self.recommendations.push(Recommendation {
            text: text.into(),
            source: self.source,
        });
    }

    pub fn is_available(&self) -> bool {
        self.source != DataSource::Unavailable
    }
}

pub fn clamp_score(score: f64) -> f64 {
    if score.is_nan() { 0.0 } else { score.clamp(0.0, 100.0) }
}
