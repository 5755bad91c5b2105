//! Explicit per-run accumulator for dimension reports.
//!
//! Extractors record into a session handed to them by the caller instead of
//! into process-wide state, and the session is flushed once at end-of-run.
//! The accessibility report is persisted to a side-channel file so a later
//! report-generation process keeps full violation detail that a flattened
//! stdout scrape would lose.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::models::{DataSource, Dimension, DimensionReport};

/// File name of the accessibility side-channel, shared between test
/// execution and report generation. Last writer wins across concurrent
/// workers; report generation runs once after all workers finish.
pub const SIDE_CHANNEL_FILE: &str = "accessibility-data.json";

#[derive(Debug, Default)]
pub struct MetricsSession {
    reports: Vec<DimensionReport>,
}

impl MetricsSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one dimension's report. A measured report takes the dimension's
    /// slot outright; a scraped or unavailable report only fills an empty or
    /// non-measured slot, so fallback data never overwrites real measurements.
    pub fn record(&mut self, report: DimensionReport) {
        match self.slot_mut(report.dimension) {
            Some(existing) => {
                if existing.source != DataSource::Measured
                    && report.source != DataSource::Unavailable
                {
                    *existing = report;
                }
            }
            None => self.reports.push(report),
        }
    }

    fn slot_mut(&mut self, dimension: Dimension) -> Option<&mut DimensionReport> {
        self.reports.iter_mut().find(|r| r.dimension == dimension)
    }

    pub fn get(&self, dimension: Dimension) -> Option<&DimensionReport> {
        self.reports.iter().find(|r| r.dimension == dimension)
    }

    /// All four dimensions in fixed order, with explicit unavailable markers
    /// for anything never recorded.
    pub fn into_reports(self) -> Vec<DimensionReport> {
        Dimension::all()
            .into_iter()
            .map(|dimension| {
                self.reports
                    .iter()
                    .find(|r| r.dimension == dimension)
                    .cloned()
                    .unwrap_or_else(|| DimensionReport::unavailable(dimension))
            })
            .collect()
    }

    /// Persist the accessibility report to the side-channel file in `dir`.
    pub async fn flush(&self, dir: &Path) -> Result<()> {
        let Some(report) = self.get(Dimension::Accessibility) else {
            debug!("no accessibility report recorded, skipping side-channel flush");
            return Ok(());
        };
        tokio::fs::create_dir_all(dir)
            .await
            .with_context(|| format!("failed to create {}", dir.display()))?;
        let path = dir.join(SIDE_CHANNEL_FILE);
        let json = serde_json::to_string_pretty(report)
            .context("failed to serialize accessibility report")?;
        tokio::fs::write(&path, json)
            .await
            .with_context(|| format!("failed to write {}", path.display()))?;
        debug!(path = %path.display(), "flushed accessibility side-channel");
        Ok(())
    }
}

/// Read the accessibility side-channel back, if a previous process left one.
/// Absence or unreadable content is a degradation, not an error.
pub async fn load_side_channel(dir: &Path) -> Option<DimensionReport> {
    let path = dir.join(SIDE_CHANNEL_FILE);
    let raw = tokio::fs::read_to_string(&path).await.ok()?;
    match serde_json::from_str::<DimensionReport>(&raw) {
        Ok(report) if report.dimension == Dimension::Accessibility => Some(report),
        Ok(_) => {
            warn!(path = %path.display(), "side-channel file holds a non-accessibility report");
            None
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "ignoring unreadable side-channel file");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scraped_data_never_overwrites_measured() {
        let mut session = MetricsSession::new();
        session.record(DimensionReport::measured(Dimension::Performance, 80.0));

        let mut scraped = DimensionReport::measured(Dimension::Performance, 10.0);
        scraped.source = DataSource::Scraped;
        session.record(scraped);

        let report = session.get(Dimension::Performance).unwrap();
        assert_eq!(report.score(), 80.0);
        assert_eq!(report.source, DataSource::Measured);
    }

    #[test]
    fn measured_data_replaces_an_earlier_unavailable_marker() {
        let mut session = MetricsSession::new();
        session.record(DimensionReport::unavailable(Dimension::Coverage));
        session.record(DimensionReport::measured(Dimension::Coverage, 70.0));
        assert_eq!(session.get(Dimension::Coverage).unwrap().score(), 70.0);
    }

    #[test]
    fn into_reports_fills_gaps_with_unavailable_markers() {
        let mut session = MetricsSession::new();
        session.record(DimensionReport::measured(Dimension::Security, 100.0));
        let reports = session.into_reports();
        assert_eq!(reports.len(), 4);
        assert_eq!(reports[0].dimension, Dimension::Accessibility);
        assert!(!reports[0].is_available());
        assert_eq!(reports[3].score(), 100.0);
    }

    #[tokio::test]
    async fn side_channel_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = MetricsSession::new();
        let mut report = DimensionReport::measured(Dimension::Accessibility, 93.0);
        report.recommend("label the search input");
        session.record(report);
        session.flush(dir.path()).await.unwrap();

        let loaded = load_side_channel(dir.path()).await.unwrap();
        assert_eq!(loaded.score(), 93.0);
        assert_eq!(loaded.recommendations.len(), 1);
    }

    #[tokio::test]
    async fn missing_side_channel_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_side_channel(dir.path()).await.is_none());
    }
}
