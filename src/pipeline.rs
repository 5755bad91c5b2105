//! End-to-end report generation: result document in, JSON + HTML report out.
//!
//! Dimension data is gathered in precedence order: structured attachment
//! blobs first, then the accessibility side-channel file, and finally the
//! stdout scrape for whatever is still missing.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::{info, warn};

use crate::aggregate::build_report;
use crate::config::Config;
use crate::metrics::coverage::{self, ResourceCoverage};
use crate::metrics::{MetricsSession, load_side_channel};
use crate::models::{Dimension, DimensionReport, ReportMetadata};
use crate::parser::{self, Attachment, RunDocument};
use crate::report::{ReportPaths, write_all};
use crate::scrape;

/// Attachment names carrying a structured dimension report.
fn dimension_for_attachment(name: &str) -> Option<Dimension> {
    match name {
        "accessibility-report" => Some(Dimension::Accessibility),
        "performance-report" => Some(Dimension::Performance),
        "coverage-report" => Some(Dimension::Coverage),
        "security-report" => Some(Dimension::Security),
        _ => None,
    }
}

async fn attachment_payload(attachment: &Attachment) -> Option<String> {
    if let Some(body) = &attachment.body {
        return Some(body.clone());
    }
    let path = attachment.path.as_ref()?;
    match tokio::fs::read_to_string(path).await {
        Ok(content) => Some(content),
        Err(e) => {
            warn!(path = %path, error = %e, "could not read attachment payload");
            None
        }
    }
}

/// Parse structured dimension reports out of the run's attachments and
/// record them into the session. A `coverage-report` attachment may also
/// carry the collector's raw per-resource byte ranges, which are scored here
/// with the configured tooling exclusions. Unparseable payloads degrade with
/// a warning.
async fn ingest_attachments(session: &mut MetricsSession, doc: &RunDocument, config: &Config) {
    for attachment in parser::collect_attachments(doc) {
        let Some(dimension) = dimension_for_attachment(&attachment.name) else {
            continue;
        };
        let Some(payload) = attachment_payload(attachment).await else {
            continue;
        };
        match serde_json::from_str::<DimensionReport>(&payload) {
            Ok(report) if report.dimension == dimension => session.record(report),
            Ok(report) => warn!(
                attachment = %attachment.name,
                found = report.dimension.label(),
                "attachment name and report dimension disagree, skipping"
            ),
            Err(e) => {
                if dimension == Dimension::Coverage
                    && let Ok(resources) = serde_json::from_str::<Vec<ResourceCoverage>>(&payload)
                {
                    session.record(coverage::report(
                        &resources,
                        &config.coverage.tooling_patterns,
                    ));
                } else {
                    warn!(
                        attachment = %attachment.name,
                        error = %e,
                        "attachment is not a structured dimension report"
                    );
                }
            }
        }
    }
}

/// Run the whole pipeline over an already-read result document.
pub async fn generate(
    raw_results: &str,
    results_dir: &Path,
    output_dir: &Path,
    config: &Config,
) -> Result<ReportPaths> {
    let doc = parser::parse(raw_results)?;
    let outcomes = parser::flatten(&doc);
    let failed = outcomes.iter().filter(|o| o.status.is_failure()).count();
    info!(tests = outcomes.len(), failed, "parsed result document");

    let mut session = MetricsSession::new();
    ingest_attachments(&mut session, &doc, config).await;

    // The side-channel keeps violation detail written by the test process;
    // it only fills in when no attachment already supplied the dimension.
    if let Some(report) = load_side_channel(results_dir).await {
        session.record(report);
    }

    let mut dimensions = session.into_reports();
    let missing: Vec<&str> = dimensions
        .iter()
        .filter(|r| !r.is_available())
        .map(|r| r.dimension.label())
        .collect();
    if !missing.is_empty() {
        warn!(?missing, "no structured data, falling back to stdout scrape");
        let scraped = scrape::scrape(&parser::collect_stdout(&doc));
        scrape::fill_gaps(&mut dimensions, &scraped);
    }

    let metadata = ReportMetadata {
        project: config.project.name.clone(),
        version: config.project.version.clone(),
        environment: config.project.environment.clone(),
        run_id: Utc::now().format("%Y%m%d%H%M%S").to_string(),
    };

    let report = build_report(outcomes, dimensions, metadata);
    write_all(&report, output_dir).await
}

/// Read the result document from disk and generate the report next to it.
pub async fn generate_from_file(
    results_path: &Path,
    output_dir: &Path,
    config: &Config,
) -> Result<ReportPaths> {
    let raw = tokio::fs::read_to_string(results_path)
        .await
        .with_context(|| format!("failed to read {}", results_path.display()))?;
    let results_dir = results_path.parent().unwrap_or(Path::new("."));
    generate(&raw, results_dir, output_dir, config).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_known_attachment_names_map_to_dimensions() {
        assert_eq!(
            dimension_for_attachment("coverage-report"),
            Some(Dimension::Coverage)
        );
        assert_eq!(dimension_for_attachment("screenshot"), None);
    }
}
