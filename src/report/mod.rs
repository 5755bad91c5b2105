//! Report persistence: every generation writes a timestamp-suffixed snapshot
//! plus fixed `latest.json` / `latest.html` files so CI consumers always have
//! a stable path to the newest run.

pub mod html;
pub mod json;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::info;

use crate::models::UnifiedReportData;

#[derive(Debug, Clone)]
pub struct ReportPaths {
    pub json_snapshot: PathBuf,
    pub json_latest: PathBuf,
    pub html_snapshot: PathBuf,
    pub html_latest: PathBuf,
}

/// Serialize the report and write all four files under `dir`, creating it if
/// absent. A write failure is fatal and propagates; there is nothing to retry
/// for a local filesystem write.
pub async fn write_all(report: &UnifiedReportData, dir: &Path) -> Result<ReportPaths> {
    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("failed to create report directory {}", dir.display()))?;

    let stamp = Utc::now().format("%Y%m%d%H%M%S");
    let paths = ReportPaths {
        json_snapshot: dir.join(format!("report-{stamp}.json")),
        json_latest: dir.join("latest.json"),
        html_snapshot: dir.join(format!("report-{stamp}.html")),
        html_latest: dir.join("latest.html"),
    };

    let json = json::to_json(report)?;
    let html = html::render(report)?;

    for (path, content) in [
        (&paths.json_snapshot, &json),
        (&paths.json_latest, &json),
        (&paths.html_snapshot, &html),
        (&paths.html_latest, &html),
    ] {
        tokio::fs::write(path, content)
            .await
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    info!(dir = %dir.display(), "report written");
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::build_report;
    use crate::models::{ReportMetadata, UnifiedReportData};

    fn sample() -> UnifiedReportData {
        build_report(vec![], vec![], ReportMetadata::default())
    }

    #[tokio::test]
    async fn writes_snapshot_and_latest_files() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested").join("report");
        let paths = write_all(&sample(), &out).await.unwrap();

        assert!(paths.json_latest.exists());
        assert!(paths.html_latest.exists());
        assert!(paths.json_snapshot.exists());
        assert!(
            paths
                .json_snapshot
                .file_name()
                .unwrap()
                .to_string_lossy()
                .starts_with("report-")
        );

        let raw = std::fs::read_to_string(&paths.json_latest).unwrap();
        let back: UnifiedReportData = serde_json::from_str(&raw).unwrap();
        assert_eq!(back.summary.total, 0);
    }

    #[tokio::test]
    async fn unwritable_directory_is_a_hard_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("blocker");
        std::fs::write(&file, "x").unwrap();
        // Using a regular file as the output directory must fail loudly.
        assert!(write_all(&sample(), &file).await.is_err());
    }
}
