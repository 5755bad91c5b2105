use std::path::{Path, PathBuf};

use clap::Parser;
use serde::Deserialize;

/// Generate a unified health report from a test-run result document.
#[derive(Debug, Parser)]
#[command(name = "vitals", version, about)]
pub struct CliArgs {
    /// Path to the harness result JSON.
    #[arg(default_value = "test-results/results.json")]
    pub results: PathBuf,

    /// Directory the report files are written to (overrides vitals.toml).
    #[arg(short = 'o', long = "output-dir")]
    pub output_dir: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub project: ProjectConfig,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub coverage: CoverageConfig,
}

#[derive(Debug, Deserialize)]
pub struct ProjectConfig {
    #[serde(default = "default_project_name")]
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default = "default_environment")]
    pub environment: String,
}

#[derive(Debug, Deserialize)]
pub struct ReportConfig {
    /// Where snapshots and the `latest.*` files land.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

/// Controls which resources are excluded from coverage accounting.
#[derive(Debug, Deserialize)]
pub struct CoverageConfig {
    /// URL substrings identifying test-tooling resources rather than
    /// application code.
    #[serde(default = "default_tooling_patterns")]
    pub tooling_patterns: Vec<String>,
}

fn default_project_name() -> String {
    "unnamed-project".into()
}

fn default_environment() -> String {
    "local".into()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("test-results/report")
}

fn default_tooling_patterns() -> Vec<String> {
    ["node_modules", "webpack", "@vite", "hot-update"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: default_project_name(),
            version: String::new(),
            environment: default_environment(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
        }
    }
}

impl Default for CoverageConfig {
    fn default() -> Self {
        Self {
            tooling_patterns: default_tooling_patterns(),
        }
    }
}

impl Config {
    /// Load `vitals.toml` from `dir`, falling back to defaults if absent or
    /// invalid.
    pub fn load(dir: &Path) -> Self {
        let path = dir.join("vitals.toml");
        let Ok(content) = std::fs::read_to_string(&path) else {
            return Self::default();
        };
        toml::from_str(&content).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path());
        assert_eq!(config.project.name, "unnamed-project");
        assert_eq!(config.report.output_dir, PathBuf::from("test-results/report"));
        assert!(config.coverage.tooling_patterns.contains(&"node_modules".to_string()));
    }

    #[test]
    fn partial_config_keeps_unset_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("vitals.toml"),
            "[project]\nname = \"shop-frontend\"\nversion = \"3.2.1\"\n",
        )
        .unwrap();
        let config = Config::load(dir.path());
        assert_eq!(config.project.name, "shop-frontend");
        assert_eq!(config.project.environment, "local");
        assert_eq!(config.report.output_dir, PathBuf::from("test-results/report"));
    }

    #[test]
    fn invalid_toml_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("vitals.toml"), "not [valid").unwrap();
        assert_eq!(Config::load(dir.path()).project.name, "unnamed-project");
    }
}
