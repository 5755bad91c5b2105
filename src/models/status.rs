use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    Passed,
    Failed,
    Skipped,
    #[default]
    Unknown,
}

impl TestStatus {
    /// Map a harness-specific completion state onto the canonical four statuses.
    /// Aliases of passed/expected count as passed, aliases of failed/unexpected
    /// (including timeouts and interruptions) as failed; everything else that
    /// isn't an explicit skip is unknown.
    pub fn from_raw(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "passed" | "expected" | "ok" => TestStatus::Passed,
            "failed" | "unexpected" | "timedout" | "interrupted" => TestStatus::Failed,
            "skipped" | "pending" => TestStatus::Skipped,
            _ => TestStatus::Unknown,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, TestStatus::Failed)
    }
}
