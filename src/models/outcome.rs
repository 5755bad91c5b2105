use serde::{Deserialize, Serialize};

use super::status::TestStatus;

/// The flattened record of one test's execution, one per (test × project)
/// entry in the result document. Immutable once built.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TestOutcome {
    pub title: String,
    /// Enclosing suite titles, outermost first.
    pub suite_path: Vec<String>,
    pub status: TestStatus,
    pub duration_ms: u64,
    pub tags: Vec<String>,
    /// Browser project that executed the test, when the harness reports one.
    pub project: Option<String>,
    /// First error message attached to the attempt, if any.
    pub error: Option<String>,
}

impl TestOutcome {
    /// Full display name: suite path joined with the test title.
    pub fn full_title(&self) -> String {
        if self.suite_path.is_empty() {
            self.title.clone()
        } else {
            format!("{} › {}", self.suite_path.join(" › "), self.title)
        }
    }
}

/// Extract `@tag` tokens from a test title, without the leading `@`.
pub fn extract_tags(title: &str) -> Vec<String> {
    title
        .split_whitespace()
        .filter_map(|token| token.strip_prefix('@'))
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}
