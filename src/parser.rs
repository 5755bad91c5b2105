//! Parser for the harness result document: a nested suite/spec/test tree
//! flattened into a deterministic list of [`TestOutcome`]s.
//!
//! Real-world documents vary in what gets attached per test, so every field
//! defaults when missing; only syntactically invalid JSON is an error.

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::models::{TestOutcome, TestStatus, extract_tags};

#[derive(Debug, Default, Deserialize)]
pub struct RunDocument {
    #[serde(default)]
    pub stats: RunStats,
    #[serde(default)]
    pub suites: Vec<Suite>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RunStats {
    #[serde(default)]
    pub expected: usize,
    #[serde(default)]
    pub unexpected: usize,
    #[serde(default)]
    pub skipped: usize,
    #[serde(default)]
    pub duration: f64,
}

#[derive(Debug, Default, Deserialize)]
pub struct Suite {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub suites: Vec<Suite>,
    #[serde(default)]
    pub specs: Vec<Spec>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Spec {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub file: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub tests: Vec<TestEntry>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestEntry {
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default)]
    pub results: Vec<Attempt>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Attempt {
    #[serde(default)]
    pub status: String,
    /// Milliseconds.
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub errors: Vec<ErrorEntry>,
    #[serde(default)]
    pub stdout: Vec<StdoutEntry>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ErrorEntry {
    #[serde(default)]
    pub message: String,
}

/// Captured console text arrives either as a bare string or `{ "text": … }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum StdoutEntry {
    Text { text: String },
    Line(String),
}

impl StdoutEntry {
    pub fn as_str(&self) -> &str {
        match self {
            StdoutEntry::Text { text } => text,
            StdoutEntry::Line(line) => line,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub content_type: String,
    /// On-disk location of the attachment payload, when written out.
    #[serde(default)]
    pub path: Option<String>,
    /// Inline payload, when small enough for the harness to embed.
    #[serde(default)]
    pub body: Option<String>,
}

pub fn parse(raw: &str) -> Result<RunDocument> {
    serde_json::from_str(raw).context("failed to parse result document JSON")
}

/// Flatten the suite tree into outcomes, suite-first depth-first, so report
/// ordering is reproducible across identical input. One outcome per test
/// entry, taken from its first attempt.
pub fn flatten(doc: &RunDocument) -> Vec<TestOutcome> {
    let mut outcomes = Vec::new();
    let mut path = Vec::new();
    for suite in &doc.suites {
        flatten_suite(suite, &mut path, &mut outcomes);
    }
    outcomes
}

fn flatten_suite(suite: &Suite, path: &mut Vec<String>, outcomes: &mut Vec<TestOutcome>) {
    if !suite.title.is_empty() {
        path.push(suite.title.clone());
    }
    for child in &suite.suites {
        flatten_suite(child, path, outcomes);
    }
    for spec in &suite.specs {
        for test in &spec.tests {
            outcomes.push(outcome_for(spec, test, path));
        }
    }
    if !suite.title.is_empty() {
        path.pop();
    }
}

fn outcome_for(spec: &Spec, test: &TestEntry, path: &[String]) -> TestOutcome {
    let attempt = test.results.first();
    let mut tags = spec.tags.clone();
    for tag in extract_tags(&spec.title) {
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    TestOutcome {
        title: spec.title.clone(),
        suite_path: path.to_vec(),
        status: attempt
            .map(|a| TestStatus::from_raw(&a.status))
            .unwrap_or_default(),
        duration_ms: attempt.map(|a| a.duration.max(0.0) as u64).unwrap_or(0),
        tags,
        project: test.project_name.clone(),
        error: attempt
            .and_then(|a| a.errors.first())
            .map(|e| e.message.clone()),
    }
}

/// Concatenate every captured stdout line across the run, in traversal order.
pub fn collect_stdout(doc: &RunDocument) -> String {
    let mut out = String::new();
    visit_attempts(doc, &mut |attempt| {
        for entry in &attempt.stdout {
            out.push_str(entry.as_str());
            if !entry.as_str().ends_with('\n') {
                out.push('\n');
            }
        }
    });
    out
}

/// All attachments across the run, in traversal order.
pub fn collect_attachments(doc: &RunDocument) -> Vec<&Attachment> {
    let mut attachments = Vec::new();
    visit_attempts(doc, &mut |attempt| {
        attachments.extend(attempt.attachments.iter());
    });
    attachments
}

fn visit_attempts<'a>(doc: &'a RunDocument, f: &mut impl FnMut(&'a Attempt)) {
    fn walk<'a>(suite: &'a Suite, f: &mut impl FnMut(&'a Attempt)) {
        for child in &suite.suites {
            walk(child, f);
        }
        for spec in &suite.specs {
            for test in &spec.tests {
                for attempt in &test.results {
                    f(attempt);
                }
            }
        }
    }
    for suite in &doc.suites {
        walk(suite, f);
    }
}
