//! Unified test-run health reporting: parses a harness result document,
//! merges per-dimension quality measurements (accessibility, performance,
//! coverage, security), and renders a JSON + HTML report.

pub mod aggregate;
pub mod config;
pub mod metrics;
pub mod models;
pub mod parser;
pub mod pipeline;
pub mod report;
pub mod scrape;
