//! Per-dimension metric extractors and the run-scoped session they feed.
//!
//! Each extractor is a pure function from one inspection's measured input to
//! a [`DimensionReport`](crate::models::DimensionReport); a failed inspection
//! degrades to an explicit unavailable marker at the call site rather than
//! failing the run.

pub mod accessibility;
pub mod coverage;
pub mod performance;
pub mod security;
pub mod session;

pub use session::{MetricsSession, SIDE_CHANNEL_FILE, load_side_channel};
