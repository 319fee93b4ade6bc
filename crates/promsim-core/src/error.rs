//! Shared error type across promsim crates.

use thiserror::Error;

/// Shared result type.
pub type Result<T> = std::result::Result<T, MetricsError>;

/// Unified error type used by core and server.
#[derive(Debug, Error)]
pub enum MetricsError {
    /// A metric with this name is already registered (kind does not matter).
    #[error("duplicate metric name: {0}")]
    DuplicateName(String),
    /// The caller passed the wrong number of label values.
    #[error("{name}: expected {expected} label values, got {got}")]
    LabelCardinality {
        name: String,
        expected: usize,
        got: usize,
    },
    /// Counters only move forward; negative or non-finite deltas are rejected.
    #[error("{name}: invalid counter delta {delta}")]
    InvalidDelta { name: String, delta: f64 },
    /// A gauge fn failed at scrape time. Isolated to its own metric family.
    #[error("{name}: collection failed: {reason}")]
    Collection { name: String, reason: String },
    /// A descriptor was rejected at registration time.
    #[error("invalid descriptor: {0}")]
    InvalidDescriptor(String),
    /// Startup configuration problem.
    #[error("config: {0}")]
    Config(String),
}
