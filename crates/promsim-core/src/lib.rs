//! promsim core: the metrics registry, instruments, and exposition renderer.
//!
//! This crate defines the instruments the server updates on the request path
//! (counters, histograms), the pull-model gauge fns sampled at scrape time,
//! and the text exposition format they are rendered into. It intentionally
//! carries no transport or runtime dependencies so it can be reused in
//! multiple contexts.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `MetricsError`/`Result` so a bad label
//! slice or a failing collector never crashes the process.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod collector;
pub mod desc;
pub mod error;
pub mod expo;
pub mod instrument;
pub mod registry;

/// Shared result type.
pub use error::{MetricsError, Result};

pub use collector::GaugeFn;
pub use desc::{LabelSet, MetricDescriptor, MetricKind};
pub use instrument::{CounterVec, HistogramSnapshot, HistogramVec, DEFAULT_LATENCY_BUCKETS};
pub use registry::{MetricFamily, MetricSamples, Registry};
