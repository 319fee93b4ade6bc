//! Histogram bucketing properties.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;
use std::thread;

use promsim_core::{MetricsError, Registry, DEFAULT_LATENCY_BUCKETS};

#[test]
fn cumulative_buckets_sum_and_count() {
    let registry = Registry::new();
    let h = registry
        .register_histogram("latency_seconds", "Latency", &["route"], &[1.0, 5.0])
        .unwrap();

    for v in [0.5, 3.0, 10.0] {
        h.observe(&["/"], v).unwrap();
    }

    let snap = h.snapshot();
    assert_eq!(snap.len(), 1);
    let s = &snap[0].1;
    assert_eq!(s.cumulative_counts, vec![1, 2]);
    assert_eq!(s.sum, 13.5);
    assert_eq!(s.count, 3);
}

#[test]
fn boundary_value_falls_into_its_bucket() {
    let registry = Registry::new();
    let h = registry
        .register_histogram("latency_seconds", "Latency", &[], &[1.0, 5.0])
        .unwrap();

    h.observe(&[], 5.0).unwrap();

    let s = &h.snapshot()[0].1;
    assert_eq!(s.cumulative_counts, vec![0, 1]);
}

#[test]
fn wrong_label_cardinality_alters_nothing() {
    let registry = Registry::new();
    let h = registry
        .register_histogram(
            "http_request_duration_seconds",
            "Duration",
            &["method", "path"],
            &DEFAULT_LATENCY_BUCKETS,
        )
        .unwrap();

    let err = h.observe(&["GET"], 0.1).expect_err("must fail");
    assert!(matches!(err, MetricsError::LabelCardinality { .. }));
    assert!(h.snapshot().is_empty());
}

#[test]
fn concurrent_observes_keep_count_consistent() {
    let registry = Registry::new();
    let h = registry
        .register_histogram("latency_seconds", "Latency", &["route"], &[0.5, 1.0])
        .unwrap();

    let mut handles = Vec::new();
    for _ in 0..4 {
        let h = Arc::clone(&h);
        handles.push(thread::spawn(move || {
            for _ in 0..500 {
                h.observe(&["/"], 0.25).unwrap();
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    let s = &h.snapshot()[0].1;
    assert_eq!(s.count, 2000);
    assert_eq!(s.cumulative_counts, vec![2000, 2000]);
    assert_eq!(s.sum, 500.0);
}

#[test]
fn buckets_must_be_ascending_and_non_empty() {
    let registry = Registry::new();

    let err = registry
        .register_histogram("h", "h", &[], &[])
        .expect_err("empty buckets");
    assert!(matches!(err, MetricsError::InvalidDescriptor(_)));

    let err = registry
        .register_histogram("h", "h", &[], &[1.0, 1.0])
        .expect_err("non-ascending buckets");
    assert!(matches!(err, MetricsError::InvalidDescriptor(_)));
}
