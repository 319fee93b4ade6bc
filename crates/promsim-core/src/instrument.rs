//! Incrementally-updated instruments: counters and histograms.
//!
//! Both are label-partitioned accumulators backed by `DashMap`, so updates to
//! different label combinations do not block each other. A counter cell is a
//! single CAS-updated atomic; a histogram cell sits behind a per-label-set
//! mutex so one `observe` (buckets + sum + count) lands as a unit and a
//! scrape never reads it half-applied.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use dashmap::DashMap;

use crate::desc::{LabelSet, MetricDescriptor};
use crate::error::{MetricsError, Result};

/// Default latency buckets, in seconds.
pub const DEFAULT_LATENCY_BUCKETS: [f64; 11] = [
    0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

/// Recover the guard from a poisoned mutex; cell state is plain numbers and
/// stays valid even if a holder panicked mid-update.
fn lock_cell<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    match m.lock() {
        Ok(g) => g,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// An f64 accumulator stored as raw bits in an `AtomicU64`.
#[derive(Default, Debug)]
struct CounterCell(AtomicU64);

impl CounterCell {
    fn add(&self, delta: f64) {
        // CAS loop: the closure never returns None, so this cannot fail.
        let _ = self
            .0
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |bits| {
                Some((f64::from_bits(bits) + delta).to_bits())
            });
    }

    fn get(&self) -> f64 {
        f64::from_bits(self.0.load(Ordering::Relaxed))
    }
}

/// Label-partitioned monotonic counter.
#[derive(Debug)]
pub struct CounterVec {
    desc: MetricDescriptor,
    cells: DashMap<LabelSet, CounterCell>,
}

impl CounterVec {
    pub(crate) fn new(desc: MetricDescriptor) -> Self {
        Self {
            desc,
            cells: DashMap::new(),
        }
    }

    pub fn desc(&self) -> &MetricDescriptor {
        &self.desc
    }

    /// Increment by 1.
    pub fn inc(&self, label_values: &[&str]) -> Result<()> {
        self.add(label_values, 1.0)
    }

    /// Add a non-negative delta, creating the label combination at 0 if unseen.
    pub fn add(&self, label_values: &[&str], delta: f64) -> Result<()> {
        let key = label_key(&self.desc, label_values)?;
        if !delta.is_finite() || delta < 0.0 {
            return Err(MetricsError::InvalidDelta {
                name: self.desc.name.clone(),
                delta,
            });
        }
        self.cells.entry(key).or_default().add(delta);
        Ok(())
    }

    /// Point-in-time snapshot, sorted by label values for stable output.
    pub fn snapshot(&self) -> Vec<(LabelSet, f64)> {
        let mut out: Vec<(LabelSet, f64)> = self
            .cells
            .iter()
            .map(|r| (r.key().clone(), r.value().get()))
            .collect();
        out.sort_by(|a, b| a.0.cmp(&b.0));
        out
    }
}

#[derive(Debug)]
struct HistogramCell {
    bucket_counts: Vec<u64>,
    sum: f64,
    count: u64,
}

impl HistogramCell {
    fn new(buckets: usize) -> Self {
        Self {
            bucket_counts: vec![0; buckets],
            sum: 0.0,
            count: 0,
        }
    }
}

/// One label set's cumulative state at scrape time.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramSnapshot {
    /// Cumulative count per upper bound, same order as the descriptor's buckets.
    pub cumulative_counts: Vec<u64>,
    pub sum: f64,
    pub count: u64,
}

/// Label-partitioned histogram with fixed ascending bucket boundaries shared
/// across all label combinations.
#[derive(Debug)]
pub struct HistogramVec {
    desc: MetricDescriptor,
    upper_bounds: Vec<f64>,
    cells: DashMap<LabelSet, Mutex<HistogramCell>>,
}

impl HistogramVec {
    pub(crate) fn new(desc: MetricDescriptor, upper_bounds: Vec<f64>) -> Self {
        Self {
            desc,
            upper_bounds,
            cells: DashMap::new(),
        }
    }

    pub fn desc(&self) -> &MetricDescriptor {
        &self.desc
    }

    pub fn upper_bounds(&self) -> &[f64] {
        &self.upper_bounds
    }

    /// Record one observation: every cumulative bucket whose upper bound is
    /// >= `value` (boundary inclusive) is incremented, plus sum and count.
    pub fn observe(&self, label_values: &[&str], value: f64) -> Result<()> {
        let key = label_key(&self.desc, label_values)?;
        let cell = self
            .cells
            .entry(key)
            .or_insert_with(|| Mutex::new(HistogramCell::new(self.upper_bounds.len())));
        let mut c = lock_cell(&cell);
        for (i, &le) in self.upper_bounds.iter().enumerate() {
            if value <= le {
                c.bucket_counts[i] += 1;
            }
        }
        c.sum += value;
        c.count += 1;
        Ok(())
    }

    /// Point-in-time snapshot, sorted by label values for stable output.
    pub fn snapshot(&self) -> Vec<(LabelSet, HistogramSnapshot)> {
        let mut out: Vec<(LabelSet, HistogramSnapshot)> = self
            .cells
            .iter()
            .map(|r| {
                let c = lock_cell(r.value());
                (
                    r.key().clone(),
                    HistogramSnapshot {
                        cumulative_counts: c.bucket_counts.clone(),
                        sum: c.sum,
                        count: c.count,
                    },
                )
            })
            .collect();
        out.sort_by(|a, b| a.0.cmp(&b.0));
        out
    }
}

/// Check label cardinality against the descriptor and build the map key.
fn label_key(desc: &MetricDescriptor, label_values: &[&str]) -> Result<LabelSet> {
    if label_values.len() != desc.label_names.len() {
        return Err(MetricsError::LabelCardinality {
            name: desc.name.clone(),
            expected: desc.label_names.len(),
            got: label_values.len(),
        });
    }
    Ok(LabelSet::new(label_values))
}
