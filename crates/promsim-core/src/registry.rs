//! Process-wide instrument registry.
//!
//! Owns every descriptor, enforces name uniqueness, and produces the
//! point-in-time families the exposition endpoint renders. One instance is
//! constructed at startup and shared via `Arc`; there is no hidden global.

use std::sync::{Arc, Mutex, MutexGuard};

use dashmap::DashMap;

use crate::collector::{ComputeFn, GaugeFn};
use crate::desc::{LabelSet, MetricDescriptor, MetricKind};
use crate::error::{MetricsError, Result};
use crate::instrument::{CounterVec, HistogramSnapshot, HistogramVec};

enum MetricSlot {
    Counter(Arc<CounterVec>),
    Histogram(Arc<HistogramVec>),
    GaugeFn(Arc<GaugeFn>),
}

/// Sampled values for one metric family.
pub enum MetricSamples {
    Counter(Vec<(LabelSet, f64)>),
    Histogram {
        upper_bounds: Vec<f64>,
        series: Vec<(LabelSet, HistogramSnapshot)>,
    },
    /// Single unlabeled value from a gauge fn.
    Value(f64),
}

/// One descriptor plus its sampled values, as handed to the renderer.
pub struct MetricFamily {
    pub desc: MetricDescriptor,
    pub samples: MetricSamples,
}

#[derive(Default)]
pub struct Registry {
    slots: DashMap<String, MetricSlot>,
    // Registration order; exposition renders families in this order.
    order: Mutex<Vec<String>>,
}

fn lock_order(m: &Mutex<Vec<String>>) -> MutexGuard<'_, Vec<String>> {
    match m.lock() {
        Ok(g) => g,
        Err(poisoned) => poisoned.into_inner(),
    }
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a counter family. The returned handle is the write path for
    /// request-handling code.
    pub fn register_counter(
        &self,
        name: &str,
        help: &str,
        label_names: &[&str],
    ) -> Result<Arc<CounterVec>> {
        let desc = MetricDescriptor::new(name, help, label_names, MetricKind::Counter);
        let counter = Arc::new(CounterVec::new(desc));
        self.insert(name, MetricSlot::Counter(Arc::clone(&counter)))?;
        Ok(counter)
    }

    /// Register a histogram family with fixed ascending bucket boundaries.
    pub fn register_histogram(
        &self,
        name: &str,
        help: &str,
        label_names: &[&str],
        upper_bounds: &[f64],
    ) -> Result<Arc<HistogramVec>> {
        if upper_bounds.is_empty() {
            return Err(MetricsError::InvalidDescriptor(format!(
                "{name}: histogram needs at least one bucket"
            )));
        }
        if upper_bounds.windows(2).any(|w| w[0] >= w[1]) {
            return Err(MetricsError::InvalidDescriptor(format!(
                "{name}: bucket boundaries must be strictly ascending"
            )));
        }
        let desc = MetricDescriptor::new(name, help, label_names, MetricKind::Histogram);
        let hist = Arc::new(HistogramVec::new(desc, upper_bounds.to_vec()));
        self.insert(name, MetricSlot::Histogram(Arc::clone(&hist)))?;
        Ok(hist)
    }

    /// Register a pull-model instrument: its value is computed fresh on every
    /// scrape, never stored.
    pub fn register_gauge_fn(
        &self,
        name: &str,
        help: &str,
        kind: MetricKind,
        compute: ComputeFn,
    ) -> Result<()> {
        let gauge = Arc::new(GaugeFn::new(name, help, kind, compute)?);
        self.insert(name, MetricSlot::GaugeFn(gauge))
    }

    fn insert(&self, name: &str, slot: MetricSlot) -> Result<()> {
        if name.is_empty() {
            return Err(MetricsError::InvalidDescriptor(
                "metric name must not be empty".into(),
            ));
        }
        match self.slots.entry(name.to_string()) {
            dashmap::mapref::entry::Entry::Occupied(_) => {
                return Err(MetricsError::DuplicateName(name.to_string()));
            }
            dashmap::mapref::entry::Entry::Vacant(v) => {
                v.insert(slot);
            }
        }
        lock_order(&self.order).push(name.to_string());
        Ok(())
    }

    /// Sample every registered family, in registration order.
    ///
    /// Counter/histogram families read their stored accumulators; gauge fns
    /// run their compute now. A failing compute drops only its own family:
    /// the failure is logged and the scrape still succeeds.
    pub fn collect_all(&self) -> Vec<MetricFamily> {
        let names: Vec<String> = lock_order(&self.order).clone();
        let mut out = Vec::with_capacity(names.len());
        for name in &names {
            let Some(slot) = self.slots.get(name) else {
                continue;
            };
            match slot.value() {
                MetricSlot::Counter(c) => out.push(MetricFamily {
                    desc: c.desc().clone(),
                    samples: MetricSamples::Counter(c.snapshot()),
                }),
                MetricSlot::Histogram(h) => out.push(MetricFamily {
                    desc: h.desc().clone(),
                    samples: MetricSamples::Histogram {
                        upper_bounds: h.upper_bounds().to_vec(),
                        series: h.snapshot(),
                    },
                }),
                MetricSlot::GaugeFn(g) => match g.compute() {
                    Ok(v) => out.push(MetricFamily {
                        desc: g.desc().clone(),
                        samples: MetricSamples::Value(v),
                    }),
                    Err(err) => {
                        tracing::warn!(metric = %name, %err, "collector failed, family omitted");
                    }
                },
            }
        }
        out
    }
}
