//! Pull-model instrument: a descriptor plus a compute fn run at scrape time.

use crate::desc::{MetricDescriptor, MetricKind};
use crate::error::{MetricsError, Result};

/// Compute callback for a [`GaugeFn`]. Must be fast and side-effect-free;
/// it runs synchronously inside every scrape.
pub type ComputeFn = Box<dyn Fn() -> Result<f64> + Send + Sync>;

/// A custom-collected instrument: no stored state, no labels. The value is
/// computed fresh on every scrape. The kind may be `Gauge` or `Counter`
/// (for monotonic sources like uptime); either way promsim never stores the
/// result between scrapes.
pub struct GaugeFn {
    desc: MetricDescriptor,
    compute: ComputeFn,
}

impl GaugeFn {
    pub(crate) fn new(name: &str, help: &str, kind: MetricKind, compute: ComputeFn) -> Result<Self> {
        if kind == MetricKind::Histogram {
            return Err(MetricsError::InvalidDescriptor(format!(
                "{name}: gauge fns must be counter or gauge kind"
            )));
        }
        Ok(Self {
            desc: MetricDescriptor::new(name, help, &[], kind),
            compute,
        })
    }

    pub fn desc(&self) -> &MetricDescriptor {
        &self.desc
    }

    /// Run the compute fn; any failure is reported as a collection error
    /// carrying this metric's name.
    pub fn compute(&self) -> Result<f64> {
        (self.compute)().map_err(|e| match e {
            already @ MetricsError::Collection { .. } => already,
            other => MetricsError::Collection {
                name: self.desc.name.clone(),
                reason: other.to_string(),
            },
        })
    }
}
