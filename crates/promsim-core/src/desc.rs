//! Metric descriptors and label keys.

/// Instrument kind, as emitted on the `# TYPE` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Counter,
    Histogram,
    Gauge,
}

impl MetricKind {
    /// String representation used in the exposition format.
    pub fn as_str(self) -> &'static str {
        match self {
            MetricKind::Counter => "counter",
            MetricKind::Histogram => "histogram",
            MetricKind::Gauge => "gauge",
        }
    }
}

/// Identity of one metric family: name, help text, label names, and kind.
///
/// Label names are fixed at creation; every update must supply exactly one
/// value per name, in the same order.
#[derive(Debug, Clone)]
pub struct MetricDescriptor {
    pub name: String,
    pub help: String,
    pub label_names: Vec<String>,
    pub kind: MetricKind,
}

impl MetricDescriptor {
    pub fn new(name: &str, help: &str, label_names: &[&str], kind: MetricKind) -> Self {
        Self {
            name: name.to_string(),
            help: help.to_string(),
            label_names: label_names.iter().map(|s| s.to_string()).collect(),
            kind,
        }
    }
}

/// One concrete assignment of values to a descriptor's label names.
///
/// Values are kept in descriptor order, so sequence equality is label-set
/// equality. Used as the accumulator map key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LabelSet(Vec<String>);

impl LabelSet {
    pub fn new(values: &[&str]) -> Self {
        Self(values.iter().map(|s| s.to_string()).collect())
    }

    pub fn values(&self) -> &[String] {
        &self.0
    }
}
