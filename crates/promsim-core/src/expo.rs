//! Text exposition renderer (Prometheus text format, version 0.0.4).
//!
//! One block per family: `# HELP`, `# TYPE`, then one line per label
//! combination. Histograms additionally emit cumulative `_bucket` lines
//! (including `le="+Inf"`) plus `_sum` and `_count`. Families arrive in
//! registration order and each block is contiguous.

use std::fmt::Write;

use crate::desc::{LabelSet, MetricDescriptor};
use crate::registry::{MetricFamily, MetricSamples};

/// Escape a label value.
fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

/// Escape help text (label rules minus the quote).
fn escape_help(v: &str) -> String {
    v.replace('\\', "\\\\").replace('\n', "\\n")
}

/// `k="v",...` for one label set, or empty when the family has no labels.
fn label_str(desc: &MetricDescriptor, labels: &LabelSet) -> String {
    desc.label_names
        .iter()
        .zip(labels.values())
        .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
        .collect::<Vec<_>>()
        .join(",")
}

fn sample_line(out: &mut String, name: &str, labels: &str, value: f64) {
    if labels.is_empty() {
        let _ = writeln!(out, "{name} {value}");
    } else {
        let _ = writeln!(out, "{name}{{{labels}}} {value}");
    }
}

/// Render sampled families into one exposition body.
pub fn render(families: &[MetricFamily]) -> String {
    let mut out = String::new();
    for family in families {
        let desc = &family.desc;
        let _ = writeln!(out, "# HELP {} {}", desc.name, escape_help(&desc.help));
        let _ = writeln!(out, "# TYPE {} {}", desc.name, desc.kind.as_str());

        match &family.samples {
            MetricSamples::Counter(series) => {
                for (labels, value) in series {
                    sample_line(&mut out, &desc.name, &label_str(desc, labels), *value);
                }
            }
            MetricSamples::Histogram {
                upper_bounds,
                series,
            } => {
                for (labels, snap) in series {
                    let labels = label_str(desc, labels);
                    let prefix = if labels.is_empty() {
                        String::new()
                    } else {
                        format!("{labels},")
                    };
                    for (i, le) in upper_bounds.iter().enumerate() {
                        let _ = writeln!(
                            out,
                            "{}_bucket{{{}le=\"{}\"}} {}",
                            desc.name, prefix, le, snap.cumulative_counts[i]
                        );
                    }
                    let _ = writeln!(
                        out,
                        "{}_bucket{{{}le=\"+Inf\"}} {}",
                        desc.name, prefix, snap.count
                    );
                    sample_line(&mut out, &format!("{}_sum", desc.name), &labels, snap.sum);
                    let _ = if labels.is_empty() {
                        writeln!(out, "{}_count {}", desc.name, snap.count)
                    } else {
                        writeln!(out, "{}_count{{{}}} {}", desc.name, labels, snap.count)
                    };
                }
            }
            MetricSamples::Value(v) => {
                sample_line(&mut out, &desc.name, "", *v);
            }
        }
    }
    out
}
