//! Shared application state for the promsim server.
//!
//! Owns the single process-wide registry and the instrument handles the
//! request path writes through. All instruments are registered here, once,
//! before either listener starts serving.

use std::sync::Arc;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use promsim_core::{
    CounterVec, HistogramVec, MetricKind, MetricsError, Registry, Result, DEFAULT_LATENCY_BUCKETS,
};

use crate::config::ServiceConfig;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: ServiceConfig,
    registry: Arc<Registry>,
    http_requests: Arc<CounterVec>,
    http_request_errors: Arc<CounterVec>,
    request_duration: Arc<HistogramVec>,
}

impl AppState {
    /// Build application state and register every instrument.
    /// A duplicate metric name here aborts startup.
    pub fn new(cfg: ServiceConfig) -> Result<Self> {
        let registry = Arc::new(Registry::new());

        let http_requests = registry.register_counter(
            "http_requests_total",
            "Total number of HTTP requests",
            &["method", "path"],
        )?;
        let http_request_errors = registry.register_counter(
            "http_request_errors_total",
            "Total number of failed HTTP requests",
            &["method", "path", "status_code"],
        )?;
        let request_duration = registry.register_histogram(
            "http_request_duration_seconds",
            "Duration of HTTP requests in seconds",
            &["method", "path"],
            &DEFAULT_LATENCY_BUCKETS,
        )?;

        // Synthetic pull-model metrics: computed fresh at each scrape, never
        // stored between scrapes.
        registry.register_gauge_fn(
            "foo_metric",
            "A foo event has occurred",
            MetricKind::Gauge,
            Box::new(|| {
                SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .map(|d| d.as_secs_f64())
                    .map_err(|e| MetricsError::Collection {
                        name: "foo_metric".into(),
                        reason: e.to_string(),
                    })
            }),
        )?;

        let started = Instant::now();
        registry.register_gauge_fn(
            "bar_metric",
            "A bar event has occurred",
            MetricKind::Counter,
            Box::new(move || Ok(started.elapsed().as_secs_f64())),
        )?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                cfg,
                registry,
                http_requests,
                http_request_errors,
                request_duration,
            }),
        })
    }

    pub fn cfg(&self) -> &ServiceConfig {
        &self.inner.cfg
    }

    pub fn registry(&self) -> Arc<Registry> {
        Arc::clone(&self.inner.registry)
    }

    /// Write path for every served application request.
    pub fn record_request(&self, method: &str, path: &str, elapsed_secs: f64) -> Result<()> {
        self.inner.http_requests.inc(&[method, path])?;
        self.inner
            .request_duration
            .observe(&[method, path], elapsed_secs)
    }

    /// Write path for requests answered with an error status.
    pub fn record_error(&self, method: &str, path: &str, status_code: &str) -> Result<()> {
        self.inner
            .http_request_errors
            .inc(&[method, path, status_code])
    }
}
