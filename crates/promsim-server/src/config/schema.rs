use std::net::SocketAddr;

use promsim_core::{MetricsError, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,
}

impl ServiceConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(MetricsError::Config("config version must be 1".into()));
        }
        self.server.validate()?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    /// Application listener (HTML pages).
    #[serde(default = "default_app_listen")]
    pub app_listen: String,

    /// Metrics/ops listener (`/metrics`, `/healthz`).
    #[serde(default = "default_metrics_listen")]
    pub metrics_listen: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            app_listen: default_app_listen(),
            metrics_listen: default_metrics_listen(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        let app: SocketAddr = self.app_listen.parse().map_err(|_| {
            MetricsError::Config("server.app_listen must be a valid socket address".into())
        })?;
        let metrics: SocketAddr = self.metrics_listen.parse().map_err(|_| {
            MetricsError::Config("server.metrics_listen must be a valid socket address".into())
        })?;
        if app == metrics {
            return Err(MetricsError::Config(
                "server.app_listen and server.metrics_listen must differ".into(),
            ));
        }
        Ok(())
    }
}

fn default_app_listen() -> String {
    "0.0.0.0:8000".into()
}
fn default_metrics_listen() -> String {
    "0.0.0.0:8080".into()
}
