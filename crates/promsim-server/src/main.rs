//! promsim server
//!
//! Two listeners, mirroring the sidecar-scrape topology this service exists
//! to exercise:
//! - application listener: HTML pages on `/`, `/startup`, `/liveness`
//! - metrics listener: `/metrics` exposition + `/healthz`

use std::net::SocketAddr;

use tracing_subscriber::{fmt, EnvFilter};

use promsim_server::{app_state, config, router};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cfg = config::load_from_file("promsim.yaml").expect("config load failed");
    let app_listen: SocketAddr = cfg
        .server
        .app_listen
        .parse()
        .expect("server.app_listen must be a valid SocketAddr");
    let metrics_listen: SocketAddr = cfg
        .server
        .metrics_listen
        .parse()
        .expect("server.metrics_listen must be a valid SocketAddr");

    let state = app_state::AppState::new(cfg).expect("app state init failed");
    let app = router::build_app_router(state.clone());
    let ops = router::build_ops_router(state);

    tracing::info!(%app_listen, %metrics_listen, "promsim starting");

    let app_listener = tokio::net::TcpListener::bind(app_listen)
        .await
        .expect("failed to bind app listener");
    let ops_listener = tokio::net::TcpListener::bind(metrics_listen)
        .await
        .expect("failed to bind metrics listener");

    tokio::spawn(async move {
        if let Err(err) = axum::serve(app_listener, app).await {
            tracing::error!(%err, "app server failed");
        }
    });

    axum::serve(ops_listener, ops).await.expect("metrics server failed");
}
