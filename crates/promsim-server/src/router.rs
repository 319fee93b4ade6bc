//! Axum router wiring for the two listeners.
//!
//! The application router serves the landing page routes; the ops router
//! serves `/healthz` and `/metrics` on the separate metrics listener.

use axum::{routing::get, Router};

use crate::{app_state::AppState, ops, pages};

pub fn build_app_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::entrypoint))
        .route("/startup", get(pages::entrypoint))
        .route("/liveness", get(pages::entrypoint))
        .fallback(pages::not_found)
        .with_state(state)
}

pub fn build_ops_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(ops::healthz))
        .route("/metrics", get(ops::metrics))
        .with_state(state)
}
