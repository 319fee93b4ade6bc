//! Application page handlers: the only producers of metric updates.
//!
//! Every served request increments `http_requests_total` and observes
//! `http_request_duration_seconds`; unknown routes land in the fallback and
//! count into `http_request_errors_total`.

use std::time::Instant;

use axum::extract::State;
use axum::http::{Method, StatusCode, Uri};
use axum::response::{Html, IntoResponse};

use crate::app_state::AppState;

const LANDING_HTML: &str = r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>promsim</title>
  <style>
    body { font-family: system-ui, sans-serif; background: #10141c; color: #e6e8ee;
           display: flex; min-height: 100vh; align-items: center; justify-content: center; }
    main { text-align: center; padding: 3rem 4rem; border: 1px solid #2a3244; border-radius: 12px; }
    h1 { letter-spacing: 0.2em; }
    p { color: #8b93a7; }
    code { color: #9ecbff; }
  </style>
</head>
<body>
<main>
  <h1>PROMSIM</h1>
  <p>Synthetic metrics target. Every hit on <code>/</code>, <code>/startup</code>,
     or <code>/liveness</code> is counted and timed.</p>
  <p>Scrape the metrics listener at <code>/metrics</code>.</p>
</main>
</body>
</html>
"#;

/// Serves the landing page on `/`, `/startup`, and `/liveness`.
pub async fn entrypoint(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
) -> Html<&'static str> {
    let start = Instant::now();
    let resp = Html(LANDING_HTML);

    if let Err(err) = state.record_request(method.as_str(), uri.path(), start.elapsed().as_secs_f64())
    {
        tracing::error!(%err, "request metrics update failed");
    }
    resp
}

/// Fallback for unknown routes: plain 404, counted as a request error.
pub async fn not_found(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
) -> impl IntoResponse {
    if let Err(err) = state.record_error(method.as_str(), uri.path(), "404") {
        tracing::error!(%err, "error metrics update failed");
    }
    (StatusCode::NOT_FOUND, "not found")
}
