//! End-to-end write path -> scrape body checks, without the network.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use promsim_core::{expo, MetricsError};
use promsim_server::{app_state::AppState, config};

fn state() -> AppState {
    let cfg = config::load_from_str("version: 1\n").unwrap();
    AppState::new(cfg).unwrap()
}

#[test]
fn registers_all_instruments_at_startup() {
    let state = state();
    let families = state.registry().collect_all();
    let names: Vec<&str> = families.iter().map(|f| f.desc.name.as_str()).collect();
    assert_eq!(
        names,
        [
            "http_requests_total",
            "http_request_errors_total",
            "http_request_duration_seconds",
            "foo_metric",
            "bar_metric",
        ]
    );
}

#[test]
fn recorded_requests_show_up_in_the_scrape_body() {
    let state = state();
    for _ in 0..3 {
        state.record_request("GET", "/", 0.002).unwrap();
    }
    state.record_error("GET", "/missing", "404").unwrap();

    let body = expo::render(&state.registry().collect_all());
    assert!(body.contains("http_requests_total{method=\"GET\",path=\"/\"} 3\n"));
    assert!(body.contains(
        "http_request_errors_total{method=\"GET\",path=\"/missing\",status_code=\"404\"} 1\n"
    ));
    assert!(body
        .contains("http_request_duration_seconds_bucket{method=\"GET\",path=\"/\",le=\"0.005\"} 3\n"));
    assert!(body.contains("http_request_duration_seconds_count{method=\"GET\",path=\"/\"} 3\n"));
}

#[test]
fn scrape_includes_pull_model_metrics() {
    let state = state();
    let body = expo::render(&state.registry().collect_all());
    assert!(body.contains("# TYPE foo_metric gauge\n"));
    assert!(body.contains("# TYPE bar_metric counter\n"));
}

#[test]
fn duplicate_registration_against_live_registry_fails() {
    let state = state();
    let err = state
        .registry()
        .register_counter("http_requests_total", "dup", &[])
        .expect_err("must fail");
    assert!(matches!(err, MetricsError::DuplicateName(_)));
}
