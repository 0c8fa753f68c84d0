//! Integration tests for the REST API feature.

#![cfg(feature = "api")]

mod common;

use std::sync::Arc;

use approx::assert_relative_eq;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::util::ServiceExt;

use solar_calc::api::{AppState, router};

fn build_api_state(preset: &str) -> Arc<AppState> {
    Arc::new(AppState::new(common::preset_scenario(preset)))
}

async fn get_json(state: Arc<AppState>, uri: &str) -> (StatusCode, serde_json::Value) {
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let resp = router(state).oneshot(req).await.unwrap();
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn report_matches_library_evaluation() {
    let state = build_api_state("hybrid_home");
    let expected = state.report.clone().expect("preset has load");

    let (status, json) = get_json(state, "/report").await;
    assert_eq!(status, StatusCode::OK);
    assert_relative_eq!(json["capex"].as_f64().unwrap(), expected.capex, max_relative = 1e-12);
    assert_relative_eq!(
        json["battery_kwh"].as_f64().unwrap(),
        expected.battery_kwh,
        max_relative = 1e-12
    );
    assert_eq!(
        json["break_even_year"].as_u64(),
        expected.break_even_year.map(u64::from)
    );
}

#[tokio::test]
async fn cashflow_full_range_and_tail() {
    let state = build_api_state("off_grid_cabin");

    let (status, all) = get_json(Arc::clone(&state), "/cashflow").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().map(Vec::len), Some(25));

    let (status, tail) = get_json(state, "/cashflow?from=20").await;
    assert_eq!(status, StatusCode::OK);
    let tail = tail.as_array().unwrap();
    assert_eq!(tail.len(), 6); // years 20 through 25
    assert_eq!(tail[0]["year"], 20);
}

#[tokio::test]
async fn summary_lists_ledger_in_order() {
    let (status, json) = get_json(build_api_state("off_grid_cabin"), "/summary").await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = json["summary"]["per_entry"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|e| e["name"].as_str())
        .collect();
    assert_eq!(
        names,
        ["Lampu LED (10W)", "TV LED (80W)", "Kulkas (120W)", "Pompa Air (250W)"]
    );
}
