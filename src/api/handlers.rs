//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use tracing::debug;

use super::AppState;
use super::types::{CashflowQuery, ErrorResponse, EvaluateResponse, SummaryResponse};
use crate::config::ScenarioConfig;
use crate::simulation::SimulationReport;
use crate::solar::CashflowPoint;

type ApiError = (StatusCode, Json<ErrorResponse>);

fn no_load() -> ApiError {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ErrorResponse::message(
            "ledger has no load; add at least one device",
        )),
    )
}

/// `GET /summary` → 200 + `SummaryResponse` JSON
pub async fn get_summary(State(state): State<Arc<AppState>>) -> Json<SummaryResponse> {
    Json(SummaryResponse::new(
        state.scenario.tariff.per_kwh(),
        state.summary.clone(),
    ))
}

/// Returns the sizing and payback report.
///
/// `GET /report` → 200 + `SimulationReport` JSON
/// `GET /report` on an empty ledger → 422 + `ErrorResponse`
pub async fn get_report(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SimulationReport>, ApiError> {
    match &state.report {
        Some(report) => Ok(Json(report.clone())),
        None => Err(no_load()),
    }
}

/// Returns cashflow points, optionally filtered by year range.
///
/// `GET /cashflow` → 200 + `Vec<CashflowPoint>` JSON
/// `GET /cashflow?from=N&to=M` → filtered range (inclusive)
/// `GET /cashflow?from=10&to=5` → 400 + `ErrorResponse`
pub async fn get_cashflow(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CashflowQuery>,
) -> Result<Json<Vec<CashflowPoint>>, ApiError> {
    let from = query.from.unwrap_or(0);
    let to = query.to.unwrap_or(u32::MAX);

    if from > to {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::message(format!(
                "`from` ({from}) must be <= `to` ({to})"
            ))),
        ));
    }

    let report = state.report.as_ref().ok_or_else(no_load)?;
    let points: Vec<CashflowPoint> = report
        .cashflow
        .iter()
        .filter(|p| p.year >= from && p.year <= to)
        .copied()
        .collect();

    Ok(Json(points))
}

/// Evaluates a scenario sent as JSON, using the same schema as the TOML files.
///
/// `POST /evaluate` → 200 + `EvaluateResponse` JSON
/// Malformed JSON or invalid fields → 400 + `ErrorResponse`
pub async fn post_evaluate(body: Bytes) -> Result<Json<EvaluateResponse>, ApiError> {
    let config: ScenarioConfig = serde_json::from_slice(&body).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::message(format!("invalid scenario JSON: {e}"))),
        )
    })?;

    let scenario = config.build().map_err(|errors| {
        debug!(count = errors.len(), "rejected scenario");
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "scenario failed validation".to_string(),
                fields: errors.into_iter().map(Into::into).collect(),
            }),
        )
    })?;

    let summary = scenario.summary();
    let report = scenario.report();
    Ok(Json(EvaluateResponse {
        summary: SummaryResponse::new(scenario.tariff.per_kwh(), summary),
        report,
    }))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::Request;
    use tower::util::ServiceExt;

    use super::*;
    use crate::api::router;

    fn make_state(cfg: ScenarioConfig) -> Arc<AppState> {
        Arc::new(AppState::new(cfg.build().unwrap()))
    }

    fn demo_state() -> Arc<AppState> {
        make_state(ScenarioConfig::demo())
    }

    fn empty_state() -> Arc<AppState> {
        make_state(ScenarioConfig::default())
    }

    async fn body_json(resp: axum::response::Response) -> serde_json::Value {
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn summary_returns_200() {
        let resp = router(demo_state()).oneshot(get("/summary")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let json = body_json(resp).await;
        assert_eq!(json["tariff_per_kwh"], 1444.70);
        assert_eq!(json["summary"]["per_entry"].as_array().map(Vec::len), Some(8));
        assert!(json["summary"]["total_kwh_per_month"].as_f64().unwrap() > 0.0);
        assert!(json.get("distribution").is_some());
    }

    #[tokio::test]
    async fn report_returns_200() {
        let resp = router(demo_state()).oneshot(get("/report")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let json = body_json(resp).await;
        assert!((json["capex"].as_f64().unwrap() - 61_600_000.0).abs() < 1e-3);
        assert_eq!(json["cashflow"].as_array().map(Vec::len), Some(25));
        assert!(json["pros_cons"]["pros"].as_array().is_some());
    }

    #[tokio::test]
    async fn report_without_load_returns_422() {
        let resp = router(empty_state()).oneshot(get("/report")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let json = body_json(resp).await;
        assert!(json.get("error").is_some());
    }

    #[tokio::test]
    async fn cashflow_range_query() {
        let resp = router(demo_state())
            .oneshot(get("/cashflow?from=5&to=10"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let json = body_json(resp).await;
        let points = json.as_array().unwrap();
        assert_eq!(points.len(), 6); // years 5 through 10
        assert_eq!(points[0]["year"], 5);
        assert_eq!(points[5]["year"], 10);
    }

    #[tokio::test]
    async fn cashflow_invalid_range_returns_400() {
        let resp = router(demo_state())
            .oneshot(get("/cashflow?from=10&to=5"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let json = body_json(resp).await;
        assert!(json.get("error").is_some());
    }

    #[tokio::test]
    async fn evaluate_accepts_json_scenario() {
        let body = r#"{
            "devices": [{ "name": "AC", "power_watts": 750, "hours_per_day": 8, "quantity": 2 }],
            "system": { "mode": "on_grid", "panel_watt_peak": 550, "panel_count": 8 }
        }"#;
        let resp = router(empty_state())
            .oneshot(post_json("/evaluate", body))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let json = body_json(resp).await;
        assert_eq!(json["summary"]["summary"]["total_kwh_per_day"], 12.0);
        assert!((json["report"]["capex"].as_f64().unwrap() - 61_600_000.0).abs() < 1e-3);
    }

    #[tokio::test]
    async fn evaluate_empty_ledger_has_null_report() {
        let resp = router(demo_state())
            .oneshot(post_json("/evaluate", "{}"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert!(json["report"].is_null());
    }

    #[tokio::test]
    async fn evaluate_reports_field_errors() {
        let body = r#"{ "tariff": { "rate_per_kwh": -5 }, "technical": { "efficiency_pct": 20 } }"#;
        let resp = router(demo_state())
            .oneshot(post_json("/evaluate", body))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let json = body_json(resp).await;
        let fields: Vec<&str> = json["fields"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|f| f["field"].as_str())
            .collect();
        assert_eq!(fields, ["tariff.rate_per_kwh", "technical.efficiency_pct"]);
    }

    #[tokio::test]
    async fn evaluate_rejects_oversized_inputs() {
        let body = r#"{
            "devices": [{ "name": "x", "power_watts": 1e308, "hours_per_day": 24, "quantity": 20 }],
            "projection": { "horizon_years": 4294967295 }
        }"#;
        let resp = router(empty_state())
            .oneshot(post_json("/evaluate", body))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let json = body_json(resp).await;
        let fields: Vec<&str> = json["fields"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|f| f["field"].as_str())
            .collect();
        assert_eq!(fields, ["devices[0].power_watts", "projection.horizon_years"]);
    }

    #[tokio::test]
    async fn evaluate_rejects_malformed_json() {
        let resp = router(demo_state())
            .oneshot(post_json("/evaluate", "{ not json"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
