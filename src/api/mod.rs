//! REST API over a loaded scenario.
//!
//! Endpoints:
//! - `GET /summary`: ledger rows, totals, and energy distribution
//! - `GET /report`: full sizing and payback report
//! - `GET /cashflow`: cashflow series with optional year range filtering
//! - `POST /evaluate`: evaluates a scenario sent as JSON

mod handlers;
mod types;

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tracing::info;

use crate::config::Scenario;
use crate::load::LoadSummary;
use crate::simulation::SimulationReport;

pub use types::{CashflowQuery, ErrorResponse, EvaluateResponse, FieldError, SummaryResponse};

/// Immutable application state shared across all request handlers.
///
/// Built once from the loaded scenario and wrapped in `Arc`. Handlers only
/// read it.
pub struct AppState {
    /// Scenario the server was started with.
    pub scenario: Scenario,
    /// Ledger totals at the scenario tariff.
    pub summary: LoadSummary,
    /// Solar model output, `None` for an empty ledger.
    pub report: Option<SimulationReport>,
}

impl AppState {
    /// Evaluates `scenario` once and keeps the results.
    pub fn new(scenario: Scenario) -> Self {
        let summary = scenario.summary();
        let report = scenario.report();
        Self {
            scenario,
            summary,
            report,
        }
    }
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/summary", get(handlers::get_summary))
        .route("/report", get(handlers::get_report))
        .route("/cashflow", get(handlers::get_cashflow))
        .route("/evaluate", post(handlers::post_evaluate))
        .with_state(state)
}

/// Binds to the given address and serves the API until the process exits.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "API server listening");
    eprintln!("API server listening on http://{addr}");
    axum::serve(listener, app).await
}
