//! API response and query types.

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::load::{EnergyShare, LoadSummary};
use crate::simulation::SimulationReport;

/// Ledger totals plus the tariff they were priced at.
#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    /// Price per kWh used for the bill.
    pub tariff_per_kwh: f64,
    /// Per-entry rows and totals.
    pub summary: LoadSummary,
    /// Share of daily energy per entry.
    pub distribution: Vec<EnergyShare>,
}

impl SummaryResponse {
    pub fn new(tariff_per_kwh: f64, summary: LoadSummary) -> Self {
        let distribution = summary.distribution();
        Self {
            tariff_per_kwh,
            summary,
            distribution,
        }
    }
}

/// Result of `POST /evaluate`.
#[derive(Debug, Serialize)]
pub struct EvaluateResponse {
    pub summary: SummaryResponse,
    /// `null` when the submitted ledger has no load.
    pub report: Option<SimulationReport>,
}

/// Optional year range for the cashflow endpoint.
#[derive(Debug, Deserialize)]
pub struct CashflowQuery {
    /// First year (inclusive).
    pub from: Option<u32>,
    /// Last year (inclusive).
    pub to: Option<u32>,
}

/// One rejected configuration field.
#[derive(Debug, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl From<ConfigError> for FieldError {
    fn from(e: ConfigError) -> Self {
        Self {
            field: e.field,
            message: e.message,
        }
    }
}

/// Error response body for 4xx errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
    /// Per-field validation problems, omitted when empty.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldError>,
}

impl ErrorResponse {
    pub fn message(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            fields: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::load::{LoadLedger, TariffRate};

    #[test]
    fn summary_response_carries_distribution() {
        let mut ledger = LoadLedger::new();
        ledger.add_device("Kulkas", 120.0, 24.0, 1).unwrap();
        ledger.add_device("TV", 80.0, 6.0, 1).unwrap();
        let resp = SummaryResponse::new(1444.70, ledger.summary(TariffRate::DEFAULT));
        assert_eq!(resp.distribution.len(), 2);
        assert_eq!(resp.distribution[0].name, "Kulkas");
    }

    #[test]
    fn error_response_omits_empty_fields() {
        let json = serde_json::to_value(ErrorResponse::message("nope")).unwrap();
        assert_eq!(json["error"], "nope");
        assert!(json.get("fields").is_none());
    }
}
