use serde::Serialize;

use crate::load::DAYS_PER_MONTH;

/// Estimated array output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Production {
    /// Average daily yield (kWh).
    pub daily_kwh: f64,
    /// `daily_kwh * 30` (kWh).
    pub monthly_kwh: f64,
}

/// Estimates array yield from capacity, sun hours, and derating factors.
///
/// `daily = kWp * peak_sun_hours * efficiency * (1 - shading)`, with both
/// percentages given in 0..100. Panel tilt is not part of this model.
pub fn compute_production(
    system_kwp: f64,
    peak_sun_hours: f64,
    efficiency_pct: f64,
    shading_loss_pct: f64,
) -> Production {
    let daily_kwh =
        system_kwp * peak_sun_hours * (efficiency_pct / 100.0) * (1.0 - shading_loss_pct / 100.0);
    Production {
        daily_kwh,
        monthly_kwh: daily_kwh * DAYS_PER_MONTH,
    }
}
