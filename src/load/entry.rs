use serde::Serialize;

use crate::error::{CalcError, ensure_range};

/// Maximum units of one appliance on a single ledger line.
pub const MAX_QUANTITY: u32 = 20;

/// Hours in a day; upper bound for daily usage.
pub const MAX_HOURS_PER_DAY: f64 = 24.0;

/// Upper bound on the rated power of one unit (W).
pub const MAX_POWER_WATTS: f64 = 100_000.0;

/// One appliance line item in the load ledger.
///
/// Entries are immutable once created. The daily energy is derived at
/// construction so the ledger never recomputes it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceEntry {
    /// Free-text name or preset label.
    pub name: String,
    /// Rated power of one unit (W, 0 < power <= 100 kW).
    pub power_watts: f64,
    /// Daily usage of each unit (hours, 0 to 24).
    pub hours_per_day: f64,
    /// Number of identical units (1 to 20).
    pub quantity: u32,
    /// `power_watts * hours_per_day * quantity` (Wh/day).
    pub watt_hours_per_day: f64,
}

impl DeviceEntry {
    /// Validates the inputs and derives the daily energy.
    ///
    /// # Errors
    ///
    /// Returns [`CalcError::InvalidInput`] for an empty name, power that is
    /// non-finite or outside `(0, 100_000]`, hours outside `[0, 24]`, or
    /// quantity outside `[1, 20]`.
    pub fn new(
        name: impl Into<String>,
        power_watts: f64,
        hours_per_day: f64,
        quantity: u32,
    ) -> Result<Self, CalcError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CalcError::invalid("name", "must not be empty"));
        }
        if !power_watts.is_finite() || power_watts <= 0.0 || power_watts > MAX_POWER_WATTS {
            return Err(CalcError::invalid(
                "power_watts",
                format!("must be in (0, {MAX_POWER_WATTS}], got {power_watts}"),
            ));
        }
        let hours_per_day = ensure_range("hours_per_day", hours_per_day, 0.0, MAX_HOURS_PER_DAY)?;
        if !(1..=MAX_QUANTITY).contains(&quantity) {
            return Err(CalcError::invalid(
                "quantity",
                format!("must be in [1, {MAX_QUANTITY}], got {quantity}"),
            ));
        }

        Ok(Self {
            name,
            power_watts,
            hours_per_day,
            quantity,
            watt_hours_per_day: power_watts * hours_per_day * f64::from(quantity),
        })
    }

    /// Daily energy in kWh.
    pub fn kwh_per_day(&self) -> f64 {
        self.watt_hours_per_day / 1000.0
    }
}
