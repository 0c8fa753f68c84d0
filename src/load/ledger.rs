//! Ordered appliance ledger and its energy/cost summary.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use super::catalog::DevicePreset;
use super::entry::DeviceEntry;
use crate::error::CalcError;

/// Billing days per month used by every monthly figure.
pub const DAYS_PER_MONTH: f64 = 30.0;

/// Grid tariff in currency per kWh (>= 0).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TariffRate(f64);

impl TariffRate {
    /// Household tariff offered as the form default (Rp/kWh).
    pub const DEFAULT: Self = Self(1444.70);

    /// Creates a tariff, rejecting negative or non-finite rates.
    ///
    /// # Errors
    ///
    /// Returns [`CalcError::InvalidInput`] when `rate` is negative or not finite.
    pub fn new(rate: f64) -> Result<Self, CalcError> {
        if !rate.is_finite() || rate < 0.0 {
            return Err(CalcError::invalid(
                "tariff_rate",
                format!("must be >= 0, got {rate}"),
            ));
        }
        Ok(Self(rate))
    }

    /// Rate in currency per kWh.
    pub fn per_kwh(self) -> f64 {
        self.0
    }
}

impl Default for TariffRate {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Appliance list in insertion order.
///
/// The ledger is the only mutable state in the calculator. It is owned by
/// whichever front end drives it and only changes through [`add_device`]
/// and [`reset`].
///
/// [`add_device`]: LoadLedger::add_device
/// [`reset`]: LoadLedger::reset
#[derive(Debug, Clone, Default)]
pub struct LoadLedger {
    entries: Vec<DeviceEntry>,
}

impl LoadLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and appends a device, returning the stored entry.
    ///
    /// # Errors
    ///
    /// Propagates [`DeviceEntry::new`] validation errors; the ledger is left
    /// untouched on failure.
    pub fn add_device(
        &mut self,
        name: impl Into<String>,
        power_watts: f64,
        hours_per_day: f64,
        quantity: u32,
    ) -> Result<&DeviceEntry, CalcError> {
        let entry = DeviceEntry::new(name, power_watts, hours_per_day, quantity)?;
        debug!(
            name = %entry.name,
            wh_per_day = entry.watt_hours_per_day,
            "device added to ledger"
        );
        let index = self.entries.len();
        self.entries.push(entry);
        Ok(&self.entries[index])
    }

    /// Appends a catalog appliance using its label and rated power.
    ///
    /// # Errors
    ///
    /// Returns [`CalcError::InvalidInput`] for out-of-range hours or quantity.
    pub fn add_preset(
        &mut self,
        preset: DevicePreset,
        hours_per_day: f64,
        quantity: u32,
    ) -> Result<&DeviceEntry, CalcError> {
        self.add_device(preset.label(), preset.watts(), hours_per_day, quantity)
    }

    /// Removes every entry.
    pub fn reset(&mut self) {
        debug!(cleared = self.entries.len(), "ledger reset");
        self.entries.clear();
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[DeviceEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Computes per-entry and total energy and the monthly bill.
    ///
    /// An empty ledger yields an all-zero summary. Callers check
    /// [`LoadSummary::has_load`] before running the solar model.
    pub fn summary(&self, tariff: TariffRate) -> LoadSummary {
        let per_entry: Vec<EntrySummary> = self
            .entries
            .iter()
            .map(|e| EntrySummary {
                name: e.name.clone(),
                power_watts: e.power_watts,
                hours_per_day: e.hours_per_day,
                quantity: e.quantity,
                watt_hours_per_day: e.watt_hours_per_day,
                kwh_per_day: e.kwh_per_day(),
            })
            .collect();

        let total_kwh_per_day: f64 = per_entry.iter().map(|e| e.kwh_per_day).sum();
        let total_kwh_per_month = total_kwh_per_day * DAYS_PER_MONTH;

        LoadSummary {
            per_entry,
            total_kwh_per_day,
            total_kwh_per_month,
            total_cost_per_month: total_kwh_per_month * tariff.per_kwh(),
        }
    }
}

/// One row of the ledger table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntrySummary {
    pub name: String,
    pub power_watts: f64,
    pub hours_per_day: f64,
    pub quantity: u32,
    pub watt_hours_per_day: f64,
    pub kwh_per_day: f64,
}

/// Ledger totals for one tariff.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadSummary {
    /// Rows in ledger order.
    pub per_entry: Vec<EntrySummary>,
    /// Sum of per-entry daily energy (kWh).
    pub total_kwh_per_day: f64,
    /// `total_kwh_per_day * 30` (kWh).
    pub total_kwh_per_month: f64,
    /// `total_kwh_per_month * tariff` (currency).
    pub total_cost_per_month: f64,
}

/// Share of daily energy taken by one ledger entry, ready for a pie chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnergyShare {
    pub name: String,
    pub kwh_per_day: f64,
    /// Percentage of the total daily energy (0 to 100).
    pub share_pct: f64,
}

impl LoadSummary {
    /// Returns `true` when there is consumption to size a system against.
    pub fn has_load(&self) -> bool {
        self.total_kwh_per_month > 0.0
    }

    /// Per-entry energy distribution in ledger order.
    ///
    /// Empty when the total is zero, since no share is defined.
    pub fn distribution(&self) -> Vec<EnergyShare> {
        if self.total_kwh_per_day <= 0.0 {
            return Vec::new();
        }
        self.per_entry
            .iter()
            .map(|e| EnergyShare {
                name: e.name.clone(),
                kwh_per_day: e.kwh_per_day,
                share_pct: 100.0 * e.kwh_per_day / self.total_kwh_per_day,
            })
            .collect()
    }
}

impl fmt::Display for LoadSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Load Summary ---")?;
        for e in &self.per_entry {
            writeln!(
                f,
                "{:<22} {:>7.0} W x {:>4.1} h x {:>2} = {:>8.0} Wh/day ({:.2} kWh/day)",
                e.name, e.power_watts, e.hours_per_day, e.quantity, e.watt_hours_per_day,
                e.kwh_per_day,
            )?;
        }
        writeln!(f, "Daily energy:          {:.2} kWh", self.total_kwh_per_day)?;
        writeln!(f, "Monthly energy:        {:.1} kWh", self.total_kwh_per_month)?;
        write!(
            f,
            "Monthly cost:          {}",
            crate::reporting::format_currency(self.total_cost_per_month)
        )
    }
}
