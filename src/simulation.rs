//! End-to-end evaluation: ledger summary in, sizing and payback report out.

use std::fmt;

use serde::Serialize;
use tracing::{debug, info};

use crate::load::{LoadSummary, TariffRate};
use crate::reporting::format_currency;
use crate::solar::{
    CashflowPoint, Payback, Production, ProsCons, SiteProfile, SystemConfig, TechnicalParams,
    break_even_year, compute_capex, compute_production, compute_savings_and_roi,
    estimate_backup_hours, project_cashflow, select_pros_cons, size_battery_suggestion,
};

/// Everything the solar model needs besides the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SolarInputs {
    pub site: SiteProfile,
    pub system: SystemConfig,
    pub technical: TechnicalParams,
}

/// Headline figures and series for one evaluation.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    /// Monthly household consumption the system is sized against (kWh).
    pub load_kwh_per_month: f64,
    /// Current monthly bill (currency).
    pub bill_per_month: f64,
    /// Array capacity (kWp).
    pub system_kwp: f64,
    /// Region peak sun hours used for production.
    pub peak_sun_hours: f64,
    /// Estimated yield.
    pub production: Production,
    /// Default battery capacity for the selected topology (kWh).
    pub battery_suggestion_kwh: f64,
    /// Installed battery capacity (kWh, 0 for on-grid).
    pub battery_kwh: f64,
    /// Hours the installed battery covers the average load.
    pub backup_hours: Option<f64>,
    /// Upfront cost (currency).
    pub capex: f64,
    /// Bill reduction per month (currency).
    pub monthly_savings: f64,
    /// Payback, undefined without savings.
    pub payback: Option<Payback>,
    /// Cumulative savings vs. investment per year.
    pub cashflow: Vec<CashflowPoint>,
    /// First year savings cover the investment within the horizon.
    pub break_even_year: Option<u32>,
    /// Topology pros and cons.
    pub pros_cons: ProsCons,
}

/// Runs the solar and financial model against a ledger summary.
///
/// Returns `None` when the ledger has no consumption: there is nothing to
/// size against, so no dependent figure is computed.
pub fn evaluate(
    load: &LoadSummary,
    tariff: TariffRate,
    inputs: &SolarInputs,
    horizon_years: u32,
) -> Option<SimulationReport> {
    if !load.has_load() {
        debug!("ledger has no load; skipping solar model");
        return None;
    }

    let system = &inputs.system;
    let system_kwp = system.system_kwp();
    let peak_sun_hours = inputs.site.peak_sun_hours();

    let production = compute_production(
        system_kwp,
        peak_sun_hours,
        inputs.technical.efficiency_pct(),
        inputs.technical.shading_loss_pct(),
    );

    let battery_kwh = system.battery_kwh();
    let backup_hours = system
        .battery()
        .and_then(|b| estimate_backup_hours(b.capacity_kwh, load.total_kwh_per_month));

    let capex = compute_capex(system_kwp, battery_kwh, system.battery_type());
    let savings = compute_savings_and_roi(
        production.monthly_kwh,
        tariff.per_kwh(),
        load.total_cost_per_month,
        capex,
    );
    let cashflow: Vec<CashflowPoint> =
        project_cashflow(savings.monthly, capex, horizon_years).collect();
    let break_even = break_even_year(&cashflow);

    info!(
        mode = %system.mode(),
        system_kwp,
        monthly_kwh = production.monthly_kwh,
        capex,
        monthly_savings = savings.monthly,
        "solar model evaluated"
    );

    Some(SimulationReport {
        load_kwh_per_month: load.total_kwh_per_month,
        bill_per_month: load.total_cost_per_month,
        system_kwp,
        peak_sun_hours,
        production,
        battery_suggestion_kwh: size_battery_suggestion(system_kwp, system.mode()),
        battery_kwh,
        backup_hours,
        capex,
        monthly_savings: savings.monthly,
        payback: savings.payback,
        cashflow,
        break_even_year: break_even,
        pros_cons: select_pros_cons(system.mode()),
    })
}

impl SimulationReport {
    /// Share of the monthly load covered by solar, capped at 100%.
    pub fn solar_fraction_pct(&self) -> f64 {
        if self.load_kwh_per_month <= 0.0 {
            return 0.0;
        }
        (100.0 * self.production.monthly_kwh / self.load_kwh_per_month).min(100.0)
    }
}

impl fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Simulation Report ---")?;
        writeln!(
            f,
            "System capacity:       {:.2} kWp ({:.1} sun hours/day)",
            self.system_kwp, self.peak_sun_hours
        )?;
        writeln!(f, "Daily production:      {:.2} kWh", self.production.daily_kwh)?;
        writeln!(f, "Monthly production:    {:.1} kWh", self.production.monthly_kwh)?;
        writeln!(f, "Solar fraction:        {:.1}%", self.solar_fraction_pct())?;
        if self.battery_kwh > 0.0 {
            match self.backup_hours {
                Some(h) => writeln!(
                    f,
                    "Battery:               {:.1} kWh ({h:.1} h backup)",
                    self.battery_kwh
                )?,
                None => writeln!(f, "Battery:               {:.1} kWh", self.battery_kwh)?,
            }
        } else {
            writeln!(f, "Battery:               none")?;
        }
        writeln!(f, "CAPEX:                 {}", format_currency(self.capex))?;
        writeln!(
            f,
            "Monthly savings:       {}",
            format_currency(self.monthly_savings)
        )?;
        match self.payback {
            Some(p) => writeln!(f, "ROI:                   {:.1} years", p.years)?,
            None => writeln!(f, "ROI:                   n/a")?,
        }
        match self.break_even_year {
            Some(y) => write!(f, "Break-even year:       {y}"),
            None => write!(
                f,
                "Break-even year:       beyond {} years",
                self.cashflow.len()
            ),
        }
    }
}
