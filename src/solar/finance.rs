//! Capital cost, bill savings, payback, and long-horizon cashflow.

use serde::Serialize;

use super::system::BatteryType;

/// Installed PV price per kWp for arrays up to 5 kWp (inclusive).
pub const PANEL_PRICE_SMALL_PER_KWP: f64 = 14_000_000.0;
/// Installed PV price per kWp above 5 kWp (bulk rate).
pub const PANEL_PRICE_BULK_PER_KWP: f64 = 13_000_000.0;
/// Array size where the bulk rate starts to apply (exclusive).
pub const BULK_THRESHOLD_KWP: f64 = 5.0;
/// Lithium storage price per kWh.
pub const LITHIUM_PRICE_PER_KWH: f64 = 5_500_000.0;
/// Lead-acid storage price per kWh.
pub const LEAD_ACID_PRICE_PER_KWH: f64 = 2_500_000.0;
/// Default cashflow projection horizon (years).
pub const DEFAULT_HORIZON_YEARS: u32 = 25;
/// Longest cashflow projection a scenario may request (years).
pub const MAX_HORIZON_YEARS: u32 = 50;

/// Installed PV price per kWp for an array of `system_kwp`.
pub fn price_panel(system_kwp: f64) -> f64 {
    if system_kwp <= BULK_THRESHOLD_KWP {
        PANEL_PRICE_SMALL_PER_KWP
    } else {
        PANEL_PRICE_BULK_PER_KWP
    }
}

/// Storage price per kWh.
///
/// Anything that is not lithium, including no battery at all, is priced at
/// the lead-acid rate; with zero capacity the term vanishes anyway.
pub fn price_battery(battery_type: Option<BatteryType>) -> f64 {
    match battery_type {
        Some(BatteryType::Lithium) => LITHIUM_PRICE_PER_KWH,
        Some(BatteryType::LeadAcid) | None => LEAD_ACID_PRICE_PER_KWH,
    }
}

/// Total upfront cost of array plus storage.
pub fn compute_capex(system_kwp: f64, battery_kwh: f64, battery_type: Option<BatteryType>) -> f64 {
    system_kwp * price_panel(system_kwp) + battery_kwh * price_battery(battery_type)
}

/// Time to recover the capital cost from bill savings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Payback {
    pub months: f64,
    pub years: f64,
}

/// Monthly bill reduction and the resulting payback.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Savings {
    /// Bill reduction per month (currency, never above the current bill).
    pub monthly: f64,
    /// `None` when there are no savings to pay the system back.
    pub payback: Option<Payback>,
}

/// Values solar output at the tariff, capped at the current bill.
///
/// Exported surplus is not credited, so savings never exceed
/// `monthly_cost`. Payback is undefined when savings are zero or negative.
pub fn compute_savings_and_roi(
    monthly_production_kwh: f64,
    tariff_rate: f64,
    monthly_cost: f64,
    capex: f64,
) -> Savings {
    let monthly = (monthly_production_kwh * tariff_rate).min(monthly_cost);
    let payback = (monthly > 0.0).then(|| {
        let months = capex / monthly;
        Payback {
            months,
            years: months / 12.0,
        }
    });
    Savings { monthly, payback }
}

/// One year of the cashflow projection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CashflowPoint {
    /// Year index starting at 1.
    pub year: u32,
    /// Savings accumulated by the end of `year`.
    pub cumulative_savings: f64,
    /// Capital cost, constant across the horizon.
    pub investment: f64,
}

/// Year-by-year projection of cumulative savings against the investment.
///
/// Cloning yields an independent iterator starting from the same position,
/// so a projection can be replayed for each chart or export.
#[derive(Debug, Clone)]
pub struct Cashflow {
    monthly_savings: f64,
    capex: f64,
    years: std::ops::RangeInclusive<u32>,
}

impl Iterator for Cashflow {
    type Item = CashflowPoint;

    fn next(&mut self) -> Option<Self::Item> {
        let year = self.years.next()?;
        Some(CashflowPoint {
            year,
            cumulative_savings: self.monthly_savings * 12.0 * f64::from(year),
            investment: self.capex,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.years.size_hint()
    }
}

impl ExactSizeIterator for Cashflow {}

/// Projects cumulative savings for years `1..=horizon_years`.
pub fn project_cashflow(monthly_savings: f64, capex: f64, horizon_years: u32) -> Cashflow {
    Cashflow {
        monthly_savings,
        capex,
        years: 1..=horizon_years,
    }
}

/// First projected year whose cumulative savings cover the investment.
pub fn break_even_year(points: &[CashflowPoint]) -> Option<u32> {
    points
        .iter()
        .find(|p| p.cumulative_savings >= p.investment)
        .map(|p| p.year)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn panel_price_boundary_is_inclusive() {
        assert_eq!(price_panel(5.0), 14_000_000.0);
        assert_eq!(price_panel(5.0001), 13_000_000.0);
        assert_eq!(price_panel(0.1), 14_000_000.0);
        assert_eq!(price_panel(70.0), 13_000_000.0);
    }

    #[test]
    fn battery_prices() {
        assert_eq!(price_battery(Some(BatteryType::Lithium)), 5_500_000.0);
        assert_eq!(price_battery(Some(BatteryType::LeadAcid)), 2_500_000.0);
        assert_eq!(price_battery(None), 2_500_000.0);
    }

    #[test]
    fn on_grid_capex_is_panels_only() {
        assert_relative_eq!(compute_capex(4.4, 0.0, None), 61_600_000.0, max_relative = 1e-12);
    }

    #[test]
    fn hybrid_capex_adds_storage() {
        let capex = compute_capex(4.4, 4.4, Some(BatteryType::Lithium));
        assert_relative_eq!(capex, 61_600_000.0 + 24_200_000.0, max_relative = 1e-12);
    }

    #[test]
    fn bulk_rate_applies_to_whole_array() {
        assert_relative_eq!(compute_capex(5.5, 0.0, None), 71_500_000.0, max_relative = 1e-12);
    }

    #[test]
    fn savings_capped_at_bill() {
        for production in [0.0, 10.0, 100.0, 1_000.0, 1e6] {
            let s = compute_savings_and_roi(production, 1444.70, 43_341.0, 61_600_000.0);
            assert!(s.monthly <= 43_341.0);
        }
        let s = compute_savings_and_roi(1_000.0, 1444.70, 43_341.0, 61_600_000.0);
        assert_eq!(s.monthly, 43_341.0);
    }

    #[test]
    fn payback_from_savings() {
        let s = compute_savings_and_roi(100.0, 1000.0, 500_000.0, 12_000_000.0);
        assert_eq!(s.monthly, 100_000.0);
        let p = s.payback.unwrap();
        assert_relative_eq!(p.months, 120.0);
        assert_relative_eq!(p.years, 10.0);
    }

    #[test]
    fn zero_savings_has_undefined_payback() {
        let s = compute_savings_and_roi(0.0, 1444.70, 43_341.0, 61_600_000.0);
        assert_eq!(s.monthly, 0.0);
        assert!(s.payback.is_none());

        let free_power = compute_savings_and_roi(380.0, 0.0, 0.0, 61_600_000.0);
        assert!(free_power.payback.is_none());
    }

    #[test]
    fn cashflow_has_one_point_per_year() {
        let points: Vec<_> = project_cashflow(100_000.0, 12_000_000.0, DEFAULT_HORIZON_YEARS).collect();
        assert_eq!(points.len(), 25);
        assert_eq!(points[0].year, 1);
        assert_eq!(points[24].year, 25);
        assert_eq!(points[0].cumulative_savings, 1_200_000.0);
        assert_eq!(points[24].cumulative_savings, 30_000_000.0);
        assert!(points.iter().all(|p| p.investment == 12_000_000.0));
    }

    #[test]
    fn cashflow_is_restartable() {
        let projection = project_cashflow(50_000.0, 1_000_000.0, 25);
        assert_eq!(projection.len(), 25);
        let first: Vec<_> = projection.clone().collect();
        let second: Vec<_> = projection.collect();
        assert_eq!(first, second);
    }

    #[test]
    fn break_even_found_and_missing() {
        let points: Vec<_> = project_cashflow(100_000.0, 12_000_000.0, 25).collect();
        assert_eq!(break_even_year(&points), Some(10));

        let never: Vec<_> = project_cashflow(1_000.0, 12_000_000.0, 25).collect();
        assert_eq!(break_even_year(&never), None);
    }
}
