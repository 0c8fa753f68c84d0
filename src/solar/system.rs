//! System topology, array and storage sizing, and technical parameters.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CalcError, ensure_range};
use crate::load::DAYS_PER_MONTH;

/// Allowed panel rating range (Wp).
pub const PANEL_WATT_PEAK_RANGE: (u32, u32) = (100, 700);
/// Allowed panel count range.
pub const PANEL_COUNT_RANGE: (u32, u32) = (1, 100);
/// Allowed battery capacity range (kWh).
pub const BATTERY_KWH_RANGE: (f64, f64) = (1.0, 100.0);

/// Solar system topology.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SystemMode {
    /// Grid-tied, no storage.
    #[default]
    OnGrid,
    /// Grid-tied with battery backup.
    Hybrid,
    /// Standalone, battery mandatory.
    OffGrid,
}

impl SystemMode {
    pub const ALL: [Self; 3] = [Self::OnGrid, Self::Hybrid, Self::OffGrid];

    /// Whether this topology carries a battery bank.
    pub fn uses_battery(self) -> bool {
        !matches!(self, Self::OnGrid)
    }

    /// One-line description shown when the mode is selected.
    pub fn tagline(self) -> &'static str {
        match self {
            Self::OnGrid => "Hemat tagihan. Mati saat PLN mati. Tanpa Baterai.",
            Self::Hybrid => "Hemat + Backup saat mati lampu. Pakai Baterai.",
            Self::OffGrid => "Mandiri (Di gunung/pulau). Wajib Baterai Besar.",
        }
    }
}

impl fmt::Display for SystemMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::OnGrid => "On-Grid",
            Self::Hybrid => "Hybrid",
            Self::OffGrid => "Off-Grid",
        })
    }
}

/// Battery chemistry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatteryType {
    /// LiFePO4.
    #[default]
    Lithium,
    LeadAcid,
}

impl fmt::Display for BatteryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Lithium => "Lithium (LiFePO4)",
            Self::LeadAcid => "Aki (Lead-Acid)",
        })
    }
}

/// Installed storage: chemistry and usable capacity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BatteryBank {
    pub kind: BatteryType,
    pub capacity_kwh: f64,
}

impl BatteryBank {
    /// # Errors
    ///
    /// Returns [`CalcError::InvalidInput`] when capacity is outside `[1, 100]` kWh.
    pub fn new(kind: BatteryType, capacity_kwh: f64) -> Result<Self, CalcError> {
        let (min, max) = BATTERY_KWH_RANGE;
        let capacity_kwh = ensure_range("battery_kwh", capacity_kwh, min, max)?;
        Ok(Self { kind, capacity_kwh })
    }
}

/// PV array and storage configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SystemConfig {
    mode: SystemMode,
    panel_watt_peak: u32,
    panel_count: u32,
    battery: Option<BatteryBank>,
}

impl SystemConfig {
    /// Validates the array and checks that storage matches the topology.
    ///
    /// # Errors
    ///
    /// Returns [`CalcError::InvalidInput`] for a panel rating outside
    /// `[100, 700]` Wp, a count outside `[1, 100]`, a battery on an on-grid
    /// system, or a missing battery on hybrid/off-grid systems.
    pub fn new(
        mode: SystemMode,
        panel_watt_peak: u32,
        panel_count: u32,
        battery: Option<BatteryBank>,
    ) -> Result<Self, CalcError> {
        let (wp_min, wp_max) = PANEL_WATT_PEAK_RANGE;
        if !(wp_min..=wp_max).contains(&panel_watt_peak) {
            return Err(CalcError::invalid(
                "panel_watt_peak",
                format!("must be in [{wp_min}, {wp_max}], got {panel_watt_peak}"),
            ));
        }
        let (n_min, n_max) = PANEL_COUNT_RANGE;
        if !(n_min..=n_max).contains(&panel_count) {
            return Err(CalcError::invalid(
                "panel_count",
                format!("must be in [{n_min}, {n_max}], got {panel_count}"),
            ));
        }
        match (mode.uses_battery(), battery.is_some()) {
            (false, true) => {
                return Err(CalcError::invalid(
                    "battery",
                    format!("{mode} systems have no battery"),
                ));
            }
            (true, false) => {
                return Err(CalcError::invalid(
                    "battery",
                    format!("{mode} systems require a battery"),
                ));
            }
            _ => {}
        }

        Ok(Self {
            mode,
            panel_watt_peak,
            panel_count,
            battery,
        })
    }

    pub fn mode(&self) -> SystemMode {
        self.mode
    }

    pub fn panel_watt_peak(&self) -> u32 {
        self.panel_watt_peak
    }

    pub fn panel_count(&self) -> u32 {
        self.panel_count
    }

    pub fn battery(&self) -> Option<&BatteryBank> {
        self.battery.as_ref()
    }

    /// Array capacity in kWp.
    pub fn system_kwp(&self) -> f64 {
        system_kwp(self.panel_watt_peak, self.panel_count)
    }

    /// Installed storage in kWh (0 without a battery).
    pub fn battery_kwh(&self) -> f64 {
        self.battery.map_or(0.0, |b| b.capacity_kwh)
    }

    /// Installed chemistry, if any.
    pub fn battery_type(&self) -> Option<BatteryType> {
        self.battery.map(|b| b.kind)
    }
}

/// Array capacity in kWp for `count` panels of `watt_peak` Wp each.
pub fn system_kwp(watt_peak: u32, count: u32) -> f64 {
    f64::from(watt_peak) * f64::from(count) / 1000.0
}

/// Suggested battery capacity (kWh) for a topology.
///
/// One kWh per kWp for hybrid, two for off-grid, none for on-grid. This is
/// a form default only; users may pick any capacity in `[1, 100]` kWh.
pub fn size_battery_suggestion(system_kwp: f64, mode: SystemMode) -> f64 {
    match mode {
        SystemMode::OnGrid => 0.0,
        SystemMode::Hybrid => system_kwp,
        SystemMode::OffGrid => 2.0 * system_kwp,
    }
}

/// Hours the battery can carry the average household load.
///
/// Returns `None` when there is no load, as the backup time is undefined.
pub fn estimate_backup_hours(battery_kwh: f64, total_kwh_per_month: f64) -> Option<f64> {
    let average_hourly_load = (total_kwh_per_month / DAYS_PER_MONTH) / 24.0;
    (average_hourly_load > 0.0).then(|| battery_kwh / average_hourly_load)
}

/// Installation parameters that derate the array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TechnicalParams {
    tilt_deg: f64,
    shading_loss_pct: f64,
    efficiency_pct: f64,
}

impl TechnicalParams {
    /// # Errors
    ///
    /// Returns [`CalcError::InvalidInput`] for tilt outside `[0, 45]`,
    /// shading outside `[0, 50]`, or efficiency outside `[60, 95]`.
    pub fn new(tilt_deg: f64, shading_loss_pct: f64, efficiency_pct: f64) -> Result<Self, CalcError> {
        Ok(Self {
            tilt_deg: ensure_range("tilt_deg", tilt_deg, 0.0, 45.0)?,
            shading_loss_pct: ensure_range("shading_loss_pct", shading_loss_pct, 0.0, 50.0)?,
            efficiency_pct: ensure_range("efficiency_pct", efficiency_pct, 60.0, 95.0)?,
        })
    }

    /// Panel tilt in degrees.
    ///
    /// Collected for completeness; production does not depend on it yet.
    pub fn tilt_deg(&self) -> f64 {
        self.tilt_deg
    }

    pub fn shading_loss_pct(&self) -> f64 {
        self.shading_loss_pct
    }

    pub fn efficiency_pct(&self) -> f64 {
        self.efficiency_pct
    }
}

impl Default for TechnicalParams {
    fn default() -> Self {
        Self {
            tilt_deg: 15.0,
            shading_loss_pct: 5.0,
            efficiency_pct: 80.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn kwp_from_panels() {
        let cfg = SystemConfig::new(SystemMode::OnGrid, 550, 8, None).unwrap();
        assert_relative_eq!(cfg.system_kwp(), 4.4);
        assert_eq!(cfg.battery_kwh(), 0.0);
        assert_eq!(cfg.battery_type(), None);
    }

    #[test]
    fn battery_must_match_mode() {
        let bank = BatteryBank::new(BatteryType::Lithium, 5.0).unwrap();
        let err = SystemConfig::new(SystemMode::OnGrid, 550, 8, Some(bank)).unwrap_err();
        assert_eq!(err.field(), "battery");
        let err = SystemConfig::new(SystemMode::Hybrid, 550, 8, None).unwrap_err();
        assert_eq!(err.field(), "battery");
        assert!(SystemConfig::new(SystemMode::OffGrid, 550, 8, Some(bank)).is_ok());
    }

    #[test]
    fn panel_ranges_are_enforced() {
        assert_eq!(
            SystemConfig::new(SystemMode::OnGrid, 99, 8, None).unwrap_err().field(),
            "panel_watt_peak"
        );
        assert_eq!(
            SystemConfig::new(SystemMode::OnGrid, 701, 8, None).unwrap_err().field(),
            "panel_watt_peak"
        );
        assert_eq!(
            SystemConfig::new(SystemMode::OnGrid, 550, 0, None).unwrap_err().field(),
            "panel_count"
        );
        assert_eq!(
            SystemConfig::new(SystemMode::OnGrid, 550, 101, None).unwrap_err().field(),
            "panel_count"
        );
    }

    #[test]
    fn battery_capacity_range() {
        assert!(BatteryBank::new(BatteryType::LeadAcid, 0.5).is_err());
        assert!(BatteryBank::new(BatteryType::LeadAcid, 100.5).is_err());
        assert!(BatteryBank::new(BatteryType::LeadAcid, 1.0).is_ok());
        assert!(BatteryBank::new(BatteryType::LeadAcid, 100.0).is_ok());
    }

    #[test]
    fn battery_suggestion_per_mode() {
        assert_eq!(size_battery_suggestion(4.4, SystemMode::OnGrid), 0.0);
        assert_eq!(size_battery_suggestion(4.4, SystemMode::Hybrid), 4.4);
        assert_eq!(size_battery_suggestion(4.4, SystemMode::OffGrid), 8.8);
    }

    #[test]
    fn backup_hours() {
        // 720 kWh/month -> 1 kW average load
        assert_relative_eq!(estimate_backup_hours(10.0, 720.0).unwrap(), 10.0);
        assert_eq!(estimate_backup_hours(10.0, 0.0), None);
    }

    #[test]
    fn technical_defaults_and_ranges() {
        let t = TechnicalParams::default();
        assert_eq!((t.tilt_deg(), t.shading_loss_pct(), t.efficiency_pct()), (15.0, 5.0, 80.0));
        assert_eq!(TechnicalParams::new(46.0, 5.0, 80.0).unwrap_err().field(), "tilt_deg");
        assert_eq!(
            TechnicalParams::new(15.0, 51.0, 80.0).unwrap_err().field(),
            "shading_loss_pct"
        );
        assert_eq!(
            TechnicalParams::new(15.0, 5.0, 59.0).unwrap_err().field(),
            "efficiency_pct"
        );
    }

    #[test]
    fn only_on_grid_skips_battery() {
        assert!(!SystemMode::OnGrid.uses_battery());
        assert!(SystemMode::Hybrid.uses_battery());
        assert!(SystemMode::OffGrid.uses_battery());
    }
}
