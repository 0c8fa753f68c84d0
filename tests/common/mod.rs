//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use solar_calc::config::{Scenario, ScenarioConfig};
use solar_calc::load::{LoadLedger, TariffRate};
use solar_calc::simulation::SolarInputs;
use solar_calc::solar::{
    BatteryBank, BatteryType, SiteProfile, SystemConfig, SystemMode, TechnicalParams,
};

/// Ledger holding one {100 W, 5 h, x2} line: 1 kWh/day, 30 kWh/month.
pub fn one_kwh_ledger() -> LoadLedger {
    let mut ledger = LoadLedger::new();
    ledger
        .add_device("Lampu", 100.0, 5.0, 2)
        .expect("valid device");
    ledger
}

/// Two 750 W air conditioners running 8 h: 12 kWh/day.
pub fn ac_ledger() -> LoadLedger {
    let mut ledger = LoadLedger::new();
    ledger
        .add_device("AC 1 PK", 750.0, 8.0, 2)
        .expect("valid device");
    ledger
}

/// Default site (Jakarta/Banten, 2200 VA, 1 phase) with default derating.
pub fn solar_inputs(system: SystemConfig) -> SolarInputs {
    SolarInputs {
        site: SiteProfile::default(),
        system,
        technical: TechnicalParams::default(),
    }
}

/// 8 x 550 Wp on-grid array (4.4 kWp).
pub fn on_grid_4_4_kwp() -> SolarInputs {
    solar_inputs(SystemConfig::new(SystemMode::OnGrid, 550, 8, None).expect("valid system"))
}

/// 8 x 550 Wp hybrid array with a lithium bank of `capacity_kwh`.
pub fn hybrid_4_4_kwp(capacity_kwh: f64) -> SolarInputs {
    let bank = BatteryBank::new(BatteryType::Lithium, capacity_kwh).expect("valid battery");
    solar_inputs(SystemConfig::new(SystemMode::Hybrid, 550, 8, Some(bank)).expect("valid system"))
}

pub fn default_tariff() -> TariffRate {
    TariffRate::DEFAULT
}

/// Builds a preset, panicking on validation errors.
pub fn preset_scenario(name: &str) -> Scenario {
    ScenarioConfig::from_preset(name)
        .expect("known preset")
        .build()
        .expect("preset should validate")
}
