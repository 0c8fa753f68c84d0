//! Solar sizing and financial model.

/// Pros/cons copy per system topology.
pub mod advice;
/// Capex, savings, payback, and cashflow.
pub mod finance;
/// Array yield estimate.
pub mod production;
/// Grid connection, phase, and irradiance region.
pub mod site;
/// Topology, panels, battery, and derating parameters.
pub mod system;

pub use advice::{ProsCons, select_pros_cons};
pub use finance::{
    Cashflow, CashflowPoint, DEFAULT_HORIZON_YEARS, MAX_HORIZON_YEARS, Payback, Savings,
    break_even_year, compute_capex, compute_savings_and_roi, price_battery, price_panel,
    project_cashflow,
};
pub use production::{Production, compute_production};
pub use site::{GridConnection, Phase, Region, SiteProfile};
pub use system::{
    BatteryBank, BatteryType, SystemConfig, SystemMode, TechnicalParams, estimate_backup_hours,
    size_battery_suggestion,
};
