//! Household load ledger: appliance entries and their energy/cost totals.

/// Preset appliance catalog.
pub mod catalog;
/// Single appliance line item.
pub mod entry;
/// Ordered ledger, tariff, and summary.
pub mod ledger;

pub use catalog::DevicePreset;
pub use entry::DeviceEntry;
pub use ledger::{DAYS_PER_MONTH, EnergyShare, EntrySummary, LoadLedger, LoadSummary, TariffRate};
