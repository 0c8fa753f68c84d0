//! Household electrical load ledger and rooftop solar sizing calculator.
//!
//! The [`load`] module turns an appliance list into daily and monthly energy
//! and a monthly bill. The [`solar`] module sizes an array and battery for
//! that load and projects capital cost, savings, and payback.
//! [`simulation::evaluate`] chains the two.

/// TOML scenario configuration and presets.
pub mod config;
pub mod error;
/// CSV export.
pub mod io;
pub mod load;
pub mod reporting;
pub mod simulation;
pub mod solar;

#[cfg(feature = "api")]
pub mod api;
#[cfg(feature = "tui")]
pub mod tui;

pub use error::CalcError;
