//! TOML-based scenario configuration and preset definitions.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::error::CalcError;
use crate::load::{DevicePreset, LoadLedger, LoadSummary, TariffRate};
use crate::load::catalog::{DEFAULT_HOURS_PER_DAY, DEFAULT_QUANTITY};
use crate::simulation::{SimulationReport, SolarInputs, evaluate};
use crate::solar::system::{BATTERY_KWH_RANGE, system_kwp};
use crate::solar::{
    BatteryBank, BatteryType, DEFAULT_HORIZON_YEARS, GridConnection, MAX_HORIZON_YEARS, Phase,
    Region, SiteProfile, SystemConfig, SystemMode, TechnicalParams, size_battery_suggestion,
};

/// Top-level scenario configuration parsed from TOML.
///
/// All sections have defaults matching the calculator form defaults. Load
/// from TOML with [`ScenarioConfig::from_toml_file`] or pick a built-in
/// preset with [`ScenarioConfig::from_preset`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Grid tariff.
    #[serde(default)]
    pub tariff: TariffConfig,
    /// Household appliances, in ledger order.
    #[serde(default)]
    pub devices: Vec<DeviceConfig>,
    /// Grid connection and region.
    #[serde(default)]
    pub site: SiteConfig,
    /// Topology, panels, and battery.
    #[serde(default)]
    pub system: SystemSection,
    /// Derating parameters.
    #[serde(default)]
    pub technical: TechnicalConfig,
    /// Cashflow projection.
    #[serde(default)]
    pub projection: ProjectionConfig,
}

/// Grid tariff.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TariffConfig {
    /// Price per kWh (must be >= 0).
    pub rate_per_kwh: f64,
}

impl Default for TariffConfig {
    fn default() -> Self {
        Self {
            rate_per_kwh: TariffRate::DEFAULT.per_kwh(),
        }
    }
}

/// One appliance line. Either `preset` or `name` + `power_watts` is required.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeviceConfig {
    /// Catalog appliance; supplies the name and wattage when those are omitted.
    #[serde(default)]
    pub preset: Option<DevicePreset>,
    /// Free-text name, overriding the preset label.
    #[serde(default)]
    pub name: Option<String>,
    /// Rated power (W), overriding the preset wattage.
    #[serde(default)]
    pub power_watts: Option<f64>,
    /// Daily usage (hours, 0 to 24).
    #[serde(default = "default_hours")]
    pub hours_per_day: f64,
    /// Number of units (1 to 20).
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_hours() -> f64 {
    DEFAULT_HOURS_PER_DAY
}

fn default_quantity() -> u32 {
    DEFAULT_QUANTITY
}

impl DeviceConfig {
    fn preset(preset: DevicePreset, hours_per_day: f64, quantity: u32) -> Self {
        Self {
            preset: Some(preset),
            name: None,
            power_watts: None,
            hours_per_day,
            quantity,
        }
    }
}

/// Grid connection and irradiance region.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Contracted capacity; must be a standard tier.
    pub grid_va: u32,
    /// `"single"` or `"three"`.
    pub phase: Phase,
    /// Installation region.
    pub region: Region,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            grid_va: GridConnection::DEFAULT.va(),
            phase: Phase::default(),
            region: Region::default(),
        }
    }
}

/// Topology, panels, and battery.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SystemSection {
    /// `"on_grid"`, `"hybrid"` or `"off_grid"`.
    pub mode: SystemMode,
    /// Rating of one panel (Wp, 100 to 700).
    pub panel_watt_peak: u32,
    /// Number of panels (1 to 100).
    pub panel_count: u32,
    /// Battery chemistry; ignored for on-grid systems.
    pub battery_type: BatteryType,
    /// Battery capacity (kWh, 1 to 100). Defaults to the sizing suggestion.
    pub battery_kwh: Option<f64>,
}

impl Default for SystemSection {
    fn default() -> Self {
        Self {
            mode: SystemMode::default(),
            panel_watt_peak: 550,
            panel_count: 8,
            battery_type: BatteryType::default(),
            battery_kwh: None,
        }
    }
}

/// Derating parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TechnicalConfig {
    /// Panel tilt (degrees, 0 to 45). Does not affect production.
    pub tilt_deg: f64,
    /// Shading loss (%, 0 to 50).
    pub shading_loss_pct: f64,
    /// System efficiency (%, 60 to 95).
    pub efficiency_pct: f64,
}

impl Default for TechnicalConfig {
    fn default() -> Self {
        let t = TechnicalParams::default();
        Self {
            tilt_deg: t.tilt_deg(),
            shading_loss_pct: t.shading_loss_pct(),
            efficiency_pct: t.efficiency_pct(),
        }
    }
}

/// Cashflow projection.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectionConfig {
    /// Number of projected years (1 to 50).
    pub horizon_years: u32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            horizon_years: DEFAULT_HORIZON_YEARS,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"devices[2].hours_per_day"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    fn from_calc(section: &str, err: CalcError) -> Self {
        match err {
            CalcError::InvalidInput { field, message } => {
                Self::new(format!("{section}.{field}"), message)
            }
        }
    }
}

/// A validated scenario ready to evaluate.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub ledger: LoadLedger,
    pub tariff: TariffRate,
    pub solar: SolarInputs,
    pub horizon_years: u32,
}

impl Scenario {
    /// Ledger totals at the scenario tariff.
    pub fn summary(&self) -> LoadSummary {
        self.ledger.summary(self.tariff)
    }

    /// Runs the solar model; `None` when the ledger has no load.
    pub fn report(&self) -> Option<SimulationReport> {
        evaluate(
            &self.summary(),
            self.tariff,
            &self.solar,
            self.horizon_years,
        )
    }
}

impl ScenarioConfig {
    /// Available preset names.
    pub const PRESETS: &[&str] = &["demo", "hybrid_home", "off_grid_cabin"];

    /// Typical urban household on an on-grid 8 x 550 Wp array.
    pub fn demo() -> Self {
        Self {
            devices: vec![
                DeviceConfig::preset(DevicePreset::LampuLed, 6.0, 8),
                DeviceConfig::preset(DevicePreset::KipasAngin, 8.0, 2),
                DeviceConfig::preset(DevicePreset::TvLed, 5.0, 1),
                DeviceConfig::preset(DevicePreset::Kulkas, 24.0, 1),
                DeviceConfig::preset(DevicePreset::RiceCooker, 2.0, 1),
                DeviceConfig::preset(DevicePreset::MesinCuci, 1.0, 1),
                DeviceConfig::preset(DevicePreset::AcSetengahPk, 8.0, 1),
                DeviceConfig::preset(DevicePreset::PompaAir, 2.0, 1),
            ],
            ..Self::default()
        }
    }

    /// Larger household with battery backup in West Java.
    pub fn hybrid_home() -> Self {
        let mut devices = Self::demo().devices;
        devices.push(DeviceConfig::preset(DevicePreset::AcSatuPk, 6.0, 1));
        devices.push(DeviceConfig::preset(DevicePreset::Setrika, 1.0, 1));
        Self {
            devices,
            site: SiteConfig {
                grid_va: 3500,
                region: Region::JawaBarat,
                ..SiteConfig::default()
            },
            system: SystemSection {
                mode: SystemMode::Hybrid,
                panel_count: 10,
                ..SystemSection::default()
            },
            ..Self::default()
        }
    }

    /// Small standalone cabin outside Java with lead-acid storage.
    pub fn off_grid_cabin() -> Self {
        Self {
            devices: vec![
                DeviceConfig::preset(DevicePreset::LampuLed, 6.0, 4),
                DeviceConfig::preset(DevicePreset::TvLed, 4.0, 1),
                DeviceConfig::preset(DevicePreset::Kulkas, 24.0, 1),
                DeviceConfig::preset(DevicePreset::PompaAir, 1.0, 1),
            ],
            site: SiteConfig {
                grid_va: 450,
                region: Region::LuarJawa,
                ..SiteConfig::default()
            },
            system: SystemSection {
                mode: SystemMode::OffGrid,
                panel_watt_peak: 450,
                panel_count: 6,
                battery_type: BatteryType::LeadAcid,
                battery_kwh: None,
            },
            technical: TechnicalConfig {
                shading_loss_pct: 10.0,
                ..TechnicalConfig::default()
            },
            ..Self::default()
        }
    }

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "demo" => Ok(Self::demo()),
            "hybrid_home" => Ok(Self::hybrid_home()),
            "off_grid_cabin" => Ok(Self::off_grid_cabin()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("scenario", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        self.build().err().unwrap_or_default()
    }

    /// Turns the configuration into a ledger and solar inputs.
    ///
    /// Every section is checked so that all problems are reported at once.
    ///
    /// # Errors
    ///
    /// Returns every `ConfigError` found.
    pub fn build(&self) -> Result<Scenario, Vec<ConfigError>> {
        let mut errors = Vec::new();

        let tariff = TariffRate::new(self.tariff.rate_per_kwh)
            .map_err(|CalcError::InvalidInput { message, .. }| {
                errors.push(ConfigError::new("tariff.rate_per_kwh", message));
            })
            .ok();

        let mut ledger = LoadLedger::new();
        for (i, device) in self.devices.iter().enumerate() {
            let path = format!("devices[{i}]");
            let name = device
                .name
                .clone()
                .or_else(|| device.preset.map(|p| p.label().to_string()));
            let power = device
                .power_watts
                .or_else(|| device.preset.map(DevicePreset::watts));
            let (Some(name), Some(power)) = (name, power) else {
                errors.push(ConfigError::new(
                    path,
                    "needs either `preset` or both `name` and `power_watts`",
                ));
                continue;
            };
            if let Err(e) = ledger.add_device(name, power, device.hours_per_day, device.quantity) {
                errors.push(ConfigError::from_calc(&path, e));
            }
        }

        let site = match GridConnection::from_va(self.site.grid_va) {
            Ok(grid) => Some(SiteProfile {
                grid,
                phase: self.site.phase,
                region: self.site.region,
            }),
            Err(e) => {
                errors.push(ConfigError::from_calc("site", e));
                None
            }
        };

        let system = self
            .build_system()
            .map_err(|e| errors.push(e))
            .ok();

        let t = &self.technical;
        let technical = TechnicalParams::new(t.tilt_deg, t.shading_loss_pct, t.efficiency_pct)
            .map_err(|e| errors.push(ConfigError::from_calc("technical", e)))
            .ok();

        let horizon = self.projection.horizon_years;
        if !(1..=MAX_HORIZON_YEARS).contains(&horizon) {
            errors.push(ConfigError::new(
                "projection.horizon_years",
                format!("must be in [1, {MAX_HORIZON_YEARS}], got {horizon}"),
            ));
        }

        match (tariff, site, system, technical) {
            (Some(tariff), Some(site), Some(system), Some(technical)) if errors.is_empty() => {
                Ok(Scenario {
                    ledger,
                    tariff,
                    solar: SolarInputs {
                        site,
                        system,
                        technical,
                    },
                    horizon_years: self.projection.horizon_years,
                })
            }
            _ => Err(errors),
        }
    }

    fn build_system(&self) -> Result<SystemConfig, ConfigError> {
        let s = &self.system;
        let battery = if s.mode.uses_battery() {
            let capacity = s.battery_kwh.unwrap_or_else(|| {
                let (min, max) = BATTERY_KWH_RANGE;
                let kwp = system_kwp(s.panel_watt_peak, s.panel_count);
                size_battery_suggestion(kwp, s.mode).clamp(min, max)
            });
            Some(
                BatteryBank::new(s.battery_type, capacity)
                    .map_err(|e| ConfigError::from_calc("system", e))?,
            )
        } else {
            if s.battery_kwh.is_some() {
                return Err(ConfigError::new(
                    "system.battery_kwh",
                    format!("{} systems have no battery", s.mode),
                ));
            }
            None
        };
        SystemConfig::new(s.mode, s.panel_watt_peak, s.panel_count, battery)
            .map_err(|e| ConfigError::from_calc("system", e))
    }
}
