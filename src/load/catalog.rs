//! Built-in appliance catalog offered by the device form.

use serde::{Deserialize, Serialize};

/// Default daily usage suggested when a preset is picked (hours).
pub const DEFAULT_HOURS_PER_DAY: f64 = 4.0;

/// Default number of units suggested when a preset is picked.
pub const DEFAULT_QUANTITY: u32 = 1;

/// A common household appliance with a typical rated power.
///
/// The label doubles as the ledger entry name, so it carries the wattage
/// the way it is shown in the selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DevicePreset {
    LampuLed,
    KipasAngin,
    TvLed,
    Kulkas,
    RiceCooker,
    MesinCuci,
    AcSetengahPk,
    AcSatuPk,
    Setrika,
    PompaAir,
}

impl DevicePreset {
    /// Catalog in selector order.
    pub const ALL: [Self; 10] = [
        Self::LampuLed,
        Self::KipasAngin,
        Self::TvLed,
        Self::Kulkas,
        Self::RiceCooker,
        Self::MesinCuci,
        Self::AcSetengahPk,
        Self::AcSatuPk,
        Self::Setrika,
        Self::PompaAir,
    ];

    /// Display label, used as the entry name when the preset is added.
    pub fn label(self) -> &'static str {
        match self {
            Self::LampuLed => "Lampu LED (10W)",
            Self::KipasAngin => "Kipas Angin (45W)",
            Self::TvLed => "TV LED (80W)",
            Self::Kulkas => "Kulkas (120W)",
            Self::RiceCooker => "Rice Cooker (350W)",
            Self::MesinCuci => "Mesin Cuci (350W)",
            Self::AcSetengahPk => "AC 1/2 PK (350W)",
            Self::AcSatuPk => "AC 1 PK (750W)",
            Self::Setrika => "Setrika (1000W)",
            Self::PompaAir => "Pompa Air (250W)",
        }
    }

    /// Typical rated power in watts.
    pub fn watts(self) -> f64 {
        match self {
            Self::LampuLed => 10.0,
            Self::KipasAngin => 45.0,
            Self::TvLed => 80.0,
            Self::Kulkas => 120.0,
            Self::RiceCooker | Self::MesinCuci | Self::AcSetengahPk => 350.0,
            Self::AcSatuPk => 750.0,
            Self::Setrika => 1000.0,
            Self::PompaAir => 250.0,
        }
    }
}
