//! Site profile: grid connection tier, phase, and irradiance region.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CalcError;

/// Standard PLN connection capacities (VA) in ascending order.
pub const GRID_VA_TIERS: [u32; 9] = [450, 900, 1300, 2200, 3500, 4400, 5500, 6600, 10600];

/// Contracted grid connection capacity.
///
/// Only the standard tiers are representable. The value is informational;
/// it does not enter the production or cost formulas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct GridConnection(u32);

impl GridConnection {
    /// Tier selected by default in the site form.
    pub const DEFAULT: Self = Self(2200);

    /// Looks up a standard tier by its VA rating.
    ///
    /// # Errors
    ///
    /// Returns [`CalcError::InvalidInput`] for a non-standard rating.
    pub fn from_va(va: u32) -> Result<Self, CalcError> {
        if GRID_VA_TIERS.contains(&va) {
            Ok(Self(va))
        } else {
            Err(CalcError::invalid(
                "grid_va",
                format!("must be one of {GRID_VA_TIERS:?}, got {va}"),
            ))
        }
    }

    pub fn va(self) -> u32 {
        self.0
    }

    /// Next tier up, or `self` when already at the largest.
    pub fn next(self) -> Self {
        GRID_VA_TIERS
            .iter()
            .find(|&&va| va > self.0)
            .map_or(self, |&va| Self(va))
    }

    /// Next tier down, or `self` when already at the smallest.
    pub fn prev(self) -> Self {
        GRID_VA_TIERS
            .iter()
            .rev()
            .find(|&&va| va < self.0)
            .map_or(self, |&va| Self(va))
    }
}

impl Default for GridConnection {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for GridConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} VA", self.0)
    }
}

/// Number of supply phases.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Single,
    Three,
}

impl Phase {
    pub fn count(self) -> u8 {
        match self {
            Self::Single => 1,
            Self::Three => 3,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Phase", self.count())
    }
}

/// Installation region with a fixed average peak-sun-hours figure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    #[default]
    JakartaBanten,
    JawaBarat,
    JawaTengah,
    JawaTimur,
    LuarJawa,
}

impl Region {
    /// Regions in selector order.
    pub const ALL: [Self; 5] = [
        Self::JakartaBanten,
        Self::JawaBarat,
        Self::JawaTengah,
        Self::JawaTimur,
        Self::LuarJawa,
    ];

    /// Average daily hours at rated irradiance.
    pub fn peak_sun_hours(self) -> f64 {
        match self {
            Self::JakartaBanten => 3.8,
            Self::JawaBarat => 3.6,
            Self::JawaTengah => 3.9,
            Self::JawaTimur => 4.2,
            Self::LuarJawa => 4.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::JakartaBanten => "Jakarta/Banten",
            Self::JawaBarat => "Jawa Barat",
            Self::JawaTengah => "Jawa Tengah",
            Self::JawaTimur => "Jawa Timur",
            Self::LuarJawa => "Luar Jawa (Rata2)",
        }
    }
}

/// Where the system is installed and how it connects to the grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SiteProfile {
    pub grid: GridConnection,
    pub phase: Phase,
    pub region: Region,
}

impl SiteProfile {
    pub fn peak_sun_hours(&self) -> f64 {
        self.region.peak_sun_hours()
    }
}
