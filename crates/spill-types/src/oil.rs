// ─────────────────────────────────────────────────────────────────────
// SCPN Spill Core — Oil Catalog
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use crate::error::SpillError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported oil kinds. Serialized lowercase to match scenario and
/// configuration documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OilKind {
    Crude,
    Fuel,
    Diesel,
    Gasoline,
}

/// Static physical properties of one oil kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OilProperties {
    /// Density (kg/m³).
    pub density: f64,
    /// Dynamic viscosity of the fresh oil (mPa·s).
    pub viscosity: f64,
    /// API gravity.
    pub api: f64,
    /// Base evaporation rate coefficient (1/√h).
    pub evap_rate: f64,
    /// Pour point (°C).
    pub pour_point: f64,
    /// Maximum evaporable (volatile) mass fraction.
    pub volatile_frac: f64,
    /// Chemical dispersibility factor in [0, 1].
    pub dispersibility: f64,
}

const CRUDE: OilProperties = OilProperties {
    density: 860.0,
    viscosity: 12.0,
    api: 33.0,
    evap_rate: 0.042,
    pour_point: -15.0,
    volatile_frac: 0.25,
    dispersibility: 0.5,
};

const FUEL: OilProperties = OilProperties {
    density: 950.0,
    viscosity: 180.0,
    api: 17.0,
    evap_rate: 0.015,
    pour_point: 10.0,
    volatile_frac: 0.08,
    dispersibility: 0.2,
};

const DIESEL: OilProperties = OilProperties {
    density: 840.0,
    viscosity: 4.0,
    api: 37.0,
    evap_rate: 0.065,
    pour_point: -30.0,
    volatile_frac: 0.45,
    dispersibility: 0.7,
};

const GASOLINE: OilProperties = OilProperties {
    density: 740.0,
    viscosity: 0.6,
    api: 60.0,
    evap_rate: 0.12,
    pour_point: -60.0,
    volatile_frac: 0.80,
    dispersibility: 0.9,
};

impl OilKind {
    pub const ALL: [OilKind; 4] = [
        OilKind::Crude,
        OilKind::Fuel,
        OilKind::Diesel,
        OilKind::Gasoline,
    ];

    pub fn properties(self) -> &'static OilProperties {
        match self {
            OilKind::Crude => &CRUDE,
            OilKind::Fuel => &FUEL,
            OilKind::Diesel => &DIESEL,
            OilKind::Gasoline => &GASOLINE,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            OilKind::Crude => "crude",
            OilKind::Fuel => "fuel",
            OilKind::Diesel => "diesel",
            OilKind::Gasoline => "gasoline",
        }
    }
}

impl fmt::Display for OilKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OilKind {
    type Err = SpillError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "crude" => Ok(OilKind::Crude),
            "fuel" => Ok(OilKind::Fuel),
            "diesel" => Ok(OilKind::Diesel),
            "gasoline" => Ok(OilKind::Gasoline),
            other => Err(SpillError::UnknownOilKind(other.to_string())),
        }
    }
}
