//! Built-in release scenario presets.

use serde::Serialize;
use spill_types::config::{SpillConfig, SpillMode};
use spill_types::oil::OilKind;

/// One preset release situation a host can offer out of the box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub id: u32,
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
    /// Released volume (tonnes).
    pub oil_volume: f64,
    pub oil_type: OilKind,
    pub spill_mode: SpillMode,
    /// Release window (hours); meaningful in continuous mode only.
    pub spill_duration: f64,
    pub description: &'static str,
}

const SCENARIOS: [Scenario; 4] = [
    Scenario {
        id: 1,
        name: "Bohai Bay spill incident",
        lat: 38.5,
        lng: 119.0,
        oil_volume: 500.0,
        oil_type: OilKind::Crude,
        spill_mode: SpillMode::Instant,
        spill_duration: 0.0,
        description: "Crude release in the Bohai Bay shipping lanes",
    },
    Scenario {
        id: 2,
        name: "South China Sea platform leak",
        lat: 19.5,
        lng: 112.0,
        oil_volume: 1000.0,
        oil_type: OilKind::Crude,
        spill_mode: SpillMode::Instant,
        spill_duration: 0.0,
        description: "Drilling platform blowout in the South China Sea",
    },
    Scenario {
        id: 3,
        name: "East China Sea tanker collision",
        lat: 30.0,
        lng: 124.0,
        oil_volume: 2000.0,
        oil_type: OilKind::Fuel,
        spill_mode: SpillMode::Instant,
        spill_duration: 0.0,
        description: "Fuel-oil tanker collision in the East China Sea",
    },
    Scenario {
        id: 4,
        name: "Subsea pipeline sustained leak",
        lat: 37.8,
        lng: 120.5,
        oil_volume: 800.0,
        oil_type: OilKind::Crude,
        spill_mode: SpillMode::Continuous,
        spill_duration: 12.0,
        description: "Seabed pipeline leaking continuously over 12 hours",
    },
];

/// The preset catalog, in id order.
pub fn builtin_scenarios() -> &'static [Scenario] {
    &SCENARIOS
}

/// Look up a preset by id.
pub fn scenario_by_id(id: u32) -> Option<&'static Scenario> {
    SCENARIOS.iter().find(|s| s.id == id)
}

impl Scenario {
    /// Overlay this preset on a configuration, keeping the caller's
    /// numerical and environment settings.
    pub fn apply(&self, config: &mut SpillConfig) {
        config.spill_lat = self.lat;
        config.spill_lng = self.lng;
        config.oil_volume = self.oil_volume;
        config.oil_type = self.oil_type;
        config.spill_mode = self.spill_mode;
        if self.spill_mode == SpillMode::Continuous {
            config.spill_duration = self.spill_duration;
        }
    }
}
