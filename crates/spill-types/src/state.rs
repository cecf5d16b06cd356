// ─────────────────────────────────────────────────────────────────────
// SCPN Spill Core — State
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use serde::Serialize;

/// Per-parcel state advanced by the integrator.
///
/// Flag semantics are three-way: `active` parcels advect, `beached`
/// parcels grounded on land and keep their pre-grounding position, and
/// parcels with both flags false either await release (continuous mode)
/// or were deactivated after their residual mass fell below 5%.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Particle {
    pub lat: f64,
    pub lon: f64,
    /// Residual parcel mass (kg).
    pub mass: f64,
    /// Seconds since release.
    pub age: f64,
    /// Fay film thickness (m).
    pub thickness: f64,
    pub evaporated: f64,
    pub dispersed: f64,
    pub emulsion_water: f64,
    /// Effective viscosity (mPa·s) after weathering.
    pub viscosity: f64,
    pub active: bool,
    pub beached: bool,
}

/// Initial film thickness (m) before Fay spreading takes over.
const INITIAL_THICKNESS_M: f64 = 0.01;

impl Particle {
    pub fn new(lat: f64, lon: f64, mass: f64, viscosity: f64, active: bool) -> Self {
        Particle {
            lat,
            lon,
            mass,
            age: 0.0,
            thickness: INITIAL_THICKNESS_M,
            evaporated: 0.0,
            dispersed: 0.0,
            emulsion_water: 0.0,
            viscosity,
            active,
            beached: false,
        }
    }
}

/// Aggregate snapshot recomputed after every step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpillStats {
    pub active: usize,
    pub beached: usize,
    pub centroid_lat: f64,
    pub centroid_lon: f64,
    /// 2σ-ellipse slick area estimate (km²).
    pub area_km2: f64,
    /// Farthest active parcel from the spill origin (km).
    pub max_drift_km: f64,
    pub evaporated_pct: f64,
    pub dispersed_pct: f64,
    pub emulsion_pct: f64,
    pub remaining_pct: f64,
    pub viscosity_mpa_s: f64,
}

impl SpillStats {
    /// Pre-release snapshot centred on the spill origin.
    pub fn initial(spill_lat: f64, spill_lng: f64, base_viscosity: f64) -> Self {
        SpillStats {
            active: 0,
            beached: 0,
            centroid_lat: spill_lat,
            centroid_lon: spill_lng,
            area_km2: 0.0,
            max_drift_km: 0.0,
            evaporated_pct: 0.0,
            dispersed_pct: 0.0,
            emulsion_pct: 0.0,
            remaining_pct: 100.0,
            viscosity_mpa_s: base_viscosity,
        }
    }
}

/// One hourly centroid sample of the active population.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrajectoryPoint {
    pub time_s: f64,
    pub lat: f64,
    pub lon: f64,
}
