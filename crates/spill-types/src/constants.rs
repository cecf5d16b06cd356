// ─────────────────────────────────────────────────────────────────────
// SCPN Spill Core — Constants
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
/// Mean Earth radius (m), shared by displacement and haversine math.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Kilometres per degree of latitude.
pub const KM_PER_DEG_LAT: f64 = 111.32;

/// Fraction of the 10 m wind speed transferred to surface oil drift.
pub const WIND_DRIFT_FACTOR: f64 = 0.03;

/// Ekman deflection of wind-driven drift, degrees right of the wind.
pub const EKMAN_DEFLECTION_DEG: f64 = 15.0;

/// Representative wind speed (m/s) fed to weathering while gridded
/// forcing is active. The weathering curves are global, so they cannot
/// see spatial wind variability.
pub const GRID_MODE_WIND_M_S: f64 = 5.0;

/// Residual mass fraction below which a parcel is deactivated.
pub const MIN_RESIDUAL_FRACTION: f64 = 0.05;

/// Hard caps on the weathering fractions.
pub const MAX_DISPERSED_FRACTION: f64 = 0.3;
pub const MAX_EMULSION_WATER: f64 = 0.7;

/// Wind thresholds (m/s) below which dispersion / emulsification stall.
pub const MIN_DISPERSION_WIND_M_S: f64 = 5.0;
pub const MIN_EMULSION_WIND_M_S: f64 = 3.0;

/// Land/sea mask value above which a cell counts as land.
pub const LAND_THRESHOLD: f64 = 0.5;

/// Release disk radii (m) around the spill origin.
pub const INSTANT_RELEASE_RADIUS_M: f64 = 200.0;
pub const CONTINUOUS_RELEASE_RADIUS_M: f64 = 100.0;

/// Latitude magnitude clamp keeping cos(lat) away from zero at the poles.
pub const MAX_ABS_LATITUDE_DEG: f64 = 89.999;
