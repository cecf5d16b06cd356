//! Population aggregation after each step.

use spill_math::geo::haversine_km;
use spill_types::constants::KM_PER_DEG_LAT;
use spill_types::state::{Particle, SpillStats};
use std::f64::consts::PI;

/// Mean position of the active parcels, if any are left afloat.
pub fn centroid_of_active(particles: &[Particle]) -> Option<(f64, f64)> {
    let mut count = 0usize;
    let mut lat_sum = 0.0;
    let mut lon_sum = 0.0;
    for p in particles.iter().filter(|p| p.active) {
        count += 1;
        lat_sum += p.lat;
        lon_sum += p.lon;
    }
    if count == 0 {
        return None;
    }
    Some((lat_sum / count as f64, lon_sum / count as f64))
}

/// Aggregate the population into a fresh snapshot.
///
/// With no parcels afloat the spatial measures (centroid, area, max
/// drift) and the weathering snapshot keep their previous values; only
/// the counts refresh.
pub fn compute(
    particles: &[Particle],
    origin_lat: f64,
    origin_lng: f64,
    previous: &SpillStats,
) -> SpillStats {
    let beached = particles.iter().filter(|p| p.beached).count();

    // The weathering curves are global, so the first active parcel is
    // representative of the whole slick.
    let lead = match particles.iter().find(|p| p.active) {
        Some(lead) => lead,
        None => {
            return SpillStats {
                active: 0,
                beached,
                ..*previous
            }
        }
    };
    let (centroid_lat, centroid_lon) =
        centroid_of_active(particles).unwrap_or((lead.lat, lead.lon));

    let mut active = 0usize;
    let mut var_lat = 0.0;
    let mut var_lon = 0.0;
    let mut max_drift_km = 0.0f64;
    for p in particles.iter().filter(|p| p.active) {
        active += 1;
        var_lat += (p.lat - centroid_lat) * (p.lat - centroid_lat);
        var_lon += (p.lon - centroid_lon) * (p.lon - centroid_lon);
        max_drift_km = max_drift_km.max(haversine_km(origin_lat, origin_lng, p.lat, p.lon));
    }
    let sigma_lat_km = (var_lat / active as f64).sqrt() * KM_PER_DEG_LAT;
    let sigma_lon_km =
        (var_lon / active as f64).sqrt() * KM_PER_DEG_LAT * centroid_lat.to_radians().cos();
    let area_km2 = PI * (2.0 * sigma_lat_km) * (2.0 * sigma_lon_km);

    let remaining_pct = (1.0 - lead.evaporated - lead.dispersed) * 100.0;

    SpillStats {
        active,
        beached,
        centroid_lat,
        centroid_lon,
        area_km2,
        max_drift_km,
        evaporated_pct: lead.evaporated * 100.0,
        dispersed_pct: lead.dispersed * 100.0,
        emulsion_pct: lead.emulsion_water * 100.0,
        remaining_pct,
        viscosity_mpa_s: lead.viscosity,
    }
}
