//! Geodesic helpers on the spherical Earth used by the integrator and
//! the statistics aggregator.

use spill_types::constants::{EARTH_RADIUS_M, MAX_ABS_LATITUDE_DEG};

/// Great-circle distance (km) between two geographic points.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let d_phi = (lat2 - lat1).to_radians();
    let d_lambda = (lon2 - lon1).to_radians();

    let a = (d_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_M * c / 1000.0
}

/// Convert a metric displacement (east `du_m`, north `dv_m`) at latitude
/// `lat_deg` into degree offsets. Latitude is clamped short of the poles
/// so the metres-per-degree-longitude factor stays finite; the model is
/// not meant for polar drift.
pub fn displacement_deg(du_m: f64, dv_m: f64, lat_deg: f64) -> (f64, f64) {
    let lat = lat_deg.clamp(-MAX_ABS_LATITUDE_DEG, MAX_ABS_LATITUDE_DEG);
    let d_lat = (dv_m / EARTH_RADIUS_M).to_degrees();
    let d_lon = (du_m / (EARTH_RADIUS_M * lat.to_radians().cos())).to_degrees();
    (d_lat, d_lon)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_zero_distance() {
        assert_eq!(haversine_km(38.5, 119.0, 38.5, 119.0), 0.0);
    }

    #[test]
    fn test_haversine_one_degree_latitude() {
        // One degree of latitude on the R = 6371 km sphere is ~111.19 km.
        let d = haversine_km(0.0, 0.0, 1.0, 0.0);
        assert!((d - 111.195).abs() < 0.01, "got {d}");
    }

    #[test]
    fn test_haversine_symmetry() {
        let d1 = haversine_km(30.0, 124.0, 31.0, 125.0);
        let d2 = haversine_km(31.0, 125.0, 30.0, 124.0);
        assert!((d1 - d2).abs() < 1e-12);
    }

    #[test]
    fn test_displacement_north_only_changes_latitude() {
        let (d_lat, d_lon) = displacement_deg(0.0, 1000.0, 38.5);
        assert!((d_lon).abs() < 1e-15);
        assert!((d_lat - (1000.0_f64 / 6_371_000.0).to_degrees()).abs() < 1e-15);
    }

    #[test]
    fn test_displacement_longitude_stretches_with_latitude() {
        let (_, d_lon_equator) = displacement_deg(1000.0, 0.0, 0.0);
        let (_, d_lon_high) = displacement_deg(1000.0, 0.0, 60.0);
        // cos(60°) = 0.5 ⇒ the same eastward metre span covers twice the
        // longitude at 60°N.
        assert!((d_lon_high / d_lon_equator - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_displacement_finite_at_pole() {
        let (d_lat, d_lon) = displacement_deg(1000.0, 1000.0, 90.0);
        assert!(d_lat.is_finite());
        assert!(d_lon.is_finite());
    }
}
