// ─────────────────────────────────────────────────────────────────────
// SCPN Spill Core — Property-Based Tests (proptest) for spill-types
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Property-based tests for spill-types: FieldGrid construction
//! invariants and configuration validation.

use proptest::prelude::*;
use spill_types::config::SpillConfig;
use spill_types::grid::FieldGrid;
use std::collections::HashMap;

fn axis(min: f64, step: f64, n: usize) -> Vec<f64> {
    (0..n).map(|i| min + step * i as f64).collect()
}

fn vars(name: &str, len: usize) -> HashMap<String, Vec<f64>> {
    let mut map = HashMap::new();
    map.insert(name.to_string(), vec![0.5; len]);
    map
}

// ── FieldGrid Construction Invariants ────────────────────────────────

proptest! {
    /// Dimensions and axis bounds match the inputs.
    #[test]
    fn grid_dimensions_match(
        n_lat in 2usize..24,
        n_lon in 2usize..24,
        lat_min in -60.0f64..60.0,
        lon_min in 0.0f64..180.0,
        step in 0.05f64..2.0,
    ) {
        let grid = FieldGrid::new(
            axis(lat_min, step, n_lat),
            axis(lon_min, step, n_lon),
            None,
            vars("lsm", n_lat * n_lon),
        ).unwrap();

        prop_assert_eq!(grid.n_lat(), n_lat);
        prop_assert_eq!(grid.n_lon(), n_lon);
        prop_assert_eq!(grid.n_time(), 1);
        prop_assert!((grid.lat_min() - lat_min).abs() < 1e-12);
        prop_assert!((grid.d_lat() - step).abs() < 1e-9);
        prop_assert!((grid.d_lon() - step).abs() < 1e-9);
    }

    /// Every point inside the bounding box is contained; points pushed
    /// beyond either axis are not.
    #[test]
    fn grid_containment_matches_bounds(
        n in 2usize..16,
        frac_lat in 0.0f64..1.0,
        frac_lon in 0.0f64..1.0,
    ) {
        let grid = FieldGrid::new(
            axis(10.0, 0.5, n),
            axis(100.0, 0.5, n),
            None,
            vars("lsm", n * n),
        ).unwrap();

        let lat = grid.lat_min() + frac_lat * (grid.lat_max() - grid.lat_min());
        let lon = grid.lon_min() + frac_lon * (grid.lon_max() - grid.lon_min());
        prop_assert!(grid.contains(lat, lon));
        prop_assert!(!grid.contains(grid.lat_max() + 0.1, lon));
        prop_assert!(!grid.contains(lat, grid.lon_min() - 0.1));
    }

    /// A variable length that disagrees with the axes is rejected.
    #[test]
    fn grid_rejects_wrong_variable_length(
        n_lat in 2usize..12,
        n_lon in 2usize..12,
        excess in 1usize..5,
    ) {
        let result = FieldGrid::new(
            axis(0.0, 1.0, n_lat),
            axis(0.0, 1.0, n_lon),
            None,
            vars("u10", n_lat * n_lon + excess),
        );
        prop_assert!(result.is_err());
    }

    /// Reversing an axis always rejects the grid.
    #[test]
    fn grid_rejects_descending_axes(n in 3usize..12) {
        let mut descending = axis(0.0, 1.0, n);
        descending.reverse();
        let result = FieldGrid::new(
            descending,
            axis(0.0, 1.0, n),
            None,
            vars("lsm", n * n),
        );
        prop_assert!(result.is_err());
    }

    /// The flat index walks the array row-major, time outermost.
    #[test]
    fn grid_index_is_row_major(
        n_time in 1usize..5,
        n_lat in 2usize..8,
        n_lon in 2usize..8,
    ) {
        let len = n_time * n_lat * n_lon;
        let time_axis = if n_time > 1 { Some(axis(0.0, 1.0, n_time)) } else { None };
        let grid = FieldGrid::new(
            axis(0.0, 1.0, n_lat),
            axis(0.0, 1.0, n_lon),
            time_axis,
            vars("uo", len),
        ).unwrap();

        let mut expected = 0usize;
        for t in 0..grid.n_time() {
            for i in 0..n_lat {
                for j in 0..n_lon {
                    prop_assert_eq!(grid.idx(t, i, j), expected);
                    expected += 1;
                }
            }
        }
    }
}

// ── Configuration Validation ─────────────────────────────────────────

proptest! {
    /// Any positive sizing keeps the default configuration valid.
    #[test]
    fn config_accepts_positive_sizing(
        particles in 1usize..100_000,
        dt in 1.0f64..7200.0,
        horizon in 1.0f64..1.0e7,
    ) {
        let config = SpillConfig {
            particle_count: particles,
            time_step: dt,
            max_time: horizon,
            ..SpillConfig::default()
        };
        prop_assert!(config.validate().is_ok());
        prop_assert!(config.parcel_mass_kg() > 0.0);
    }

    /// Serialization round-trips the document shape.
    #[test]
    fn config_roundtrips_through_json(
        lat in -89.0f64..89.0,
        lng in -179.0f64..179.0,
        volume in 1.0f64..10_000.0,
    ) {
        let config = SpillConfig {
            spill_lat: lat,
            spill_lng: lng,
            oil_volume: volume,
            ..SpillConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: SpillConfig = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back.spill_lat, lat);
        prop_assert_eq!(back.spill_lng, lng);
        prop_assert_eq!(back.oil_volume, volume);
    }
}
