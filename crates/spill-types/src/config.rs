// ─────────────────────────────────────────────────────────────────────
// SCPN Spill Core — Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use crate::error::{SpillError, SpillResult};
use crate::oil::OilKind;
use serde::{Deserialize, Serialize};

/// Release mode of the spill source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpillMode {
    /// All parcels enter the water at t = 0.
    Instant,
    /// Parcels are released linearly over `spill_duration` hours.
    Continuous,
}

/// Complete run configuration.
///
/// Field names follow the camelCase convention of the scenario and
/// configuration documents, so those deserialize without adaptation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpillConfig {
    /// Spill origin latitude (degrees).
    pub spill_lat: f64,
    /// Spill origin longitude (degrees).
    pub spill_lng: f64,
    /// Released oil volume (tonnes).
    pub oil_volume: f64,
    pub oil_type: OilKind,
    pub spill_mode: SpillMode,
    /// Release duration (hours); only read in continuous mode.
    pub spill_duration: f64,
    /// Number of tracked parcels.
    pub particle_count: usize,
    /// Integration step (seconds).
    pub time_step: f64,
    /// Simulation horizon (seconds).
    pub max_time: f64,
    /// Scalar fallback wind speed at 10 m (m/s).
    pub wind_speed: f64,
    /// Scalar wind direction, meteorological "from" (degrees).
    pub wind_dir: f64,
    /// Scalar fallback surface current speed (m/s).
    pub current_speed: f64,
    /// Scalar current direction, oceanographic "to" (degrees).
    pub current_dir: f64,
    /// Water temperature (°C) used by the weathering curves.
    pub water_temp: f64,
    /// Prefer gridded forcing where grids are loaded and cover a parcel.
    pub use_grid_data: bool,
    /// Offset (hours) added to the simulation clock when sampling grids.
    pub grid_time_offset: f64,
    /// Integration steps executed per driver tick.
    pub playback_speed: u32,
    /// Optional RNG seed. `None` seeds from OS entropy; a fixed value
    /// makes release placement and turbulent diffusion reproducible.
    pub rng_seed: Option<u64>,
}

impl Default for SpillConfig {
    fn default() -> Self {
        SpillConfig {
            spill_lat: 38.5,
            spill_lng: 119.0,
            oil_volume: 500.0,
            oil_type: OilKind::Crude,
            spill_mode: SpillMode::Instant,
            spill_duration: 6.0,
            particle_count: 500,
            time_step: 600.0,
            max_time: 72.0 * 3600.0,
            wind_speed: 5.0,
            wind_dir: 180.0,
            current_speed: 0.3,
            current_dir: 90.0,
            water_temp: 18.0,
            use_grid_data: false,
            grid_time_offset: 0.0,
            playback_speed: 1,
            rng_seed: None,
        }
    }
}

impl SpillConfig {
    /// Load from a JSON document.
    pub fn from_file(path: &str) -> SpillResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject every malformed configuration before a run starts. A step
    /// never raises, so this is the only gate.
    pub fn validate(&self) -> SpillResult<()> {
        if !self.spill_lat.is_finite() || !(-90.0..=90.0).contains(&self.spill_lat) {
            return Err(SpillError::ConfigError(format!(
                "spill_lat must be within [-90, 90], got {}",
                self.spill_lat
            )));
        }
        if !self.spill_lng.is_finite() {
            return Err(SpillError::ConfigError(
                "spill_lng must be finite".to_string(),
            ));
        }
        if !self.oil_volume.is_finite() || self.oil_volume <= 0.0 {
            return Err(SpillError::ConfigError(format!(
                "oil_volume must be finite and > 0, got {}",
                self.oil_volume
            )));
        }
        if self.spill_mode == SpillMode::Continuous
            && (!self.spill_duration.is_finite() || self.spill_duration <= 0.0)
        {
            return Err(SpillError::ConfigError(format!(
                "spill_duration must be finite and > 0 in continuous mode, got {}",
                self.spill_duration
            )));
        }
        if self.particle_count == 0 {
            return Err(SpillError::ConfigError(
                "particle_count must be >= 1".to_string(),
            ));
        }
        if !self.time_step.is_finite() || self.time_step <= 0.0 {
            return Err(SpillError::ConfigError(format!(
                "time_step must be finite and > 0, got {}",
                self.time_step
            )));
        }
        if !self.max_time.is_finite() || self.max_time <= 0.0 {
            return Err(SpillError::ConfigError(format!(
                "max_time must be finite and > 0, got {}",
                self.max_time
            )));
        }
        if !self.wind_speed.is_finite() || self.wind_speed < 0.0 {
            return Err(SpillError::ConfigError(
                "wind_speed must be finite and >= 0".to_string(),
            ));
        }
        if !self.current_speed.is_finite() || self.current_speed < 0.0 {
            return Err(SpillError::ConfigError(
                "current_speed must be finite and >= 0".to_string(),
            ));
        }
        if !self.wind_dir.is_finite() || !self.current_dir.is_finite() {
            return Err(SpillError::ConfigError(
                "wind_dir and current_dir must be finite".to_string(),
            ));
        }
        if !self.water_temp.is_finite() {
            return Err(SpillError::ConfigError(
                "water_temp must be finite".to_string(),
            ));
        }
        if !self.grid_time_offset.is_finite() {
            return Err(SpillError::ConfigError(
                "grid_time_offset must be finite".to_string(),
            ));
        }
        if self.playback_speed == 0 {
            return Err(SpillError::ConfigError(
                "playback_speed must be >= 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Release window length in seconds (continuous mode).
    pub fn spill_duration_s(&self) -> f64 {
        self.spill_duration * 3600.0
    }

    /// Initial mass of one parcel (kg), before weathering losses.
    pub fn parcel_mass_kg(&self) -> f64 {
        self.oil_volume * 1000.0 / self.particle_count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(SpillConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_non_positive_counts_and_times() {
        let mut cfg = SpillConfig {
            particle_count: 0,
            ..SpillConfig::default()
        };
        assert!(cfg.validate().is_err());

        cfg = SpillConfig {
            time_step: 0.0,
            ..SpillConfig::default()
        };
        assert!(cfg.validate().is_err());

        cfg = SpillConfig {
            max_time: -1.0,
            ..SpillConfig::default()
        };
        assert!(cfg.validate().is_err());

        cfg = SpillConfig {
            playback_speed: 0,
            ..SpillConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_rejects_non_finite_environment() {
        for patch in [
            SpillConfig {
                wind_speed: f64::NAN,
                ..SpillConfig::default()
            },
            SpillConfig {
                current_dir: f64::INFINITY,
                ..SpillConfig::default()
            },
            SpillConfig {
                water_temp: f64::NAN,
                ..SpillConfig::default()
            },
            SpillConfig {
                spill_lat: 95.0,
                ..SpillConfig::default()
            },
        ] {
            assert!(patch.validate().is_err());
        }
    }

    #[test]
    fn test_spill_duration_only_checked_in_continuous_mode() {
        let instant = SpillConfig {
            spill_duration: 0.0,
            ..SpillConfig::default()
        };
        assert!(instant.validate().is_ok());

        let continuous = SpillConfig {
            spill_mode: SpillMode::Continuous,
            spill_duration: 0.0,
            ..SpillConfig::default()
        };
        assert!(continuous.validate().is_err());
    }

    #[test]
    fn test_deserializes_camel_case_document() {
        let json = r#"{
            "spillLat": 30.0,
            "spillLng": 124.0,
            "oilVolume": 2000,
            "oilType": "fuel",
            "spillMode": "continuous",
            "spillDuration": 12,
            "particleCount": 1000,
            "useGridData": true
        }"#;
        let cfg: SpillConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.oil_type, OilKind::Fuel);
        assert_eq!(cfg.spill_mode, SpillMode::Continuous);
        assert_eq!(cfg.particle_count, 1000);
        assert!(cfg.use_grid_data);
        // Unlisted fields fall back to defaults.
        assert_eq!(cfg.time_step, 600.0);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_from_file_validates_on_load() {
        let dir = std::env::temp_dir().join("spill_config_test");
        std::fs::create_dir_all(&dir).unwrap();

        let good = dir.join("run.json");
        std::fs::write(&good, r#"{"oilType": "diesel", "particleCount": 10}"#).unwrap();
        let cfg = SpillConfig::from_file(good.to_str().unwrap()).unwrap();
        assert_eq!(cfg.oil_type, OilKind::Diesel);
        assert_eq!(cfg.particle_count, 10);

        let bad = dir.join("bad.json");
        std::fs::write(&bad, r#"{"particleCount": 0}"#).unwrap();
        assert!(SpillConfig::from_file(bad.to_str().unwrap()).is_err());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_roundtrip_serialization() {
        let cfg = SpillConfig {
            rng_seed: Some(42),
            ..SpillConfig::default()
        };
        let json = serde_json::to_string_pretty(&cfg).unwrap();
        let back: SpillConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.rng_seed, Some(42));
        assert_eq!(back.particle_count, cfg.particle_count);
        assert_eq!(back.oil_type, cfg.oil_type);
    }

    #[test]
    fn test_parcel_mass() {
        let cfg = SpillConfig {
            oil_volume: 500.0,
            particle_count: 500,
            ..SpillConfig::default()
        };
        assert!((cfg.parcel_mass_kg() - 1000.0).abs() < 1e-12);
    }
}
