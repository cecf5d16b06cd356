//! Named forcing-grid catalog.
//!
//! Four slots are consumed when present: `wind` (u10/v10), `current`
//! (uo/vo), `temperature` (thetao) and the static `landmask` (lsm).
//! Each slot loads independently; a rejected or missing document leaves
//! its slot empty and the engine degrades to the scalar fallback for
//! that field.

use log::{info, warn};
use serde::Serialize;
use spill_math::interp;
use spill_types::constants::LAND_THRESHOLD;
use spill_types::error::SpillResult;
use spill_types::grid::FieldGrid;
use std::path::Path;

/// Slot names, in load/report order.
pub const GRID_NAMES: [&str; 4] = ["wind", "current", "temperature", "landmask"];

/// Gridded-forcing inputs owned by one simulation (shareable by
/// reference across simulations; immutable after load).
#[derive(Debug, Clone, Default)]
pub struct EnvironmentFields {
    pub wind: Option<FieldGrid>,
    pub current: Option<FieldGrid>,
    pub temperature: Option<FieldGrid>,
    pub landmask: Option<FieldGrid>,
}

/// Per-slot availability, mirroring the grid-status report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridStatus {
    pub wind: bool,
    pub current: bool,
    pub temperature: bool,
    pub landmask: bool,
}

/// Wind and current samples for one parcel position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridDrift {
    pub u10: f64,
    pub v10: f64,
    pub uo: f64,
    pub vo: f64,
}

impl EnvironmentFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every available `{name}_grid.json` under `dir`. Missing
    /// files and rejected documents leave their slot empty.
    pub fn load_dir(dir: &Path, sanitize: bool) -> Self {
        let mut fields = Self::new();
        for name in GRID_NAMES {
            let path = dir.join(format!("{name}_grid.json"));
            if !path.exists() {
                continue;
            }
            match Self::load_file(&path, sanitize) {
                Ok(grid) => {
                    let size_kb = std::fs::metadata(&path).map(|m| m.len() / 1024).unwrap_or(0);
                    info!(
                        "loaded {} grid: {}x{} points, {} time slice(s), {} KB",
                        name,
                        grid.n_lat(),
                        grid.n_lon(),
                        grid.n_time(),
                        size_kb
                    );
                    fields.set(name, grid);
                }
                Err(err) => {
                    warn!("{name} grid rejected: {err}");
                }
            }
        }
        fields
    }

    fn load_file(path: &Path, sanitize: bool) -> SpillResult<FieldGrid> {
        let text = std::fs::read_to_string(path)?;
        let value: serde_json::Value = serde_json::from_str(&text)?;
        FieldGrid::from_json_value(&value, sanitize)
    }

    /// Assign a slot by name. Unknown names are ignored.
    pub fn set(&mut self, name: &str, grid: FieldGrid) {
        match name {
            "wind" => self.wind = Some(grid),
            "current" => self.current = Some(grid),
            "temperature" => self.temperature = Some(grid),
            "landmask" => self.landmask = Some(grid),
            other => warn!("ignoring unknown grid slot '{other}'"),
        }
    }

    pub fn any_loaded(&self) -> bool {
        self.wind.is_some()
            || self.current.is_some()
            || self.temperature.is_some()
            || self.landmask.is_some()
    }

    pub fn status(&self) -> GridStatus {
        GridStatus {
            wind: self.wind.is_some(),
            current: self.current.is_some(),
            temperature: self.temperature.is_some(),
            landmask: self.landmask.is_some(),
        }
    }

    /// Wind/current samples at a parcel position, or `None` when neither
    /// grid covers it (the parcel then falls back to scalar forcing).
    /// A slot that is absent or does not cover the position contributes
    /// zero, not an error.
    pub fn sample_drift(&self, lat: f64, lon: f64, time_hours: f64) -> Option<GridDrift> {
        let wind_cover = self
            .wind
            .as_ref()
            .is_some_and(|g| g.contains(lat, lon));
        let current_cover = self
            .current
            .as_ref()
            .is_some_and(|g| g.contains(lat, lon));
        if !wind_cover && !current_cover {
            return None;
        }

        let mut drift = GridDrift {
            u10: 0.0,
            v10: 0.0,
            uo: 0.0,
            vo: 0.0,
        };
        if wind_cover {
            let grid = self.wind.as_ref().unwrap();
            drift.u10 = interp::sample(grid, "u10", lat, lon, time_hours);
            drift.v10 = interp::sample(grid, "v10", lat, lon, time_hours);
        }
        if current_cover {
            let grid = self.current.as_ref().unwrap();
            drift.uo = interp::sample(grid, "uo", lat, lon, time_hours);
            drift.vo = interp::sample(grid, "vo", lat, lon, time_hours);
        }
        Some(drift)
    }

    /// Sea-surface temperature at a position, when covered.
    pub fn sea_surface_temp(&self, lat: f64, lon: f64, time_hours: f64) -> Option<f64> {
        self.temperature
            .as_ref()
            .filter(|g| g.contains(lat, lon))
            .map(|g| interp::sample(g, "thetao", lat, lon, time_hours))
    }

    /// Whether the masked position is land. `None` when no mask covers
    /// the position.
    pub fn is_land(&self, lat: f64, lon: f64) -> Option<bool> {
        self.landmask
            .as_ref()
            .filter(|g| g.contains(lat, lon))
            .map(|g| interp::sample(g, "lsm", lat, lon, 0.0) > LAND_THRESHOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn grid(var: &str, data: Vec<f64>) -> FieldGrid {
        let mut vars = HashMap::new();
        vars.insert(var.to_string(), data);
        FieldGrid::new(vec![0.0, 1.0], vec![0.0, 1.0], None, vars).unwrap()
    }

    fn wind_grid(u: f64, v: f64) -> FieldGrid {
        let mut vars = HashMap::new();
        vars.insert("u10".to_string(), vec![u; 4]);
        vars.insert("v10".to_string(), vec![v; 4]);
        FieldGrid::new(vec![0.0, 1.0], vec![0.0, 1.0], None, vars).unwrap()
    }

    #[test]
    fn test_empty_catalog_reports_nothing() {
        let fields = EnvironmentFields::new();
        assert!(!fields.any_loaded());
        assert_eq!(
            fields.status(),
            GridStatus {
                wind: false,
                current: false,
                temperature: false,
                landmask: false
            }
        );
        assert!(fields.sample_drift(0.5, 0.5, 0.0).is_none());
        assert!(fields.is_land(0.5, 0.5).is_none());
    }

    #[test]
    fn test_wind_only_drift_zeroes_current() {
        let mut fields = EnvironmentFields::new();
        fields.set("wind", wind_grid(3.0, -1.0));
        let drift = fields.sample_drift(0.5, 0.5, 0.0).unwrap();
        assert_eq!(drift.u10, 3.0);
        assert_eq!(drift.v10, -1.0);
        assert_eq!(drift.uo, 0.0);
        assert_eq!(drift.vo, 0.0);
    }

    #[test]
    fn test_out_of_domain_parcel_gets_no_drift() {
        let mut fields = EnvironmentFields::new();
        fields.set("wind", wind_grid(3.0, -1.0));
        assert!(fields.sample_drift(5.0, 5.0, 0.0).is_none());
    }

    #[test]
    fn test_land_threshold() {
        let mut fields = EnvironmentFields::new();
        fields.set("landmask", grid("lsm", vec![0.0, 0.0, 1.0, 1.0]));
        // lsm is 0 along the lat=0 edge, 1 along lat=1.
        assert_eq!(fields.is_land(0.0, 0.5), Some(false));
        assert_eq!(fields.is_land(1.0, 0.5), Some(true));
        assert!(fields.is_land(2.0, 0.5).is_none());
    }

    #[test]
    fn test_temperature_sampled_when_covered() {
        let mut fields = EnvironmentFields::new();
        fields.set("temperature", grid("thetao", vec![18.0; 4]));
        assert_eq!(fields.sea_surface_temp(0.5, 0.5, 0.0), Some(18.0));
        assert_eq!(fields.sea_surface_temp(3.0, 0.5, 0.0), None);
    }

    #[test]
    fn test_load_dir_skips_missing_and_rejected() {
        let dir = std::env::temp_dir().join("spill_fields_test");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("wind_grid.json"),
            r#"{"lat":[0.0,1.0],"lon":[0.0,1.0],"u10":[1,1,1,1],"v10":[0,0,0,0]}"#,
        )
        .unwrap();
        // Descending latitude axis: rejected, slot stays empty.
        std::fs::write(
            dir.join("current_grid.json"),
            r#"{"lat":[1.0,0.0],"lon":[0.0,1.0],"uo":[1,1,1,1]}"#,
        )
        .unwrap();

        let fields = EnvironmentFields::load_dir(&dir, false);
        let status = fields.status();
        assert!(status.wind);
        assert!(!status.current);
        assert!(!status.temperature);
        assert!(!status.landmask);

        std::fs::remove_dir_all(&dir).ok();
    }
}
