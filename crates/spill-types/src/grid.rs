//! Gridded environmental field container.
//!
//! A `FieldGrid` holds one preprocessed forcing document: ascending
//! latitude/longitude axes, an optional hour-offset time axis, and an
//! open name → flattened-array variable map. The variable names are not
//! baked in; `wind` happens to carry `u10`/`v10`, `current` carries
//! `uo`/`vo`, and a future document with other names needs no code
//! change here.
//!
//! Document layout (row-major, time outermost):
//! `data[t * n_lat * n_lon + i * n_lon + j]`

use crate::error::{SpillError, SpillResult};
use ndarray::Array1;
use std::collections::HashMap;

/// One gridded scalar field set, immutable after load.
#[derive(Debug, Clone)]
pub struct FieldGrid {
    pub lat: Array1<f64>,
    pub lon: Array1<f64>,
    /// Hours from the grid epoch; `None` marks a static field.
    pub time_hours: Option<Array1<f64>>,
    vars: HashMap<String, Array1<f64>>,
}

fn check_axis_ascending(name: &str, axis: &[f64]) -> SpillResult<()> {
    if axis.len() < 2 {
        return Err(SpillError::GridRejected(format!(
            "{name} axis must have at least 2 points, got {}",
            axis.len()
        )));
    }
    for (i, pair) in axis.windows(2).enumerate() {
        if !pair[0].is_finite() || !pair[1].is_finite() {
            return Err(SpillError::GridRejected(format!(
                "{name} axis contains non-finite coordinate near index {i}"
            )));
        }
        if pair[1] <= pair[0] {
            return Err(SpillError::GridRejected(format!(
                "{name} axis not strictly ascending at index {}: {} <= {}",
                i + 1,
                pair[1],
                pair[0]
            )));
        }
    }
    Ok(())
}

fn number_array(name: &str, value: &serde_json::Value) -> SpillResult<Vec<f64>> {
    let arr = value.as_array().ok_or_else(|| {
        SpillError::GridRejected(format!("'{name}' must be an array of numbers"))
    })?;
    let mut out = Vec::with_capacity(arr.len());
    for (i, v) in arr.iter().enumerate() {
        match v.as_f64() {
            Some(x) => out.push(x),
            None => {
                return Err(SpillError::GridRejected(format!(
                    "'{name}'[{i}] is not a number"
                )))
            }
        }
    }
    Ok(out)
}

impl FieldGrid {
    /// Build and validate a grid from parsed components. Used by the
    /// JSON loaders and by tests that synthesize small grids.
    pub fn new(
        lat: Vec<f64>,
        lon: Vec<f64>,
        time_hours: Option<Vec<f64>>,
        vars: HashMap<String, Vec<f64>>,
    ) -> SpillResult<Self> {
        check_axis_ascending("lat", &lat)?;
        check_axis_ascending("lon", &lon)?;
        if let Some(times) = &time_hours {
            if times.is_empty() {
                return Err(SpillError::GridRejected(
                    "time_hours axis must be non-empty".to_string(),
                ));
            }
            if times.len() > 1 {
                check_axis_ascending("time_hours", times)?;
            } else if !times[0].is_finite() {
                return Err(SpillError::GridRejected(
                    "time_hours contains non-finite value".to_string(),
                ));
            }
        }

        let n_time = time_hours.as_ref().map_or(1, Vec::len);
        let expected = n_time * lat.len() * lon.len();
        let mut checked = HashMap::with_capacity(vars.len());
        for (name, data) in vars {
            if data.len() != expected {
                return Err(SpillError::GridRejected(format!(
                    "variable '{name}' has {} values, expected {expected}",
                    data.len()
                )));
            }
            if data.iter().any(|v| !v.is_finite()) {
                return Err(SpillError::GridRejected(format!(
                    "variable '{name}' contains non-finite values"
                )));
            }
            checked.insert(name, Array1::from_vec(data));
        }
        if checked.is_empty() {
            return Err(SpillError::GridRejected(
                "grid carries no variable arrays".to_string(),
            ));
        }

        Ok(FieldGrid {
            lat: Array1::from_vec(lat),
            lon: Array1::from_vec(lon),
            time_hours: time_hours.map(Array1::from_vec),
            vars: checked,
        })
    }

    /// Parse a `{name}_grid.json` document. Rejection leaves the caller's
    /// slot empty; it never aborts a simulation.
    pub fn from_json_str(text: &str) -> SpillResult<Self> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        Self::from_json_value(&value, false)
    }

    /// Parse a grid document. With `sanitize`, non-finite data values are
    /// replaced the way the offline preprocessing does it: 1.0 for the
    /// land/sea mask (`lsm`, missing ⇒ land), 0.0 for everything else.
    pub fn from_json_value(value: &serde_json::Value, sanitize: bool) -> SpillResult<Self> {
        let obj = value.as_object().ok_or_else(|| {
            SpillError::GridRejected("grid document must be a JSON object".to_string())
        })?;

        let lat = number_array(
            "lat",
            obj.get("lat")
                .ok_or_else(|| SpillError::GridRejected("missing 'lat' axis".to_string()))?,
        )?;
        let lon = number_array(
            "lon",
            obj.get("lon")
                .ok_or_else(|| SpillError::GridRejected("missing 'lon' axis".to_string()))?,
        )?;
        let time_hours = match obj.get("time_hours") {
            Some(v) => Some(number_array("time_hours", v)?),
            None => None,
        };

        let mut vars = HashMap::new();
        for (name, v) in obj {
            if matches!(name.as_str(), "lat" | "lon" | "time_hours" | "shape") {
                continue;
            }
            // Non-array keys (provenance strings etc.) are ignored.
            if !v.is_array() {
                continue;
            }
            let raw = v.as_array().unwrap();
            let mut data = Vec::with_capacity(raw.len());
            let fill = if name == "lsm" { 1.0 } else { 0.0 };
            for (i, item) in raw.iter().enumerate() {
                match item.as_f64() {
                    Some(x) if x.is_finite() => data.push(x),
                    Some(_) | None if sanitize => data.push(fill),
                    _ => {
                        return Err(SpillError::GridRejected(format!(
                            "'{name}'[{i}] is not a finite number"
                        )))
                    }
                }
            }
            vars.insert(name.clone(), data);
        }

        Self::new(lat, lon, time_hours, vars)
    }

    pub fn n_lat(&self) -> usize {
        self.lat.len()
    }

    pub fn n_lon(&self) -> usize {
        self.lon.len()
    }

    pub fn n_time(&self) -> usize {
        self.time_hours.as_ref().map_or(1, Array1::len)
    }

    pub fn is_static(&self) -> bool {
        self.time_hours.is_none()
    }

    pub fn lat_min(&self) -> f64 {
        self.lat[0]
    }

    pub fn lat_max(&self) -> f64 {
        self.lat[self.lat.len() - 1]
    }

    pub fn lon_min(&self) -> f64 {
        self.lon[0]
    }

    pub fn lon_max(&self) -> f64 {
        self.lon[self.lon.len() - 1]
    }

    /// Uniform latitude spacing (axes are uniformly spaced by contract).
    pub fn d_lat(&self) -> f64 {
        (self.lat_max() - self.lat_min()) / (self.n_lat() - 1) as f64
    }

    pub fn d_lon(&self) -> f64 {
        (self.lon_max() - self.lon_min()) / (self.n_lon() - 1) as f64
    }

    /// Bounding-box membership, boundaries inclusive.
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        lat >= self.lat_min() && lat <= self.lat_max() && lon >= self.lon_min() && lon <= self.lon_max()
    }

    pub fn var(&self, name: &str) -> Option<&Array1<f64>> {
        self.vars.get(name)
    }

    pub fn has_var(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    pub fn var_names(&self) -> impl Iterator<Item = &str> {
        self.vars.keys().map(String::as_str)
    }

    /// Flat index for a time-varying sample.
    pub fn idx(&self, t: usize, i: usize, j: usize) -> usize {
        (t * self.n_lat() + i) * self.n_lon() + j
    }

    /// Flat index for a static sample.
    pub fn idx2(&self, i: usize, j: usize) -> usize {
        i * self.n_lon() + j
    }
}
