//! Analytic ambient-condition model.
//!
//! Smooth pseudo-periodic sea-state curves used when no measured
//! environment is attached to a run. The scalar integrator fallback
//! applies its own short-period perturbations on top of the configured
//! means; these curves describe the slow synoptic variation a host can
//! display or feed into a configuration.

use serde::Serialize;

/// Environment snapshot at one simulation time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AmbientConditions {
    /// Wind speed at 10 m (m/s).
    pub wind_speed: f64,
    /// Wind direction, meteorological "from" (degrees).
    pub wind_dir: f64,
    /// Surface current speed (m/s).
    pub current_speed: f64,
    /// Current direction, oceanographic "to" (degrees).
    pub current_dir: f64,
    /// Sea-surface temperature (°C).
    pub temperature: f64,
    /// Significant wave height (m).
    pub wave_height: f64,
}

/// Evaluate the ambient curves at `time_s` seconds into the run.
pub fn conditions_at(time_s: f64) -> AmbientConditions {
    AmbientConditions {
        wind_speed: 5.0 + 3.0 * (time_s * 0.001).sin(),
        wind_dir: (180.0 + 30.0 * (time_s * 0.0005).sin()).rem_euclid(360.0),
        current_speed: 0.3 + 0.15 * (time_s * 0.0008).sin(),
        current_dir: (90.0 + 20.0 * (time_s * 0.0003).cos()).rem_euclid(360.0),
        temperature: 18.0 + 5.0 * (time_s * 0.0001).sin(),
        wave_height: 0.5 + 0.3 * (time_s * 0.0006).sin(),
    }
}
