//! Per-step Lagrangian kernel.
//!
//! One call advances the whole population by `time_step` seconds:
//! continuous-release bookkeeping, the shared weathering state, then
//! per-parcel drift, turbulent diffusion and grounding. Forcing comes
//! from the loaded grids where they cover a parcel and from the
//! time-perturbed scalar environment everywhere else.

use spill_math::geo::displacement_deg;
use spill_math::rng::NoiseSource;
use spill_types::config::{SpillConfig, SpillMode};
use spill_types::constants::{
    CONTINUOUS_RELEASE_RADIUS_M, EKMAN_DEFLECTION_DEG, GRID_MODE_WIND_M_S,
    MAX_DISPERSED_FRACTION, MIN_RESIDUAL_FRACTION, WIND_DRIFT_FACTOR,
};
use spill_types::oil::OilProperties;
use spill_types::state::Particle;

use crate::fields::EnvironmentFields;
use crate::weathering::{self, WeatheringState};

/// Immutable step inputs borrowed from the driver.
pub struct StepContext<'a> {
    pub config: &'a SpillConfig,
    pub oil: &'a OilProperties,
    pub fields: &'a EnvironmentFields,
}

/// Scalar-environment forcing shared by every parcel the grids do not
/// cover.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScalarForcing {
    /// Eastward drift + current (m/s).
    pub total_u: f64,
    /// Northward drift + current (m/s).
    pub total_v: f64,
    /// Horizontal eddy diffusivity (m²/s).
    pub diffusion: f64,
    /// Perturbed wind speed (m/s), also the weathering wind in scalar mode.
    pub wind_m_s: f64,
}

/// Evaluate the scalar environment at `time_s`. The slow sinusoidal
/// perturbations keep a constant configuration from producing a
/// perfectly straight plume.
pub fn scalar_forcing(config: &SpillConfig, time_s: f64) -> ScalarForcing {
    let ws = config.wind_speed * (1.0 + 0.1 * (time_s * 0.0002).sin());
    let wd = config.wind_dir + 5.0 * (time_s * 0.0003).sin();
    let cs = config.current_speed * (1.0 + 0.05 * (time_s * 0.0005).sin());
    let cd = config.current_dir + 3.0 * (time_s * 0.0004).cos();

    // Meteorological "from" to "to", then Ekman-deflect to the right.
    let theta_w = (wd + 180.0).to_radians();
    let deflect = EKMAN_DEFLECTION_DEG.to_radians();
    let drift_u = ws * WIND_DRIFT_FACTOR * (theta_w + deflect).sin();
    let drift_v = ws * WIND_DRIFT_FACTOR * (theta_w + deflect).cos();

    let current_u = cs * cd.to_radians().sin();
    let current_v = cs * cd.to_radians().cos();

    ScalarForcing {
        total_u: drift_u + current_u,
        total_v: drift_v + current_v,
        diffusion: 1.0 + 0.5 * ws,
        wind_m_s: ws,
    }
}

/// Advance the population one step from `time_s`; returns the new clock.
///
/// Never fails: forcing anomalies degrade (missing grids → scalar
/// fallback, land contact → grounding, starved parcels → deactivation).
pub fn advance(
    ctx: &StepContext<'_>,
    particles: &mut [Particle],
    released: &mut usize,
    time_s: f64,
    noise: &mut dyn NoiseSource,
) -> f64 {
    let config = ctx.config;
    let dt = config.time_step;
    let n = particles.len();

    // Continuous release: activate the next block of parcels in index
    // order. Once the release window has passed, any undereleased tail
    // stays inactive.
    if config.spill_mode == SpillMode::Continuous && *released < n {
        let window_s = config.spill_duration_s();
        if time_s < window_s {
            let target = ((((time_s + dt) / window_s) * n as f64).floor() as usize).min(n);
            for particle in particles[*released..target.max(*released)].iter_mut() {
                let (lat, lon) = noise.disk_point(
                    config.spill_lat,
                    config.spill_lng,
                    CONTINUOUS_RELEASE_RADIUS_M,
                );
                particle.lat = lat;
                particle.lon = lon;
                particle.age = 0.0;
                particle.active = true;
            }
            *released = (*released).max(target);
        }
    }

    // Shared weathering state. With grids active the representative
    // wind is pinned; the global curves cannot see spatial variability.
    let scalar = scalar_forcing(config, time_s);
    let rep_wind = if config.use_grid_data && ctx.fields.any_loaded() {
        GRID_MODE_WIND_M_S
    } else {
        scalar.wind_m_s
    };
    let elapsed_hours = time_s / 3600.0;
    let global = WeatheringState::at(elapsed_hours, config.water_temp, rep_wind, ctx.oil);
    let evaporated = global.evaporated.min(ctx.oil.volatile_frac);
    let dispersed = global.dispersed.min(MAX_DISPERSED_FRACTION);
    let viscosity =
        ctx.oil.viscosity * weathering::viscosity_multiplier(evaporated, global.emulsion_water);
    let remain = 1.0 - evaporated - dispersed;
    let parcel_mass = config.parcel_mass_kg();
    let grid_time_hours = elapsed_hours + config.grid_time_offset;
    let deflect = EKMAN_DEFLECTION_DEG.to_radians();

    for p in particles.iter_mut() {
        if !p.active || p.beached {
            continue;
        }
        p.age += dt;

        p.evaporated = evaporated;
        p.dispersed = dispersed;
        p.emulsion_water = global.emulsion_water;
        p.viscosity = viscosity;

        if remain < MIN_RESIDUAL_FRACTION {
            p.active = false;
            continue;
        }
        p.mass = parcel_mass * remain;

        // Fay gravity-viscous spreading: the film thins as t^(-1/3).
        if p.age > 0.0 {
            p.thickness = 0.01 * (p.age / 3600.0).powf(-1.0 / 3.0);
        }

        let grid_drift = if config.use_grid_data {
            ctx.fields.sample_drift(p.lat, p.lon, grid_time_hours)
        } else {
            None
        };
        let (total_u, total_v, diffusion) = match grid_drift {
            Some(drift) => {
                // SST is sampled for forcing-pipeline parity; the
                // weathering curves read the configured scalar water
                // temperature instead.
                let _ = ctx.fields.sea_surface_temp(p.lat, p.lon, grid_time_hours);

                let wind_speed = (drift.u10 * drift.u10 + drift.v10 * drift.v10).sqrt();
                // Bearing of the wind's "to" direction, clockwise from
                // north: atan2(east, north).
                let theta = drift.u10.atan2(drift.v10);
                let drift_u = wind_speed * WIND_DRIFT_FACTOR * (theta + deflect).sin();
                let drift_v = wind_speed * WIND_DRIFT_FACTOR * (theta + deflect).cos();
                (
                    drift_u + drift.uo,
                    drift_v + drift.vo,
                    1.0 + 0.5 * wind_speed,
                )
            }
            None => (scalar.total_u, scalar.total_v, scalar.diffusion),
        };

        let (xi_u, xi_v) = noise.normal_pair();
        let sigma = (2.0 * diffusion * dt).sqrt();
        let du = total_u * dt + xi_u * sigma;
        let dv = total_v * dt + xi_v * sigma;

        let (d_lat, d_lon) = displacement_deg(du, dv, p.lat);
        p.lat += d_lat;
        p.lon += d_lon;

        // Grounding: revert the displacement and strand the parcel.
        if ctx.fields.is_land(p.lat, p.lon) == Some(true) {
            p.lat -= d_lat;
            p.lon -= d_lon;
            p.active = false;
            p.beached = true;
        }
    }

    time_s + dt
}
