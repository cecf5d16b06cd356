//! Global weathering curves.
//!
//! All parcels of a run share one weathering history driven by elapsed
//! time, water temperature and a representative wind speed; the
//! integrator copies the resulting fractions onto every active parcel.
//! Per-parcel weathering ages are deliberately not modelled.

use spill_types::constants::{
    MAX_DISPERSED_FRACTION, MAX_EMULSION_WATER, MIN_DISPERSION_WIND_M_S, MIN_EMULSION_WIND_M_S,
};
use spill_types::oil::OilProperties;

/// Evaporated mass fraction after `elapsed_hours`.
///
/// Square-root-of-time law with a temperature-adjusted rate constant,
/// capped by the oil's volatile fraction.
pub fn evaporated_fraction(
    elapsed_hours: f64,
    water_temp_c: f64,
    wind_m_s: f64,
    oil: &OilProperties,
) -> f64 {
    if elapsed_hours <= 0.0 {
        return 0.0;
    }
    let k = oil.evap_rate * (1.0 + 0.045 * (water_temp_c - 15.0));
    (k * elapsed_hours.sqrt() * (1.0 + 0.01 * wind_m_s)).min(oil.volatile_frac)
}

/// Naturally dispersed mass fraction after `elapsed_hours`.
///
/// Grows with wave energy (parametrized as W²); below 5 m/s of wind the
/// sea state does not entrain oil at all.
pub fn dispersed_fraction(elapsed_hours: f64, wind_m_s: f64, oil: &OilProperties) -> f64 {
    if elapsed_hours <= 0.0 || wind_m_s < MIN_DISPERSION_WIND_M_S {
        return 0.0;
    }
    (0.0034 * oil.dispersibility * (wind_m_s * wind_m_s * 0.001) * elapsed_hours)
        .min(MAX_DISPERSED_FRACTION)
}

/// Water content of the water-in-oil emulsion after `elapsed_hours`.
///
/// First-order uptake towards the 70% saturation plateau; no uptake
/// below 3 m/s of wind.
pub fn emulsion_water_fraction(elapsed_hours: f64, wind_m_s: f64) -> f64 {
    if elapsed_hours <= 0.0 || wind_m_s < MIN_EMULSION_WIND_M_S {
        return 0.0;
    }
    let k_a = 2.0e-6 * (wind_m_s + 1.0) * (wind_m_s + 1.0);
    (MAX_EMULSION_WATER * (1.0 - (-k_a * elapsed_hours * 3600.0).exp())).min(MAX_EMULSION_WATER)
}

/// Mooney-type viscosity multiplier from evaporation and emulsification.
pub fn viscosity_multiplier(evaporated: f64, emulsion_water: f64) -> f64 {
    (5.0 * evaporated).exp() * (1.0 - emulsion_water).powf(-2.5)
}

/// The three fractions evaluated together, once per integration step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeatheringState {
    pub evaporated: f64,
    pub dispersed: f64,
    pub emulsion_water: f64,
}

impl WeatheringState {
    pub fn at(
        elapsed_hours: f64,
        water_temp_c: f64,
        wind_m_s: f64,
        oil: &OilProperties,
    ) -> Self {
        WeatheringState {
            evaporated: evaporated_fraction(elapsed_hours, water_temp_c, wind_m_s, oil),
            dispersed: dispersed_fraction(elapsed_hours, wind_m_s, oil),
            emulsion_water: emulsion_water_fraction(elapsed_hours, wind_m_s),
        }
    }

    /// Residual (floating, unweathered) mass fraction.
    pub fn remaining(&self) -> f64 {
        1.0 - self.evaporated - self.dispersed
    }
}
