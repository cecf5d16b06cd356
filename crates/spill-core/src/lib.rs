// ─────────────────────────────────────────────────────────────────────
// SCPN Spill Core — Spill Core
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Oil-spill drift and weathering engine.
//!
//! A `SpillSimulation` advances a population of tagged oil parcels under
//! wind drift, current advection, turbulent diffusion and weathering,
//! against either gridded forcing or an analytic scalar fallback.

pub mod ambient;
pub mod driver;
pub mod fields;
pub mod integrator;
pub mod scenario;
pub mod stats;
pub mod weathering;
