//! Simulation driver: owns the parcel population, forcing grids, clock
//! and statistics, and advances a bounded number of steps per host tick.
//!
//! The driver is host-agnostic: it never schedules itself. A host loop
//! calls [`SpillSimulation::tick`] at its preferred cadence and receives
//! events through a [`SpillObserver`]. Suspension happens only between
//! ticks, so an observer never sees a half-updated population.

use log::info;
use spill_math::rng::{DriftRng, NoiseSource};
use spill_types::config::{SpillConfig, SpillMode};
use spill_types::constants::INSTANT_RELEASE_RADIUS_M;
use spill_types::error::SpillResult;
use spill_types::oil::OilProperties;
use spill_types::state::{Particle, SpillStats, TrajectoryPoint};

use crate::fields::EnvironmentFields;
use crate::integrator::{self, StepContext};
use crate::stats;

/// Driver lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
    Paused,
    Completed,
}

/// Host-side event sink for tick updates and run completion.
pub trait SpillObserver {
    fn on_update(&mut self, particles: &[Particle], stats: &SpillStats, time_s: f64);

    fn on_complete(&mut self) {}
}

/// Observer that discards every event; for headless batch runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl SpillObserver for NullObserver {
    fn on_update(&mut self, _particles: &[Particle], _stats: &SpillStats, _time_s: f64) {}
}

/// One spill simulation run.
pub struct SpillSimulation {
    config: SpillConfig,
    oil: &'static OilProperties,
    fields: EnvironmentFields,
    rng: DriftRng,
    particles: Vec<Particle>,
    trajectory: Vec<TrajectoryPoint>,
    stats: SpillStats,
    time_s: f64,
    released: usize,
    state: RunState,
    initialized: bool,
}

impl SpillSimulation {
    /// Build a driver over the scalar environment only.
    pub fn new(config: SpillConfig) -> SpillResult<Self> {
        Self::with_fields(config, EnvironmentFields::new())
    }

    /// Build a driver with gridded forcing attached. Configuration
    /// errors surface here; a running step never raises.
    pub fn with_fields(config: SpillConfig, fields: EnvironmentFields) -> SpillResult<Self> {
        config.validate()?;
        let oil = config.oil_type.properties();
        let rng = match config.rng_seed {
            Some(seed) => DriftRng::seeded(seed),
            None => DriftRng::from_entropy(),
        };
        let stats = SpillStats::initial(config.spill_lat, config.spill_lng, oil.viscosity);
        Ok(SpillSimulation {
            config,
            oil,
            fields,
            rng,
            particles: Vec::new(),
            trajectory: Vec::new(),
            stats,
            time_s: 0.0,
            released: 0,
            state: RunState::Idle,
            initialized: false,
        })
    }

    pub fn config(&self) -> &SpillConfig {
        &self.config
    }

    pub fn fields(&self) -> &EnvironmentFields {
        &self.fields
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn time_s(&self) -> f64 {
        self.time_s
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn stats(&self) -> &SpillStats {
        &self.stats
    }

    pub fn trajectory(&self) -> &[TrajectoryPoint] {
        &self.trajectory
    }

    pub fn particles_released(&self) -> usize {
        self.released
    }

    /// Idle → running (builds the population on first use);
    /// paused → running. Running and completed are no-ops.
    pub fn start(&mut self) -> SpillResult<()> {
        match self.state {
            RunState::Idle => {
                self.config.validate()?;
                if !self.initialized {
                    self.initialize();
                }
                self.state = RunState::Running;
                info!(
                    "simulation started: {} parcels of {} at ({}, {})",
                    self.config.particle_count,
                    self.config.oil_type,
                    self.config.spill_lat,
                    self.config.spill_lng
                );
            }
            RunState::Paused => self.state = RunState::Running,
            RunState::Running | RunState::Completed => {}
        }
        Ok(())
    }

    pub fn pause(&mut self) {
        if self.state == RunState::Running {
            self.state = RunState::Paused;
        }
    }

    /// Return to idle and discard the run. Safe from any state and
    /// idempotent. With a configured seed the next run replays the same
    /// random stream.
    pub fn reset(&mut self) {
        self.particles.clear();
        self.trajectory.clear();
        self.time_s = 0.0;
        self.released = 0;
        self.stats =
            SpillStats::initial(self.config.spill_lat, self.config.spill_lng, self.oil.viscosity);
        self.initialized = false;
        if let Some(seed) = self.config.rng_seed {
            self.rng = DriftRng::seeded(seed);
        }
        self.state = RunState::Idle;
    }

    fn initialize(&mut self) {
        let n = self.config.particle_count;
        let mass = self.config.parcel_mass_kg();
        self.particles.clear();
        self.particles.reserve(n);
        match self.config.spill_mode {
            SpillMode::Instant => {
                for _ in 0..n {
                    let (lat, lon) = self.rng.disk_point(
                        self.config.spill_lat,
                        self.config.spill_lng,
                        INSTANT_RELEASE_RADIUS_M,
                    );
                    self.particles
                        .push(Particle::new(lat, lon, mass, self.oil.viscosity, true));
                }
                self.released = n;
            }
            SpillMode::Continuous => {
                // Colocated and dormant; the integrator activates them
                // over the release window.
                for _ in 0..n {
                    self.particles.push(Particle::new(
                        self.config.spill_lat,
                        self.config.spill_lng,
                        mass,
                        self.oil.viscosity,
                        false,
                    ));
                }
                self.released = 0;
            }
        }
        self.time_s = 0.0;
        self.trajectory.clear();
        self.stats =
            SpillStats::initial(self.config.spill_lat, self.config.spill_lng, self.oil.viscosity);
        self.initialized = true;
    }

    /// One integration step plus statistics and trajectory bookkeeping.
    /// No-op unless running.
    pub fn step(&mut self) {
        if self.state != RunState::Running {
            return;
        }
        let prev_time = self.time_s;
        let ctx = StepContext {
            config: &self.config,
            oil: self.oil,
            fields: &self.fields,
        };
        self.time_s = integrator::advance(
            &ctx,
            &mut self.particles,
            &mut self.released,
            self.time_s,
            &mut self.rng,
        );
        self.stats = stats::compute(
            &self.particles,
            self.config.spill_lat,
            self.config.spill_lng,
            &self.stats,
        );
        // Hourly trajectory sample on the centroid of the afloat
        // population. The floor comparison stays correct for step sizes
        // that do not divide the hour.
        if (self.time_s / 3600.0).floor() > (prev_time / 3600.0).floor() {
            if let Some((lat, lon)) = stats::centroid_of_active(&self.particles) {
                self.trajectory.push(TrajectoryPoint {
                    time_s: self.time_s,
                    lat,
                    lon,
                });
            }
        }
    }

    /// One host tick: completion check, then up to `playback_speed`
    /// steps, then exactly one update event. No-op unless running.
    pub fn tick(&mut self, observer: &mut dyn SpillObserver) {
        if self.state != RunState::Running {
            return;
        }
        if self.time_s >= self.config.max_time {
            self.state = RunState::Completed;
            info!("simulation horizon reached at t = {} s", self.time_s);
            observer.on_complete();
            return;
        }
        for _ in 0..self.config.playback_speed {
            self.step();
        }
        observer.on_update(&self.particles, &self.stats, self.time_s);
    }

    /// Drive ticks until the horizon is reached. Starts the run if it
    /// is idle or paused.
    pub fn run_to_completion(&mut self, observer: &mut dyn SpillObserver) -> SpillResult<()> {
        self.start()?;
        while self.state == RunState::Running {
            self.tick(observer);
        }
        Ok(())
    }
}
