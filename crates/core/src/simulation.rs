//! Top-level stepping loop state
//!
//! Owns the configuration, the current/next buffer pair and the
//! baseline statistics, and advances the run one time step at a time.
//! Collaborators (renderers, diagnostics sinks) read snapshots between
//! steps; nothing outside this module ever mutates the buffers.

use crate::config::{ConfigError, SimulationConfig};
use crate::energy::{self, EnergyReport};
use crate::grid::TemperatureGrid;
use crate::initial::{build_initial_grid, BaselineStats};
use crate::stepper::{step_diffusion, StepParams};
use tracing::info;

/// A validated, running heat diffusion simulation.
pub struct HeatSimulation {
    config: SimulationConfig,
    params: StepParams,
    baseline: BaselineStats,
    current: TemperatureGrid,
    next: TemperatureGrid,
    step_count: u64,
    elapsed: f32,
}

impl HeatSimulation {
    /// Validate the configuration, build the initial grid and set up
    /// the buffer pair. The stability check runs here, once, before
    /// any stepping is possible.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for any deterministic configuration
    /// fault: degenerate dimensions, non-positive parameters,
    /// out-of-bounds sources, or a time step at or above the
    /// explicit-scheme bound.
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let (current, baseline) = build_initial_grid(&config);
        let next = TemperatureGrid::new(config.width, config.height);
        let params = StepParams::from_config(&config);

        info!(
            "initialized {}x{} grid: dt={}, retention={}, initial energy={}",
            config.width, config.height, config.dt, params.retention, baseline.initial_energy
        );

        Ok(Self {
            config,
            params,
            baseline,
            current,
            next,
            step_count: 0,
            elapsed: 0.0,
        })
    }

    /// Advance the field by one time step.
    ///
    /// Computes the next snapshot from the current one, then swaps the
    /// buffers; the old current buffer becomes scratch for the step
    /// after. Stepping past `final_time` is permitted and behaves
    /// identically; completion is advisory.
    pub fn step(&mut self) {
        step_diffusion(&self.current, &mut self.next, self.params);
        std::mem::swap(&mut self.current, &mut self.next);
        self.step_count += 1;
        self.elapsed += self.config.dt;
    }

    /// True once elapsed simulated time has reached the configured
    /// final time.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.config.final_time
    }

    /// Read-only snapshot of the current temperature field
    #[must_use]
    pub fn grid(&self) -> &TemperatureGrid {
        &self.current
    }

    /// Baseline statistics fixed at initialization
    #[must_use]
    pub fn baseline(&self) -> &BaselineStats {
        &self.baseline
    }

    /// The run configuration
    #[must_use]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Completed step count
    #[must_use]
    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    /// Elapsed simulated time (s)
    #[must_use]
    pub fn elapsed_time(&self) -> f32 {
        self.elapsed
    }

    /// Current per-step diagnostics: cell sum, reference energy and
    /// relative drift. A zero-energy baseline surfaces as a NaN or
    /// infinite deviation.
    #[must_use]
    pub fn energy_report(&self) -> EnergyReport {
        let energy = energy::total_energy(&self.current);
        EnergyReport {
            step: self.step_count,
            elapsed: self.elapsed,
            energy,
            reference: self.baseline.initial_energy,
            deviation: energy::relative_deviation(energy, self.baseline.initial_energy),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BoundaryTemps, HeatSource};

    #[test]
    fn unstable_config_never_runs() {
        let mut config = SimulationConfig::two_point_bar();
        config.dt = 10.0;
        assert!(matches!(
            HeatSimulation::new(config),
            Err(ConfigError::UnstableTimestep { .. })
        ));
    }

    #[test]
    fn completion_tracks_final_time() {
        let mut config = SimulationConfig::two_point_bar();
        config.final_time = config.dt * 3.0;
        let mut sim = HeatSimulation::new(config).expect("valid config");

        assert!(!sim.is_complete());
        sim.step();
        sim.step();
        assert!(!sim.is_complete());
        sim.step();
        assert!(sim.is_complete());
        assert_eq!(sim.step_count(), 3);
    }

    #[test]
    fn report_references_initial_energy() {
        let sim = HeatSimulation::new(SimulationConfig::two_point_bar()).expect("valid config");
        let report = sim.energy_report();
        assert_eq!(report.step, 0);
        assert_eq!(report.energy, sim.baseline().initial_energy);
        assert_eq!(report.deviation, 0.0);
    }

    #[test]
    fn zero_energy_baseline_reports_degenerate_deviation() {
        let config = SimulationConfig {
            width: 4,
            height: 4,
            alpha: 1e-5,
            dx: 0.01,
            dt: 0.04,
            final_time: 1.0,
            boundary: BoundaryTemps::uniform(0.0),
            sources: vec![HeatSource {
                row: 1,
                col: 1,
                temperature: 0.0,
            }],
        };
        let sim = HeatSimulation::new(config).expect("valid config");
        assert!(sim.energy_report().deviation.is_nan());
    }
}
