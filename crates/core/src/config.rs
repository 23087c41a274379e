//! Simulation configuration and validation
//!
//! All parameters are fixed for the lifetime of a run: the simulation
//! is constructed from a validated [`SimulationConfig`] and never
//! reconfigured mid-flight. Configs are serde-serializable so scenarios
//! round-trip through JSON files.

use crate::stability;
use serde::{Deserialize, Serialize};

/// Boundary temperatures applied when the initial grid is built.
///
/// `start` fills the leftmost column, `end` the rightmost, `ambient`
/// everything in between. These are construction-time values only:
/// after step 0 the boundary cells evolve under the same insulated
/// update rule as the interior.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundaryTemps {
    /// Temperature of the leftmost column
    pub start: f32,
    /// Temperature of the interior columns
    pub ambient: f32,
    /// Temperature of the rightmost column
    pub end: f32,
}

impl BoundaryTemps {
    /// Uniform boundary specification with every edge at `value`
    #[must_use]
    pub fn uniform(value: f32) -> Self {
        Self {
            start: value,
            ambient: value,
            end: value,
        }
    }
}

/// A point heat source applied once at initialization.
///
/// The target cell is overwritten with `temperature` (last write wins
/// when sources coincide) and the value is added to the injected-energy
/// tally. Sources do not persist past initialization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatSource {
    /// Grid row of the source cell
    pub row: usize,
    /// Grid column of the source cell
    pub col: usize,
    /// Temperature written into the cell
    pub temperature: f32,
}

/// Read-only configuration for one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Grid width in cells
    pub width: usize,
    /// Grid height in cells
    pub height: usize,
    /// Thermal diffusivity α (m²/s)
    pub alpha: f32,
    /// Spatial step between nodes (m), equal in both axes
    pub dx: f32,
    /// Time step Δt (s)
    pub dt: f32,
    /// Simulated time at which the run ends (s)
    pub final_time: f32,
    /// Construction-time boundary temperatures
    pub boundary: BoundaryTemps,
    /// Point heat sources baked into the initial grid
    pub sources: Vec<HeatSource>,
}

impl SimulationConfig {
    /// The classic demonstration scenario: a 15x15 plate at zero
    /// temperature with two 100-degree point sources on the middle row.
    #[must_use]
    pub fn two_point_bar() -> Self {
        let width = 15;
        let height = 15;
        Self {
            width,
            height,
            alpha: 1e-5,
            dx: 0.01,
            dt: 0.04,
            final_time: 600.0,
            boundary: BoundaryTemps::uniform(0.0),
            sources: vec![
                HeatSource {
                    row: height / 2,
                    col: 3,
                    temperature: 100.0,
                },
                HeatSource {
                    row: height / 2,
                    col: width - 4,
                    temperature: 100.0,
                },
            ],
        }
    }

    /// Squared spatial step, the `h²` of the update rule
    #[must_use]
    pub fn dx_squared(&self) -> f32 {
        self.dx * self.dx
    }

    /// Center-node retention factor `1 - 4·α·Δt/h²`, constant for every
    /// cell and every step.
    #[must_use]
    pub fn retention_coefficient(&self) -> f32 {
        1.0 - 4.0 * self.alpha * self.dt / self.dx_squared()
    }

    /// Check the configuration for the deterministic error classes:
    /// degenerate dimensions, non-positive physical parameters,
    /// out-of-bounds sources and an unstable explicit scheme.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] encountered. All of them are
    /// fatal and non-retryable; the caller must change the
    /// configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::ZeroDimension {
                width: self.width,
                height: self.height,
            });
        }
        if self.alpha <= 0.0 {
            return Err(ConfigError::NonPositiveAlpha(self.alpha));
        }
        if self.dx <= 0.0 {
            return Err(ConfigError::NonPositiveSpacing(self.dx));
        }
        if self.dt <= 0.0 {
            return Err(ConfigError::NonPositiveTimestep(self.dt));
        }
        for source in &self.sources {
            if source.row >= self.height || source.col >= self.width {
                return Err(ConfigError::SourceOutOfBounds {
                    row: source.row,
                    col: source.col,
                    width: self.width,
                    height: self.height,
                });
            }
        }
        if !stability::is_explicit_scheme_stable(self.dt, self.dx, self.alpha) {
            return Err(ConfigError::UnstableTimestep {
                dt: self.dt,
                max_dt: stability::max_stable_timestep(self.dx, self.alpha),
            });
        }
        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::two_point_bar()
    }
}

/// Deterministic configuration errors, detected once before stepping.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A grid dimension is zero
    ZeroDimension {
        /// Configured width
        width: usize,
        /// Configured height
        height: usize,
    },
    /// Thermal diffusivity must be positive
    NonPositiveAlpha(f32),
    /// Spatial step must be positive
    NonPositiveSpacing(f32),
    /// Time step must be positive
    NonPositiveTimestep(f32),
    /// A heat source lies outside the grid
    SourceOutOfBounds {
        /// Source row
        row: usize,
        /// Source column
        col: usize,
        /// Configured width
        width: usize,
        /// Configured height
        height: usize,
    },
    /// The explicit scheme is unstable for the chosen steps
    UnstableTimestep {
        /// Configured time step
        dt: f32,
        /// Largest stable time step `h²/(4α)`
        max_dt: f32,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroDimension { width, height } => {
                write!(f, "grid dimensions must be at least 1x1, got {width}x{height}")
            }
            Self::NonPositiveAlpha(alpha) => {
                write!(f, "thermal diffusivity must be positive, got {alpha}")
            }
            Self::NonPositiveSpacing(dx) => {
                write!(f, "spatial step must be positive, got {dx}")
            }
            Self::NonPositiveTimestep(dt) => {
                write!(f, "time step must be positive, got {dt}")
            }
            Self::SourceOutOfBounds {
                row,
                col,
                width,
                height,
            } => {
                write!(
                    f,
                    "heat source at ({row}, {col}) is outside the {width}x{height} grid"
                )
            }
            Self::UnstableTimestep { dt, max_dt } => {
                write!(
                    f,
                    "unstable simulation: dt = {dt} exceeds the explicit-scheme bound {max_dt}"
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_scenario_is_valid() {
        assert!(SimulationConfig::two_point_bar().validate().is_ok());
    }

    #[test]
    fn retention_matches_update_rule_constant() {
        let config = SimulationConfig::two_point_bar();
        let expected = 1.0 - 4.0 * config.alpha * config.dt / (config.dx * config.dx);
        assert_eq!(config.retention_coefficient(), expected);
    }

    #[test]
    fn zero_dimension_rejected() {
        let mut config = SimulationConfig::two_point_bar();
        config.height = 0;
        config.sources.clear();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ZeroDimension { .. })
        ));
    }

    #[test]
    fn out_of_bounds_source_rejected() {
        let mut config = SimulationConfig::two_point_bar();
        config.sources.push(HeatSource {
            row: config.height,
            col: 0,
            temperature: 50.0,
        });
        assert!(matches!(
            config.validate(),
            Err(ConfigError::SourceOutOfBounds { .. })
        ));
    }

    #[test]
    fn unstable_timestep_rejected() {
        let mut config = SimulationConfig::two_point_bar();
        // Bound for these parameters is h²/(4α) = 2.5 s
        config.dt = 2.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::UnstableTimestep { .. })
        ));
    }

    #[test]
    fn scenario_round_trips_through_json() {
        let config = SimulationConfig::two_point_bar();
        let text = serde_json::to_string(&config).expect("serialize");
        let back: SimulationConfig = serde_json::from_str(&text).expect("deserialize");
        assert_eq!(back, config);
    }
}
