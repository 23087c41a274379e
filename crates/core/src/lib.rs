//! Heat Diffusion Simulation Core Library
//!
//! An explicit finite-difference solver for 2-D transient heat diffusion
//! on a fixed rectangular grid, with energy-conservation bookkeeping for
//! drift diagnostics.
//!
//! The solver advances the heat equation `∂T/∂t = α∇²T` with a
//! forward-Euler 5-point stencil over a double-buffered temperature
//! field. Boundaries are insulated: a missing outside neighbor reads
//! back the boundary cell's own value, so no heat crosses an edge and
//! the total cell sum is conserved up to floating-point rounding.
//!
//! ## Structure
//!
//! - [`TemperatureGrid`] - dense row-major temperature field
//! - [`SimulationConfig`] - validated per-run parameters
//! - [`stability`] - explicit-scheme timestep bound
//! - [`initial`] - initial condition construction and baseline stats
//! - [`stepper`] - the per-cell diffusion update (row-parallel)
//! - [`energy`] - cell-sum and deviation diagnostics
//! - [`HeatSimulation`] - the stepping loop state machine

pub mod config;
pub mod energy;
pub mod grid;
pub mod initial;
pub mod simulation;
pub mod stability;
pub mod stepper;

// Re-export the primary types
pub use config::{BoundaryTemps, ConfigError, HeatSource, SimulationConfig};
pub use energy::{relative_deviation, total_energy, EnergyReport};
pub use grid::TemperatureGrid;
pub use initial::{build_initial_grid, BaselineStats};
pub use simulation::HeatSimulation;
pub use stability::{is_explicit_scheme_stable, max_stable_timestep};
pub use stepper::{step_diffusion, StepParams};
