//! Explicit diffusion stepping
//!
//! Advances the temperature field one time step with the
//! forward-Euler-in-time, centered-in-space 5-point stencil:
//!
//! ```text
//! next[i][j] = retention · current[i][j]
//!            + (left + right + above + below) / h² · α · Δt
//! ```
//!
//! where `retention = 1 - 4·α·Δt/h²`. Neighbor values use the
//! zero-flux (reflecting) boundary rule: a missing outside neighbor
//! reads back the cell's own prior value, so no heat crosses an edge.
//!
//! No cell's update depends on another cell's new value, only on the
//! prior snapshot, so the pass is row-parallel: workers share the
//! read-only current grid and each owns a disjoint band of the next
//! grid.

use crate::config::SimulationConfig;
use crate::grid::TemperatureGrid;
use rayon::prelude::*;

/// Precomputed per-run constants of the update rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepParams {
    /// Thermal diffusivity α
    pub alpha: f32,
    /// Time step Δt
    pub dt: f32,
    /// Squared spatial step h²
    pub dx_squared: f32,
    /// Center-node retention factor `1 - 4·α·Δt/h²`
    pub retention: f32,
}

impl StepParams {
    /// Derive the stepping constants from a run configuration.
    #[must_use]
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self {
            alpha: config.alpha,
            dt: config.dt,
            dx_squared: config.dx_squared(),
            retention: config.retention_coefficient(),
        }
    }
}

/// Produce the next-step grid from the current one.
///
/// Total over its domain: given a stability-validated configuration
/// there are no runtime failure modes. If the caller violated the
/// stability precondition the field diverges over iterations; the
/// energy accountant is the detection mechanism, not this function.
///
/// The source grid is never mutated.
///
/// # Panics
///
/// Panics if the two grids have different dimensions.
pub fn step_diffusion(current: &TemperatureGrid, next: &mut TemperatureGrid, params: StepParams) {
    assert!(
        current.width() == next.width() && current.height() == next.height(),
        "current and next grids must have identical dimensions"
    );

    let width = current.width();
    let height = current.height();
    let src = current.as_slice();
    let gain = params.alpha * params.dt / params.dx_squared;

    next.as_mut_slice()
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(i, row_out)| {
            let row = i * width;
            for (j, cell) in row_out.iter_mut().enumerate() {
                let idx = row + j;
                let t = src[idx];

                // Width-1 and height-1 grids drop the axis entirely;
                // this is distinct from the reflecting rule below and
                // must not be merged with it.
                let (left, right) = if width == 1 {
                    (0.0, 0.0)
                } else if j == 0 {
                    // No node to the left; the wall reflects
                    (t, src[idx + 1])
                } else if j == width - 1 {
                    (src[idx - 1], t)
                } else {
                    (src[idx - 1], src[idx + 1])
                };

                let (above, below) = if height == 1 {
                    (0.0, 0.0)
                } else if i == 0 {
                    (t, src[idx + width])
                } else if i == height - 1 {
                    (src[idx - width], t)
                } else {
                    (src[idx - width], src[idx + width])
                };

                let driver = (left + right + above + below) * gain;
                *cell = params.retention * t + driver;
            }
        });
}
