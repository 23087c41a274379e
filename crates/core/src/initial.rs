//! Initial condition construction
//!
//! Builds the starting grid from the boundary temperatures and the
//! configured point sources, and computes the baseline statistics every
//! later step is measured against. The baseline is an immutable value
//! passed to collaborators, never ambient global state.

use crate::config::SimulationConfig;
use crate::energy;
use crate::grid::TemperatureGrid;

/// Accounting scalars fixed at initialization.
///
/// `initial_energy` and `injected_energy` are two distinct quantities:
/// the former is the direct cell sum of the finished initial grid and
/// is the reference for all deviation reporting; the latter tallies the
/// boundary constants plus every source temperature and exists only as
/// a configuration-side reference figure. They are not assumed equal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaselineStats {
    /// Cell sum of the initial grid, the deviation reference
    pub initial_energy: f32,
    /// Boundary constants plus all source temperatures
    pub injected_energy: f32,
    /// Number of configured heat sources
    pub source_count: usize,
    /// Cells of the initial grid with a non-zero temperature
    pub nonzero_nodes: usize,
    /// Coldest cell of the initial grid
    pub min_temperature: f32,
    /// Hottest cell of the initial grid
    pub max_temperature: f32,
}

/// Build the initial grid and its baseline statistics.
///
/// The leftmost column takes the start-edge temperature, the rightmost
/// the end-edge temperature, every other column the ambient value. When
/// either dimension is 1 the boundary distinction collapses and every
/// cell takes the start-edge temperature. Each source then overwrites
/// its target cell (last write wins).
///
/// Callers validate the configuration first; an out-of-bounds source
/// panics here.
#[must_use]
pub fn build_initial_grid(config: &SimulationConfig) -> (TemperatureGrid, BaselineStats) {
    let mut grid = TemperatureGrid::new(config.width, config.height);

    if config.width == 1 || config.height == 1 {
        grid.fill(config.boundary.start);
    } else {
        for i in 0..config.height {
            for j in 0..config.width {
                let value = if j == 0 {
                    config.boundary.start
                } else if j == config.width - 1 {
                    config.boundary.end
                } else {
                    config.boundary.ambient
                };
                grid.set(i, j, value);
            }
        }
    }

    // Base contribution of the boundary constants, counted once
    let mut injected_energy =
        config.boundary.start + config.boundary.ambient + config.boundary.end;
    for source in &config.sources {
        grid.set(source.row, source.col, source.temperature);
        injected_energy += source.temperature;
    }

    let mut min_temperature = f32::MAX;
    let mut max_temperature = f32::MIN;
    let mut nonzero_nodes = 0;
    for &value in grid.as_slice() {
        min_temperature = min_temperature.min(value);
        max_temperature = max_temperature.max(value);
        if value != 0.0 {
            nonzero_nodes += 1;
        }
    }

    let stats = BaselineStats {
        initial_energy: energy::total_energy(&grid),
        injected_energy,
        source_count: config.sources.len(),
        nonzero_nodes,
        min_temperature,
        max_temperature,
    };

    (grid, stats)
}
