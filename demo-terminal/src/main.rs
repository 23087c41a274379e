//! Live terminal heat diffusion viewer
//!
//! Renders each simulation step as a glyph-ladder heatmap with an
//! energy footer, pacing frames with a fixed delay. The renderer only
//! ever reads grid snapshots; display clamping never touches the
//! simulation buffers.

use heat_sim_core::{
    BaselineStats, BoundaryTemps, EnergyReport, HeatSimulation, HeatSource, SimulationConfig,
    TemperatureGrid,
};
use std::io::{self, Write};
use std::process::ExitCode;
use std::thread;
use std::time::Duration;

/// Default grid dimensions offered at the prompt
const DEFAULT_WIDTH: usize = 15;
const DEFAULT_HEIGHT: usize = 15;

/// Pause between rendered frames
const FRAME_DELAY: Duration = Duration::from_millis(20);

/// Glyph ladder scanned top-down: the first threshold the value
/// exceeds wins. Thresholds are fractions of the scenario's hottest
/// initial cell; values at or below every rung render as ambient.
const GLYPH_LADDER: [(f32, char); 4] = [(0.5, '█'), (0.1, '▓'), (0.025, '▒'), (0.005, '░')];

/// Glyph for cells at ambient temperature
const AMBIENT_GLYPH: char = '·';

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("╔═══════════════════════════════════════════╗");
    println!("║      2-D Heat Diffusion - Live Viewer     ║");
    println!("╚═══════════════════════════════════════════╝");
    println!();

    let (width, height) = prompt_grid_dimensions();

    let mut sim = match HeatSimulation::new(two_point_config(width, height)) {
        Ok(sim) => sim,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    while !sim.is_complete() {
        render_frame(sim.grid(), sim.baseline(), sim.energy_report());
        thread::sleep(FRAME_DELAY);
        sim.step();
    }
    render_frame(sim.grid(), sim.baseline(), sim.energy_report());

    println!(
        "\nDone: {} steps, {:.1}s simulated.",
        sim.step_count(),
        sim.elapsed_time()
    );
    ExitCode::SUCCESS
}

/// Prompt for grid dimensions at startup, with defaults on empty input
fn prompt_grid_dimensions() -> (usize, usize) {
    println!("Enter grid dimensions (or press Enter for defaults):");

    print!("  Width in cells [{DEFAULT_WIDTH}]: ");
    io::stdout().flush().unwrap();
    let mut width_str = String::new();
    io::stdin().read_line(&mut width_str).unwrap();
    let width: usize = width_str.trim().parse().unwrap_or(DEFAULT_WIDTH);

    print!("  Height in cells [{DEFAULT_HEIGHT}]: ");
    io::stdout().flush().unwrap();
    let mut height_str = String::new();
    io::stdin().read_line(&mut height_str).unwrap();
    let height: usize = height_str.trim().parse().unwrap_or(DEFAULT_HEIGHT);

    println!();
    (width.clamp(1, 120), height.clamp(1, 60))
}

/// The classic two-point scenario scaled to the chosen grid
fn two_point_config(width: usize, height: usize) -> SimulationConfig {
    let row = height / 2;
    SimulationConfig {
        width,
        height,
        alpha: 1e-5,
        dx: 0.01,
        dt: 0.04,
        final_time: 600.0,
        boundary: BoundaryTemps::uniform(0.0),
        sources: vec![
            HeatSource {
                row,
                col: 3.min(width - 1),
                temperature: 100.0,
            },
            HeatSource {
                row,
                col: width.saturating_sub(4).min(width - 1),
                temperature: 100.0,
            },
        ],
    }
}

/// Map a cell temperature to its display glyph.
///
/// Negative values clamp to zero here, at read time only.
fn heat_glyph(value: f32, peak: f32) -> char {
    let value = value.max(0.0);
    for &(fraction, glyph) in &GLYPH_LADDER {
        if value > fraction * peak {
            return glyph;
        }
    }
    AMBIENT_GLYPH
}

/// Clear the screen and draw one frame: header, heatmap, legend and
/// energy footer.
fn render_frame(grid: &TemperatureGrid, baseline: &BaselineStats, report: EnergyReport) {
    // ANSI clear + cursor home
    print!("\x1B[2J\x1B[1;1H");

    println!(
        "Iteration: {}    Time: {:.3}s",
        report.step + 1,
        report.elapsed
    );
    println!();

    let peak = baseline.max_temperature.max(1.0);
    for row in grid.rows() {
        let mut line = String::with_capacity(row.len() * 2);
        for &value in row {
            line.push(heat_glyph(value, peak));
            line.push(' ');
        }
        println!("{line}");
    }

    println!();
    print!("Legend: {AMBIENT_GLYPH} ambient");
    for &(fraction, glyph) in GLYPH_LADDER.iter().rev() {
        print!("  {glyph} >{:.1}", fraction * peak);
    }
    println!();

    println!(
        "Energy: {:.1}    deviation: {:.3}%",
        report.energy,
        report.deviation * 100.0
    );
    println!("Intended energy: {:.4}", report.reference);
    io::stdout().flush().unwrap();
}
