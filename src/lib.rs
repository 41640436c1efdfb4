//! Sparse Game of Life
//!
//! Conway's Game of Life on an unbounded lattice. Only live cells and their
//! neighborhoods are stored and evaluated, so the grid has no edges.

pub mod config;
pub mod game_of_life;
pub mod simulation;
pub mod utils;

pub use config::Settings;
pub use game_of_life::{Cell, LifeError, LifeState};
pub use simulation::{Simulation, SimulationReport};

use anyhow::Result;
use simulation::{StabilityTracker, Ticker};

/// Run the configured simulation to completion without pacing
pub fn run_simulation(settings: &Settings) -> Result<SimulationReport> {
    let mut simulation = Simulation::from_settings(settings)?;
    let mut tracker = StabilityTracker::new();
    tracker.observe(simulation.state());

    let initial = simulation.stats();
    let history = simulation.run(
        settings.simulation.generations,
        &mut Ticker::unpaced(),
        |s| tracker.observe(s.state()),
    );

    Ok(SimulationReport::new(initial, history, tracker.analysis()))
}
