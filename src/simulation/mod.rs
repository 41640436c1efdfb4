//! Driving a Game of Life state through time

pub mod analysis;
pub mod driver;
pub mod report;

pub use analysis::{classify, Behavior, StabilityAnalysis, StabilityTracker};
pub use driver::{GenerationStats, Simulation, Ticker};
pub use report::SimulationReport;
