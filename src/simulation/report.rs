//! Summary of a finished simulation run

use super::{Behavior, GenerationStats, StabilityAnalysis};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationReport {
    pub initial: GenerationStats,
    pub generations_run: usize,
    pub history: Vec<GenerationStats>,
    pub analysis: StabilityAnalysis,
}

impl SimulationReport {
    pub fn new(
        initial: GenerationStats,
        history: Vec<GenerationStats>,
        analysis: StabilityAnalysis,
    ) -> Self {
        Self {
            initial,
            generations_run: history.len(),
            history,
            analysis,
        }
    }

    /// Stats of the last generation reached
    pub fn final_stats(&self) -> GenerationStats {
        self.history.last().copied().unwrap_or(self.initial)
    }

    pub fn behavior(&self) -> Behavior {
        self.analysis.behavior
    }

    /// Largest raw entry count seen, dead entries included
    pub fn peak_entries(&self) -> usize {
        self.history
            .iter()
            .map(|s| s.entries)
            .chain(std::iter::once(self.initial.entries))
            .max()
            .unwrap_or(0)
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let last = self.final_stats();
        write!(
            f,
            "Generation {} → {}: {} → {} live cells ({} entries, peak {}), {}",
            self.initial.generation,
            last.generation,
            self.initial.alive,
            last.alive,
            last.entries,
            self.peak_entries(),
            self.analysis.behavior
        )
    }
}
