//! Generation driver: holds the current state and advances it tick by tick

use crate::config::Settings;
use crate::game_of_life::{Cell, LifeState};
use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::thread::sleep;
use std::time::{Duration, Instant};

/// Counters reported after each generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationStats {
    pub generation: u64,
    /// Raw entry count, dead entries included
    pub entries: usize,
    pub alive: usize,
}

/// Owns the current [`LifeState`] and replaces it every generation
pub struct Simulation {
    state: LifeState,
    generation: u64,
    compact_dead_entries: bool,
}

impl Simulation {
    /// Start a simulation at generation 1
    pub fn new(state: LifeState) -> Self {
        Self {
            state,
            generation: 1,
            compact_dead_entries: false,
        }
    }

    /// Drop dead entries after every generation
    pub fn with_compaction(mut self, enabled: bool) -> Self {
        self.compact_dead_entries = enabled;
        self
    }

    /// Build the first generation described by `settings.seed`
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let seed = &settings.seed;
        let state = match seed.pattern {
            Some(pattern) => {
                info!("Seeding {} at ({}, {})", pattern, seed.origin_x, seed.origin_y);
                pattern.build(Cell::new(seed.origin_x, seed.origin_y))
            }
            None => {
                let source = match seed.random_seed {
                    Some(s) => format!("seed {}", s),
                    None => "entropy".to_string(),
                };
                info!("Seeding {}x{} viewport from {}", seed.width, seed.height, source);
                LifeState::random(seed.width, seed.height, seed.random_seed)
                    .context("Failed to seed random state")?
            }
        };

        Ok(Self::new(state).with_compaction(settings.simulation.compact_dead_entries))
    }

    pub fn state(&self) -> &LifeState {
        &self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn stats(&self) -> GenerationStats {
        GenerationStats {
            generation: self.generation,
            entries: self.state.size(),
            alive: self.state.alive_count(),
        }
    }

    /// Advance one generation, discarding the previous state
    pub fn step(&mut self) -> GenerationStats {
        self.state = self.state.next_generation();
        self.generation += 1;

        if self.compact_dead_entries {
            let removed = self.state.compact();
            debug!("Compacted {} dead entries", removed);
        }

        let stats = self.stats();
        info!("Iter #{}: {} live cells", stats.generation, stats.entries);
        stats
    }

    /// Advance `generations` times, waiting on `ticker` before each step.
    ///
    /// `on_generation` sees the simulation after every step.
    pub fn run<F>(
        &mut self,
        generations: usize,
        ticker: &mut Ticker,
        mut on_generation: F,
    ) -> Vec<GenerationStats>
    where
        F: FnMut(&Simulation),
    {
        let start = self.stats();
        info!("Iter #{}: {} live cells", start.generation, start.entries);

        let mut history = Vec::with_capacity(generations);
        for _ in 0..generations {
            ticker.wait();
            history.push(self.step());
            on_generation(self);
        }
        history
    }
}

/// Fixed wall-clock cadence for generation steps
pub struct Ticker {
    interval: Duration,
    next_tick: Instant,
}

impl Ticker {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_tick: Instant::now() + interval,
        }
    }

    /// A ticker that never sleeps
    pub fn unpaced() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether the next tick has arrived, without blocking
    pub fn is_due(&self) -> bool {
        Instant::now() >= self.next_tick
    }

    /// Block until the next tick, then schedule the one after it.
    ///
    /// A caller that falls behind is not made to catch up with a burst of ticks.
    pub fn wait(&mut self) {
        if self.interval.is_zero() {
            return;
        }

        if !self.is_due() {
            sleep(self.next_tick.saturating_duration_since(Instant::now()));
        }

        self.next_tick += self.interval;
        let now = Instant::now();
        if self.next_tick < now {
            self.next_tick = now + self.interval;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_of_life::PatternName;

    fn blinker() -> LifeState {
        PatternName::Blinker.build(Cell::new(0, 0))
    }

    #[test]
    fn test_step_advances_generation() {
        let mut sim = Simulation::new(blinker());
        assert_eq!(sim.generation(), 1);

        let stats = sim.step();
        assert_eq!(stats.generation, 2);
        assert_eq!(stats.alive, 3);
        assert_eq!(stats.entries, 15);
        assert_eq!(sim.stats(), stats);
    }

    #[test]
    fn test_run_collects_history_and_calls_back() {
        let mut sim = Simulation::new(blinker());
        let mut seen = Vec::new();
        let history = sim.run(4, &mut Ticker::unpaced(), |s| seen.push(s.generation()));

        assert_eq!(history.len(), 4);
        assert_eq!(seen, vec![2, 3, 4, 5]);
        assert!(history.iter().all(|s| s.alive == 3));
        assert_eq!(sim.generation(), 5);
    }

    #[test]
    fn test_compaction_keeps_only_live_entries() {
        let mut sim = Simulation::new(blinker()).with_compaction(true);
        let stats = sim.step();
        assert_eq!(stats.entries, 3);
        assert_eq!(stats.alive, 3);
    }

    #[test]
    fn test_dead_entries_kept_without_compaction() {
        let mut sim = Simulation::new(PatternName::Glider.build(Cell::new(0, 0)));
        let history = sim.run(8, &mut Ticker::unpaced(), |_| {});
        assert!(history.iter().all(|s| s.alive == 5));
        assert!(history.iter().all(|s| s.entries > s.alive));
    }

    #[test]
    fn test_from_settings_with_pattern() {
        let mut settings = Settings::default();
        settings.seed.pattern = Some(PatternName::Block);
        settings.seed.origin_x = -3;
        settings.seed.origin_y = 7;

        let sim = Simulation::from_settings(&settings).unwrap();
        assert_eq!(sim.state().alive_count(), 4);
        assert!(sim.state().is_alive(Cell::new(-3, 7)));
        assert!(sim.state().is_alive(Cell::new(-2, 8)));
    }

    #[test]
    fn test_from_settings_random_is_reproducible() {
        let mut settings = Settings::default();
        settings.seed.random_seed = Some(99);

        let a = Simulation::from_settings(&settings).unwrap();
        let b = Simulation::from_settings(&settings).unwrap();
        assert_eq!(a.state().alive_set(), b.state().alive_set());
    }

    #[test]
    fn test_from_settings_rejects_bad_viewport() {
        let mut settings = Settings::default();
        settings.seed.width = 0;
        assert!(Simulation::from_settings(&settings).is_err());

        settings.seed.width = 3_000_000_000;
        settings.seed.height = 3_000_000_000;
        assert!(Simulation::from_settings(&settings).is_err());
    }

    #[test]
    fn test_unpaced_ticker_never_blocks() {
        let mut ticker = Ticker::unpaced();
        let start = Instant::now();
        for _ in 0..1000 {
            ticker.wait();
        }
        assert!(start.elapsed() < Duration::from_secs(1));
        assert!(ticker.is_due());
    }

    #[test]
    fn test_ticker_waits_for_interval() {
        let start = Instant::now();
        let mut ticker = Ticker::from_millis(20);
        ticker.wait();
        ticker.wait();
        assert!(start.elapsed() >= Duration::from_millis(40));
        assert_eq!(ticker.interval(), Duration::from_millis(20));
    }

    #[test]
    fn test_ticker_not_due_before_interval() {
        let ticker = Ticker::from_millis(3_600_000);
        assert!(!ticker.is_due());
    }
}
