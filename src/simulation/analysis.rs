//! Long-run behavior classification for a simulation

use crate::game_of_life::{Cell, LifeState};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, VecDeque};
use std::fmt;

/// What the population settled into by the end of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Behavior {
    /// No live cells left after `after` generations
    DiedOut { after: usize },
    StillLife,
    Oscillator { period: usize },
    /// Same shape every `period` generations, shifted by `(dx, dy)`
    Spaceship { period: usize, dx: i64, dy: i64 },
    /// No repetition within the detectable period
    Unsettled,
}

impl fmt::Display for Behavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Behavior::DiedOut { after } => write!(f, "Died out after {} generations", after),
            Behavior::StillLife => write!(f, "Still life"),
            Behavior::Oscillator { period } => write!(f, "Oscillator (period {})", period),
            Behavior::Spaceship { period, dx, dy } => {
                write!(f, "Spaceship (period {}, moves by ({}, {}))", period, dx, dy)
            }
            Behavior::Unsettled => write!(f, "Unsettled"),
        }
    }
}

/// Behavior plus population bounds over the observed run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StabilityAnalysis {
    pub behavior: Behavior,
    pub min_population: usize,
    pub max_population: usize,
    pub final_population: usize,
}

impl StabilityAnalysis {
    /// Longest period searched for
    pub const MAX_PERIOD: usize = 16;

    /// Analyze a full history of alive sets, oldest first
    pub fn analyze(history: &[BTreeSet<Cell>]) -> Self {
        let populations = history.iter().map(BTreeSet::len);
        Self {
            behavior: classify(history),
            min_population: populations.clone().min().unwrap_or(0),
            max_population: populations.max().unwrap_or(0),
            final_population: history.last().map_or(0, BTreeSet::len),
        }
    }

    pub fn is_still_life(&self) -> bool {
        self.behavior == Behavior::StillLife
    }

    pub fn is_oscillator(&self) -> bool {
        matches!(self.behavior, Behavior::Oscillator { .. })
    }

    pub fn oscillation_period(&self) -> Option<usize> {
        match self.behavior {
            Behavior::Oscillator { period } | Behavior::Spaceship { period, .. } => Some(period),
            Behavior::StillLife => Some(1),
            _ => None,
        }
    }

    pub fn has_moving_patterns(&self) -> bool {
        matches!(self.behavior, Behavior::Spaceship { .. })
    }
}

/// Classify the end of `history` (oldest first).
///
/// The last state is compared against each of the previous
/// [`StabilityAnalysis::MAX_PERIOD`] states, shortest period first. An exact
/// match wins over a translated one at the same period.
pub fn classify(history: &[BTreeSet<Cell>]) -> Behavior {
    let Some(last) = history.last() else {
        return Behavior::Unsettled;
    };

    if last.is_empty() {
        let after = history.iter().position(BTreeSet::is_empty).unwrap_or(0);
        return Behavior::DiedOut { after };
    }

    let newest = history.len() - 1;
    for period in 1..=StabilityAnalysis::MAX_PERIOD.min(newest) {
        let earlier = &history[newest - period];
        if earlier == last {
            return if period == 1 {
                Behavior::StillLife
            } else {
                Behavior::Oscillator { period }
            };
        }
        if let Some((dx, dy)) = translation_between(earlier, last) {
            return Behavior::Spaceship { period, dx, dy };
        }
    }

    Behavior::Unsettled
}

/// Shift that maps `from` onto `to`, if the two are the same shape
fn translation_between(from: &BTreeSet<Cell>, to: &BTreeSet<Cell>) -> Option<(i64, i64)> {
    if from.len() != to.len() {
        return None;
    }

    let (a, b) = (min_corner(from)?, min_corner(to)?);
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    if (dx, dy) == (0, 0) {
        return None;
    }

    from.iter()
        .all(|c| to.contains(&c.offset(dx, dy)))
        .then_some((dx, dy))
}

fn min_corner(cells: &BTreeSet<Cell>) -> Option<Cell> {
    let min_x = cells.iter().map(|c| c.x).min()?;
    let min_y = cells.iter().map(|c| c.y).min()?;
    Some(Cell::new(min_x, min_y))
}

/// Running observer that keeps only as much history as classification needs
#[derive(Debug, Default)]
pub struct StabilityTracker {
    window: VecDeque<BTreeSet<Cell>>,
    observed: usize,
    died_out_at: Option<usize>,
    min_population: Option<usize>,
    max_population: usize,
}

impl StabilityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the next state; the first call records the starting state
    pub fn observe(&mut self, state: &LifeState) {
        let alive = state.alive_set();
        let population = alive.len();

        self.min_population = Some(self.min_population.map_or(population, |m| m.min(population)));
        self.max_population = self.max_population.max(population);
        if population == 0 && self.died_out_at.is_none() {
            self.died_out_at = Some(self.observed);
        }

        self.window.push_back(alive);
        if self.window.len() > StabilityAnalysis::MAX_PERIOD + 1 {
            self.window.pop_front();
        }
        self.observed += 1;
    }

    /// Number of states observed so far
    pub fn observed(&self) -> usize {
        self.observed
    }

    pub fn analysis(&mut self) -> StabilityAnalysis {
        let behavior = match self.died_out_at {
            Some(after) => Behavior::DiedOut { after },
            None => classify(self.window.make_contiguous()),
        };

        StabilityAnalysis {
            behavior,
            min_population: self.min_population.unwrap_or(0),
            max_population: self.max_population,
            final_population: self.window.back().map_or(0, BTreeSet::len),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_of_life::PatternName;

    fn history_of(mut state: LifeState, generations: usize) -> Vec<BTreeSet<Cell>> {
        let mut history = vec![state.alive_set()];
        for _ in 0..generations {
            state = state.next_generation();
            history.push(state.alive_set());
        }
        history
    }

    fn pattern(name: PatternName) -> LifeState {
        name.build(Cell::new(0, 0))
    }

    #[test]
    fn test_still_life_detection() {
        let history = history_of(pattern(PatternName::Block), 3);
        let analysis = StabilityAnalysis::analyze(&history);
        assert!(analysis.is_still_life());
        assert_eq!(analysis.oscillation_period(), Some(1));
        assert_eq!(analysis.final_population, 4);
    }

    #[test]
    fn test_oscillator_detection() {
        for name in [PatternName::Blinker, PatternName::Toad, PatternName::Beacon] {
            let history = history_of(pattern(name), 6);
            assert_eq!(classify(&history), Behavior::Oscillator { period: 2 }, "{}", name);
        }
    }

    #[test]
    fn test_beacon_population_bounds() {
        let analysis = StabilityAnalysis::analyze(&history_of(pattern(PatternName::Beacon), 4));
        assert_eq!(analysis.min_population, 6);
        assert_eq!(analysis.max_population, 8);
    }

    #[test]
    fn test_spaceship_detection() {
        let history = history_of(pattern(PatternName::Glider), 8);
        let analysis = StabilityAnalysis::analyze(&history);
        assert_eq!(
            analysis.behavior,
            Behavior::Spaceship {
                period: 4,
                dx: 1,
                dy: 1
            }
        );
        assert!(analysis.has_moving_patterns());
        assert!(!analysis.is_oscillator());
    }

    #[test]
    fn test_died_out_detection() {
        let lonely: LifeState = [Cell::new(0, 0), Cell::new(5, 5)].into_iter().collect();
        let history = history_of(lonely, 3);
        assert_eq!(classify(&history), Behavior::DiedOut { after: 1 });
    }

    #[test]
    fn test_short_history_is_unsettled() {
        assert_eq!(classify(&[]), Behavior::Unsettled);
        let history = history_of(pattern(PatternName::Blinker), 0);
        assert_eq!(classify(&history), Behavior::Unsettled);
    }

    #[test]
    fn test_tracker_matches_full_history() {
        let mut tracker = StabilityTracker::new();
        let mut state = pattern(PatternName::Glider);
        tracker.observe(&state);
        for _ in 0..40 {
            state = state.next_generation();
            tracker.observe(&state);
        }

        assert_eq!(tracker.observed(), 41);
        let analysis = tracker.analysis();
        assert!(analysis.has_moving_patterns());
        assert_eq!(analysis.min_population, 5);
        assert_eq!(analysis.max_population, 5);
    }

    #[test]
    fn test_tracker_remembers_extinction() {
        let mut tracker = StabilityTracker::new();
        let mut state: LifeState = [Cell::new(0, 0)].into_iter().collect();
        tracker.observe(&state);
        for _ in 0..30 {
            state = state.next_generation();
            tracker.observe(&state);
        }
        assert_eq!(tracker.analysis().behavior, Behavior::DiedOut { after: 1 });
    }

    #[test]
    fn test_behavior_display() {
        assert_eq!(Behavior::StillLife.to_string(), "Still life");
        assert_eq!(
            Behavior::Spaceship { period: 4, dx: 1, dy: -1 }.to_string(),
            "Spaceship (period 4, moves by (1, -1))"
        );
    }
}
