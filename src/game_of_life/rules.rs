//! Game of Life rules implementation

use super::LifeState;

/// Game of Life rules engine (B3/S23)
pub struct GameOfLifeRules;

impl GameOfLifeRules {
    /// Check if a cell should be alive in the next generation given its current state and neighbor count
    pub fn should_be_alive(current_state: bool, neighbor_count: u8) -> bool {
        matches!((current_state, neighbor_count), (_, 3) | (true, 2))
    }

    /// Evolve the state one generation forward
    pub fn evolve(current: &LifeState) -> LifeState {
        current.next_generation()
    }

    /// Evolve the state for multiple generations
    pub fn evolve_generations(mut state: LifeState, generations: usize) -> LifeState {
        for _ in 0..generations {
            state = Self::evolve(&state);
        }
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_of_life::Cell;

    #[test]
    fn test_rule_logic() {
        assert!(GameOfLifeRules::should_be_alive(true, 2)); // Survival with 2 neighbors
        assert!(GameOfLifeRules::should_be_alive(true, 3)); // Survival with 3 neighbors
        assert!(GameOfLifeRules::should_be_alive(false, 3)); // Birth with 3 neighbors
        assert!(!GameOfLifeRules::should_be_alive(false, 2)); // No birth with 2 neighbors
        assert!(!GameOfLifeRules::should_be_alive(true, 1)); // Death with 1 neighbor
        assert!(!GameOfLifeRules::should_be_alive(true, 4)); // Death with 4 neighbors
    }

    #[test]
    fn test_full_rule_table() {
        for n in 0..=8u8 {
            assert_eq!(GameOfLifeRules::should_be_alive(false, n), n == 3, "dead, n={}", n);
            assert_eq!(
                GameOfLifeRules::should_be_alive(true, n),
                n == 2 || n == 3,
                "alive, n={}",
                n
            );
        }
    }

    #[test]
    fn test_evolve_generations_blinker_period() {
        let blinker: LifeState = [(0, 0), (1, 0), (2, 0)]
            .into_iter()
            .map(Cell::from)
            .collect();
        let start = blinker.alive_set();

        let after_two = GameOfLifeRules::evolve_generations(blinker.clone(), 2);
        assert_eq!(after_two.alive_set(), start);

        let after_three = GameOfLifeRules::evolve_generations(blinker, 3);
        assert_ne!(after_three.alive_set(), start);
    }

    #[test]
    fn test_zero_generations_is_identity() {
        let state: LifeState = [(4, 4)].into_iter().map(Cell::from).collect();
        let same = GameOfLifeRules::evolve_generations(state, 0);
        assert_eq!(same.size(), 1);
        assert!(same.is_alive(Cell::new(4, 4)));
    }
}
