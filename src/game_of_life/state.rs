//! Sparse Game of Life state on an unbounded lattice

use super::{Cell, GameOfLifeRules, LifeError};
use log::debug;
use std::collections::hash_map::Entry;
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::iter;

/// Record of which cells are alive at one generation.
///
/// Cells that were never touched are dead. Dead cells may also be recorded
/// explicitly, either through [`LifeState::set`] or because the transition
/// evaluated them as neighbors of a live cell; those entries count towards
/// [`LifeState::size`].
/// Largest viewport area `random` will seed
pub const MAX_SEED_AREA: i64 = 1 << 26;

#[derive(Debug, Clone, Default)]
pub struct LifeState {
    cells: HashMap<Cell, bool>,
}

impl LifeState {
    /// Create an empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a `width x height` viewport anchored at the origin.
    ///
    /// Performs `width * height / 8` uniform draws in `[0, width) x [0, height)`
    /// and marks each drawn cell alive; repeated draws coalesce. `seed` fixes the
    /// layout, `None` draws a fresh one from OS entropy. Areas above
    /// [`MAX_SEED_AREA`] are rejected.
    pub fn random(width: i64, height: i64, seed: Option<u64>) -> Result<Self, LifeError> {
        use rand::{Rng, SeedableRng};
        use rand_chacha::ChaCha8Rng;

        if width <= 0 || height <= 0 {
            return Err(LifeError::InvalidViewport { width, height });
        }

        let area = width
            .checked_mul(height)
            .filter(|&area| area <= MAX_SEED_AREA)
            .ok_or(LifeError::ViewportTooLarge {
                width,
                height,
                max: MAX_SEED_AREA,
            })?;

        let mut rng = if let Some(x) = seed {
            ChaCha8Rng::seed_from_u64(x)
        } else {
            ChaCha8Rng::from_entropy()
        };

        let draws = area / 8;
        let mut state = Self::new();
        for _ in 0..draws {
            let x = rng.gen_range(0..width);
            let y = rng.gen_range(0..height);
            state.set(Cell::new(x, y), true);
        }

        debug!(
            "Seeded {}x{} viewport: {} draws, {} distinct live cells",
            width,
            height,
            draws,
            state.size()
        );
        Ok(state)
    }

    /// Number of recorded entries, dead ones included
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    /// Number of recorded entries that are alive
    pub fn alive_count(&self) -> usize {
        self.cells.values().filter(|&&alive| alive).count()
    }

    pub fn is_alive(&self, cell: Cell) -> bool {
        self.cells.get(&cell).copied().unwrap_or(false)
    }

    /// Record `alive` for `cell`, inserting an entry if there is none
    pub fn set(&mut self, cell: Cell, alive: bool) {
        self.cells.insert(cell, alive);
    }

    /// Cells currently alive, in no particular order
    pub fn alive_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells
            .iter()
            .filter(|&(_, &alive)| alive)
            .map(|(&cell, _)| cell)
    }

    /// Alive cells in `(x, y)` order
    pub fn alive_set(&self) -> BTreeSet<Cell> {
        self.alive_cells().collect()
    }

    /// Every recorded cell with its flag, in no particular order
    pub fn entries(&self) -> impl Iterator<Item = (Cell, bool)> + '_ {
        self.cells.iter().map(|(&cell, &alive)| (cell, alive))
    }

    /// Number of alive cells among the eight neighbors of `cell`
    pub fn live_neighbors(&self, cell: Cell) -> u8 {
        cell.neighbors().filter(|&n| self.is_alive(n)).count() as u8
    }

    /// Compute the state one generation ahead.
    ///
    /// Only live cells and their neighbors are evaluated, each exactly once;
    /// the map being built doubles as the visited set. Every evaluated cell is
    /// recorded, including the ones that end up dead.
    pub fn next_generation(&self) -> LifeState {
        let mut next = HashMap::new();

        for cell in self.alive_cells() {
            for candidate in iter::once(cell).chain(cell.neighbors()) {
                if let Entry::Vacant(slot) = next.entry(candidate) {
                    let neighbors = self.live_neighbors(candidate);
                    slot.insert(GameOfLifeRules::should_be_alive(
                        self.is_alive(candidate),
                        neighbors,
                    ));
                }
            }
        }

        LifeState { cells: next }
    }

    /// Smallest and largest corner of the box enclosing all alive cells
    pub fn bounding_box(&self) -> Option<(Cell, Cell)> {
        self.alive_cells().fold(None, |bounds, cell| match bounds {
            None => Some((cell, cell)),
            Some((lo, hi)) => Some((
                Cell::new(lo.x.min(cell.x), lo.y.min(cell.y)),
                Cell::new(hi.x.max(cell.x), hi.y.max(cell.y)),
            )),
        })
    }

    /// Drop every explicitly dead entry.
    ///
    /// Never called by the transition; `size()` only shrinks when a caller asks.
    /// Returns the number of entries removed.
    pub fn compact(&mut self) -> usize {
        let before = self.cells.len();
        self.cells.retain(|_, alive| *alive);
        before - self.cells.len()
    }
}

impl FromIterator<Cell> for LifeState {
    fn from_iter<I: IntoIterator<Item = Cell>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().map(|cell| (cell, true)).collect(),
        }
    }
}

impl fmt::Display for LifeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, cell) in self.alive_set().into_iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", cell)?;
        }
        write!(f, "]")
    }
}
