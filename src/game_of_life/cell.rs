//! Cell coordinates on the unbounded lattice

use itertools::iproduct;
use std::fmt;

/// A single position on the infinite integer lattice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub x: i64,
    pub y: i64,
}

impl Cell {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// The cell shifted by `(dx, dy)`, wrapping at the `i64` edges
    #[inline]
    pub const fn offset(self, dx: i64, dy: i64) -> Self {
        Self::new(self.x.wrapping_add(dx), self.y.wrapping_add(dy))
    }

    /// The eight surrounding cells, `dx` outer and `dy` inner, both ascending.
    ///
    /// The iterator is `Clone`, so it can be restarted cheaply.
    pub fn neighbors(self) -> impl Iterator<Item = Cell> + Clone {
        iproduct!(-1..=1i64, -1..=1i64)
            .filter(|&(dx, dy)| dx != 0 || dy != 0)
            .map(move |(dx, dy)| self.offset(dx, dy))
    }

    /// Whether `other` is one of the eight surrounding cells
    pub fn is_neighbor_of(self, other: Cell) -> bool {
        self != other
            && matches!(self.x.wrapping_sub(other.x), -1..=1)
            && matches!(self.y.wrapping_sub(other.y), -1..=1)
    }
}

impl From<(i64, i64)> for Cell {
    fn from((x, y): (i64, i64)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
