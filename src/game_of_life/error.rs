//! Errors raised while building a Game of Life state

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifeError {
    #[error("viewport must have positive dimensions, got {width}x{height}")]
    InvalidViewport { width: i64, height: i64 },

    #[error("viewport {width}x{height} exceeds the seeding limit of {max} cells")]
    ViewportTooLarge { width: i64, height: i64, max: i64 },

    #[error("pattern is empty or contains no valid rows")]
    EmptyPattern,

    #[error("row {row} has length {len}, expected {expected} (all rows must have the same length)")]
    RaggedPattern { row: usize, len: usize, expected: usize },

    #[error("invalid character '{ch}' at position ({row}, {col}); only '0', '1', '.' and 'O' are allowed")]
    InvalidPatternChar { ch: char, row: usize, col: usize },
}
