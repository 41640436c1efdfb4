//! Game of Life core functionality

pub mod cell;
pub mod error;
pub mod patterns;
pub mod rules;
pub mod state;

pub use cell::Cell;
pub use error::LifeError;
pub use patterns::{parse_cells, parse_state, PatternName};
pub use rules::GameOfLifeRules;
pub use state::LifeState;
