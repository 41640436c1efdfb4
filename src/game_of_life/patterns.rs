//! Pattern parsing and the built-in pattern catalogue

use super::{Cell, LifeError, LifeState};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Well-known starting configurations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum PatternName {
    Block,
    Blinker,
    Beacon,
    Toad,
    Glider,
    RPentomino,
}

impl PatternName {
    pub const ALL: [PatternName; 6] = [
        PatternName::Block,
        PatternName::Blinker,
        PatternName::Beacon,
        PatternName::Toad,
        PatternName::Glider,
        PatternName::RPentomino,
    ];

    /// Row strings for the pattern, first row is the smallest `y`
    pub fn rows(self) -> &'static str {
        match self {
            PatternName::Block => "11\n11\n",
            PatternName::Blinker => "111\n",
            PatternName::Beacon => "1100\n1100\n0011\n0011\n",
            PatternName::Toad => "0111\n1110\n",
            PatternName::Glider => "010\n001\n111\n",
            PatternName::RPentomino => "011\n110\n010\n",
        }
    }

    /// Build a state with the pattern's top-left corner at `origin`
    pub fn build(self, origin: Cell) -> LifeState {
        // Catalogue entries are well formed, so parsing cannot fail
        parse_cells(self.rows(), origin)
            .map(|cells| cells.into_iter().collect())
            .unwrap_or_default()
    }
}

impl fmt::Display for PatternName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PatternName::Block => "block",
            PatternName::Blinker => "blinker",
            PatternName::Beacon => "beacon",
            PatternName::Toad => "toad",
            PatternName::Glider => "glider",
            PatternName::RPentomino => "r_pentomino",
        };
        write!(f, "{}", name)
    }
}

/// Parse a pattern into its live cells.
///
/// Each non-empty line is a row; `1`/`O` are alive, `0`/`.` are dead.
/// Row `r`, column `c` maps to `(origin.x + c, origin.y + r)`.
pub fn parse_cells(content: &str, origin: Cell) -> Result<Vec<Cell>, LifeError> {
    let lines: Vec<&str> = content
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect();

    let width = match lines.first() {
        Some(first) => first.chars().count(),
        None => return Err(LifeError::EmptyPattern),
    };

    let mut cells = Vec::new();
    for (row, line) in lines.iter().enumerate() {
        let len = line.chars().count();
        if len != width {
            return Err(LifeError::RaggedPattern {
                row,
                len,
                expected: width,
            });
        }

        for (col, ch) in line.chars().enumerate() {
            match ch {
                '1' | 'O' => cells.push(origin.offset(col as i64, row as i64)),
                '0' | '.' => {}
                _ => return Err(LifeError::InvalidPatternChar { ch, row, col }),
            }
        }
    }

    Ok(cells)
}

/// Parse a pattern straight into a state
pub fn parse_state(content: &str, origin: Cell) -> Result<LifeState, LifeError> {
    Ok(parse_cells(content, origin)?.into_iter().collect())
}
