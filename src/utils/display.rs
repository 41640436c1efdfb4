//! Display and output formatting utilities

use crate::config::ViewportConfig;
use crate::game_of_life::{Cell, LifeState};
use crate::simulation::{Behavior, GenerationStats, SimulationReport};

/// Format states and reports for terminal output
pub struct StateFormatter;

/// Coordinates covered by a viewport axis, wrapping at the `i64` edges
fn axis(start: i64, len: i64) -> impl Iterator<Item = i64> {
    (0..len).map(move |d| start.wrapping_add(d))
}

impl StateFormatter {
    /// Format the cells inside `viewport` in compact form, smallest `y` on top
    pub fn format_viewport(state: &LifeState, viewport: &ViewportConfig) -> String {
        let mut output = String::new();
        for y in axis(viewport.y, viewport.height) {
            for x in axis(viewport.x, viewport.width) {
                output.push(if state.is_alive(Cell::new(x, y)) { '█' } else { '·' });
            }
            output.push('\n');
        }
        output
    }

    /// Format the cells inside `viewport` with coordinate headers
    pub fn format_viewport_with_coords(state: &LifeState, viewport: &ViewportConfig) -> String {
        let mut output = String::new();

        // Header with column numbers
        output.push_str("    ");
        for x in axis(viewport.x, viewport.width) {
            output.push_str(&format!("{:2}", x.rem_euclid(10)));
        }
        output.push('\n');

        for y in axis(viewport.y, viewport.height) {
            output.push_str(&format!("{:3} ", y));
            for x in axis(viewport.x, viewport.width) {
                output.push_str(if state.is_alive(Cell::new(x, y)) { "██" } else { "··" });
            }
            output.push('\n');
        }

        output
    }

    /// Viewport just large enough for every alive cell, with a margin
    pub fn fit_viewport(state: &LifeState, margin: i64) -> Option<ViewportConfig> {
        let (lo, hi) = state.bounding_box()?;
        let span = |lo: i64, hi: i64| {
            hi.saturating_sub(lo)
                .saturating_add(1)
                .saturating_add(margin.saturating_mul(2))
        };
        Some(ViewportConfig {
            x: lo.x.saturating_sub(margin),
            y: lo.y.saturating_sub(margin),
            width: span(lo.x, hi.x),
            height: span(lo.y, hi.y),
        })
    }

    /// One-line generation header
    pub fn format_generation(stats: &GenerationStats) -> String {
        format!(
            "Iter #{}: {} live cells ({} recorded)",
            stats.generation, stats.alive, stats.entries
        )
    }

    /// Multi-line report summary
    pub fn format_report(report: &SimulationReport) -> String {
        let mut output = String::new();
        let last = report.final_stats();
        let analysis = &report.analysis;

        output.push_str("Simulation Summary:\n");
        output.push_str(&format!("  Generations run: {}\n", report.generations_run));
        output.push_str(&format!(
            "  Live cells: {} → {}\n",
            report.initial.alive, last.alive
        ));
        output.push_str(&format!(
            "  Population range: {}..={}\n",
            analysis.min_population, analysis.max_population
        ));
        output.push_str(&format!(
            "  Recorded entries: {} (peak {})\n",
            last.entries,
            report.peak_entries()
        ));
        output.push_str(&format!("  Behavior: {}\n", analysis.behavior));

        output
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    /// Check if terminal supports color
    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err()
            && (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    /// Format success message
    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    /// Format error message
    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    /// Format warning message
    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    /// Format info message
    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }

    /// Classified behavior, colored by how the population ended up
    pub fn behavior(behavior: &Behavior) -> String {
        Self::colored(&behavior.to_string(), Color::for_behavior(behavior))
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn for_behavior(behavior: &Behavior) -> Self {
        match behavior {
            Behavior::DiedOut { .. } => Color::Red,
            Behavior::StillLife | Behavior::Oscillator { .. } => Color::Green,
            Behavior::Spaceship { .. } => Color::Blue,
            Behavior::Unsettled => Color::Yellow,
        }
    }

    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}
