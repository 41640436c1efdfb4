//! Configuration settings for the Game of Life simulator

use crate::game_of_life::PatternName;
use anyhow::{Context, Result};
use clap::ValueEnum;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub simulation: SimulationConfig,
    pub seed: SeedConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub generations: usize,
    /// Wall-clock time between generations; zero runs unpaced
    pub tick_interval_ms: u64,
    /// Drop dead entries after every generation
    #[serde(default)]
    pub compact_dead_entries: bool,
}

/// How the first generation is populated
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    pub width: i64,
    pub height: i64,
    /// Fixed seed for the random layout; `None` draws from OS entropy
    #[serde(default)]
    pub random_seed: Option<u64>,
    /// Start from a catalogue pattern instead of a random layout
    #[serde(default)]
    pub pattern: Option<PatternName>,
    #[serde(default)]
    pub origin_x: i64,
    #[serde(default)]
    pub origin_y: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Render every N-th generation
    pub show_every: usize,
    pub viewport: ViewportConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    Json,
    Visual,
}

/// Window of the lattice drawn by the visual renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewportConfig {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for Settings {
    fn default() -> Self {
        // 1024x768 window with 5px cells
        let (width, height) = (204, 153);
        Self {
            simulation: SimulationConfig {
                generations: 100,
                tick_interval_ms: 1000,
                compact_dead_entries: false,
            },
            seed: SeedConfig {
                width,
                height,
                random_seed: None,
                pattern: None,
                origin_x: 0,
                origin_y: 0,
            },
            output: OutputConfig {
                format: OutputFormat::Visual,
                show_every: 1,
                viewport: ViewportConfig {
                    x: 0,
                    y: 0,
                    width,
                    height,
                },
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.simulation.generations == 0 {
            anyhow::bail!("Number of generations must be positive");
        }

        if self.seed.width <= 0 || self.seed.height <= 0 {
            anyhow::bail!(
                "Seed viewport must have positive dimensions, got {}x{}",
                self.seed.width,
                self.seed.height
            );
        }

        if self.output.show_every == 0 {
            anyhow::bail!("show_every must be positive");
        }

        let viewport = &self.output.viewport;
        if viewport.width <= 0 || viewport.height <= 0 {
            anyhow::bail!(
                "Output viewport must have positive dimensions, got {}x{}",
                viewport.width,
                viewport.height
            );
        }

        self.log_level()?;
        Ok(())
    }

    /// The configured log level as a filter
    pub fn log_level(&self) -> Result<LevelFilter> {
        LevelFilter::from_str(&self.logging.level)
            .map_err(|e| anyhow::anyhow!("Unknown log level '{}': {}", self.logging.level, e))
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(generations) = cli_overrides.generations {
            self.simulation.generations = generations;
        }
        if let Some(interval) = cli_overrides.tick_interval_ms {
            self.simulation.tick_interval_ms = interval;
        }
        if let Some(seed) = cli_overrides.random_seed {
            self.seed.random_seed = Some(seed);
        }
        if let Some(pattern) = cli_overrides.pattern {
            self.seed.pattern = Some(pattern);
        }
        if let Some(width) = cli_overrides.width {
            self.seed.width = width;
        }
        if let Some(height) = cli_overrides.height {
            self.seed.height = height;
        }
        if let Some(format) = cli_overrides.format {
            self.output.format = format;
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub generations: Option<usize>,
    pub tick_interval_ms: Option<u64>,
    pub random_seed: Option<u64>,
    pub pattern: Option<PatternName>,
    pub width: Option<i64>,
    pub height: Option<i64>,
    pub format: Option<OutputFormat>,
}
