//! Configuration management for the Game of Life simulator

pub mod settings;

pub use settings::{
    CliOverrides, LoggingConfig, OutputConfig, OutputFormat, SeedConfig, Settings,
    SimulationConfig, ViewportConfig,
};
