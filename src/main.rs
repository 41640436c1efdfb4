//! Command line driver for the sparse Game of Life simulator

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::LevelFilter;
use sparse_life::{
    config::{CliOverrides, OutputFormat, Settings},
    game_of_life::PatternName,
    run_simulation,
    simulation::{Simulation, StabilityTracker, Ticker},
    utils::{ColorOutput, StateFormatter},
    SimulationReport,
};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "sparse_life")]
#[command(about = "Conway's Game of Life on an unbounded grid")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation, advancing one generation per tick
    Run {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Number of generations (overrides config)
        #[arg(short, long)]
        generations: Option<usize>,

        /// Random seed for the initial layout (overrides config)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Start from a named pattern instead of a random layout
        #[arg(short, long, value_enum)]
        pattern: Option<PatternName>,

        /// Milliseconds between generations (overrides config)
        #[arg(short, long)]
        interval_ms: Option<u64>,

        /// Seed viewport width (overrides config)
        #[arg(long)]
        width: Option<i64>,

        /// Seed viewport height (overrides config)
        #[arg(long)]
        height: Option<i64>,

        /// Output format (overrides config)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Create example configuration files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },

    /// Classify how a starting state evolves
    Analyze {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Start from a named pattern instead of a random layout
        #[arg(short, long, value_enum)]
        pattern: Option<PatternName>,

        /// Number of generations to simulate (overrides config)
        #[arg(short, long)]
        generations: Option<usize>,

        /// Random seed for the initial layout (overrides config)
        #[arg(short, long)]
        seed: Option<u64>,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = dispatch(cli.command) {
        eprintln!("{}", ColorOutput::error(&format!("❌ {:#}", e)));
        std::process::exit(1);
    }
}

fn dispatch(command: Commands) -> Result<()> {
    match command {
        Commands::Run {
            config, generations, seed, pattern, interval_ms,
            width, height, format, verbose,
        } => {
            let overrides = CliOverrides {
                generations,
                tick_interval_ms: interval_ms,
                random_seed: seed,
                pattern,
                width,
                height,
                format,
            };
            run_command(config, overrides, verbose)
        }
        Commands::Setup { directory, force } => setup_command(directory, force),
        Commands::Analyze { config, pattern, generations, seed } => {
            let overrides = CliOverrides {
                generations,
                random_seed: seed,
                pattern,
                ..CliOverrides::default()
            };
            analyze_command(config, overrides)
        }
    }
}

/// Load the config file, falling back to defaults when it is missing
fn load_settings(config_path: &PathBuf) -> Result<Settings> {
    if config_path.exists() {
        Settings::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))
    } else {
        println!("{}", ColorOutput::warning(&format!(
            "Config file {} not found, using defaults", config_path.display()
        )));
        Ok(Settings::default())
    }
}

fn init_logging(level: LevelFilter) {
    let env = env_logger::Env::default().default_filter_or(level.to_string());
    // A second initialization (tests) keeps the first logger
    let _ = env_logger::Builder::from_env(env).try_init();
}

fn render(settings: &Settings, simulation: &Simulation) {
    let stats = simulation.stats();
    match settings.output.format {
        OutputFormat::Visual => {
            println!("{}", StateFormatter::format_generation(&stats));
            let viewport = &settings.output.viewport;
            print!("{}", StateFormatter::format_viewport(simulation.state(), viewport));
        }
        OutputFormat::Text => {
            println!("{}", StateFormatter::format_generation(&stats));
            println!("{}", simulation.state());
        }
        OutputFormat::Json => {}
    }
}

fn print_report(settings: &Settings, report: &SimulationReport) -> Result<()> {
    match settings.output.format {
        OutputFormat::Json => {
            println!("{}", report.to_json().context("Failed to serialize report")?);
        }
        OutputFormat::Text | OutputFormat::Visual => {
            println!("\n{}", StateFormatter::format_report(report));
        }
    }
    Ok(())
}

fn run_command(config_path: PathBuf, overrides: CliOverrides, verbose: bool) -> Result<()> {
    let mut settings = load_settings(&config_path)?;
    settings.merge_with_cli(&overrides);
    settings.validate().context("Configuration validation failed")?;

    init_logging(if verbose { LevelFilter::Debug } else { settings.log_level()? });

    if verbose {
        println!("Configuration:");
        println!("  Generations: {}", settings.simulation.generations);
        println!("  Tick interval: {}ms", settings.simulation.tick_interval_ms);
        match settings.seed.pattern {
            Some(pattern) => println!("  Seed: {} pattern", pattern),
            None => println!("  Seed: random {}x{}", settings.seed.width, settings.seed.height),
        }
        println!("  Format: {:?}", settings.output.format);
        println!();
    }

    let mut simulation = Simulation::from_settings(&settings)
        .context("Failed to create initial state")?;
    let mut tracker = StabilityTracker::new();
    tracker.observe(simulation.state());
    render(&settings, &simulation);

    let show_every = settings.output.show_every as u64;
    let mut ticker = Ticker::from_millis(settings.simulation.tick_interval_ms);
    let start_time = Instant::now();
    let initial = simulation.stats();

    let history = simulation.run(settings.simulation.generations, &mut ticker, |s| {
        tracker.observe(s.state());
        if (s.generation() - 1) % show_every == 0 {
            render(&settings, s);
        }
    });

    let report = SimulationReport::new(initial, history, tracker.analysis());
    print_report(&settings, &report)?;

    if verbose {
        println!("{}", ColorOutput::success(&format!(
            "Ran {} generations in {:.3}s",
            report.generations_run,
            start_time.elapsed().as_secs_f64()
        )));
    }

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("🛠️  Setting up configuration files..."));

    let config_dir = directory.join("config");
    let examples_dir = config_dir.join("examples");
    std::fs::create_dir_all(&examples_dir)
        .with_context(|| format!("Failed to create directory {}", examples_dir.display()))?;

    let default_path = config_dir.join("default.yaml");
    let mut blinker = Settings::default();
    blinker.seed.pattern = Some(PatternName::Blinker);
    blinker.simulation.generations = 10;
    blinker.output.viewport.x = -2;
    blinker.output.viewport.y = -2;
    blinker.output.viewport.width = 7;
    blinker.output.viewport.height = 5;

    let mut glider = Settings::default();
    glider.seed.pattern = Some(PatternName::Glider);
    glider.simulation.generations = 40;
    glider.simulation.tick_interval_ms = 250;
    glider.output.viewport.width = 20;
    glider.output.viewport.height = 20;

    let mut random = Settings::default();
    random.seed.random_seed = Some(42);
    random.output.format = OutputFormat::Text;
    random.output.show_every = 10;

    let files = [
        (default_path, Settings::default()),
        (examples_dir.join("blinker.yaml"), blinker),
        (examples_dir.join("glider.yaml"), glider),
        (examples_dir.join("random.yaml"), random),
    ];

    for (path, settings) in files {
        if path.exists() && !force {
            println!("Skipped: {} (already exists)", path.display());
            continue;
        }
        settings.to_file(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        println!("Created: {}", path.display());
    }

    println!("\n{}", ColorOutput::success("✅ Setup complete!"));
    println!("\nNext steps:");
    println!("1. Edit configuration files in {}", config_dir.display());
    println!("2. Run: cargo run -- run --config config/examples/glider.yaml");

    Ok(())
}

fn analyze_command(config_path: PathBuf, overrides: CliOverrides) -> Result<()> {
    println!("{}", ColorOutput::info("🔬 Analyzing starting state..."));

    let mut settings = load_settings(&config_path)?;
    settings.merge_with_cli(&overrides);
    settings.simulation.tick_interval_ms = 0;
    settings.validate().context("Configuration validation failed")?;
    init_logging(LevelFilter::Warn);

    // Both passes below must see the same random layout
    if settings.seed.pattern.is_none() {
        let seed = *settings.seed.random_seed.get_or_insert_with(rand::random::<u64>);
        println!("Random seed: {}", seed);
    }

    let simulation = Simulation::from_settings(&settings)?;
    let state = simulation.state();
    println!("Initial live cells: {}", state.alive_count());
    if let Some(viewport) = StateFormatter::fit_viewport(state, 1) {
        if viewport.width <= 40 && viewport.height <= 40 {
            print!("{}", StateFormatter::format_viewport_with_coords(state, &viewport));
        }
    }

    let report = run_simulation(&settings).context("Simulation failed")?;
    println!("\n{}", StateFormatter::format_report(&report));

    println!("{}", ColorOutput::behavior(&report.analysis.behavior));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from([
            "sparse_life",
            "run",
            "--config", "test.yaml",
            "--generations", "5",
            "--pattern", "r_pentomino",
            "--format", "json",
        ]);

        assert!(cli.is_ok());
    }

    #[test]
    fn test_dispatch_reports_invalid_config() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("broken.yaml");
        std::fs::write(&config_path, "simulation: [not, a, map]").unwrap();

        let cli = Cli::try_parse_from([
            "sparse_life",
            "run",
            "--config",
            config_path.to_str().unwrap(),
        ])
        .unwrap();
        let err = dispatch(cli.command).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to load config"));
    }

    #[test]
    fn test_cli_rejects_unknown_pattern() {
        let cli = Cli::try_parse_from(["sparse_life", "analyze", "--pattern", "spaceship"]);
        assert!(cli.is_err());
    }

    #[test]
    fn test_setup_command() {
        let temp_dir = tempdir().unwrap();
        let result = setup_command(temp_dir.path().to_path_buf(), false);

        assert!(result.is_ok());
        assert!(temp_dir.path().join("config/default.yaml").exists());

        let glider = Settings::from_file(&temp_dir.path().join("config/examples/glider.yaml"));
        assert_eq!(glider.unwrap().seed.pattern, Some(PatternName::Glider));
    }

    #[test]
    fn test_run_command_with_pattern() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("blinker.yaml");

        let mut settings = Settings::default();
        settings.seed.pattern = Some(PatternName::Blinker);
        settings.simulation.generations = 3;
        settings.simulation.tick_interval_ms = 0;
        settings.output.format = OutputFormat::Text;
        settings.to_file(&config_path).unwrap();

        assert!(run_command(config_path, CliOverrides::default(), false).is_ok());
    }

    #[test]
    fn test_run_command_rejects_invalid_override() {
        let temp_dir = tempdir().unwrap();
        let overrides = CliOverrides {
            width: Some(0),
            ..CliOverrides::default()
        };
        let result = run_command(temp_dir.path().join("missing.yaml"), overrides, false);
        assert!(result.is_err());
    }

    #[test]
    fn test_analyze_command() {
        let temp_dir = tempdir().unwrap();
        let overrides = CliOverrides {
            pattern: Some(PatternName::Toad),
            generations: Some(6),
            ..CliOverrides::default()
        };
        assert!(analyze_command(temp_dir.path().join("missing.yaml"), overrides).is_ok());
    }
}
