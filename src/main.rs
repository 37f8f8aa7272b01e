//! Schelling City - Entry Point
//!
//! Loads a city config (TOML, optional), applies command-line overrides,
//! runs the segregation simulation and writes the per-epoch series as JSON.

use std::path::PathBuf;

use clap::Parser;
use schelling_city::core::config::CityConfig;
use schelling_city::core::error::Result;
use schelling_city::simulation::{GridSnapshot, Simulation};

/// Residential segregation simulation
#[derive(Parser, Debug)]
#[command(name = "schelling-city")]
#[command(about = "Run a Schelling-style segregation simulation and record clustering over time")]
struct Args {
    /// TOML config file; missing keys use defaults
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Rows in the city grid
    #[arg(long)]
    width: Option<usize>,

    /// Columns in the city grid
    #[arg(long)]
    height: Option<usize>,

    /// Neighborhood radius (Chebyshev distance)
    #[arg(long)]
    radius: Option<usize>,

    /// Maximum number of epochs
    #[arg(long)]
    max_iterations: Option<u32>,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Only move to homes where the agent would be satisfied
    #[arg(long)]
    check_future_home: bool,

    /// Count closer neighbors more often when scoring satisfaction
    #[arg(long)]
    weighted_neighbors: bool,

    /// Where to write the run output
    #[arg(long, short = 'o', default_value = "simulation_output.json")]
    output: PathBuf,

    /// Also write initial and final grid snapshots to this file
    #[arg(long)]
    snapshots: Option<PathBuf>,

    /// Debug-level logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

impl Args {
    fn city_config(&self) -> Result<CityConfig> {
        let mut config = match &self.config {
            Some(path) => CityConfig::load(path)?,
            None => CityConfig::default(),
        };

        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(radius) = self.radius {
            config.radius = radius;
        }
        if let Some(max_iterations) = self.max_iterations {
            config.max_iterations = max_iterations;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if self.check_future_home {
            config.check_future_home = true;
        }
        if self.weighted_neighbors {
            config.weighted_neighbors = true;
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(format!("schelling_city={}", level).parse().unwrap_or(level.into())),
        )
        .init();

    let config = args.city_config()?;
    tracing::info!(
        "Schelling City: {}x{} grid, radius {}, up to {} epochs, seed {}",
        config.width,
        config.height,
        config.radius,
        config.max_iterations,
        config.seed,
    );

    let zoom = config.zoom;
    let mut simulation = Simulation::new(config)?;
    let initial = GridSnapshot::capture(simulation.grid(), 0, zoom);

    let output = simulation.run();
    output.write_json(&args.output)?;
    tracing::info!("Run output written to {}", args.output.display());

    if let Some(path) = &args.snapshots {
        let last = GridSnapshot::capture(simulation.grid(), simulation.epoch(), zoom);
        let json = serde_json::to_string_pretty(&[initial, last])?;
        std::fs::write(path, json)?;
        tracing::info!("Grid snapshots written to {}", path.display());
    }

    println!("{}", output.summary());
    Ok(())
}
