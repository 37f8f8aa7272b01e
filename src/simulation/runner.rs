//! Main simulation loop

use std::time::Instant;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::city::generation::generate_city;
use crate::city::home::Home;
use crate::city::relocation::{relocation_step, EpochReport};
use crate::core::config::CityConfig;
use crate::core::error::Result;
use crate::core::types::Epoch;
use crate::entity::preference::{PreferenceModel, SatisfactionModel};
use crate::metrics::{self, ClusterStats};
use crate::simulation::output::SimulationOutput;
use crate::spatial::grid::Grid;

/// Measurements taken on the grid before an epoch's relocation pass
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpochMetrics {
    pub income_satisfaction: f64,
    pub ethnicity_clusters: ClusterStats,
    pub religion_clusters: ClusterStats,
}

/// Everything recorded for one epoch
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpochRecord {
    pub epoch: Epoch,
    pub metrics: EpochMetrics,
    pub report: EpochReport,
}

/// Why a run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    MaxIterations,
    SatisfactionReached { epoch: Epoch },
}

/// A city plus the state needed to advance it
pub struct Simulation<M = PreferenceModel> {
    config: CityConfig,
    grid: Grid<Home>,
    model: M,
    /// Random number generator (deterministic)
    rng: ChaCha8Rng,
    /// Epochs completed so far
    epoch: Epoch,
}

impl Simulation<PreferenceModel> {
    /// Generate a city from the config with the stock preference model
    pub fn new(config: CityConfig) -> Result<Self> {
        let model = PreferenceModel::from_config(&config);
        Self::with_model(config, model)
    }
}

impl<M: SatisfactionModel> Simulation<M> {
    pub fn with_model(config: CityConfig, model: M) -> Result<Self> {
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let grid = generate_city(&config, &mut rng)?;
        Ok(Self {
            config,
            grid,
            model,
            rng,
            epoch: 0,
        })
    }

    /// Start from a prepared grid; its dimensions override the config's
    pub fn with_grid(mut config: CityConfig, grid: Grid<Home>, model: M) -> Result<Self> {
        config.width = grid.width;
        config.height = grid.height;
        config.validate()?;
        Ok(Self {
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
            grid,
            model,
            epoch: 0,
        })
    }

    pub fn config(&self) -> &CityConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid<Home> {
        &self.grid
    }

    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    /// Read-only metrics on the current grid
    pub fn measure(&self) -> EpochMetrics {
        EpochMetrics {
            income_satisfaction: metrics::income_satisfaction(
                &self.grid,
                self.config.parallel_threshold,
            ),
            ethnicity_clusters: metrics::cluster_ethnicity(&self.grid),
            religion_clusters: metrics::cluster_religion(&self.grid),
        }
    }

    /// One epoch: measure, then relocate unsatisfied agents in place
    pub fn step(&mut self) -> EpochRecord {
        let epoch = self.epoch;
        let metrics = self.measure();
        let report = relocation_step(&mut self.grid, &self.config, &self.model, &mut self.rng);
        self.epoch += 1;

        if epoch % 2 == 0 {
            tracing::debug!(
                "epoch {}: satisfaction {:.3}, {} moved, {} religion / {} ethnicity clusters",
                epoch,
                report.mean_satisfaction,
                report.relocated,
                metrics.religion_clusters.count,
                metrics.ethnicity_clusters.count,
            );
        }

        EpochRecord {
            epoch,
            metrics,
            report,
        }
    }

    /// Run until `max_iterations` epochs have passed or average satisfaction
    /// exceeds the threshold
    pub fn run(&mut self) -> SimulationOutput {
        let start = Instant::now();
        let census_start = metrics::census(&self.grid);

        tracing::info!(
            "Starting {}x{} city: {} agents, {} landmarks, {} empty",
            self.grid.width,
            self.grid.height,
            census_start.agents,
            census_start.landmarks,
            census_start.empty,
        );

        let mut epochs = Vec::with_capacity(self.config.max_iterations as usize);
        let mut termination = Termination::MaxIterations;

        for _ in 0..self.config.max_iterations {
            let record = self.step();
            epochs.push(record);

            if record.report.mean_satisfaction > self.config.satisfaction_threshold {
                termination = Termination::SatisfactionReached {
                    epoch: record.epoch,
                };
                break;
            }
        }

        let census_end = metrics::census(&self.grid);
        let output = SimulationOutput::new(
            self.config.clone(),
            census_start,
            census_end,
            epochs,
            termination,
            start.elapsed(),
        );

        tracing::info!("{}", output.summary());
        output
    }
}

/// Generate a city from `config` and run it to completion
pub fn simulate(config: CityConfig) -> Result<SimulationOutput> {
    let mut simulation = Simulation::new(config)?;
    Ok(simulation.run())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{AgentId, Religion};
    use crate::entity::agent::{Agent, Occupant};

    fn small_config() -> CityConfig {
        CityConfig {
            width: 10,
            height: 10,
            max_iterations: 5,
            ..CityConfig::default()
        }
    }

    #[test]
    fn test_zero_iterations_leaves_city_untouched() {
        let config = CityConfig {
            max_iterations: 0,
            ..small_config()
        };
        let mut sim = Simulation::new(config).unwrap();
        let before = sim.grid().clone();

        let output = sim.run();

        assert!(output.epochs.is_empty());
        assert!(output.satisfaction_series().is_empty());
        assert_eq!(output.termination, Termination::MaxIterations);
        assert_eq!(sim.grid(), &before);
        assert_eq!(sim.epoch(), 0);
    }

    #[test]
    fn test_runs_to_max_iterations() {
        let config = CityConfig {
            satisfaction_threshold: 1.0,
            ..small_config()
        };
        let mut sim = Simulation::new(config).unwrap();
        let output = sim.run();
        assert_eq!(output.epochs.len(), 5);
        assert_eq!(sim.epoch(), 5);
        let indices: Vec<Epoch> = output.epochs.iter().map(|e| e.epoch).collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_stops_when_satisfied() {
        let happy = |_: &Agent, _: &[&Occupant]| 1.0_f64;
        let mut sim = Simulation::with_model(small_config(), happy).unwrap();
        let output = sim.run();
        assert_eq!(output.epochs.len(), 1);
        assert_eq!(output.termination, Termination::SatisfactionReached { epoch: 0 });
        // The terminating epoch keeps its metrics but ends the satisfaction history
        assert_eq!(output.epochs[0].report.mean_satisfaction, 1.0);
        assert!(output.satisfaction_series().is_empty());
        assert_eq!(output.religion_cluster_counts().len(), 1);
        assert_eq!(output.income_series().len(), 1);
    }

    #[test]
    fn test_metrics_taken_before_relocation() {
        let unhappy = |_: &Agent, _: &[&Occupant]| 0.0_f64;
        let mut sim = Simulation::with_model(small_config(), unhappy).unwrap();
        let expected = sim.measure();
        let record = sim.step();
        assert_eq!(record.metrics, expected);
    }

    #[test]
    fn test_with_grid_adopts_grid_dimensions() {
        let religion = Religion::new(1).unwrap();
        let mut grid = Grid::filled(2, 3, Home::empty(0.0));
        grid.set(0, 0, Home::with_agent(0.0, Agent::new(AgentId(0), religion, true, 1.0)));
        let sim = Simulation::with_grid(CityConfig::default(), grid, PreferenceModel::default())
            .unwrap();
        assert_eq!(sim.config().width, 2);
        assert_eq!(sim.config().height, 3);
    }

    #[test]
    fn test_same_seed_same_history() {
        let a = simulate(small_config()).unwrap();
        let b = simulate(small_config()).unwrap();
        assert_eq!(a.epochs, b.epochs);
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let config = CityConfig {
            radius: 0,
            ..small_config()
        };
        assert!(Simulation::new(config).is_err());
    }
}
