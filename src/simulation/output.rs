//! Simulation output and serialization

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::config::CityConfig;
use crate::core::error::Result;
use crate::metrics::Census;
use crate::simulation::runner::{EpochRecord, Termination};

/// Complete record of a run, ordered by epoch, for the plotting collaborator
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimulationOutput {
    pub config: CityConfig,
    pub census_start: Census,
    pub census_end: Census,
    pub epochs: Vec<EpochRecord>,
    pub termination: Termination,
    pub elapsed_ms: u64,
}

impl SimulationOutput {
    pub fn new(
        config: CityConfig,
        census_start: Census,
        census_end: Census,
        epochs: Vec<EpochRecord>,
        termination: Termination,
        elapsed: Duration,
    ) -> Self {
        Self {
            config,
            census_start,
            census_end,
            epochs,
            termination,
            elapsed_ms: elapsed.as_millis() as u64,
        }
    }

    /// Average satisfaction per epoch
    ///
    /// The epoch that reached the satisfaction threshold ends the history
    /// without adding to it; its clusters and income are still in the other
    /// series.
    pub fn satisfaction_series(&self) -> Vec<f64> {
        let stopped_at = match self.termination {
            Termination::SatisfactionReached { epoch } => Some(epoch),
            Termination::MaxIterations => None,
        };
        self.epochs
            .iter()
            .filter(|e| Some(e.epoch) != stopped_at)
            .map(|e| e.report.mean_satisfaction)
            .collect()
    }

    pub fn religion_cluster_counts(&self) -> Vec<usize> {
        self.epochs
            .iter()
            .map(|e| e.metrics.religion_clusters.count)
            .collect()
    }

    pub fn ethnicity_cluster_counts(&self) -> Vec<usize> {
        self.epochs
            .iter()
            .map(|e| e.metrics.ethnicity_clusters.count)
            .collect()
    }

    pub fn religion_cluster_sizes(&self) -> Vec<f64> {
        self.epochs
            .iter()
            .map(|e| e.metrics.religion_clusters.mean_size)
            .collect()
    }

    pub fn ethnicity_cluster_sizes(&self) -> Vec<f64> {
        self.epochs
            .iter()
            .map(|e| e.metrics.ethnicity_clusters.mean_size)
            .collect()
    }

    pub fn income_series(&self) -> Vec<f64> {
        self.epochs
            .iter()
            .map(|e| e.metrics.income_satisfaction)
            .collect()
    }

    pub fn total_relocations(&self) -> usize {
        self.epochs.iter().map(|e| e.report.relocated).sum()
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(&self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(&self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn summary(&self) -> String {
        let first_last = |series: Vec<usize>| match (series.first(), series.last()) {
            (Some(first), Some(last)) => format!("{} -> {}", first, last),
            _ => "n/a".to_string(),
        };
        let income = self.income_series();
        let income_trend = match (income.first(), income.last()) {
            (Some(first), Some(last)) => format!("{:.3} -> {:.3}", first, last),
            _ => "n/a".to_string(),
        };
        let stop = match self.termination {
            Termination::MaxIterations => "iteration limit".to_string(),
            Termination::SatisfactionReached { epoch } => {
                format!("satisfaction threshold at epoch {}", epoch)
            }
        };

        format!(
            "Simulated {} epochs in {}ms (stopped by {})\n\
             satisfaction {:.3}, {} relocations, {} agents, {:.1}% vacant\n\
             religion clusters {}, ethnicity clusters {}, income satisfaction {}",
            self.epochs.len(),
            self.elapsed_ms,
            stop,
            self.epochs
                .last()
                .map(|e| e.report.mean_satisfaction)
                .unwrap_or(0.0),
            self.total_relocations(),
            self.census_end.agents,
            self.census_end.vacancy() * 100.0,
            first_last(self.religion_cluster_counts()),
            first_last(self.ethnicity_cluster_counts()),
            income_trend,
        )
    }
}
