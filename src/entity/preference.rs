//! Satisfaction scoring
//!
//! The relocation step only needs "how happy is this agent with these
//! neighbors", expressed by [`SatisfactionModel`]. [`PreferenceModel`] is the
//! stock implementation: a weighted blend of religion affinity, ethnic
//! similarity and income proximity.

use serde::{Deserialize, Serialize};

use crate::core::config::CityConfig;
use crate::core::types::Religion;
use crate::entity::agent::{Agent, Occupant};

/// Scores an agent against a neighbor list. Results must lie in `[0, 1]`.
pub trait SatisfactionModel {
    fn satisfaction(&self, agent: &Agent, neighbors: &[&Occupant]) -> f64;
}

impl<F> SatisfactionModel for F
where
    F: Fn(&Agent, &[&Occupant]) -> f64,
{
    fn satisfaction(&self, agent: &Agent, neighbors: &[&Occupant]) -> f64 {
        self(agent, neighbors)
    }
}

/// Religion affinity matrix, row = own religion, column = neighbor religion
///
/// Need not be symmetric: a minority may tolerate the majority more than the
/// reverse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReligionPreferences([[f64; Religion::COUNT]; Religion::COUNT]);

impl ReligionPreferences {
    pub fn new(matrix: [[f64; Religion::COUNT]; Religion::COUNT]) -> Self {
        Self(matrix)
    }

    #[inline]
    pub fn affinity(&self, own: Religion, other: Religion) -> f64 {
        self.0[own.index()][other.index()]
    }
}

impl Default for ReligionPreferences {
    /// Full affinity for the same faith, half for neighboring faiths, little otherwise
    fn default() -> Self {
        let mut matrix = [[0.1; Religion::COUNT]; Religion::COUNT];
        for (i, row) in matrix.iter_mut().enumerate() {
            for (j, value) in row.iter_mut().enumerate() {
                *value = match i.abs_diff(j) {
                    0 => 1.0,
                    1 => 0.5,
                    _ => 0.1,
                };
            }
        }
        Self(matrix)
    }
}

/// Weighted religion / ethnicity / income scorer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreferenceModel {
    pub religion_preferences: ReligionPreferences,
    /// Religion, ethnicity, income
    pub weights: [f64; 3],
    /// Largest income gap still counted as a peer
    pub income_threshold: f64,
}

impl Default for PreferenceModel {
    fn default() -> Self {
        Self::from_config(&CityConfig::default())
    }
}

impl PreferenceModel {
    pub fn from_config(config: &CityConfig) -> Self {
        Self {
            religion_preferences: config
                .religion_preferences
                .map(ReligionPreferences::new)
                .unwrap_or_default(),
            weights: config.weights,
            income_threshold: config.income_threshold,
        }
    }
}

impl SatisfactionModel for PreferenceModel {
    fn satisfaction(&self, agent: &Agent, neighbors: &[&Occupant]) -> f64 {
        let mut religion_sum = 0.0;
        let mut religion_n = 0usize;
        let mut same_ethnicity = 0usize;
        let mut income_peers = 0usize;
        let mut agent_n = 0usize;

        for neighbor in neighbors {
            religion_sum += self
                .religion_preferences
                .affinity(agent.religion, neighbor.religion());
            religion_n += 1;

            // Landmarks only carry a religion
            if let Some(other) = neighbor.as_agent() {
                agent_n += 1;
                if other.ethnicity == agent.ethnicity {
                    same_ethnicity += 1;
                }
                if (other.income - agent.income).abs() <= self.income_threshold {
                    income_peers += 1;
                }
            }
        }

        let scores = [
            (religion_n > 0).then(|| religion_sum / religion_n as f64),
            (agent_n > 0).then(|| same_ethnicity as f64 / agent_n as f64),
            (agent_n > 0).then(|| income_peers as f64 / agent_n as f64),
        ];

        let mut weighted = 0.0;
        let mut total_weight = 0.0;
        for (score, weight) in scores.iter().zip(self.weights) {
            if let Some(score) = score {
                weighted += score * weight;
                total_weight += weight;
            }
        }

        if total_weight > 0.0 {
            (weighted / total_weight).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}
