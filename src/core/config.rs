//! City configuration with documented defaults
//!
//! Every tunable of the generator, the relocation step and the run loop is
//! collected here. The struct is immutable once a simulation starts and is
//! passed explicitly into the generator and the loop.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{ConfigError, Result};
use crate::core::types::Religion;

/// Configuration for a segregation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CityConfig {
    // === GRID ===
    /// Number of rows (x axis, outer scan order)
    pub width: usize,

    /// Number of columns (y axis, inner scan order)
    pub height: usize,

    /// Chebyshev radius of the neighborhood used for satisfaction
    ///
    /// A radius of 1 is the 8-cell Moore neighborhood; 2 is the 24-cell box.
    pub radius: usize,

    /// Score agents against the ring-weighted neighbor list, where a neighbor
    /// at distance `d` counts `radius - d + 1` times
    pub weighted_neighbors: bool,

    // === PRICES ===
    /// Lower bound for padding prices that seed the recurrence
    pub min_price: f64,

    /// Upper bound for every generated price
    pub max_price: f64,

    /// Noise amplitude as a fraction of `max_price`
    ///
    /// At 0.1 each interior price is the smoothed neighbor mean plus up to
    /// ±10% of the price ceiling.
    pub price_noise: f64,

    /// Weight of the pull toward 0 or `max_price`
    ///
    /// 0.0 leaves prices untouched; larger values push the distribution into
    /// two modes (cheap and expensive districts).
    pub price_segregation: f64,

    // === OCCUPANCY ===
    /// Probability that a cell starts empty
    pub empty_ratio: f64,

    /// Probability that a cell holds a landmark (wins over empty)
    pub landmark_ratio: f64,

    // === AGENTS ===
    pub min_income: f64,
    pub max_income: f64,

    /// Income gap under which two agents consider each other peers
    pub income_threshold: f64,

    /// Weights for the religion, ethnicity and income scores (in that order)
    pub weights: [f64; 3],

    /// Religion affinity matrix, row = agent religion, column = neighbor
    ///
    /// `None` uses [`crate::entity::ReligionPreferences::default`].
    pub religion_preferences: Option<[[f64; Religion::COUNT]; Religion::COUNT]>,

    // === DYNAMICS ===
    /// Relocation search policy
    ///
    /// false: pick uniformly among all empty cells.
    /// true: move to the first empty cell (row-major) where the agent would
    /// be satisfied.
    pub check_future_home: bool,

    /// Hard cap on the number of epochs
    pub max_iterations: u32,

    /// Stop once average satisfaction exceeds this value
    pub satisfaction_threshold: f64,

    /// Render scale for the image collaborator (pixels per cell)
    pub zoom: u32,

    /// Seed for the deterministic random source
    pub seed: u64,

    // === PARALLELIZATION ===
    /// Minimum cell count before read-only metric passes use rayon
    ///
    /// Below this the thread overhead exceeds the work per row.
    pub parallel_threshold: usize,
}

impl Default for CityConfig {
    fn default() -> Self {
        Self {
            width: 40,
            height: 40,
            radius: 1,
            weighted_neighbors: false,

            min_price: 0.0,
            max_price: 100_000.0,
            price_noise: 0.1,
            price_segregation: 0.3,

            // 1 in 10 houses empty, 1 in 100 a landmark
            empty_ratio: 0.1,
            landmark_ratio: 0.01,

            min_income: 10_000.0,
            max_income: 100_000.0,
            income_threshold: 30_000.0,
            weights: [1.0, 1.0, 1.0],
            religion_preferences: None,

            check_future_home: false,
            max_iterations: 50,
            satisfaction_threshold: 0.95,
            zoom: 10,
            seed: 12345,

            parallel_threshold: 4096,
        }
    }
}

impl CityConfig {
    /// Parse a (possibly partial) TOML document; missing keys keep defaults
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: CityConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Total number of interior cells
    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyGrid {
                width: self.width,
                height: self.height,
            });
        }
        if self.radius == 0 {
            return Err(ConfigError::ZeroRadius);
        }

        check_non_negative("min_price", self.min_price)?;
        check_range("price", self.min_price, self.max_price)?;
        check_non_negative("price_noise", self.price_noise)?;
        check_non_negative("price_segregation", self.price_segregation)?;

        check_ratio("empty_ratio", self.empty_ratio)?;
        check_ratio("landmark_ratio", self.landmark_ratio)?;

        check_non_negative("min_income", self.min_income)?;
        check_range("income", self.min_income, self.max_income)?;
        check_non_negative("income_threshold", self.income_threshold)?;

        let weight_sum: f64 = self.weights.iter().sum();
        if self.weights.iter().any(|w| !(*w >= 0.0)) || weight_sum <= 0.0 {
            return Err(ConfigError::InvalidWeights(self.weights));
        }

        if !(0.0..=1.0).contains(&self.satisfaction_threshold) {
            return Err(ConfigError::ThresholdOutOfRange(self.satisfaction_threshold));
        }

        if let Some(matrix) = &self.religion_preferences {
            for (row, values) in matrix.iter().enumerate() {
                for (col, &value) in values.iter().enumerate() {
                    if !(0.0..=1.0).contains(&value) {
                        return Err(ConfigError::PreferenceOutOfRange { row, col, value });
                    }
                }
            }
        }

        Ok(())
    }
}

fn check_non_negative(name: &'static str, value: f64) -> std::result::Result<(), ConfigError> {
    // NaN fails this comparison too
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { name, value })
    }
}

fn check_range(name: &'static str, min: f64, max: f64) -> std::result::Result<(), ConfigError> {
    if min <= max {
        Ok(())
    } else {
        Err(ConfigError::InvertedRange { name, min, max })
    }
}

fn check_ratio(name: &'static str, value: f64) -> std::result::Result<(), ConfigError> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(ConfigError::RatioOutOfRange { name, value })
    }
}
