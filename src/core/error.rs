use thiserror::Error;

/// Reasons a [`CityConfig`](crate::core::config::CityConfig) is rejected
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("grid dimensions must be positive, got {width}x{height}")]
    EmptyGrid { width: usize, height: usize },

    #[error("neighbor radius must be at least 1")]
    ZeroRadius,

    #[error("{name}: minimum ({min}) exceeds maximum ({max})")]
    InvertedRange { name: &'static str, min: f64, max: f64 },

    #[error("{name} must be non-negative, got {value}")]
    Negative { name: &'static str, value: f64 },

    #[error("{name} must lie in (0, 1], got {value}")]
    RatioOutOfRange { name: &'static str, value: f64 },

    #[error("satisfaction_threshold must lie in [0, 1], got {0}")]
    ThresholdOutOfRange(f64),

    #[error("weights must be non-negative with a positive sum, got {0:?}")]
    InvalidWeights([f64; 3]),

    #[error("religion preference [{row}][{col}] = {value} is outside [0, 1]")]
    PreferenceOutOfRange { row: usize, col: usize, value: f64 },
}

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
