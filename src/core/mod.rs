pub mod config;
pub mod error;
pub mod types;

pub use config::CityConfig;
pub use error::{ConfigError, Result, SimError};
pub use types::{AgentId, Coord, Epoch, Religion};
