//! Simulation loop, recorded output and grid snapshots

pub mod output;
pub mod runner;
pub mod snapshot;

pub use output::SimulationOutput;
pub use runner::{simulate, EpochMetrics, EpochRecord, Simulation, Termination};
pub use snapshot::{CellKind, CellView, GridSnapshot};
