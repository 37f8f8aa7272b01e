//! City layer - homes, generation, neighborhoods and relocation

pub mod generation;
pub mod home;
pub mod neighbors;
pub mod relocation;

pub use generation::generate_city;
pub use home::Home;
pub use neighbors::{neighbors, neighbors_weighted, Neighborhood};
pub use relocation::{relocation_step, EpochReport, RelocationPolicy};

/// The city grid
pub type City = crate::spatial::grid::Grid<Home>;
