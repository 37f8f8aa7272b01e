//! Read-only measurements over the city grid
//!
//! None of these mutate the grid; the simulation loop runs them before each
//! relocation pass.

pub mod census;
pub mod clusters;
pub mod income;

pub use census::{census, Census};
pub use clusters::{
    cluster_ethnicity, cluster_religion, ethnicity_key, label_clusters, religion_key,
    ClusterLabels, ClusterStats,
};
pub use income::{income_satisfaction, neighbor_income_score};
