//! Head count of agents, landmarks and empty homes

use serde::{Deserialize, Serialize};

use crate::city::home::Home;
use crate::spatial::grid::Grid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Census {
    pub agents: usize,
    pub landmarks: usize,
    pub empty: usize,
}

impl Census {
    pub fn total(&self) -> usize {
        self.agents + self.landmarks + self.empty
    }

    /// Fraction of homes that are vacant
    pub fn vacancy(&self) -> f64 {
        if self.total() == 0 {
            0.0
        } else {
            self.empty as f64 / self.total() as f64
        }
    }
}

pub fn census(grid: &Grid<Home>) -> Census {
    grid.cells().iter().fold(Census::default(), |mut count, home| {
        if home.is_empty() {
            count.empty += 1;
        } else if home.is_landmark() {
            count.landmarks += 1;
        } else {
            count.agents += 1;
        }
        count
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{AgentId, Religion};
    use crate::entity::agent::{Agent, Landmark};

    #[test]
    fn test_counts_every_home_once() {
        let religion = Religion::new(1).unwrap();
        let mut grid = Grid::filled(2, 3, Home::empty(0.0));
        grid.set(0, 0, Home::with_agent(0.0, Agent::new(AgentId(0), religion, true, 1.0)));
        grid.set(0, 1, Home::with_agent(0.0, Agent::new(AgentId(1), religion, false, 1.0)));
        grid.set(1, 2, Home::with_landmark(0.0, Landmark::new(religion)));

        let count = census(&grid);
        assert_eq!(
            count,
            Census {
                agents: 2,
                landmarks: 1,
                empty: 3
            }
        );
        assert_eq!(count.total(), grid.len());
        assert_eq!(count.vacancy(), 0.5);
    }
}
