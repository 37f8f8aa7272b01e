//! Neighbor income satisfaction
//!
//! How close, on average, each agent's income is to that of the agents living
//! directly beside it (4-neighborhood). Landmarks and empty homes are ignored
//! as neighbors. An agent with no agent beside it scores 0.

use rayon::prelude::*;

use crate::city::home::Home;
use crate::spatial::grid::Grid;

/// `min / max` of two incomes; two zero incomes count as equal
#[inline]
pub fn income_ratio(a: f64, b: f64) -> f64 {
    let high = a.max(b);
    if high <= 0.0 {
        1.0
    } else {
        a.min(b) / high
    }
}

/// Score for the agent at `(x, y)`, `None` if no agent lives there
pub fn neighbor_income_score(grid: &Grid<Home>, x: usize, y: usize) -> Option<f64> {
    let agent = grid.get(x, y)?.agent()?;

    let mut total = 0.0;
    let mut count = 0usize;
    for at in grid.orthogonal(x, y) {
        if let Some(neighbor) = grid.at(grid.index(at.x, at.y)).agent() {
            total += income_ratio(agent.income, neighbor.income);
            count += 1;
        }
    }

    Some(if count == 0 { 0.0 } else { total / count as f64 })
}

/// (sum of scores, agents) for one row
fn row_scores(grid: &Grid<Home>, x: usize) -> (f64, usize) {
    (0..grid.height)
        .filter_map(|y| neighbor_income_score(grid, x, y))
        .fold((0.0, 0), |(sum, n), score| (sum + score, n + 1))
}

/// Mean neighbor income score over all agents; 0.0 for a city without agents
///
/// Rows are scored in parallel once the grid has `parallel_threshold` cells.
/// Row results are combined in row order either way, so both paths return
/// the same value.
pub fn income_satisfaction(grid: &Grid<Home>, parallel_threshold: usize) -> f64 {
    let rows: Vec<(f64, usize)> = if grid.len() >= parallel_threshold {
        (0..grid.width)
            .into_par_iter()
            .map(|x| row_scores(grid, x))
            .collect()
    } else {
        (0..grid.width).map(|x| row_scores(grid, x)).collect()
    };

    let (sum, agents) = rows
        .iter()
        .fold((0.0, 0usize), |(sum, n), &(row_sum, row_n)| (sum + row_sum, n + row_n));

    if agents == 0 {
        0.0
    } else {
        sum / agents as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{AgentId, Religion};
    use crate::entity::agent::{Agent, Landmark};
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn agent_home(id: u32, income: f64) -> Home {
        Home::with_agent(0.0, Agent::new(AgentId(id), Religion::new(1).unwrap(), true, income))
    }

    #[test]
    fn test_pair_of_agents() {
        let mut grid = Grid::filled(3, 3, Home::empty(0.0));
        grid.set(1, 1, agent_home(0, 50_000.0));
        grid.set(1, 2, agent_home(1, 100_000.0));
        assert_eq!(neighbor_income_score(&grid, 1, 1), Some(0.5));
        assert_eq!(neighbor_income_score(&grid, 1, 2), Some(0.5));
        assert_eq!(income_satisfaction(&grid, usize::MAX), 0.5);
    }

    #[test]
    fn test_diagonal_neighbors_ignored() {
        let mut grid = Grid::filled(3, 3, Home::empty(0.0));
        grid.set(0, 0, agent_home(0, 50_000.0));
        grid.set(1, 1, agent_home(1, 50_000.0));
        // Neither has an orthogonal neighbor, so both score 0
        assert_eq!(income_satisfaction(&grid, usize::MAX), 0.0);
    }

    #[test]
    fn test_landmarks_ignored() {
        let mut grid = Grid::filled(1, 3, Home::empty(0.0));
        grid.set(0, 0, agent_home(0, 40_000.0));
        grid.set(0, 1, Home::with_landmark(0.0, Landmark::new(Religion::new(2).unwrap())));
        grid.set(0, 2, agent_home(1, 40_000.0));
        assert_eq!(income_satisfaction(&grid, usize::MAX), 0.0);
    }

    #[test]
    fn test_isolated_agent_pulls_mean_down() {
        let mut grid = Grid::filled(1, 4, Home::empty(0.0));
        grid.set(0, 0, agent_home(0, 60_000.0));
        grid.set(0, 1, agent_home(1, 60_000.0));
        grid.set(0, 3, agent_home(2, 60_000.0));
        // Scores 1, 1, 0
        assert!((income_satisfaction(&grid, usize::MAX) - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_no_agents_sentinel() {
        let grid = Grid::filled(2, 2, Home::empty(0.0));
        assert_eq!(income_satisfaction(&grid, usize::MAX), 0.0);
    }

    #[test]
    fn test_zero_incomes_are_equal() {
        assert_eq!(income_ratio(0.0, 0.0), 1.0);
        assert_eq!(income_ratio(25.0, 100.0), 0.25);
    }

    #[test]
    fn test_parallel_matches_serial() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let homes: Vec<Home> = (0..30 * 30)
            .map(|i| {
                if rng.gen_bool(0.2) {
                    Home::empty(0.0)
                } else {
                    agent_home(i, rng.gen_range(10_000.0..100_000.0))
                }
            })
            .collect();
        let grid = Grid::from_vec(30, 30, homes).unwrap();
        assert_eq!(income_satisfaction(&grid, 0), income_satisfaction(&grid, usize::MAX));
    }
}
