//! Satisfaction and relocation - one epoch of the dynamics
//!
//! Homes are visited in row-major order and every move is applied to the
//! grid immediately, so cells later in the scan see the moves made earlier
//! in the same epoch. An agent moved to a later cell can be visited again.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::city::home::Home;
use crate::city::neighbors::Neighborhood;
use crate::core::config::CityConfig;
use crate::entity::agent::Agent;
use crate::entity::preference::SatisfactionModel;
use crate::spatial::grid::Grid;

/// Scores above this count as satisfied
pub const SATISFIED_ABOVE: f64 = 0.5;

/// How an unsatisfied agent picks its next home
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelocationPolicy {
    /// Any empty home, chosen uniformly
    FirstFit,
    /// The first empty home (row-major) where the agent would be satisfied
    LookAhead,
}

impl RelocationPolicy {
    pub fn from_config(config: &CityConfig) -> Self {
        if config.check_future_home {
            RelocationPolicy::LookAhead
        } else {
            RelocationPolicy::FirstFit
        }
    }
}

/// Outcome of one relocation pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EpochReport {
    /// Agent visits this epoch (a moved agent may be visited twice)
    pub agents_evaluated: usize,
    pub satisfied: usize,
    pub relocated: usize,
    /// Unsatisfied agents that found no prospect
    pub stayed: usize,
    /// Share of visits that were satisfied; 0.0 when nobody was evaluated
    pub mean_satisfaction: f64,
}

#[inline]
pub fn is_satisfied(score: f64) -> bool {
    score > SATISFIED_ABOVE
}

/// Run one epoch over the whole grid, mutating it in place
pub fn relocation_step<M, R>(
    grid: &mut Grid<Home>,
    config: &CityConfig,
    model: &M,
    rng: &mut R,
) -> EpochReport
where
    M: SatisfactionModel + ?Sized,
    R: Rng + ?Sized,
{
    let policy = RelocationPolicy::from_config(config);
    let neighborhood = Neighborhood::from_config(config);
    let mut report = EpochReport::default();

    for idx in 0..grid.len() {
        let Some(agent) = grid.at(idx).agent().cloned() else {
            continue;
        };
        let here = grid.coord(idx);

        let score = {
            let around = neighborhood.around(grid, here.x, here.y, agent.id);
            model.satisfaction(&agent, &around)
        };

        report.agents_evaluated += 1;
        if is_satisfied(score) {
            report.satisfied += 1;
            continue;
        }

        let prospects = find_prospects(grid, &agent, policy, neighborhood, model);
        let Some(&target) = prospects.choose(rng) else {
            report.stayed += 1;
            continue;
        };

        if move_agent(grid, idx, target) {
            report.relocated += 1;
            tracing::trace!(
                "agent {} moved ({}, {}) -> ({}, {})",
                agent.id.0,
                here.x,
                here.y,
                grid.coord(target).x,
                grid.coord(target).y
            );
        } else {
            report.stayed += 1;
        }
    }

    if report.agents_evaluated > 0 {
        report.mean_satisfaction = report.satisfied as f64 / report.agents_evaluated as f64;
    }
    report
}

/// Candidate homes (flat indices) for an unsatisfied agent
pub fn find_prospects<M>(
    grid: &Grid<Home>,
    agent: &Agent,
    policy: RelocationPolicy,
    neighborhood: Neighborhood,
    model: &M,
) -> Vec<usize>
where
    M: SatisfactionModel + ?Sized,
{
    let empties = grid
        .cells()
        .iter()
        .enumerate()
        .filter(|(_, home)| home.is_empty())
        .map(|(idx, _)| idx);

    match policy {
        RelocationPolicy::FirstFit => empties.collect(),
        RelocationPolicy::LookAhead => empties
            .filter(|&idx| {
                let at = grid.coord(idx);
                let around = neighborhood.around(grid, at.x, at.y, agent.id);
                is_satisfied(model.satisfaction(agent, &around))
            })
            .take(1)
            .collect(),
    }
}

/// Move the agent at `from` into the empty home at `to`
///
/// Returns false, leaving the grid untouched, if `from` holds no agent or
/// `to` is not empty.
pub fn move_agent(grid: &mut Grid<Home>, from: usize, to: usize) -> bool {
    if from == to || !grid.at(to).is_empty() {
        return false;
    }
    let Some(agent) = grid.at_mut(from).take_agent() else {
        return false;
    };
    match grid.at_mut(to).house(agent) {
        Ok(()) => true,
        Err(agent) => {
            grid.at_mut(from).occupant = Some(agent.into());
            false
        }
    }
}
