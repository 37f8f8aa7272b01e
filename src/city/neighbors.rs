//! Neighborhood queries over the city grid

use crate::city::home::Home;
use crate::core::config::CityConfig;
use crate::core::types::AgentId;
use crate::entity::agent::Occupant;
use crate::spatial::grid::Grid;

/// Occupants within Chebyshev distance `radius` of `(x, y)`, row-major
///
/// The box is clipped at the grid edge. Landmarks are included; the agent
/// `exclude` is not, wherever it currently lives.
pub fn neighbors(
    grid: &Grid<Home>,
    radius: usize,
    x: usize,
    y: usize,
    exclude: AgentId,
) -> Vec<&Occupant> {
    let mut found = Vec::new();
    collect_box(grid, radius, x, y, exclude, &mut found);
    found
}

/// Like [`neighbors`], but each occupant is listed once per ring
/// `r = 1..=radius` whose box contains it
///
/// An occupant at distance `d` therefore appears `radius - d + 1` times,
/// which weights close neighbors more heavily in any per-neighbor average.
pub fn neighbors_weighted(
    grid: &Grid<Home>,
    radius: usize,
    x: usize,
    y: usize,
    exclude: AgentId,
) -> Vec<&Occupant> {
    let mut found = Vec::new();
    for r in 1..=radius {
        collect_box(grid, r, x, y, exclude, &mut found);
    }
    found
}

/// Which neighbor list satisfaction is scored against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighborhood {
    pub radius: usize,
    pub weighted: bool,
}

impl Neighborhood {
    pub fn plain(radius: usize) -> Self {
        Self {
            radius,
            weighted: false,
        }
    }

    pub fn from_config(config: &CityConfig) -> Self {
        Self {
            radius: config.radius,
            weighted: config.weighted_neighbors,
        }
    }

    pub fn around<'a>(
        &self,
        grid: &'a Grid<Home>,
        x: usize,
        y: usize,
        exclude: AgentId,
    ) -> Vec<&'a Occupant> {
        if self.weighted {
            neighbors_weighted(grid, self.radius, x, y, exclude)
        } else {
            neighbors(grid, self.radius, x, y, exclude)
        }
    }
}

fn collect_box<'a>(
    grid: &'a Grid<Home>,
    radius: usize,
    x: usize,
    y: usize,
    exclude: AgentId,
    out: &mut Vec<&'a Occupant>,
) {
    if !grid.in_bounds(x, y) {
        return;
    }
    for coord in grid.box_coords(x, y, radius) {
        let home = grid.at(grid.index(coord.x, coord.y));
        if let Some(occupant) = &home.occupant {
            if !occupant.is_agent(exclude) {
                out.push(occupant);
            }
        }
    }
}
