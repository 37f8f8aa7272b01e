//! Serializable grid view for the rendering collaborator

use serde::{Deserialize, Serialize};

use crate::city::home::Home;
use crate::core::types::Epoch;
use crate::entity::agent::Occupant;
use crate::spatial::grid::Grid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellKind {
    Empty,
    Landmark,
    Agent,
}

/// What a renderer needs to draw one home
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellView {
    pub price: f64,
    pub kind: CellKind,
    pub religion: Option<u8>,
    pub ethnicity: Option<bool>,
    pub income: Option<f64>,
}

impl From<&Home> for CellView {
    fn from(home: &Home) -> Self {
        match &home.occupant {
            None => CellView {
                price: home.price,
                kind: CellKind::Empty,
                religion: None,
                ethnicity: None,
                income: None,
            },
            Some(Occupant::Landmark(landmark)) => CellView {
                price: home.price,
                kind: CellKind::Landmark,
                religion: Some(landmark.religion.value()),
                ethnicity: None,
                income: None,
            },
            Some(Occupant::Agent(agent)) => CellView {
                price: home.price,
                kind: CellKind::Agent,
                religion: Some(agent.religion.value()),
                ethnicity: Some(agent.ethnicity),
                income: Some(agent.income),
            },
        }
    }
}

/// Row-major copy of the city at one epoch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSnapshot {
    pub epoch: Epoch,
    pub width: usize,
    pub height: usize,
    /// Pixels per cell requested by the config
    pub zoom: u32,
    pub cells: Vec<CellView>,
}

impl GridSnapshot {
    pub fn capture(grid: &Grid<Home>, epoch: Epoch, zoom: u32) -> Self {
        Self {
            epoch,
            width: grid.width,
            height: grid.height,
            zoom,
            cells: grid.cells().iter().map(CellView::from).collect(),
        }
    }

    pub fn cell(&self, x: usize, y: usize) -> Option<&CellView> {
        (x < self.width && y < self.height).then(|| &self.cells[x * self.height + y])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{AgentId, Religion};
    use crate::entity::agent::{Agent, Landmark};

    #[test]
    fn test_capture_exposes_every_cell() {
        let religion = Religion::new(4).unwrap();
        let mut grid = Grid::filled(2, 2, Home::empty(5.0));
        grid.set(0, 1, Home::with_agent(7.0, Agent::new(AgentId(3), religion, false, 42.0)));
        grid.set(1, 0, Home::with_landmark(9.0, Landmark::new(religion)));

        let snap = GridSnapshot::capture(&grid, 3, 10);

        assert_eq!(snap.cells.len(), 4);
        assert_eq!(snap.cell(0, 0).unwrap().kind, CellKind::Empty);
        let agent = snap.cell(0, 1).unwrap();
        assert_eq!(agent.kind, CellKind::Agent);
        assert_eq!(agent.income, Some(42.0));
        assert_eq!(agent.price, 7.0);
        let landmark = snap.cell(1, 0).unwrap();
        assert_eq!(landmark.religion, Some(4));
        assert_eq!(landmark.ethnicity, None);
        assert!(snap.cell(2, 0).is_none());
    }

    #[test]
    fn test_generated_city_survives_json_exactly() {
        use crate::city::generation::generate_city;
        use crate::core::config::CityConfig;
        use rand::SeedableRng;
        use rand_chacha::ChaCha8Rng;

        let config = CityConfig {
            width: 20,
            height: 15,
            ..CityConfig::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let city = generate_city(&config, &mut rng).unwrap();
        let snap = GridSnapshot::capture(&city, 0, config.zoom);

        let json = serde_json::to_string_pretty(&[&snap]).unwrap();
        let parsed: Vec<GridSnapshot> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.len(), 1);
        for (before, after) in snap.cells.iter().zip(&parsed[0].cells) {
            assert_eq!(before.income.map(f64::to_bits), after.income.map(f64::to_bits));
            assert_eq!(before.price.to_bits(), after.price.to_bits());
        }
    }

    #[test]
    fn test_kind_serializes_snake_case() {
        let json = serde_json::to_string(&CellKind::Landmark).unwrap();
        assert_eq!(json, "\"landmark\"");
    }
}
