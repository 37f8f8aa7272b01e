//! Cluster labeling (Hoshen-Kopelman)
//!
//! One row-major scan assigns every eligible home to a cluster by looking at
//! its left `(x, y-1)` and top `(x-1, y)` neighbors. When both match but were
//! labeled apart, the two clusters merge and the older one survives. Labels
//! live in an index-addressed union-find, so membership is O(α(n)) instead of
//! a search through coordinate lists.
//!
//! What makes a home eligible, and what "same" means, comes from a key
//! extractor: religion counts landmarks, ethnicity does not.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::city::home::Home;
use crate::core::types::Religion;
use crate::entity::agent::Occupant;
use crate::spatial::grid::Grid;

/// Summary of one labeling pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ClusterStats {
    pub count: usize,
    /// Eligible homes per cluster; 0.0 when there are no clusters
    pub mean_size: f64,
}

/// Disjoint sets over dense ids, created in increasing order
#[derive(Debug, Default)]
struct UnionFind {
    parent: Vec<usize>,
}

impl UnionFind {
    fn make_set(&mut self) -> usize {
        let id = self.parent.len();
        self.parent.push(id);
        id
    }

    fn find(&mut self, mut id: usize) -> usize {
        let mut root = id;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        // Path compression
        while self.parent[id] != root {
            let next = self.parent[id];
            self.parent[id] = root;
            id = next;
        }
        root
    }

    /// Merge two sets; the older (smaller) root survives
    fn union(&mut self, a: usize, b: usize) -> usize {
        let ra = self.find(a);
        let rb = self.find(b);
        let (keep, drop) = if ra <= rb { (ra, rb) } else { (rb, ra) };
        self.parent[drop] = keep;
        keep
    }
}

/// Per-home cluster labels produced by [`label_clusters`]
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterLabels {
    /// Compact label per home (row-major), numbered by first appearance
    labels: Grid<Option<usize>>,
    sizes: Vec<usize>,
}

impl ClusterLabels {
    pub fn count(&self) -> usize {
        self.sizes.len()
    }

    /// Number of labeled homes in each cluster, indexed by label
    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    pub fn label(&self, x: usize, y: usize) -> Option<usize> {
        self.labels.get(x, y).copied().flatten()
    }

    /// Number of homes that received a label
    pub fn labeled_homes(&self) -> usize {
        self.sizes.iter().sum()
    }

    pub fn mean_size(&self) -> f64 {
        if self.sizes.is_empty() {
            0.0
        } else {
            self.labeled_homes() as f64 / self.sizes.len() as f64
        }
    }

    pub fn stats(&self) -> ClusterStats {
        ClusterStats {
            count: self.count(),
            mean_size: self.mean_size(),
        }
    }
}

/// Label 4-connected regions of homes whose occupants share a key
///
/// Homes whose occupant yields `None` (and empty homes) are not labeled and
/// break connectivity.
pub fn label_clusters<K, F>(grid: &Grid<Home>, key: F) -> ClusterLabels
where
    K: PartialEq + Copy,
    F: Fn(&Occupant) -> Option<K>,
{
    let keys: Vec<Option<K>> = grid
        .cells()
        .iter()
        .map(|home| home.occupant.as_ref().and_then(&key))
        .collect();

    let mut sets = UnionFind::default();
    let mut set_of: Vec<Option<usize>> = vec![None; grid.len()];

    for idx in 0..grid.len() {
        let Some(k) = keys[idx] else {
            continue;
        };
        let at = grid.coord(idx);

        let matching = |neighbor: Option<usize>| {
            neighbor.filter(|&n| keys[n] == Some(k)).and_then(|n| set_of[n])
        };
        let left = matching((at.y > 0).then(|| idx - 1));
        let top = matching((at.x > 0).then(|| idx - grid.height));

        set_of[idx] = Some(match (left, top) {
            (Some(l), Some(t)) => {
                let left_root = sets.find(l);
                let top_root = sets.find(t);
                if left_root == top_root {
                    left_root
                } else {
                    sets.union(left_root, top_root)
                }
            }
            (Some(l), None) => l,
            (None, Some(t)) => t,
            (None, None) => sets.make_set(),
        });
    }

    // Compact surviving roots into 0-based labels in order of first appearance
    let mut compact: AHashMap<usize, usize> = AHashMap::new();
    let mut sizes: Vec<usize> = Vec::new();
    let mut labels = Grid::filled(grid.width, grid.height, None);

    for (idx, set) in set_of.iter().enumerate() {
        let Some(set) = *set else {
            continue;
        };
        let root = sets.find(set);
        let next = compact.len();
        let label = *compact.entry(root).or_insert(next);
        if label == sizes.len() {
            sizes.push(0);
        }
        sizes[label] += 1;
        *labels.at_mut(idx) = Some(label);
    }

    ClusterLabels { labels, sizes }
}

/// Religion key: agents and landmarks both carry one
pub fn religion_key(occupant: &Occupant) -> Option<Religion> {
    Some(occupant.religion())
}

/// Ethnicity key: agents only
pub fn ethnicity_key(occupant: &Occupant) -> Option<bool> {
    occupant.as_agent().map(|agent| agent.ethnicity)
}

pub fn cluster_religion(grid: &Grid<Home>) -> ClusterStats {
    label_clusters(grid, religion_key).stats()
}

pub fn cluster_ethnicity(grid: &Grid<Home>) -> ClusterStats {
    label_clusters(grid, ethnicity_key).stats()
}
