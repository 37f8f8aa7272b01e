//! Core type definitions used throughout the codebase

use rand::distributions::{Distribution, Standard};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Unique identifier for agents, stable across relocations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AgentId(pub u32);

/// Simulation time unit (one satisfaction/relocation pass)
pub type Epoch = u32;

/// Religion category, values 1..=5
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Religion(u8);

impl Religion {
    /// Number of distinct religions
    pub const COUNT: usize = 5;

    pub fn new(value: u8) -> Option<Self> {
        (1..=Self::COUNT as u8).contains(&value).then_some(Self(value))
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// Zero-based index into preference tables
    #[inline]
    pub fn index(&self) -> usize {
        (self.0 - 1) as usize
    }
}

impl Distribution<Religion> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Religion {
        Religion(rng.gen_range(1..=Religion::COUNT as u8))
    }
}

impl TryFrom<u8> for Religion {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Religion::new(value).ok_or_else(|| format!("religion must be in 1..=5, got {}", value))
    }
}

impl From<Religion> for u8 {
    fn from(religion: Religion) -> u8 {
        religion.0
    }
}

/// Cell coordinate; `x` is the row (outer scan axis), `y` the column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub x: usize,
    pub y: usize,
}

impl Coord {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}
