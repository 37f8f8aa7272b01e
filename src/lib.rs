//! Schelling City - residential segregation simulation
//!
//! Agents with a religion, an ethnicity and an income live on a priced grid.
//! Each epoch unsatisfied agents move to empty homes, and the city is
//! measured for religious and ethnic clustering and neighbor income parity.

pub mod city;
pub mod core;
pub mod entity;
pub mod metrics;
pub mod simulation;
pub mod spatial;
