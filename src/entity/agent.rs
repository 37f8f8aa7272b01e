//! Residents and landmarks - the things that can occupy a home

use serde::{Deserialize, Serialize};

use crate::core::types::{AgentId, Religion};

/// A resident. Attributes are fixed at creation; only the home changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub id: AgentId,
    pub religion: Religion,
    /// Binary ethnicity marker
    pub ethnicity: bool,
    pub income: f64,
}

impl Agent {
    pub fn new(id: AgentId, religion: Religion, ethnicity: bool, income: f64) -> Self {
        Self {
            id,
            religion,
            ethnicity,
            income,
        }
    }
}

/// A fixed religious site. Never relocates and is never scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Landmark {
    pub religion: Religion,
}

impl Landmark {
    pub fn new(religion: Religion) -> Self {
        Self { religion }
    }
}

/// Whatever lives in a non-empty home
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Occupant {
    Agent(Agent),
    Landmark(Landmark),
}

impl Occupant {
    pub fn religion(&self) -> Religion {
        match self {
            Occupant::Agent(agent) => agent.religion,
            Occupant::Landmark(landmark) => landmark.religion,
        }
    }

    pub fn as_agent(&self) -> Option<&Agent> {
        match self {
            Occupant::Agent(agent) => Some(agent),
            Occupant::Landmark(_) => None,
        }
    }

    pub fn is_landmark(&self) -> bool {
        matches!(self, Occupant::Landmark(_))
    }

    /// True for the agent with this id; landmarks never match
    pub fn is_agent(&self, id: AgentId) -> bool {
        matches!(self, Occupant::Agent(agent) if agent.id == id)
    }
}

impl From<Agent> for Occupant {
    fn from(agent: Agent) -> Self {
        Occupant::Agent(agent)
    }
}

impl From<Landmark> for Occupant {
    fn from(landmark: Landmark) -> Self {
        Occupant::Landmark(landmark)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn religion(v: u8) -> Religion {
        Religion::new(v).unwrap()
    }

    #[test]
    fn test_occupant_identity() {
        let agent: Occupant = Agent::new(AgentId(7), religion(2), true, 40_000.0).into();
        assert!(agent.is_agent(AgentId(7)));
        assert!(!agent.is_agent(AgentId(8)));
        assert_eq!(agent.religion(), religion(2));

        let landmark: Occupant = Landmark::new(religion(4)).into();
        assert!(landmark.is_landmark());
        assert!(landmark.as_agent().is_none());
        assert!(!landmark.is_agent(AgentId(7)));
    }
}
