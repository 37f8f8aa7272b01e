//! Home - one cell of the city grid

use serde::{Deserialize, Serialize};

use crate::entity::agent::{Agent, Landmark, Occupant};

/// A priced plot that is empty, holds a landmark, or houses one agent
///
/// The three states are exclusive by construction: emptiness is the absence
/// of an occupant and a landmark is a kind of occupant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Home {
    pub price: f64,
    pub occupant: Option<Occupant>,
}

impl Home {
    pub fn empty(price: f64) -> Self {
        Self {
            price,
            occupant: None,
        }
    }

    pub fn with_agent(price: f64, agent: Agent) -> Self {
        Self {
            price,
            occupant: Some(Occupant::Agent(agent)),
        }
    }

    pub fn with_landmark(price: f64, landmark: Landmark) -> Self {
        Self {
            price,
            occupant: Some(Occupant::Landmark(landmark)),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.occupant.is_none()
    }

    #[inline]
    pub fn is_landmark(&self) -> bool {
        matches!(self.occupant, Some(Occupant::Landmark(_)))
    }

    #[inline]
    pub fn agent(&self) -> Option<&Agent> {
        self.occupant.as_ref().and_then(Occupant::as_agent)
    }

    /// Remove and return the resident agent, leaving the home empty
    ///
    /// Landmarks are never taken.
    pub fn take_agent(&mut self) -> Option<Agent> {
        match self.occupant.take() {
            Some(Occupant::Agent(agent)) => Some(agent),
            other => {
                self.occupant = other;
                None
            }
        }
    }

    /// Move an agent in. Returns the agent back if the home is not empty.
    pub fn house(&mut self, agent: Agent) -> Result<(), Agent> {
        if self.is_empty() {
            self.occupant = Some(Occupant::Agent(agent));
            Ok(())
        } else {
            Err(agent)
        }
    }
}
