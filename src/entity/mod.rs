pub mod agent;
pub mod preference;

pub use agent::{Agent, Landmark, Occupant};
pub use preference::{PreferenceModel, ReligionPreferences, SatisfactionModel};
