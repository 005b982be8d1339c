//! Athlete data structure.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an athlete (used in teams and lookups).
pub type AthleteId = Uuid;

/// An athlete entered in the tournament.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Athlete {
    pub id: AthleteId,
    pub name: String,
}

impl Athlete {
    /// Create a new athlete with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}
