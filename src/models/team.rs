//! Doubles team: a fixed pair of athletes.

use crate::models::athlete::{Athlete, AthleteId};
use crate::models::game::Group;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a team.
pub type TeamId = Uuid;

/// Two athletes competing together as one unit.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    /// Display name; defaults to "<first> & <second>" but can be edited.
    pub name: String,
    pub athlete_ids: [AthleteId; 2],
    /// None until the team is drawn into a group.
    pub group: Option<Group>,
}

impl Team {
    /// Pair two distinct athletes. Returns None if both are the same athlete.
    pub fn pair(first: &Athlete, second: &Athlete, group: Option<Group>) -> Option<Self> {
        if first.id == second.id {
            return None;
        }
        Some(Self {
            id: Uuid::new_v4(),
            name: format!("{} & {}", first.name, second.name),
            athlete_ids: [first.id, second.id],
            group,
        })
    }

    pub fn has_athlete(&self, id: AthleteId) -> bool {
        self.athlete_ids.contains(&id)
    }
}
