//! Data structures for the doubles bracket: athletes, teams, matches, tournament document.

mod athlete;
mod config;
mod game;
mod team;
mod tournament;

pub use athlete::{Athlete, AthleteId};
pub use config::{StageSettings, TieBreak, TournamentConfig};
pub use game::{GameMatch, Group, MatchFormat, MatchId, SetScore, Stage};
pub use team::{Team, TeamId};
pub use tournament::{Tournament, TournamentError, TournamentId, TournamentPhase};
