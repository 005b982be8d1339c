//! Tournament document, phase and errors.

use crate::models::athlete::{Athlete, AthleteId};
use crate::models::config::TournamentConfig;
use crate::models::game::{GameMatch, Group, MatchId, Stage};
use crate::models::team::{Team, TeamId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// A round-robin stage needs at least 2 teams.
    InsufficientTeams { stage: Stage, found: usize },
    /// Drawn score, drawn game, or a best-of result that does not decide the match.
    InvalidMatchResult(String),
    /// An advancement was attempted before its prerequisite matches were completed.
    IncompleteDependency { stage: Stage, pending: usize },
    /// Tournament is not in a state that allows this action.
    InvalidState,
    /// Not enough athletes to form two groups of two teams.
    NotEnoughAthletes { required: usize, found: usize },
    /// Athletes are paired, so the count must be even.
    OddAthleteCount(usize),
    /// An athlete with this name already exists (names are unique, case-insensitive).
    DuplicateAthleteName,
    AthleteNotFound(AthleteId),
    TeamNotFound(TeamId),
    MatchNotFound(MatchId),
    InvalidConfig(String),
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::InsufficientTeams { stage, found } => {
                write!(f, "{} needs at least 2 teams (found {})", stage, found)
            }
            TournamentError::InvalidMatchResult(reason) => write!(f, "Invalid match result: {}", reason),
            TournamentError::IncompleteDependency { stage, pending } => write!(
                f,
                "Finish the pending matches before {} ({} not completed)",
                stage, pending
            ),
            TournamentError::InvalidState => write!(f, "Invalid state for this action"),
            TournamentError::NotEnoughAthletes { required, found } => {
                write!(f, "Need at least {} athletes to form teams (found {})", required, found)
            }
            TournamentError::OddAthleteCount(n) => {
                write!(f, "Athletes are paired into teams, {} is an odd count", n)
            }
            TournamentError::DuplicateAthleteName => write!(f, "An athlete with this name already exists"),
            TournamentError::AthleteNotFound(_) => write!(f, "Athlete not found"),
            TournamentError::TeamNotFound(_) => write!(f, "Team not found"),
            TournamentError::MatchNotFound(_) => write!(f, "Match not found"),
            TournamentError::InvalidConfig(reason) => write!(f, "Invalid configuration: {}", reason),
        }
    }
}

impl std::error::Error for TournamentError {}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Current phase of the tournament, derived from its teams and matches.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentPhase {
    /// Editing athletes, drawing teams; no schedule yet.
    Setup,
    /// Group matches exist; no knockout match yet.
    GroupStage,
    /// Semifinals (and possibly final / third place) generated.
    Knockout,
    /// Final has a result.
    Completed,
}

/// Full tournament document: athletes, teams, matches and scoring rules.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub athletes: Vec<Athlete>,
    /// Empty until athletes are paired.
    pub teams: Vec<Team>,
    /// Group and knockout matches, in generation order.
    pub matches: Vec<GameMatch>,
    #[serde(default)]
    pub config: TournamentConfig,
}

impl Tournament {
    /// Create a new tournament in Setup with no athletes.
    pub fn new(config: TournamentConfig) -> Self {
        Self {
            id: Uuid::new_v4(),
            athletes: Vec::new(),
            teams: Vec::new(),
            matches: Vec::new(),
            config,
        }
    }

    /// Create a tournament with an initial roster. Blank and duplicate names are skipped.
    pub fn with_athletes<I, S>(names: I, config: TournamentConfig) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut t = Self::new(config);
        for name in names {
            let name: String = name.into();
            if let Err(e) = t.add_athlete(name.as_str()) {
                log::debug!("Skipping athlete {:?}: {}", name, e);
            }
        }
        t
    }

    pub fn phase(&self) -> TournamentPhase {
        let final_done = self
            .matches
            .iter()
            .any(|m| m.stage == Stage::Final && m.completed);
        if final_done {
            TournamentPhase::Completed
        } else if self.matches.iter().any(|m| m.stage.is_knockout()) {
            TournamentPhase::Knockout
        } else if !self.matches.is_empty() {
            TournamentPhase::GroupStage
        } else {
            TournamentPhase::Setup
        }
    }

    pub fn athlete(&self, id: AthleteId) -> Option<&Athlete> {
        self.athletes.iter().find(|a| a.id == id)
    }

    pub fn team(&self, id: TeamId) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }

    /// Teams of one group, in draw order.
    pub fn group_teams(&self, group: Group) -> Vec<Team> {
        self.teams
            .iter()
            .filter(|t| t.group == Some(group))
            .cloned()
            .collect()
    }

    /// Matches of one stage, in generation order.
    pub fn stage_matches(&self, stage: Stage) -> Vec<GameMatch> {
        self.matches
            .iter()
            .filter(|m| m.stage == stage)
            .cloned()
            .collect()
    }

    pub fn get_match_mut(&mut self, id: MatchId) -> Option<&mut GameMatch> {
        self.matches.iter_mut().find(|m| m.id == id)
    }

    /// Add an athlete (only before teams are drawn). Names must be unique (case-insensitive).
    pub fn add_athlete(&mut self, name: impl Into<String>) -> Result<AthleteId, TournamentError> {
        if !self.teams.is_empty() {
            return Err(TournamentError::InvalidState);
        }
        let name = name.into();
        let name_trimmed = name.trim();
        if name_trimmed.is_empty() {
            return Err(TournamentError::InvalidState);
        }
        if self.name_taken(name_trimmed, None) {
            return Err(TournamentError::DuplicateAthleteName);
        }
        let athlete = Athlete::new(name_trimmed);
        let id = athlete.id;
        self.athletes.push(athlete);
        Ok(id)
    }

    /// Remove an athlete by id (only before teams are drawn).
    pub fn remove_athlete(&mut self, athlete_id: AthleteId) -> Result<(), TournamentError> {
        if !self.teams.is_empty() {
            return Err(TournamentError::InvalidState);
        }
        let idx = self
            .athletes
            .iter()
            .position(|a| a.id == athlete_id)
            .ok_or(TournamentError::AthleteNotFound(athlete_id))?;
        self.athletes.remove(idx);
        Ok(())
    }

    /// Rename an athlete. Team names are left as they are.
    pub fn rename_athlete(&mut self, athlete_id: AthleteId, name: &str) -> Result<(), TournamentError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TournamentError::InvalidState);
        }
        if self.name_taken(name, Some(athlete_id)) {
            return Err(TournamentError::DuplicateAthleteName);
        }
        let athlete = self
            .athletes
            .iter_mut()
            .find(|a| a.id == athlete_id)
            .ok_or(TournamentError::AthleteNotFound(athlete_id))?;
        athlete.name = name.to_string();
        Ok(())
    }

    pub fn rename_team(&mut self, team_id: TeamId, name: &str) -> Result<(), TournamentError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TournamentError::InvalidState);
        }
        let team = self
            .teams
            .iter_mut()
            .find(|t| t.id == team_id)
            .ok_or(TournamentError::TeamNotFound(team_id))?;
        team.name = name.to_string();
        Ok(())
    }

    /// Replace the scoring rules. Matches already generated keep their target and format.
    pub fn set_config(&mut self, config: TournamentConfig) -> Result<(), TournamentError> {
        if config.points_to_win_group == 0 || config.points_to_win_knockout == 0 {
            return Err(TournamentError::InvalidConfig("target score must be positive".into()));
        }
        if !config.group_format.is_valid() || !config.knockout_format.is_valid() {
            return Err(TournamentError::InvalidConfig(
                "best-of formats need an odd number of games".into(),
            ));
        }
        self.config = config;
        Ok(())
    }

    /// Back to an empty Setup document, keeping id and scoring rules.
    pub fn reset(&mut self) {
        let config = std::mem::take(&mut self.config);
        let id = self.id;
        *self = Self::new(config);
        self.id = id;
    }

    fn name_taken(&self, name: &str, except: Option<AthleteId>) -> bool {
        self.athletes
            .iter()
            .filter(|a| Some(a.id) != except)
            .any(|a| a.name.eq_ignore_ascii_case(name))
    }
}

impl Default for Tournament {
    fn default() -> Self {
        Self::new(TournamentConfig::default())
    }
}
