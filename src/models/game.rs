//! Match (game), Stage, and match formats for doubles games.

use crate::models::team::TeamId;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// Namespace for name-based match ids, so a regenerated stage gets the same ids.
const MATCH_ID_NAMESPACE: Uuid = Uuid::from_u128(0x5d1c_2f7e_8a41_4b0e_9c3d_6e2a_71f0_b8c4);

/// One of the two round-robin pools.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum Group {
    A,
    B,
}

impl Group {
    /// The group-play stage for this group.
    pub fn stage(self) -> Stage {
        match self {
            Group::A => Stage::GroupA,
            Group::B => Stage::GroupB,
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Group::A => write!(f, "A"),
            Group::B => write!(f, "B"),
        }
    }
}

/// Phase of the bracket this match belongs to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    GroupA,
    GroupB,
    SemiFinal,
    ThirdPlace,
    Final,
}

impl Stage {
    pub fn is_group(self) -> bool {
        matches!(self, Stage::GroupA | Stage::GroupB)
    }

    pub fn is_knockout(self) -> bool {
        !self.is_group()
    }

    /// Short prefix used for match labels ("Group A: Match 3").
    pub fn label_prefix(self) -> &'static str {
        match self {
            Stage::GroupA => "Group A",
            Stage::GroupB => "Group B",
            Stage::SemiFinal => "Semifinal",
            Stage::ThirdPlace => "Third place",
            Stage::Final => "Final",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label_prefix())
    }
}

/// How a match is decided.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchFormat {
    /// One game to the target score; the match score is the rally score.
    #[default]
    SingleGame,
    /// Best of `n` games (n odd); the match score is the number of games won.
    BestOf(u32),
}

impl MatchFormat {
    /// Games a side must win to take the match (1 for a single game).
    pub fn sets_to_win(self) -> u32 {
        match self {
            MatchFormat::SingleGame => 1,
            MatchFormat::BestOf(n) => n / 2 + 1,
        }
    }

    pub fn is_valid(self) -> bool {
        match self {
            MatchFormat::SingleGame => true,
            MatchFormat::BestOf(n) => n % 2 == 1,
        }
    }
}

/// Rally score of one game within a best-of match.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct SetScore {
    pub a: u32,
    pub b: u32,
}

impl SetScore {
    pub fn new(a: u32, b: u32) -> Self {
        Self { a, b }
    }

    /// 0-0 placeholder rows are kept by entry forms but never counted.
    pub fn is_placeholder(&self) -> bool {
        self.a == 0 && self.b == 0
    }
}

/// A single match between two teams.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameMatch {
    pub id: MatchId,
    pub stage: Stage,
    pub team_a: TeamId,
    pub team_b: TeamId,
    /// Human-readable label, e.g. "Group A: Match 1".
    pub label: String,
    /// Points needed to win a game (11 in groups, 15 in knockout by default).
    pub target_score: u32,
    #[serde(default)]
    pub format: MatchFormat,
    pub completed: bool,
    /// Rally score for single games, games won for best-of matches. None if not yet played.
    pub score_a: Option<u32>,
    pub score_b: Option<u32>,
    /// Individual game scores for best-of matches.
    #[serde(default)]
    pub sets: Vec<SetScore>,
    pub winner: Option<TeamId>,
}

impl GameMatch {
    /// Unplayed match stub. The id is derived from stage and ordinal (1-based).
    pub fn new(
        stage: Stage,
        ordinal: usize,
        team_a: TeamId,
        team_b: TeamId,
        label: impl Into<String>,
        target_score: u32,
        format: MatchFormat,
    ) -> Self {
        Self {
            id: Self::id_for(stage, ordinal),
            stage,
            team_a,
            team_b,
            label: label.into(),
            target_score,
            format,
            completed: false,
            score_a: None,
            score_b: None,
            sets: Vec::new(),
            winner: None,
        }
    }

    /// Deterministic id for the `ordinal`-th match of a stage.
    pub fn id_for(stage: Stage, ordinal: usize) -> MatchId {
        let name = format!("{}-{}", stage.label_prefix(), ordinal);
        Uuid::new_v5(&MATCH_ID_NAMESPACE, name.as_bytes())
    }

    pub fn involves(&self, team: TeamId) -> bool {
        self.team_a == team || self.team_b == team
    }

    /// Loser of a completed match.
    pub fn loser(&self) -> Option<TeamId> {
        let winner = self.winner?;
        Some(if winner == self.team_a {
            self.team_b
        } else {
            self.team_a
        })
    }

    /// Match-level score (games won for set-based matches), zero when unplayed.
    pub fn derived_scores(&self) -> (u32, u32) {
        (self.score_a.unwrap_or(0), self.score_b.unwrap_or(0))
    }

    /// Rally points for each side: set totals when sets were recorded, otherwise the direct score.
    pub fn rally_points(&self) -> (u64, u64) {
        let counted: Vec<&SetScore> = self.sets.iter().filter(|s| !s.is_placeholder()).collect();
        if counted.is_empty() {
            let (a, b) = self.derived_scores();
            return (u64::from(a), u64::from(b));
        }
        counted.into_iter().fold((0, 0), |(a, b), s| {
            (a + u64::from(s.a), b + u64::from(s.b))
        })
    }

    /// Forget any recorded result.
    pub fn clear_result(&mut self) {
        self.completed = false;
        self.score_a = None;
        self.score_b = None;
        self.sets.clear();
        self.winner = None;
    }
}
