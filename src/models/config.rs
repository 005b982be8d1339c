//! Scoring configuration for the tournament's stages.

use crate::models::game::MatchFormat;
use serde::{Deserialize, Serialize};

/// How teams level on wins, point differential and points scored are separated.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Keep the order the teams were given in.
    #[default]
    InputOrder,
    /// A two-way tie is decided by the teams' direct match, then input order.
    HeadToHead,
}

/// Target score and format applied to every match of a stage.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct StageSettings {
    pub target_score: u32,
    pub format: MatchFormat,
}

/// Tournament-wide scoring rules. Changes apply to stages generated afterwards.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TournamentConfig {
    pub points_to_win_group: u32,
    pub points_to_win_knockout: u32,
    /// Games must be won by two clear points (informational for score entry).
    pub win_by_two: bool,
    #[serde(default)]
    pub group_format: MatchFormat,
    #[serde(default)]
    pub knockout_format: MatchFormat,
    #[serde(default)]
    pub tie_break: TieBreak,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            points_to_win_group: 11,
            points_to_win_knockout: 15,
            win_by_two: true,
            group_format: MatchFormat::SingleGame,
            knockout_format: MatchFormat::SingleGame,
            tie_break: TieBreak::InputOrder,
        }
    }
}

impl TournamentConfig {
    pub fn group_settings(&self) -> StageSettings {
        StageSettings {
            target_score: self.points_to_win_group,
            format: self.group_format,
        }
    }

    pub fn knockout_settings(&self) -> StageSettings {
        StageSettings {
            target_score: self.points_to_win_knockout,
            format: self.knockout_format,
        }
    }
}
