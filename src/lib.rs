//! Pickleball doubles bracket: library with models, bracket logic and persistence.

pub mod export;
pub mod logic;
pub mod models;
pub mod storage;

pub use logic::{
    calculate_standings, calculate_standings_with, champion, clear_result, generate_finals,
    generate_group_matches, generate_semi_finals, group_standings, pair_athletes,
    pair_athletes_with_rng, podium, record_score, record_sets, schedule_round_robin, Standing,
    MAX_POINTS_PAST_TARGET,
};
pub use models::{
    Athlete, AthleteId, GameMatch, Group, MatchFormat, MatchId, SetScore, Stage, StageSettings, Team,
    TeamId, TieBreak, Tournament, TournamentConfig, TournamentError, TournamentId, TournamentPhase,
};
