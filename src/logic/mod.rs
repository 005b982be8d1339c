//! Bracket logic: setup, round-robin scheduling, results, standings, knockout.

mod finals;
mod results;
mod schedule;
mod setup;
mod standings;

pub use finals::{champion, generate_finals, generate_semi_finals, podium};
pub use results::{clear_result, record_score, record_sets, MAX_POINTS_PAST_TARGET};
pub use schedule::{generate_group_matches, schedule_round_robin};
pub use setup::{pair_athletes, pair_athletes_with_rng, MIN_ATHLETES};
pub use standings::{calculate_standings, calculate_standings_with, group_standings, Standing};
