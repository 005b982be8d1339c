//! Group standings, recomputed from the match history on every call.

use crate::models::{GameMatch, Group, Team, TeamId, TieBreak, Tournament};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

/// One row of a group table.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    pub team_id: TeamId,
    pub team_name: String,
    pub played: u32,
    pub wins: u32,
    pub losses: u32,
    pub points_for: u64,
    pub points_against: u64,
    pub point_diff: i64,
    /// 1-based position in the table.
    pub rank: usize,
}

impl Standing {
    fn empty(team: &Team) -> Self {
        Self {
            team_id: team.id,
            team_name: team.name.clone(),
            ..Self::default()
        }
    }
}

/// Rank `teams` by wins, then point differential, then points scored. Remaining ties keep the
/// order of `teams`.
pub fn calculate_standings(teams: &[Team], matches: &[GameMatch]) -> Vec<Standing> {
    calculate_standings_with(teams, matches, TieBreak::InputOrder)
}

/// Like [`calculate_standings`] with a choice of final tie-break.
///
/// Every team in `teams` gets a row, including teams without a completed match. Only completed
/// matches between two of these teams are counted.
pub fn calculate_standings_with(
    teams: &[Team],
    matches: &[GameMatch],
    tie_break: TieBreak,
) -> Vec<Standing> {
    let mut rows: Vec<Standing> = teams.iter().map(Standing::empty).collect();
    let index: HashMap<TeamId, usize> = teams.iter().enumerate().map(|(i, t)| (t.id, i)).collect();

    let counted: Vec<&GameMatch> = matches
        .iter()
        .filter(|m| m.completed)
        .filter(|m| index.contains_key(&m.team_a) && index.contains_key(&m.team_b))
        .collect();

    for m in &counted {
        let (ia, ib) = (index[&m.team_a], index[&m.team_b]);
        let (points_a, points_b) = m.rally_points();
        let (score_a, score_b) = m.derived_scores();
        if score_a == score_b {
            log::warn!("Match {} ({}) is completed without a winner", m.id, m.label);
        }

        rows[ia].played += 1;
        rows[ib].played += 1;
        rows[ia].points_for += points_a;
        rows[ia].points_against += points_b;
        rows[ib].points_for += points_b;
        rows[ib].points_against += points_a;

        if score_a > score_b {
            rows[ia].wins += 1;
            rows[ib].losses += 1;
        } else {
            rows[ib].wins += 1;
            rows[ia].losses += 1;
        }
    }

    for row in &mut rows {
        let points_for = i64::try_from(row.points_for).unwrap_or(i64::MAX);
        let points_against = i64::try_from(row.points_against).unwrap_or(i64::MAX);
        row.point_diff = points_for.saturating_sub(points_against);
    }

    // Stable sort: equal rows stay in input order.
    rows.sort_by(compare_rows);

    if tie_break == TieBreak::HeadToHead {
        apply_head_to_head(&mut rows, &counted);
    }

    for (i, row) in rows.iter_mut().enumerate() {
        row.rank = i + 1;
    }
    log::debug!(
        "Standings over {} teams from {} completed matches",
        rows.len(),
        counted.len()
    );
    rows
}

/// Standings for one group of a tournament, using the configured tie-break.
pub fn group_standings(tournament: &Tournament, group: Group) -> Vec<Standing> {
    calculate_standings_with(
        &tournament.group_teams(group),
        &tournament.stage_matches(group.stage()),
        tournament.config.tie_break,
    )
}

fn compare_rows(a: &Standing, b: &Standing) -> Ordering {
    b.wins
        .cmp(&a.wins)
        .then_with(|| b.point_diff.cmp(&a.point_diff))
        .then_with(|| b.points_for.cmp(&a.points_for))
}

/// Swap a two-way tie when the lower row won the teams' direct match.
fn apply_head_to_head(rows: &mut [Standing], matches: &[&GameMatch]) {
    let mut start = 0;
    while start < rows.len() {
        let mut end = start + 1;
        while end < rows.len() && compare_rows(&rows[start], &rows[end]) == Ordering::Equal {
            end += 1;
        }
        if end - start == 2 {
            let (upper, lower) = (rows[start].team_id, rows[start + 1].team_id);
            let lower_won = matches
                .iter()
                .filter(|m| m.involves(upper) && m.involves(lower))
                .filter_map(|m| m.winner)
                .last()
                == Some(lower);
            if lower_won {
                rows.swap(start, start + 1);
            }
        }
        start = end;
    }
}
