//! Round-robin scheduling (circle method) and group-stage match generation.

use crate::models::{
    GameMatch, Group, Stage, StageSettings, Team, TeamId, Tournament, TournamentError,
};

/// Every pair of `teams` meets exactly once, N·(N−1)/2 matches in total.
///
/// Circle method: teams sit at fixed positions around a circle, with one extra bye position
/// when N is odd. Each round pairs position `i` with `size - 1 - i`; pairs involving the bye
/// are skipped. Between rounds every position except the first moves one step.
///
/// The result only depends on the order of `teams`: labels are "Group A: Match k" and match ids
/// are derived from stage and k.
pub fn schedule_round_robin(
    teams: &[Team],
    stage: Stage,
    settings: StageSettings,
) -> Result<Vec<GameMatch>, TournamentError> {
    if teams.len() < 2 {
        return Err(TournamentError::InsufficientTeams {
            stage,
            found: teams.len(),
        });
    }

    let mut positions: Vec<Option<TeamId>> = teams.iter().map(|t| Some(t.id)).collect();
    if positions.len() % 2 == 1 {
        positions.push(None);
    }
    let size = positions.len();

    let mut matches = Vec::with_capacity(teams.len() * (teams.len() - 1) / 2);
    for _round in 0..size - 1 {
        for i in 0..size / 2 {
            if let (Some(a), Some(b)) = (positions[i], positions[size - 1 - i]) {
                let ordinal = matches.len() + 1;
                matches.push(GameMatch::new(
                    stage,
                    ordinal,
                    a,
                    b,
                    format!("{}: Match {}", stage.label_prefix(), ordinal),
                    settings.target_score,
                    settings.format,
                ));
            }
        }
        positions[1..].rotate_right(1);
    }

    log::debug!(
        "{}: scheduled {} matches for {} teams over {} rounds",
        stage,
        matches.len(),
        teams.len(),
        size - 1
    );
    Ok(matches)
}

/// Generate the round-robin schedule for both groups, replacing every existing match.
///
/// Both groups are scheduled before anything is written, so a group with fewer than two teams
/// leaves the tournament untouched.
pub fn generate_group_matches(tournament: &mut Tournament) -> Result<(), TournamentError> {
    if tournament.teams.is_empty() {
        return Err(TournamentError::InsufficientTeams {
            stage: Stage::GroupA,
            found: 0,
        });
    }
    let settings = tournament.config.group_settings();

    let mut matches = Vec::new();
    for group in [Group::A, Group::B] {
        let teams = tournament.group_teams(group);
        matches.extend(schedule_round_robin(&teams, group.stage(), settings)?);
    }

    log::info!("Generated {} group matches", matches.len());
    tournament.matches = matches;
    Ok(())
}
