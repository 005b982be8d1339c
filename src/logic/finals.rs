//! Knockout rounds: semifinals from the group tables, then final and third-place match.

use crate::logic::standings::group_standings;
use crate::models::{GameMatch, Group, Stage, Team, TeamId, Tournament, TournamentError};

/// Seed the semifinals from both group tables: A1 vs B2, then B1 vs A2.
///
/// Every group match must be completed. Earlier knockout matches (semifinals, final, third
/// place) are discarded; group matches are kept.
pub fn generate_semi_finals(tournament: &mut Tournament) -> Result<(), TournamentError> {
    let group_matches: Vec<&GameMatch> = tournament.matches.iter().filter(|m| m.stage.is_group()).collect();
    if group_matches.is_empty() {
        return Err(TournamentError::InvalidState);
    }
    let pending = group_matches.iter().filter(|m| !m.completed).count();
    if pending > 0 {
        return Err(TournamentError::IncompleteDependency {
            stage: Stage::SemiFinal,
            pending,
        });
    }

    let table_a = group_standings(tournament, Group::A);
    let table_b = group_standings(tournament, Group::B);
    for (group, table) in [(Group::A, &table_a), (Group::B, &table_b)] {
        if table.len() < 2 {
            return Err(TournamentError::InsufficientTeams {
                stage: group.stage(),
                found: table.len(),
            });
        }
    }

    let settings = tournament.config.knockout_settings();
    let semis = vec![
        GameMatch::new(
            Stage::SemiFinal,
            1,
            table_a[0].team_id,
            table_b[1].team_id,
            "Semifinal 1 (A1 vs B2)",
            settings.target_score,
            settings.format,
        ),
        GameMatch::new(
            Stage::SemiFinal,
            2,
            table_b[0].team_id,
            table_a[1].team_id,
            "Semifinal 2 (B1 vs A2)",
            settings.target_score,
            settings.format,
        ),
    ];

    log::info!(
        "Semifinals: {} vs {}, {} vs {}",
        table_a[0].team_name,
        table_b[1].team_name,
        table_b[0].team_name,
        table_a[1].team_name
    );
    tournament.matches.retain(|m| m.stage.is_group());
    tournament.matches.extend(semis);
    Ok(())
}

/// Winners of the semifinals meet in the final, losers in the third-place match.
///
/// Both semifinals must be completed. An earlier final and third-place match are replaced.
pub fn generate_finals(tournament: &mut Tournament) -> Result<(), TournamentError> {
    let semis = tournament.stage_matches(Stage::SemiFinal);
    if semis.len() != 2 {
        return Err(TournamentError::IncompleteDependency {
            stage: Stage::Final,
            pending: 2 - semis.len().min(2),
        });
    }
    let pending = semis.iter().filter(|m| !m.completed).count();
    if pending > 0 {
        return Err(TournamentError::IncompleteDependency {
            stage: Stage::Final,
            pending,
        });
    }

    let outcome = |m: &GameMatch| -> Result<(TeamId, TeamId), TournamentError> {
        match (m.winner, m.loser()) {
            (Some(w), Some(l)) => Ok((w, l)),
            _ => Err(TournamentError::InvalidState),
        }
    };
    let (winner_1, loser_1) = outcome(&semis[0])?;
    let (winner_2, loser_2) = outcome(&semis[1])?;

    let settings = tournament.config.knockout_settings();
    let third = GameMatch::new(
        Stage::ThirdPlace,
        1,
        loser_1,
        loser_2,
        "Third place",
        settings.target_score,
        settings.format,
    );
    let final_match = GameMatch::new(
        Stage::Final,
        1,
        winner_1,
        winner_2,
        "Final",
        settings.target_score,
        settings.format,
    );

    log::info!("Final and third-place match generated");
    tournament
        .matches
        .retain(|m| !matches!(m.stage, Stage::Final | Stage::ThirdPlace));
    tournament.matches.push(third);
    tournament.matches.push(final_match);
    Ok(())
}

/// Winner of the final, once it has been played.
pub fn champion(tournament: &Tournament) -> Option<&Team> {
    let final_match = tournament.matches.iter().find(|m| m.stage == Stage::Final)?;
    tournament.team(final_match.winner?)
}

/// Top four once the final and third-place match are completed: champion, runner-up, third, fourth.
pub fn podium(tournament: &Tournament) -> Option<[&Team; 4]> {
    let final_match = tournament.matches.iter().find(|m| m.stage == Stage::Final)?;
    let third = tournament.matches.iter().find(|m| m.stage == Stage::ThirdPlace)?;
    Some([
        tournament.team(final_match.winner?)?,
        tournament.team(final_match.loser()?)?,
        tournament.team(third.winner?)?,
        tournament.team(third.loser()?)?,
    ])
}
