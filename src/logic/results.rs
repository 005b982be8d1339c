//! Score entry: validate a result and write it into its match.

use crate::models::{GameMatch, MatchFormat, MatchId, SetScore, Tournament, TournamentError};

/// Points a game can run past its target score through win-by-two extensions.
pub const MAX_POINTS_PAST_TARGET: u32 = 30;

/// Record a single-game score. Drawn scores and scores beyond the target plus
/// [`MAX_POINTS_PAST_TARGET`] are rejected, and nothing is written.
pub fn record_score(
    tournament: &mut Tournament,
    match_id: MatchId,
    score_a: u32,
    score_b: u32,
) -> Result<(), TournamentError> {
    let m = tournament
        .get_match_mut(match_id)
        .ok_or(TournamentError::MatchNotFound(match_id))?;
    if let MatchFormat::BestOf(n) = m.format {
        return Err(TournamentError::InvalidMatchResult(format!(
            "{} is best of {}, enter the individual game scores",
            m.label, n
        )));
    }
    if score_a == score_b {
        return Err(TournamentError::InvalidMatchResult(format!(
            "{}-{} is a draw",
            score_a, score_b
        )));
    }
    check_points(m, score_a, score_b)?;

    m.sets.clear();
    complete(m, score_a, score_b);
    Ok(())
}

/// Record the game scores of a match. The match score becomes the number of games each side won.
///
/// Games are read in order. Every game needs a winner and a score within the target plus
/// [`MAX_POINTS_PAST_TARGET`]. The series ends as soon as one side reaches the games the format
/// requires (1 for a single game, 2 for best of 3, ...); a game after that point, or a series that
/// never gets there, is rejected. 0-0 placeholder rows are ignored.
pub fn record_sets(
    tournament: &mut Tournament,
    match_id: MatchId,
    sets: &[SetScore],
) -> Result<(), TournamentError> {
    let m = tournament
        .get_match_mut(match_id)
        .ok_or(TournamentError::MatchNotFound(match_id))?;

    let played: Vec<SetScore> = sets.iter().copied().filter(|s| !s.is_placeholder()).collect();
    let needed = m.format.sets_to_win();
    let (mut won_a, mut won_b) = (0u32, 0u32);
    for game in &played {
        if game.a == game.b {
            return Err(TournamentError::InvalidMatchResult(format!(
                "game {}-{} is a draw",
                game.a, game.b
            )));
        }
        check_points(m, game.a, game.b)?;
        if won_a == needed || won_b == needed {
            return Err(TournamentError::InvalidMatchResult(format!(
                "game {}-{} was recorded after the match was decided {}-{}",
                game.a, game.b, won_a, won_b
            )));
        }
        if game.a > game.b {
            won_a += 1;
        } else {
            won_b += 1;
        }
    }
    if won_a.max(won_b) != needed {
        return Err(TournamentError::InvalidMatchResult(format!(
            "{}-{} in games does not decide a match that needs {} games",
            won_a, won_b, needed
        )));
    }

    m.sets = played;
    complete(m, won_a, won_b);
    Ok(())
}

/// Reset a match to unplayed.
pub fn clear_result(tournament: &mut Tournament, match_id: MatchId) -> Result<(), TournamentError> {
    tournament
        .get_match_mut(match_id)
        .ok_or(TournamentError::MatchNotFound(match_id))?
        .clear_result();
    Ok(())
}

fn check_points(m: &GameMatch, a: u32, b: u32) -> Result<(), TournamentError> {
    let limit = m.target_score.saturating_add(MAX_POINTS_PAST_TARGET);
    if a.max(b) > limit {
        return Err(TournamentError::InvalidMatchResult(format!(
            "{}-{} is out of range for a game to {}",
            a, b, m.target_score
        )));
    }
    Ok(())
}

fn complete(m: &mut GameMatch, score_a: u32, score_b: u32) {
    m.score_a = Some(score_a);
    m.score_b = Some(score_b);
    m.winner = Some(if score_a > score_b { m.team_a } else { m.team_b });
    m.completed = true;
    log::debug!("{}: recorded {}-{}", m.label, score_a, score_b);
}
