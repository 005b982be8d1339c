//! Setup phase: draw athletes into doubles teams and split the teams into groups A and B.

use crate::models::{Group, Team, Tournament, TournamentError};
use rand::seq::SliceRandom;
use rand::Rng;

/// Two groups of at least two teams each.
pub const MIN_ATHLETES: usize = 8;

/// Shuffle athletes into random pairs using the thread-local RNG. See [`pair_athletes_with_rng`].
pub fn pair_athletes(tournament: &mut Tournament) -> Result<(), TournamentError> {
    pair_athletes_with_rng(tournament, &mut rand::thread_rng())
}

/// Draw random doubles teams and split them into groups.
///
/// 1. Require an even athlete count of at least [`MIN_ATHLETES`].
/// 2. Shuffle the roster; consecutive athletes form a team.
/// 3. The first half of the teams (rounded up) goes to group A, the rest to group B.
///
/// Every existing team and match is discarded, so a reshuffle always restarts the bracket.
pub fn pair_athletes_with_rng<R: Rng + ?Sized>(
    tournament: &mut Tournament,
    rng: &mut R,
) -> Result<(), TournamentError> {
    let n = tournament.athletes.len();
    if n < MIN_ATHLETES {
        return Err(TournamentError::NotEnoughAthletes {
            required: MIN_ATHLETES,
            found: n,
        });
    }
    if n % 2 != 0 {
        return Err(TournamentError::OddAthleteCount(n));
    }

    let mut shuffled = tournament.athletes.clone();
    shuffled.shuffle(rng);

    let team_count = n / 2;
    let group_a_size = (team_count + 1) / 2;
    let teams: Vec<Team> = shuffled
        .chunks_exact(2)
        .enumerate()
        .filter_map(|(i, pair)| {
            let group = if i < group_a_size { Group::A } else { Group::B };
            Team::pair(&pair[0], &pair[1], Some(group))
        })
        .collect();

    log::info!(
        "Drew {} teams ({} in group A, {} in group B)",
        teams.len(),
        group_a_size,
        teams.len() - group_a_size
    );

    tournament.teams = teams;
    tournament.matches.clear();
    Ok(())
}
