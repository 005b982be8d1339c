//! Integration tests for score entry and result validation.

use pickleball_bracket_web::{
    clear_result, record_score, record_sets, schedule_round_robin, Athlete, Group, MatchFormat,
    MatchId, SetScore, Stage, StageSettings, Team, Tournament, TournamentError,
    MAX_POINTS_PAST_TARGET,
};
use uuid::Uuid;

fn one_match(format: MatchFormat) -> (Tournament, MatchId) {
    let mut t = Tournament::default();
    let roster: Vec<Athlete> = (0..4).map(|i| Athlete::new(format!("P{i}"))).collect();
    t.teams.push(Team::pair(&roster[0], &roster[1], Some(Group::A)).unwrap());
    t.teams.push(Team::pair(&roster[2], &roster[3], Some(Group::A)).unwrap());
    t.athletes = roster;
    let settings = StageSettings {
        target_score: 11,
        format,
    };
    t.matches = schedule_round_robin(&t.teams, Stage::GroupA, settings).unwrap();
    let id = t.matches[0].id;
    (t, id)
}

#[test]
fn record_score_sets_winner_and_completion() {
    let (mut t, id) = one_match(MatchFormat::SingleGame);
    record_score(&mut t, id, 7, 11).unwrap();
    let m = &t.matches[0];
    assert!(m.completed);
    assert_eq!((m.score_a, m.score_b), (Some(7), Some(11)));
    assert_eq!(m.winner, Some(m.team_b));
    assert_eq!(m.loser(), Some(m.team_a));
}

#[test]
fn drawn_score_is_rejected_without_writing() {
    let (mut t, id) = one_match(MatchFormat::SingleGame);
    let before = t.matches.clone();
    assert!(matches!(
        record_score(&mut t, id, 10, 10),
        Err(TournamentError::InvalidMatchResult(_))
    ));
    assert_eq!(t.matches, before);
}

#[test]
fn unknown_match_is_reported() {
    let (mut t, _) = one_match(MatchFormat::SingleGame);
    let missing = Uuid::new_v4();
    assert_eq!(
        record_score(&mut t, missing, 11, 3),
        Err(TournamentError::MatchNotFound(missing))
    );
}

#[test]
fn best_of_three_counts_games_won() {
    let (mut t, id) = one_match(MatchFormat::BestOf(3));
    record_sets(&mut t, id, &[SetScore::new(11, 4), SetScore::new(13, 11)]).unwrap();
    let m = &t.matches[0];
    assert_eq!((m.score_a, m.score_b), (Some(2), Some(0)));
    assert_eq!(m.winner, Some(m.team_a));
    assert_eq!(m.sets.len(), 2);
}

#[test]
fn best_of_needs_sets_not_a_single_score() {
    let (mut t, id) = one_match(MatchFormat::BestOf(3));
    assert!(matches!(
        record_score(&mut t, id, 11, 5),
        Err(TournamentError::InvalidMatchResult(_))
    ));
}

#[test]
fn drawn_game_is_rejected() {
    let (mut t, id) = one_match(MatchFormat::BestOf(3));
    let result = record_sets(&mut t, id, &[SetScore::new(11, 4), SetScore::new(9, 9)]);
    assert!(matches!(result, Err(TournamentError::InvalidMatchResult(_))));
    assert!(!t.matches[0].completed);
}

#[test]
fn undecided_or_overplayed_series_is_rejected() {
    let (mut t, id) = one_match(MatchFormat::BestOf(3));
    let undecided = [SetScore::new(11, 4), SetScore::new(4, 11)];
    assert!(record_sets(&mut t, id, &undecided).is_err());
    let overplayed = [SetScore::new(11, 4), SetScore::new(11, 6), SetScore::new(11, 2)];
    assert!(record_sets(&mut t, id, &overplayed).is_err());
    // Decided 2-0 before the third game, even though the totals read 2-1.
    let played_on = [SetScore::new(11, 0), SetScore::new(11, 0), SetScore::new(0, 11)];
    assert!(matches!(
        record_sets(&mut t, id, &played_on),
        Err(TournamentError::InvalidMatchResult(_))
    ));
    assert!(!t.matches[0].completed);
}

#[test]
fn deciding_game_may_come_last() {
    let (mut t, id) = one_match(MatchFormat::BestOf(3));
    record_sets(&mut t, id, &[SetScore::new(0, 11), SetScore::new(11, 0), SetScore::new(11, 9)])
        .unwrap();
    let m = &t.matches[0];
    assert_eq!((m.score_a, m.score_b), (Some(2), Some(1)));
    assert_eq!(m.winner, Some(m.team_a));
}

#[test]
fn scores_far_past_the_target_are_rejected() {
    let (mut t, id) = one_match(MatchFormat::SingleGame);
    assert!(matches!(
        record_score(&mut t, id, 3_000_000_000, 0),
        Err(TournamentError::InvalidMatchResult(_))
    ));
    assert!(!t.matches[0].completed);

    let limit = 11 + MAX_POINTS_PAST_TARGET;
    record_score(&mut t, id, limit, limit - 2).unwrap();
    assert_eq!(t.matches[0].score_a, Some(limit));
    assert!(record_score(&mut t, id, limit + 1, limit - 1).is_err());
    assert_eq!(t.matches[0].score_a, Some(limit));

    let (mut t, id) = one_match(MatchFormat::BestOf(3));
    let huge = [SetScore::new(11, 4), SetScore::new(u32::MAX, 0)];
    assert!(matches!(
        record_sets(&mut t, id, &huge),
        Err(TournamentError::InvalidMatchResult(_))
    ));
    assert!(!t.matches[0].completed);
}

#[test]
fn clear_result_makes_match_unplayed() {
    let (mut t, id) = one_match(MatchFormat::SingleGame);
    record_score(&mut t, id, 11, 3).unwrap();
    clear_result(&mut t, id).unwrap();
    let m = &t.matches[0];
    assert!(!m.completed);
    assert_eq!((m.score_a, m.score_b, m.winner), (None, None, None));
}
