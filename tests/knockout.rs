//! Integration tests for bracket progression: semifinals, final and third place.

use pickleball_bracket_web::{
    champion, generate_finals, generate_group_matches, generate_semi_finals, group_standings,
    pair_athletes_with_rng, podium, record_score, GameMatch, Group, Stage, Tournament,
    TournamentConfig, TournamentError, TournamentPhase,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn drawn_tournament() -> Tournament {
    let mut t = Tournament::with_athletes(
        (0..16).map(|i| format!("Athlete {i}")),
        TournamentConfig::default(),
    );
    pair_athletes_with_rng(&mut t, &mut StdRng::seed_from_u64(11)).unwrap();
    generate_group_matches(&mut t).unwrap();
    t
}

/// Team A of every match wins 11-`n` with `n` growing, so the tables are fully ordered.
fn finish_stage(t: &mut Tournament, stage: Stage) {
    let ids: Vec<_> = t.stage_matches(stage).iter().map(|m| m.id).collect();
    for (i, id) in ids.into_iter().enumerate() {
        record_score(t, id, 11, i as u32 % 10).unwrap();
    }
}

fn only(t: &Tournament, stage: Stage) -> GameMatch {
    let matches = t.stage_matches(stage);
    assert_eq!(matches.len(), 1, "{stage:?}");
    matches[0].clone()
}

#[test]
fn semifinals_wait_for_group_matches() {
    let mut t = drawn_tournament();
    let first = t.matches[0].id;
    record_score(&mut t, first, 11, 2).unwrap();
    assert_eq!(
        generate_semi_finals(&mut t),
        Err(TournamentError::IncompleteDependency {
            stage: Stage::SemiFinal,
            pending: 11
        })
    );
    assert!(t.matches.iter().all(|m| m.stage.is_group()));
}

#[test]
fn semifinals_cross_the_groups() {
    let mut t = drawn_tournament();
    finish_stage(&mut t, Stage::GroupA);
    finish_stage(&mut t, Stage::GroupB);
    generate_semi_finals(&mut t).unwrap();
    assert_eq!(t.phase(), TournamentPhase::Knockout);

    let a = group_standings(&t, Group::A);
    let b = group_standings(&t, Group::B);
    let semis = t.stage_matches(Stage::SemiFinal);
    assert_eq!(semis.len(), 2);
    assert_eq!((semis[0].team_a, semis[0].team_b), (a[0].team_id, b[1].team_id));
    assert_eq!((semis[1].team_a, semis[1].team_b), (b[0].team_id, a[1].team_id));
    assert!(semis.iter().all(|m| m.target_score == 15));
}

#[test]
fn finals_wait_for_semifinals() {
    let mut t = drawn_tournament();
    assert!(matches!(
        generate_finals(&mut t),
        Err(TournamentError::IncompleteDependency { stage: Stage::Final, .. })
    ));

    finish_stage(&mut t, Stage::GroupA);
    finish_stage(&mut t, Stage::GroupB);
    generate_semi_finals(&mut t).unwrap();
    let sf1 = t.stage_matches(Stage::SemiFinal)[0].id;
    record_score(&mut t, sf1, 15, 12).unwrap();
    assert_eq!(
        generate_finals(&mut t),
        Err(TournamentError::IncompleteDependency {
            stage: Stage::Final,
            pending: 1
        })
    );
}

#[test]
fn full_bracket_to_champion() {
    let mut t = drawn_tournament();
    finish_stage(&mut t, Stage::GroupA);
    finish_stage(&mut t, Stage::GroupB);
    generate_semi_finals(&mut t).unwrap();

    let semis = t.stage_matches(Stage::SemiFinal);
    record_score(&mut t, semis[0].id, 15, 13).unwrap();
    record_score(&mut t, semis[1].id, 10, 15).unwrap();
    generate_finals(&mut t).unwrap();

    let final_match = only(&t, Stage::Final);
    let third = only(&t, Stage::ThirdPlace);
    assert_eq!((final_match.team_a, final_match.team_b), (semis[0].team_a, semis[1].team_b));
    assert_eq!((third.team_a, third.team_b), (semis[0].team_b, semis[1].team_a));
    assert_eq!(champion(&t), None);

    record_score(&mut t, third.id, 15, 9).unwrap();
    record_score(&mut t, final_match.id, 14, 16).unwrap();
    assert_eq!(t.phase(), TournamentPhase::Completed);
    assert_eq!(champion(&t).map(|team| team.id), Some(semis[1].team_b));

    let [first, second, bronze, fourth] = podium(&t).unwrap();
    assert_eq!(first.id, semis[1].team_b);
    assert_eq!(second.id, semis[0].team_a);
    assert_eq!(bronze.id, semis[0].team_b);
    assert_eq!(fourth.id, semis[1].team_a);
}

#[test]
fn regenerating_semifinals_drops_later_rounds() {
    let mut t = drawn_tournament();
    finish_stage(&mut t, Stage::GroupA);
    finish_stage(&mut t, Stage::GroupB);
    generate_semi_finals(&mut t).unwrap();
    finish_stage(&mut t, Stage::SemiFinal);
    generate_finals(&mut t).unwrap();
    assert_eq!(t.matches.len(), 12 + 4);

    generate_semi_finals(&mut t).unwrap();
    assert_eq!(t.matches.len(), 12 + 2);
    assert!(t.stage_matches(Stage::Final).is_empty());
    assert!(t.stage_matches(Stage::SemiFinal).iter().all(|m| !m.completed));
}
