//! Integration tests for the roster and the team draw.

use pickleball_bracket_web::{
    generate_group_matches, pair_athletes_with_rng, Group, MatchFormat, Tournament,
    TournamentConfig, TournamentError, TournamentPhase,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

fn roster(n: usize) -> Tournament {
    Tournament::with_athletes((0..n).map(|i| format!("Athlete {i}")), TournamentConfig::default())
}

#[test]
fn athlete_names_are_trimmed_and_unique() {
    let mut t = Tournament::default();
    let id = t.add_athlete("  Ana  ").unwrap();
    assert_eq!(t.athlete(id).unwrap().name, "Ana");
    assert_eq!(t.add_athlete("ANA"), Err(TournamentError::DuplicateAthleteName));
    assert_eq!(t.add_athlete("   "), Err(TournamentError::InvalidState));

    let other = t.add_athlete("Bo").unwrap();
    assert_eq!(t.rename_athlete(other, "ana"), Err(TournamentError::DuplicateAthleteName));
    t.rename_athlete(id, "Ana Maria").unwrap();
    assert_eq!(t.athlete(id).unwrap().name, "Ana Maria");
}

#[test]
fn initial_roster_skips_blank_and_duplicate_names() {
    let t = Tournament::with_athletes(["Ana", "ana", "   ", "Bo"], TournamentConfig::default());
    let names: Vec<&str> = t.athletes.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, ["Ana", "Bo"]);
}

#[test]
fn draw_forms_distinct_pairs_split_into_two_groups() {
    let mut t = roster(16);
    pair_athletes_with_rng(&mut t, &mut StdRng::seed_from_u64(7)).unwrap();
    assert_eq!(t.teams.len(), 8);
    assert_eq!(t.group_teams(Group::A).len(), 4);
    assert_eq!(t.group_teams(Group::B).len(), 4);

    let mut seen = HashSet::new();
    for team in &t.teams {
        let [a, b] = team.athlete_ids;
        assert_ne!(a, b);
        assert!(t.athlete(a).is_some() && t.athlete(b).is_some());
        assert!(team.has_athlete(a));
        assert!(seen.insert(a) && seen.insert(b));
        let expected = format!("{} & {}", t.athlete(a).unwrap().name, t.athlete(b).unwrap().name);
        assert_eq!(team.name, expected);
    }
    assert_eq!(seen.len(), 16);
}

#[test]
fn odd_team_count_puts_the_extra_team_in_group_a() {
    let mut t = roster(10);
    pair_athletes_with_rng(&mut t, &mut StdRng::seed_from_u64(1)).unwrap();
    assert_eq!(t.group_teams(Group::A).len(), 3);
    assert_eq!(t.group_teams(Group::B).len(), 2);
}

#[test]
fn draw_needs_enough_athletes_in_pairs() {
    let mut t = roster(6);
    assert_eq!(
        pair_athletes_with_rng(&mut t, &mut StdRng::seed_from_u64(1)),
        Err(TournamentError::NotEnoughAthletes { required: 8, found: 6 })
    );
    let mut t = roster(9);
    assert_eq!(
        pair_athletes_with_rng(&mut t, &mut StdRng::seed_from_u64(1)),
        Err(TournamentError::OddAthleteCount(9))
    );
}

#[test]
fn reshuffle_discards_teams_and_matches() {
    let mut t = roster(16);
    pair_athletes_with_rng(&mut t, &mut StdRng::seed_from_u64(3)).unwrap();
    generate_group_matches(&mut t).unwrap();
    assert_eq!(t.phase(), TournamentPhase::GroupStage);
    let old_ids: HashSet<_> = t.teams.iter().map(|team| team.id).collect();

    pair_athletes_with_rng(&mut t, &mut StdRng::seed_from_u64(4)).unwrap();
    assert!(t.matches.is_empty());
    assert_eq!(t.phase(), TournamentPhase::Setup);
    assert!(t.teams.iter().all(|team| !old_ids.contains(&team.id)));
}

#[test]
fn roster_is_locked_once_teams_exist() {
    let mut t = roster(8);
    pair_athletes_with_rng(&mut t, &mut StdRng::seed_from_u64(5)).unwrap();
    assert_eq!(t.add_athlete("Late"), Err(TournamentError::InvalidState));
    let first = t.athletes[0].id;
    assert_eq!(t.remove_athlete(first), Err(TournamentError::InvalidState));
    // Renames are still allowed.
    t.rename_athlete(first, "Renamed").unwrap();
    let team = t.teams[0].id;
    t.rename_team(team, "Smash Bros").unwrap();
    assert_eq!(t.team(team).unwrap().name, "Smash Bros");
}

#[test]
fn config_rejects_even_best_of() {
    let mut t = Tournament::default();
    let config = TournamentConfig {
        knockout_format: MatchFormat::BestOf(2),
        ..TournamentConfig::default()
    };
    assert!(matches!(t.set_config(config), Err(TournamentError::InvalidConfig(_))));

    let config = TournamentConfig {
        knockout_format: MatchFormat::BestOf(3),
        ..TournamentConfig::default()
    };
    t.set_config(config.clone()).unwrap();
    assert_eq!(t.config, config);
}

#[test]
fn reset_keeps_id_and_rules() {
    let mut t = roster(8);
    let id = t.id;
    t.reset();
    assert_eq!(t.id, id);
    assert!(t.athletes.is_empty());
    assert_eq!(t.config, TournamentConfig::default());
}
