//! Tests for the backtracking constructor.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use ttsa::construction::Constructor;
use ttsa::error::TtsaError;
use ttsa::schedule::{Game, Schedule, Venue};

fn build(teams: usize, seed: u64) -> Schedule {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    Constructor::build(teams, &mut rng).unwrap()
}

#[test]
fn test_construction_produces_valid_schedules() {
    for teams in [4, 6, 8, 10] {
        for seed in 1..=5 {
            let schedule = build(teams, seed);

            assert!(schedule.is_complete());
            assert!(
                schedule.validate().is_ok(),
                "invalid schedule for {} teams, seed {}:\n{}",
                teams,
                seed,
                schedule
            );
        }
    }
}

#[test]
fn test_construction_is_double_round_robin() {
    let teams = 8;
    let schedule = build(teams, 3);

    for team in 1..=teams {
        assert_eq!(schedule.games(team).count(), 2 * teams - 2);

        for opponent in (1..=teams).filter(|&o| o != team) {
            let home = schedule
                .games(team)
                .filter(|&g| g == Game::home(opponent))
                .count();
            let away = schedule
                .games(team)
                .filter(|&g| g == Game::away(opponent))
                .count();
            assert_eq!(home, 1, "team {} hosts team {} {} times", team, opponent, home);
            assert_eq!(away, 1, "team {} visits team {} {} times", team, opponent, away);
        }
    }
}

#[test]
fn test_construction_is_symmetric() {
    let schedule = build(6, 9);

    for team in 1..=6 {
        for round in 0..schedule.number_of_rounds() {
            let game = schedule.game(team, round).unwrap();
            assert_ne!(game.opponent, team);
            assert_eq!(
                schedule.game(game.opponent, round),
                Some(Game::new(team, game.venue.flip()))
            );
        }
    }
}

#[test]
fn test_construction_is_deterministic() {
    assert_eq!(build(8, 17), build(8, 17));
    assert_eq!(build(6, 2), build(6, 2));
}

#[test]
fn test_construction_varies_with_seed() {
    let schedules: Vec<Schedule> = (1..=4).map(|seed| build(8, seed)).collect();

    let distinct = schedules
        .iter()
        .enumerate()
        .filter(|(i, s)| schedules[..*i].iter().all(|other| other != *s))
        .count();
    assert!(distinct > 1);
}

#[test]
fn test_construction_larger_leagues() {
    for teams in [12, 16] {
        let schedule = build(teams, 1);
        assert!(schedule.validate().is_ok());
    }
}

#[test]
fn test_construction_fails_for_odd_league() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);

    for teams in [1, 3, 5, 7, 15] {
        let result = Constructor::build(teams, &mut rng);
        assert!(
            matches!(result, Err(TtsaError::ConstructionFailed { teams: t }) if t == teams),
            "{} teams should not be schedulable",
            teams
        );
    }
}

#[test]
fn test_construction_fails_for_empty_league() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let result = Constructor::build(0, &mut rng);

    assert!(matches!(
        result,
        Err(TtsaError::ConstructionFailed { teams: 0 })
    ));
}

#[test]
fn test_candidates_on_empty_schedule() {
    let schedule = Schedule::new(6);
    let candidates = Constructor::candidates(&schedule, 1, 0);

    assert_eq!(candidates.len(), 10);
    assert!(candidates.iter().all(|g| g.opponent != 1));
}

#[test]
fn test_candidates_exclude_busy_teams_and_played_games() {
    let mut schedule = Schedule::new(4);
    schedule.set_game(1, 0, 2, Venue::Home);
    schedule.set_game(1, 1, 3, Venue::Away);

    // Team 3 in round 0: team 1 and 2 are busy, only team 4 remains
    let candidates = Constructor::candidates(&schedule, 3, 0);
    assert_eq!(candidates.len(), 2);
    assert!(candidates.iter().all(|g| g.opponent == 4));

    // Team 1 in round 2 has already played (2, Home) and (3, Away)
    let candidates = Constructor::candidates(&schedule, 1, 2);
    assert_eq!(candidates.len(), 4);
    assert!(!candidates.contains(&Game::home(2)));
    assert!(!candidates.contains(&Game::away(3)));
    assert!(candidates.contains(&Game::away(2)));
    assert!(candidates.contains(&Game::home(3)));
}
