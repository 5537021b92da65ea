//! Unit tests for the Schedule representation.

use ttsa::error::TtsaError;
use ttsa::schedule::{Game, Schedule, Venue};

/// Parse rows written as "2H 3A ..." into games.
fn rows(text: &[&str]) -> Vec<Vec<Game>> {
    text.iter()
        .map(|row| {
            row.split_whitespace()
                .map(|token| {
                    let (opponent, venue) = token.split_at(token.len() - 1);
                    let opponent = opponent.parse().unwrap();
                    match venue {
                        "H" => Game::home(opponent),
                        _ => Game::away(opponent),
                    }
                })
                .collect()
        })
        .collect()
}

/// A mirrored circle-method schedule for 4 teams.
fn create_test_schedule() -> Schedule {
    Schedule::from_rows(rows(&[
        "2H 3A 4H 2A 3H 4A",
        "1A 4H 3A 1H 4A 3H",
        "4A 1H 2H 4H 1A 2A",
        "3H 2A 1A 3A 2H 1H",
    ]))
    .unwrap()
}

#[test]
fn test_new_schedule_is_empty() {
    let schedule = Schedule::new(6);

    assert_eq!(schedule.number_of_teams(), 6);
    assert_eq!(schedule.number_of_rounds(), 10);
    assert!(!schedule.is_complete());

    for team in 1..=6 {
        assert_eq!(schedule.row(team).len(), 10);
        assert_eq!(schedule.games(team).count(), 0);
    }
}

#[test]
fn test_set_game_writes_mirror() {
    let mut schedule = Schedule::new(4);
    schedule.set_game(1, 2, 3, Venue::Home);

    assert_eq!(schedule.game(1, 2), Some(Game::home(3)));
    assert_eq!(schedule.game(3, 2), Some(Game::away(1)));

    // Other cells are untouched
    assert!(schedule.is_empty_at(2, 2));
    assert!(schedule.is_empty_at(1, 1));
}

#[test]
fn test_set_game_from_the_away_side() {
    let mut schedule = Schedule::new(4);
    schedule.set_game(4, 0, 2, Venue::Away);

    assert_eq!(schedule.game(4, 0), Some(Game::away(2)));
    assert_eq!(schedule.game(2, 0), Some(Game::home(4)));
    assert_eq!(schedule.opponent(2, 0), Some(4));
}

#[test]
#[should_panic]
fn test_set_game_rejects_self_play() {
    let mut schedule = Schedule::new(4);
    schedule.set_game(2, 0, 2, Venue::Home);
}

#[test]
fn test_swap_roles_flips_both_sides() {
    let mut schedule = create_test_schedule();
    schedule.swap_roles(1, 0);

    assert_eq!(schedule.game(1, 0), Some(Game::away(2)));
    assert_eq!(schedule.game(2, 0), Some(Game::home(1)));

    // Team 1 now plays team 2 away twice, so the schedule is no longer a double round robin
    assert!(schedule.validate().is_err());

    schedule.swap_roles(2, 3);
    assert!(schedule.validate().is_ok());
}

#[test]
fn test_swap_rounds_keeps_schedule_valid() {
    let mut schedule = create_test_schedule();
    let before = schedule.clone();

    schedule.swap_rounds(0, 4);

    assert!(schedule.validate().is_ok());
    for team in 1..=4 {
        assert_eq!(schedule.game(team, 0), before.game(team, 4));
        assert_eq!(schedule.game(team, 4), before.game(team, 0));
        assert_eq!(schedule.game(team, 2), before.game(team, 2));
    }
}

#[test]
fn test_validate_detects_stale_mirror() {
    let mut schedule = create_test_schedule();

    // Overwriting a played round leaves the old opponents pointing at team 1
    let old_opponent = schedule.opponent(1, 1).unwrap();
    let new_opponent = (2..=schedule.number_of_teams())
        .find(|&t| t != old_opponent)
        .unwrap();
    schedule.set_game(1, 1, new_opponent, Venue::Home);

    assert_eq!(schedule.opponent(new_opponent, 1), Some(1));
    assert_eq!(schedule.opponent(old_opponent, 1), Some(1));
    assert!(matches!(
        schedule.validate(),
        Err(TtsaError::InvalidSchedule(_))
    ));
}

#[test]
fn test_round_of() {
    let schedule = create_test_schedule();

    assert_eq!(schedule.round_of(1, Game::home(2)), Some(0));
    assert_eq!(schedule.round_of(1, Game::away(2)), Some(3));
    assert_eq!(schedule.round_of(3, Game::home(4)), Some(3));
    assert_eq!(schedule.round_of(1, Game::home(1)), None);
}

#[test]
fn test_from_rows_accepts_valid_schedule() {
    let schedule = create_test_schedule();

    assert!(schedule.is_complete());
    assert!(schedule.validate().is_ok());
    assert_eq!(schedule.games(3).count(), 6);
}

#[test]
fn test_from_rows_rejects_asymmetric_rounds() {
    let result = Schedule::from_rows(rows(&[
        "2H 3A 4H 2A 3H 4A",
        "1A 4H 3A 1H 4A 3H",
        "4A 1H 2H 4H 1A 2A",
        "3H 2A 1A 3A 2H 1A",
    ]));

    assert!(matches!(result, Err(TtsaError::InvalidSchedule(_))));
}

#[test]
fn test_from_rows_rejects_wrong_length() {
    let result = Schedule::from_rows(rows(&[
        "2H 3A 4H 2A 3H",
        "1A 4H 3A 1H 4A",
        "4A 1H 2H 4H 1A",
        "3H 2A 1A 3A 2H",
    ]));

    assert!(matches!(result, Err(TtsaError::InvalidSchedule(_))));
}

#[test]
fn test_from_rows_rejects_missing_fixture() {
    // Team 1 and 2 meet home-home; every round is symmetric but the pairing is not
    let result = Schedule::from_rows(rows(&[
        "2H 3A 4H 2H 3H 4A",
        "1A 4H 3A 1A 4A 3H",
        "4A 1H 2H 4H 1A 2A",
        "3H 2A 1A 3A 2H 1H",
    ]));

    assert!(matches!(result, Err(TtsaError::InvalidSchedule(_))));
}

#[test]
fn test_clone_is_independent() {
    let schedule = create_test_schedule();
    let mut copy = schedule.clone();

    copy.swap_rounds(1, 2);

    assert_ne!(copy, schedule);
    assert_eq!(schedule.game(1, 1), Some(Game::away(3)));
}

#[test]
fn test_display() {
    let schedule = create_test_schedule();
    let text = schedule.to_string();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "  1:  +2  -3  +4  -2  +3  -4");
    assert_eq!(lines[3], "  4:  +3  -2  -1  -3  +2  +1");
}
