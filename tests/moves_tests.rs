//! Tests for the five TTSA neighbourhoods.

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use ttsa::construction::Constructor;
use ttsa::error::TtsaError;
use ttsa::moves::{MoveGenerator, MoveKind};
use ttsa::schedule::{Game, Schedule, Venue};

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

/// A feasible mirrored schedule for six teams.
fn create_test_schedule() -> Schedule {
    Schedule::from_rows(rows(&[
        "6A 3H 5A 2A 4H 6H 3A 5H 2H 4A",
        "5H 6H 4A 1H 3H 5A 6A 4H 1A 3A",
        "4H 1A 6A 5H 2A 4A 1H 6H 5A 2H",
        "3A 5A 2H 6H 1A 3H 5H 2A 6A 1H",
        "2A 4H 1H 3A 6A 2H 4A 1A 3H 6H",
        "1H 2A 3H 4A 5H 1A 2H 3A 4H 5A",
    ]))
    .unwrap()
}

/// The same schedule with team 1 moved onto team 2 in round 1, leaving
/// teams 3 and 6 still listed against the old partners.
fn create_broken_schedule() -> Schedule {
    let mut schedule = create_test_schedule();
    schedule.set_game(1, 1, 2, Venue::Home);
    schedule
}

#[test]
fn test_every_move_preserves_invariants() {
    for teams in [4, 6, 8, 10] {
        for seed in 1..=10 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut schedule = Constructor::build(teams, &mut rng).unwrap();
            let mut moves = MoveGenerator::new();

            for step in 0..200 {
                let kind = moves.perturb(&mut schedule, &mut rng).unwrap();
                if let Err(err) = schedule.validate() {
                    panic!(
                        "{} broke the schedule ({} teams, seed {}, step {}): {}",
                        kind, teams, seed, step, err
                    );
                }
            }
        }
    }
}

#[test]
fn test_each_kind_preserves_invariants() {
    for kind in MoveKind::ALL {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut schedule = Constructor::build(8, &mut rng).unwrap();
        let mut moves = MoveGenerator::new();

        for _ in 0..300 {
            moves.apply(kind, &mut schedule, &mut rng).unwrap();
            assert!(schedule.validate().is_ok(), "{} broke the schedule", kind);
        }
        assert_eq!(moves.count(kind), 300);
    }
}

#[test]
fn test_perturb_counts_moves() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let mut schedule = create_test_schedule();
    let mut moves = MoveGenerator::new();

    for _ in 0..500 {
        moves.perturb(&mut schedule, &mut rng).unwrap();
    }

    let counts = moves.counts();
    assert_eq!(counts.len(), 5);
    assert_eq!(counts.iter().map(|(_, n)| n).sum::<u64>(), 500);
    // Uniform choice: every kind shows up
    assert!(counts.iter().all(|&(_, n)| n > 0));
}

#[test]
fn test_swap_homes_flips_both_games_of_a_pairing() {
    let mut schedule = create_test_schedule();
    let before = schedule.clone();

    MoveGenerator::swap_homes(&mut schedule, 6, 1);

    // Team 6 met team 1 at home in round 0 and away in round 5
    assert_eq!(schedule.game(6, 0), Some(Game::away(1)));
    assert_eq!(schedule.game(6, 5), Some(Game::home(1)));
    assert_eq!(schedule.game(1, 0), Some(Game::home(6)));
    assert_eq!(schedule.game(1, 5), Some(Game::away(6)));
    assert!(schedule.validate().is_ok());

    // Nothing else moved
    for team in 2..=5 {
        assert_eq!(schedule.row(team), before.row(team));
    }
}

#[test]
fn test_swap_teams_exchanges_rows() {
    let mut schedule = create_test_schedule();
    let before = schedule.clone();

    MoveGenerator::swap_teams(&mut schedule, 2, 5);

    assert!(schedule.validate().is_ok());
    for round in 0..schedule.number_of_rounds() {
        let old_two = before.game(2, round).unwrap();
        let old_five = before.game(5, round).unwrap();

        if old_two.opponent == 5 {
            // The meeting stays, with home and away exchanged
            assert_eq!(schedule.game(2, round), Some(Game::new(5, old_two.venue.flip())));
            assert_eq!(schedule.game(5, round), Some(Game::new(2, old_five.venue.flip())));
        } else {
            assert_eq!(schedule.game(2, round), Some(old_five));
            assert_eq!(schedule.game(5, round), Some(old_two));
        }
    }
}

#[test]
fn test_partial_swap_rounds_swaps_a_closed_chain() {
    let mut schedule = create_test_schedule();
    let before = schedule.clone();

    let chain = MoveGenerator::partial_swap_rounds(&mut schedule, 1, 0, 1).unwrap();

    assert!(chain.contains(&1));
    assert!(schedule.validate().is_ok());

    for team in 1..=6 {
        if chain.contains(&team) {
            // Both opponents of a chained team are chained too
            assert!(chain.contains(&before.opponent(team, 0).unwrap()));
            assert!(chain.contains(&before.opponent(team, 1).unwrap()));
            assert_eq!(schedule.game(team, 0), before.game(team, 1));
            assert_eq!(schedule.game(team, 1), before.game(team, 0));
        } else {
            assert_eq!(schedule.row(team), before.row(team));
        }
    }
}

#[test]
fn test_partial_swap_rounds_small_chain() {
    let mut schedule = create_test_schedule();

    // Rounds 0 and 5 hold the same pairings with venues flipped
    let chain = MoveGenerator::partial_swap_rounds(&mut schedule, 3, 0, 5).unwrap();

    assert_eq!(chain, vec![3, 4]);
    assert_eq!(schedule.game(3, 0), Some(Game::away(4)));
    assert_eq!(schedule.game(4, 0), Some(Game::home(3)));
    assert!(schedule.validate().is_ok());
}

#[test]
fn test_partial_swap_teams_noop_when_teams_meet() {
    let mut schedule = create_test_schedule();
    let before = schedule.clone();

    // Team 1 plays team 6 in round 0
    let chain = MoveGenerator::partial_swap_teams(&mut schedule, 1, 6, 0).unwrap();

    assert!(chain.is_empty());
    assert_eq!(schedule, before);
}

#[test]
fn test_partial_swap_teams_keeps_rows_as_permutations() {
    let mut schedule = create_test_schedule();
    let before = schedule.clone();

    let chain = MoveGenerator::partial_swap_teams(&mut schedule, 1, 2, 1).unwrap();

    // The chain starts at the requested round
    assert_eq!(chain[0], 1);
    assert!(schedule.validate().is_ok());

    for &round in &chain {
        assert_eq!(schedule.game(1, round), before.game(2, round));
        assert_eq!(schedule.game(2, round), before.game(1, round));
    }
    for round in (0..10).filter(|r| !chain.contains(r)) {
        assert_eq!(schedule.game(1, round), before.game(1, round));
        assert_eq!(schedule.game(2, round), before.game(2, round));
    }
}

#[test]
fn test_partial_swap_rounds_detects_broken_pairing() {
    let mut schedule = create_broken_schedule();
    let result = MoveGenerator::partial_swap_rounds(&mut schedule, 3, 0, 1);

    assert!(matches!(result, Err(TtsaError::ChainClosure { .. })));
}

#[test]
fn test_partial_swap_teams_detects_broken_pairing() {
    let mut schedule = create_broken_schedule();
    let result = MoveGenerator::partial_swap_teams(&mut schedule, 1, 3, 1);

    assert!(matches!(result, Err(TtsaError::ChainClosure { .. })));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_random_walks_stay_valid(seed in 1u64..u64::MAX, half in 2usize..=5, steps in 1usize..100) {
        let teams = 2 * half;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut schedule = Constructor::build(teams, &mut rng).unwrap();
        let mut moves = MoveGenerator::new();

        for _ in 0..steps {
            moves.perturb(&mut schedule, &mut rng).unwrap();
        }

        prop_assert!(schedule.validate().is_ok());
        prop_assert!(schedule.is_complete());
    }
}
