//! SwapTeams: exchange the schedules of two teams.

use rand::Rng;

use super::{distinct_pair, MoveGenerator};
use crate::schedule::Schedule;

impl MoveGenerator {
    /// Give team `i` the games of team `j` and vice versa.
    ///
    /// In the two rounds where `i` and `j` meet, the swapped cells would read
    /// "plays itself"; they become the same game with home and away flipped.
    /// Every game of both rows is then written back through `set_game` so the
    /// opponents follow.
    pub fn swap_teams(schedule: &mut Schedule, i: usize, j: usize) {
        schedule.swap_team_rows(i, j);

        for (team, other) in [(i, j), (j, i)] {
            for round in 0..schedule.number_of_rounds() {
                let Some(game) = schedule.game(team, round) else {
                    continue;
                };
                if game.opponent == team {
                    schedule.set_game(team, round, other, game.venue);
                } else {
                    schedule.set_game(team, round, game.opponent, game.venue);
                }
            }
        }
    }

    pub(crate) fn random_swap_teams<R: Rng>(&self, schedule: &mut Schedule, rng: &mut R) {
        let (i, j) = distinct_pair(rng, 1, schedule.number_of_teams() + 1);
        Self::swap_teams(schedule, i, j);
    }
}
