//! SwapHomes: exchange the home and away roles of a pairing.

use rand::Rng;

use super::MoveGenerator;
use crate::schedule::Schedule;

impl MoveGenerator {
    /// Flip the venue of both games between `team` and `opponent`.
    pub fn swap_homes(schedule: &mut Schedule, team: usize, opponent: usize) {
        let rounds: Vec<usize> = (0..schedule.number_of_rounds())
            .filter(|&r| schedule.opponent(team, r) == Some(opponent))
            .collect();

        for round in rounds {
            schedule.swap_roles(team, round);
        }
    }

    /// SwapHomes on a random game of the last team.
    pub(crate) fn random_swap_homes<R: Rng>(&self, schedule: &mut Schedule, rng: &mut R) {
        let team = schedule.number_of_teams();
        let round = rng.gen_range(0..schedule.number_of_rounds());

        if let Some(opponent) = schedule.opponent(team, round) {
            Self::swap_homes(schedule, team, opponent);
        }
    }
}
