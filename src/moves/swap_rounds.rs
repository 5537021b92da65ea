//! SwapRounds: exchange two whole rounds.

use rand::Rng;

use super::{distinct_pair, MoveGenerator};
use crate::schedule::Schedule;

impl MoveGenerator {
    pub(crate) fn random_swap_rounds<R: Rng>(&self, schedule: &mut Schedule, rng: &mut R) {
        let (k, l) = distinct_pair(rng, 0, schedule.number_of_rounds());
        schedule.swap_rounds(k, l);
    }
}
