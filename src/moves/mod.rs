//! Neighbourhood moves for the TTSA annealing loop.
//!
//! Every move keeps the schedule a valid double round robin; none of them
//! looks at the soft constraints.

pub mod partial_swap_rounds;
pub mod partial_swap_teams;
pub mod swap_homes;
pub mod swap_rounds;
pub mod swap_teams;

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::TtsaError;
use crate::schedule::Schedule;

/// The five TTSA neighbourhoods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveKind {
    SwapHomes,
    SwapRounds,
    SwapTeams,
    PartialSwapRounds,
    PartialSwapTeams,
}

impl MoveKind {
    pub const ALL: [MoveKind; 5] = [
        MoveKind::SwapHomes,
        MoveKind::SwapRounds,
        MoveKind::SwapTeams,
        MoveKind::PartialSwapRounds,
        MoveKind::PartialSwapTeams,
    ];

    fn index(self) -> usize {
        match self {
            MoveKind::SwapHomes => 0,
            MoveKind::SwapRounds => 1,
            MoveKind::SwapTeams => 2,
            MoveKind::PartialSwapRounds => 3,
            MoveKind::PartialSwapTeams => 4,
        }
    }
}

impl fmt::Display for MoveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MoveKind::SwapHomes => "SwapHomes",
            MoveKind::SwapRounds => "SwapRounds",
            MoveKind::SwapTeams => "SwapTeams",
            MoveKind::PartialSwapRounds => "PartialSwapRounds",
            MoveKind::PartialSwapTeams => "PartialSwapTeams",
        };
        write!(f, "{}", name)
    }
}

/// Applies random moves and keeps a tally of what was applied.
#[derive(Debug, Clone, Default)]
pub struct MoveGenerator {
    applied: [u64; 5],
}

impl MoveGenerator {
    pub fn new() -> Self {
        MoveGenerator::default()
    }

    /// Apply one move, chosen uniformly among the five, to `schedule` in place.
    pub fn perturb<R: Rng>(
        &mut self,
        schedule: &mut Schedule,
        rng: &mut R,
    ) -> Result<MoveKind, TtsaError> {
        let kind = MoveKind::ALL[rng.gen_range(0..MoveKind::ALL.len())];
        self.apply(kind, schedule, rng)?;
        Ok(kind)
    }

    /// Apply a random instance of the given move kind.
    pub fn apply<R: Rng>(
        &mut self,
        kind: MoveKind,
        schedule: &mut Schedule,
        rng: &mut R,
    ) -> Result<(), TtsaError> {
        match kind {
            MoveKind::SwapHomes => self.random_swap_homes(schedule, rng),
            MoveKind::SwapRounds => self.random_swap_rounds(schedule, rng),
            MoveKind::SwapTeams => self.random_swap_teams(schedule, rng),
            MoveKind::PartialSwapRounds => self.random_partial_swap_rounds(schedule, rng)?,
            MoveKind::PartialSwapTeams => self.random_partial_swap_teams(schedule, rng)?,
        }
        self.applied[kind.index()] += 1;
        Ok(())
    }

    /// How many times a move kind has been applied.
    pub fn count(&self, kind: MoveKind) -> u64 {
        self.applied[kind.index()]
    }

    /// Per-kind counts in the order of [`MoveKind::ALL`].
    pub fn counts(&self) -> Vec<(MoveKind, u64)> {
        MoveKind::ALL
            .iter()
            .map(|&kind| (kind, self.count(kind)))
            .collect()
    }
}

/// Two distinct values drawn uniformly from `range_start..range_end`.
pub(crate) fn distinct_pair<R: Rng>(rng: &mut R, range_start: usize, range_end: usize) -> (usize, usize) {
    let a = rng.gen_range(range_start..range_end);
    let mut b = rng.gen_range(range_start..range_end - 1);
    if b >= a {
        b += 1;
    }
    (a, b)
}
