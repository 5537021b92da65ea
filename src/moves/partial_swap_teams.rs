//! PartialSwapTeams: exchange the games of two teams in one round, plus the
//! rounds needed to keep both rows a double round robin.

use rand::Rng;

use super::{distinct_pair, MoveGenerator};
use crate::error::TtsaError;
use crate::schedule::{Game, Schedule};

const OPERATOR: &str = "PartialSwapTeams";

impl MoveGenerator {
    /// Swap the games of teams `i` and `j` in `round` and along its chain.
    ///
    /// After the swap in one round, `i` holds the game `j` had there, which `i`
    /// already plays in some other round; that round joins the chain, and so on
    /// until the chain comes back to `round`. Both rows then hold the same
    /// games as before, only in different rounds.
    ///
    /// Returns the rounds swapped, or an empty list if `i` and `j` play each
    /// other in `round` (the schedule is left untouched).
    pub fn partial_swap_teams(
        schedule: &mut Schedule,
        i: usize,
        j: usize,
        round: usize,
    ) -> Result<Vec<usize>, TtsaError> {
        let start = Self::checked_game(schedule, i, round)?;
        if start.opponent == j {
            return Ok(Vec::new());
        }

        let mut chain = vec![round];
        let mut current = round;
        loop {
            let wanted = Self::checked_game(schedule, j, current)?;
            let next = schedule
                .round_of(i, wanted)
                .ok_or_else(|| TtsaError::ChainClosure {
                    operator: OPERATOR,
                    detail: format!("team {} never plays {:?}", i, wanted),
                })?;

            if next == round {
                break;
            }
            if chain.contains(&next) || chain.len() == schedule.number_of_rounds() {
                return Err(TtsaError::ChainClosure {
                    operator: OPERATOR,
                    detail: format!(
                        "chain of teams {} and {} from round {} revisits round {}",
                        i, j, round, next
                    ),
                });
            }

            chain.push(next);
            current = next;
        }

        for &r in &chain {
            let gi = Self::checked_game(schedule, i, r)?;
            let gj = Self::checked_game(schedule, j, r)?;
            schedule.set_game(i, r, gj.opponent, gj.venue);
            schedule.set_game(j, r, gi.opponent, gi.venue);
        }

        Ok(chain)
    }

    /// The game of `team` in `round`, mirrored correctly by its opponent.
    fn checked_game(schedule: &Schedule, team: usize, round: usize) -> Result<Game, TtsaError> {
        let game = schedule
            .game(team, round)
            .ok_or_else(|| TtsaError::ChainClosure {
                operator: OPERATOR,
                detail: format!("team {} has no game in round {}", team, round),
            })?;

        if schedule.game(game.opponent, round) != Some(Game::new(team, game.venue.flip())) {
            return Err(TtsaError::ChainClosure {
                operator: OPERATOR,
                detail: format!(
                    "round {}: team {} and team {} disagree on their game",
                    round, team, game.opponent
                ),
            });
        }

        Ok(game)
    }

    pub(crate) fn random_partial_swap_teams<R: Rng>(
        &self,
        schedule: &mut Schedule,
        rng: &mut R,
    ) -> Result<(), TtsaError> {
        let (i, j) = distinct_pair(rng, 1, schedule.number_of_teams() + 1);
        let round = rng.gen_range(0..schedule.number_of_rounds());
        Self::partial_swap_teams(schedule, i, j, round)?;
        Ok(())
    }
}
