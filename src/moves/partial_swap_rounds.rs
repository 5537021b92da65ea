//! PartialSwapRounds: exchange two rounds for one team and everyone entangled with it.

use petgraph::unionfind::UnionFind;
use rand::Rng;

use super::{distinct_pair, MoveGenerator};
use crate::error::TtsaError;
use crate::schedule::Schedule;

const OPERATOR: &str = "PartialSwapRounds";

impl MoveGenerator {
    /// Swap rounds `k` and `l` for `team` and for every team it is chained to.
    ///
    /// Teams are linked by the games they play in rounds `k` and `l`; the
    /// component of `team` in that graph is the smallest set whose two rounds
    /// can be exchanged without leaving a game half-moved. Returns the teams
    /// of that component in ascending order.
    pub fn partial_swap_rounds(
        schedule: &mut Schedule,
        team: usize,
        k: usize,
        l: usize,
    ) -> Result<Vec<usize>, TtsaError> {
        let teams = schedule.number_of_teams();
        let mut components = UnionFind::<usize>::new(teams + 1);

        for t in 1..=teams {
            for round in [k, l] {
                let game = schedule.game(t, round).ok_or_else(|| TtsaError::ChainClosure {
                    operator: OPERATOR,
                    detail: format!("team {} has no game in round {}", t, round),
                })?;
                if schedule.opponent(game.opponent, round) != Some(t) {
                    return Err(TtsaError::ChainClosure {
                        operator: OPERATOR,
                        detail: format!(
                            "team {} meets team {} in round {} but not the other way round",
                            t, game.opponent, round
                        ),
                    });
                }
                components.union(t, game.opponent);
            }
        }

        let chain: Vec<usize> = (1..=teams)
            .filter(|&t| components.equiv(t, team))
            .collect();

        for &t in &chain {
            schedule.swap_team_rounds(t, k, l);
        }

        Ok(chain)
    }

    pub(crate) fn random_partial_swap_rounds<R: Rng>(
        &self,
        schedule: &mut Schedule,
        rng: &mut R,
    ) -> Result<(), TtsaError> {
        let team = rng.gen_range(1..=schedule.number_of_teams());
        let (k, l) = distinct_pair(rng, 0, schedule.number_of_rounds());
        Self::partial_swap_rounds(schedule, team, k, l)?;
        Ok(())
    }
}
