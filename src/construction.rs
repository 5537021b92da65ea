//! Backtracking construction of a random double round robin.

use log::{debug, info};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::TtsaError;
use crate::schedule::{Game, Schedule, Venue};

/// A cell of the search, with the candidate games still to be tried there.
struct Frame {
    team: usize,
    round: usize,
    candidates: Vec<Game>,
    next: usize,
    placed: bool,
}

/// Outcome of one bounded backtracking attempt.
enum Attempt {
    Complete(Schedule),
    /// The placement budget ran out before the schedule was complete
    Abandoned,
    /// Every candidate of the first cell failed
    Exhausted,
}

/// Builds the starting schedule of the annealing run.
pub struct Constructor;

impl Constructor {
    /// Placements allowed per cell in the first attempt; doubled on every restart.
    const BUDGET_PER_CELL: u64 = 2;

    /// Build a random double round robin by backtracking with restarts.
    ///
    /// Each attempt starts from an empty schedule and gives up after a
    /// placement budget that doubles from one attempt to the next, so an
    /// unlucky early choice costs a restart instead of a deep backtrack.
    ///
    /// An odd or empty league has no double round robin and fails at once.
    pub fn build<R: Rng>(teams: usize, rng: &mut R) -> Result<Schedule, TtsaError> {
        if teams == 0 || teams % 2 != 0 {
            return Err(TtsaError::ConstructionFailed { teams });
        }

        let cells = (teams * 2 * teams.saturating_sub(1)) as u64;
        let mut budget = Self::BUDGET_PER_CELL * cells.max(1);
        let mut restarts = 0;

        loop {
            match Self::attempt(teams, budget, rng) {
                Attempt::Complete(schedule) => {
                    info!(
                        "Constructed a {}-team schedule after {} restarts",
                        teams, restarts
                    );
                    return Ok(schedule);
                }
                Attempt::Abandoned => {
                    restarts += 1;
                    budget = budget.saturating_mul(2);
                    debug!("Restarting construction with a budget of {}", budget);
                }
                Attempt::Exhausted => return Err(TtsaError::ConstructionFailed { teams }),
            }
        }
    }

    /// Fill an empty schedule cell by cell, in row-major order.
    ///
    /// Each empty cell tries its candidate games in a random order; a cell
    /// already filled as the mirror of an earlier placement is skipped.
    /// Placements are undone in place when their subtree fails.
    fn attempt<R: Rng>(teams: usize, budget: u64, rng: &mut R) -> Attempt {
        let mut schedule = Schedule::new(teams);
        let rounds = schedule.number_of_rounds();
        let cells = teams * rounds;

        let mut stack: Vec<Frame> = Vec::with_capacity(cells);
        let mut cell = 0;
        let mut placements: u64 = 0;

        loop {
            // Skip cells filled as mirrors
            while cell < cells && !schedule.is_empty_at(cell / rounds + 1, cell % rounds) {
                cell += 1;
            }

            if cell == cells {
                return Attempt::Complete(schedule);
            }

            let team = cell / rounds + 1;
            let round = cell % rounds;
            let mut candidates = Self::candidates(&schedule, team, round);
            candidates.shuffle(rng);
            stack.push(Frame {
                team,
                round,
                candidates,
                next: 0,
                placed: false,
            });

            // Find the next placement that keeps every row completable
            loop {
                let frame = match stack.last_mut() {
                    Some(frame) => frame,
                    None => return Attempt::Exhausted,
                };

                if frame.placed {
                    schedule.clear_game(frame.team, frame.round);
                    frame.placed = false;
                }

                if frame.next == frame.candidates.len() {
                    stack.pop();
                    continue;
                }
                if placements == budget {
                    return Attempt::Abandoned;
                }

                let game = frame.candidates[frame.next];
                frame.next += 1;
                schedule.set_game(frame.team, frame.round, game.opponent, game.venue);
                frame.placed = true;
                placements += 1;

                if Self::is_completable(&schedule) {
                    cell = (frame.team - 1) * rounds + frame.round + 1;
                    break;
                }
            }
        }
    }

    /// Games `team` could play in `round`: not yet in its row, against a team free that round.
    pub fn candidates(schedule: &Schedule, team: usize, round: usize) -> Vec<Game> {
        let teams = schedule.number_of_teams();
        let mut candidates = Vec::with_capacity(2 * teams);

        for opponent in (1..=teams).filter(|&o| o != team) {
            if !schedule.is_empty_at(opponent, round) {
                continue;
            }
            for venue in [Venue::Home, Venue::Away] {
                let game = Game::new(opponent, venue);
                if schedule.round_of(team, game).is_none() {
                    candidates.push(game);
                }
            }
        }

        candidates
    }

    /// Whether every unfinished row can still place its missing games.
    fn is_completable(schedule: &Schedule) -> bool {
        (1..=schedule.number_of_teams())
            .filter(|&team| schedule.row(team).iter().any(Option::is_none))
            .all(|team| Self::row_has_matching(schedule, team))
    }

    /// Perfect matching between the missing games of a row and its empty rounds.
    fn row_has_matching(schedule: &Schedule, team: usize) -> bool {
        let teams = schedule.number_of_teams();
        let empty_rounds: Vec<usize> = (0..schedule.number_of_rounds())
            .filter(|&r| schedule.is_empty_at(team, r))
            .collect();

        let missing: Vec<usize> = (1..=teams)
            .filter(|&o| o != team)
            .flat_map(|o| [Game::home(o), Game::away(o)])
            .filter(|&g| schedule.round_of(team, g).is_none())
            .map(|g| g.opponent)
            .collect();

        if missing.len() != empty_rounds.len() {
            return false;
        }

        // Round slot -> index into `missing`
        let mut matched: Vec<Option<usize>> = vec![None; empty_rounds.len()];

        (0..missing.len()).all(|g| {
            let mut seen = vec![false; empty_rounds.len()];
            Self::augment(schedule, &missing, &empty_rounds, g, &mut seen, &mut matched)
        })
    }

    fn augment(
        schedule: &Schedule,
        missing: &[usize],
        empty_rounds: &[usize],
        g: usize,
        seen: &mut [bool],
        matched: &mut [Option<usize>],
    ) -> bool {
        for slot in 0..empty_rounds.len() {
            if seen[slot] || !schedule.is_empty_at(missing[g], empty_rounds[slot]) {
                continue;
            }
            seen[slot] = true;

            let free = match matched[slot] {
                None => true,
                Some(other) => Self::augment(schedule, missing, empty_rounds, other, seen, matched),
            };
            if free {
                matched[slot] = Some(g);
                return true;
            }
        }
        false
    }
}
