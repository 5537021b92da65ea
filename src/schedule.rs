//! Schedule representation for the double round robin.

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::TtsaError;

/// Where a game is played, from the point of view of the team owning the cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Venue {
    Home,
    Away,
}

impl Venue {
    /// The venue seen by the other team of the same game.
    pub fn flip(self) -> Self {
        match self {
            Venue::Home => Venue::Away,
            Venue::Away => Venue::Home,
        }
    }
}

/// One game of a team: who it plays and where.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Game {
    pub opponent: usize,
    pub venue: Venue,
}

impl Game {
    pub fn new(opponent: usize, venue: Venue) -> Self {
        Game { opponent, venue }
    }

    pub fn home(opponent: usize) -> Self {
        Game::new(opponent, Venue::Home)
    }

    pub fn away(opponent: usize) -> Self {
        Game::new(opponent, Venue::Away)
    }

    /// The venue (a team id) where `team` plays this game.
    pub fn location(&self, team: usize) -> usize {
        match self.venue {
            Venue::Home => team,
            Venue::Away => self.opponent,
        }
    }
}

/// A teams × rounds table of games.
///
/// Teams are identified by 1-based ids, rounds by 0-based indices in
/// `0..2n-2`. A cell is `None` only while the schedule is being built.
/// All writes go through methods that keep both sides of a game in sync.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    teams: usize,
    rounds: usize,
    cells: Vec<Option<Game>>,
}

impl Schedule {
    /// Create an empty schedule for `teams` teams.
    pub fn new(teams: usize) -> Self {
        let rounds = 2 * teams.saturating_sub(1);
        Schedule {
            teams,
            rounds,
            cells: vec![None; teams * rounds],
        }
    }

    /// Build a complete schedule from one row of games per team, checking every invariant.
    pub fn from_rows(rows: Vec<Vec<Game>>) -> Result<Self, TtsaError> {
        let mut schedule = Schedule::new(rows.len());

        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != schedule.rounds {
                return Err(TtsaError::InvalidSchedule(format!(
                    "team {} has {} games, expected {}",
                    i + 1,
                    row.len(),
                    schedule.rounds
                )));
            }
            for (r, game) in row.into_iter().enumerate() {
                let idx = schedule.index(i + 1, r);
                schedule.cells[idx] = Some(game);
            }
        }

        schedule.validate()?;
        Ok(schedule)
    }

    pub fn number_of_teams(&self) -> usize {
        self.teams
    }

    pub fn number_of_rounds(&self) -> usize {
        self.rounds
    }

    fn index(&self, team: usize, round: usize) -> usize {
        debug_assert!(team >= 1 && team <= self.teams, "team {} out of range", team);
        debug_assert!(round < self.rounds, "round {} out of range", round);
        (team - 1) * self.rounds + round
    }

    /// The game of `team` in `round`, if one has been scheduled.
    pub fn game(&self, team: usize, round: usize) -> Option<Game> {
        self.cells[self.index(team, round)]
    }

    pub fn opponent(&self, team: usize, round: usize) -> Option<usize> {
        self.game(team, round).map(|g| g.opponent)
    }

    pub fn is_empty_at(&self, team: usize, round: usize) -> bool {
        self.game(team, round).is_none()
    }

    /// The row of `team`, one cell per round.
    pub fn row(&self, team: usize) -> &[Option<Game>] {
        let start = self.index(team, 0);
        &self.cells[start..start + self.rounds]
    }

    /// The scheduled games of `team` in round order.
    pub fn games(&self, team: usize) -> impl Iterator<Item = Game> + '_ {
        self.row(team).iter().flatten().copied()
    }

    /// The round in which `team` plays `game`.
    pub fn round_of(&self, team: usize, game: Game) -> Option<usize> {
        self.row(team).iter().position(|&cell| cell == Some(game))
    }

    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Write a game for `team` and the mirrored game for its opponent.
    pub fn set_game(&mut self, team: usize, round: usize, opponent: usize, venue: Venue) {
        assert_ne!(team, opponent, "team {} cannot play itself", team);

        let idx = self.index(team, round);
        self.cells[idx] = Some(Game::new(opponent, venue));

        let mirror = self.index(opponent, round);
        self.cells[mirror] = Some(Game::new(team, venue.flip()));
    }

    /// Flip home and away for the game `team` plays in `round`.
    pub fn swap_roles(&mut self, team: usize, round: usize) {
        if let Some(game) = self.game(team, round) {
            self.set_game(team, round, game.opponent, game.venue.flip());
        }
    }

    /// Clear a game on both sides.
    pub(crate) fn clear_game(&mut self, team: usize, round: usize) {
        let idx = self.index(team, round);
        if let Some(game) = self.cells[idx].take() {
            let mirror = self.index(game.opponent, round);
            self.cells[mirror] = None;
        }
    }

    /// Exchange two whole rounds.
    pub fn swap_rounds(&mut self, k: usize, l: usize) {
        for team in 1..=self.teams {
            self.swap_team_rounds(team, k, l);
        }
    }

    /// Exchange the games of `team` in rounds `k` and `l`, leaving the opponents untouched.
    pub(crate) fn swap_team_rounds(&mut self, team: usize, k: usize, l: usize) {
        let a = self.index(team, k);
        let b = self.index(team, l);
        self.cells.swap(a, b);
    }

    /// Exchange two rows verbatim. The opponents are left untouched, so the
    /// caller must re-derive the mirrored games.
    pub(crate) fn swap_team_rows(&mut self, i: usize, j: usize) {
        for round in 0..self.rounds {
            let a = self.index(i, round);
            let b = self.index(j, round);
            self.cells.swap(a, b);
        }
    }

    /// Check symmetry, no self-play, the double round robin and completeness.
    pub fn validate(&self) -> Result<(), TtsaError> {
        for team in 1..=self.teams {
            for round in 0..self.rounds {
                let game = self.game(team, round).ok_or_else(|| {
                    TtsaError::InvalidSchedule(format!(
                        "team {} has no game in round {}",
                        team, round
                    ))
                })?;

                if game.opponent == team {
                    return Err(TtsaError::InvalidSchedule(format!(
                        "team {} plays itself in round {}",
                        team, round
                    )));
                }
                if game.opponent == 0 || game.opponent > self.teams {
                    return Err(TtsaError::InvalidSchedule(format!(
                        "team {} faces unknown team {} in round {}",
                        team, game.opponent, round
                    )));
                }

                let mirror = Game::new(team, game.venue.flip());
                if self.game(game.opponent, round) != Some(mirror) {
                    return Err(TtsaError::InvalidSchedule(format!(
                        "round {}: team {} and team {} disagree on their game",
                        round, team, game.opponent
                    )));
                }
            }

            for opponent in (1..=self.teams).filter(|&o| o != team) {
                for venue in [Venue::Home, Venue::Away] {
                    let count = self
                        .games(team)
                        .filter(|&g| g == Game::new(opponent, venue))
                        .count();
                    if count != 1 {
                        return Err(TtsaError::InvalidSchedule(format!(
                            "team {} plays {:?} against team {} {} times",
                            team, venue, opponent, count
                        )));
                    }
                }
            }
        }

        Ok(())
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for team in 1..=self.teams {
            let row = self
                .row(team)
                .iter()
                .map(|cell| match cell {
                    Some(Game {
                        opponent,
                        venue: Venue::Home,
                    }) => format!("{:>4}", format!("+{}", opponent)),
                    Some(Game {
                        opponent,
                        venue: Venue::Away,
                    }) => format!("{:>4}", format!("-{}", opponent)),
                    None => format!("{:>4}", "."),
                })
                .join("");
            writeln!(f, "{:>3}:{}", team, row)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Schedule ({} teams, {} rounds):", self.teams, self.rounds)?;
        write!(f, "{}", self)
    }
}
