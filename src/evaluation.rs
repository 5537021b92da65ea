//! Travel cost, constraint violations and the annealing objective.

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::problem::Problem;
use crate::schedule::{Schedule, Venue};

/// The two raw measures of a schedule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Total distance travelled by all teams
    pub travel_cost: f64,
    /// Number of no-repeat and at-most-3 breaches
    pub violations: usize,
}

impl Evaluation {
    /// Evaluate a schedule against the distances of `problem`.
    pub fn of(schedule: &Schedule, problem: &Problem) -> Self {
        Evaluation {
            travel_cost: travel_cost(schedule, problem),
            violations: violation_count(schedule),
        }
    }

    /// Whether the schedule satisfies the soft constraints.
    pub fn is_feasible(&self) -> bool {
        self.violations == 0
    }

    /// The objective under the given penalty weight.
    pub fn objective(&self, penalty: f64) -> f64 {
        objective(self.travel_cost, self.violations, penalty)
    }
}

/// Sum over all teams of the tour home -> venues in round order -> home.
pub fn travel_cost(schedule: &Schedule, problem: &Problem) -> f64 {
    let mut total = 0.0;

    for team in 1..=schedule.number_of_teams() {
        let mut location = team;
        for game in schedule.games(team) {
            let next = game.location(team);
            total += problem.get_distance(location, next);
            location = next;
        }
        total += problem.get_distance(location, team);
    }

    total
}

/// Count no-repeat breaches and every window of four games at the same venue.
///
/// A run of L >= 4 home (or away) games counts L - 3 times.
pub fn violation_count(schedule: &Schedule) -> usize {
    let mut violations = 0;

    for team in 1..=schedule.number_of_teams() {
        let games: Vec<_> = schedule.games(team).collect();

        violations += games
            .iter()
            .tuple_windows::<(_, _)>()
            .filter(|(a, b)| a.opponent == b.opponent)
            .count();

        violations += games
            .iter()
            .map(|g| g.venue)
            .tuple_windows::<(Venue, Venue, Venue, Venue)>()
            .filter(|&(a, b, c, d)| a == b && b == c && c == d)
            .count();
    }

    violations
}

/// Scale of the violation term: `1 + sqrt(v) * ln(v / 2)`.
///
/// Small for v = 1 (about 0.307) and exactly 1 for v = 2, but increasing
/// for every v >= 1.
pub fn penalty_scale(violations: usize) -> f64 {
    let v = violations as f64;
    1.0 + v.sqrt() * (v / 2.0).ln()
}

/// The annealing objective: travel cost for feasible schedules,
/// `sqrt(c^2 + w * f(v)^2)` otherwise.
pub fn objective(travel_cost: f64, violations: usize, penalty: f64) -> f64 {
    if violations == 0 {
        return travel_cost;
    }

    let scale = penalty_scale(violations);
    (travel_cost * travel_cost + penalty * scale * scale).sqrt()
}
