//! State of the annealing run and its transitions.

use log::{debug, trace};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::Config;
use crate::evaluation::Evaluation;
use crate::moves::MoveKind;
use crate::schedule::Schedule;

/// Everything the annealing loop mutates, owned by the running algorithm.
#[derive(Debug, Clone)]
pub struct AnnealingState {
    /// The accepted schedule
    pub schedule: Schedule,
    /// Cost and violations of the accepted schedule
    pub evaluation: Evaluation,
    /// Best objective of a feasible schedule so far
    pub best_feasible: f64,
    /// Best objective of an infeasible schedule so far
    pub best_infeasible: f64,
    /// The schedule that set `best_feasible`
    pub best_feasible_schedule: Option<Schedule>,
    pub temperature: f64,
    /// Temperature at the last new best; reheats restart from twice this
    pub best_temperature: f64,
    /// Weight of the violation term
    pub penalty: f64,
    pub reheat: u32,
    pub phase: u32,
    pub counter: u32,
}

impl AnnealingState {
    pub fn new(schedule: Schedule, evaluation: Evaluation, config: &Config) -> Self {
        AnnealingState {
            schedule,
            evaluation,
            best_feasible: f64::INFINITY,
            best_infeasible: f64::INFINITY,
            best_feasible_schedule: None,
            temperature: config.initial_temperature,
            best_temperature: config.initial_temperature,
            penalty: config.initial_penalty,
            reheat: 0,
            phase: 0,
            counter: 0,
        }
    }

    /// Objective of the accepted schedule under the current penalty.
    pub fn objective(&self) -> f64 {
        self.evaluation.objective(self.penalty)
    }

    /// Decide whether to move to a candidate.
    ///
    /// Improvements over the current schedule, or over the best schedule of
    /// the candidate's kind (feasible or not), are always taken; anything else
    /// is taken with probability `exp(-|delta| / T)`.
    pub fn should_accept<R: Rng>(&self, candidate: &Evaluation, rng: &mut R) -> bool {
        let current = self.objective();
        let proposed = candidate.objective(self.penalty);

        if proposed < current
            || (candidate.is_feasible() && proposed < self.best_feasible)
            || (!candidate.is_feasible() && proposed < self.best_infeasible)
        {
            return true;
        }

        let probability = (-(proposed - current).abs() / self.temperature).exp();
        rng.gen::<f64>() < probability
    }

    /// Move to an accepted candidate. Returns true if it is a new global best,
    /// in which case all counters restart and the penalty adapts.
    pub fn accept(&mut self, schedule: Schedule, evaluation: Evaluation, config: &Config) -> bool {
        self.schedule = schedule;
        self.evaluation = evaluation;

        let objective = self.objective();
        let mut next_feasible = self.best_feasible;
        let mut next_infeasible = self.best_infeasible;
        if evaluation.is_feasible() {
            next_feasible = next_feasible.min(objective);
        } else {
            next_infeasible = next_infeasible.min(objective);
        }

        if next_feasible < self.best_feasible || next_infeasible < self.best_infeasible {
            if next_feasible < self.best_feasible {
                self.best_feasible_schedule = Some(self.schedule.clone());
            }
            self.reheat = 0;
            self.phase = 0;
            self.counter = 0;
            self.best_temperature = self.temperature;
            self.best_feasible = next_feasible;
            self.best_infeasible = next_infeasible;

            if evaluation.is_feasible() {
                self.penalty /= config.feasible_shrink;
            } else {
                self.penalty *= config.infeasible_growth;
            }

            debug!(
                "New best: feasible {:.1}, infeasible {:.1} (T = {:.3}, w = {:.3})",
                self.best_feasible, self.best_infeasible, self.temperature, self.penalty
            );
            true
        } else {
            self.counter = self.counter.saturating_add(1);
            false
        }
    }

    pub fn reject(&mut self) {
        self.counter = self.counter.saturating_add(1);
    }

    /// Cool at the end of a phase and reheat at the end of a run of phases.
    pub fn advance(&mut self, config: &Config) {
        if self.counter > config.max_counter {
            self.counter = 0;
            self.phase = self.phase.saturating_add(1);
            self.temperature *= config.cooling_rate;
            trace!("Phase {} at T = {:.3}", self.phase, self.temperature);
        }

        if self.phase > config.max_phases {
            self.phase = 0;
            self.reheat = self.reheat.saturating_add(1);
            self.temperature = 2.0 * self.best_temperature;
            debug!("Reheat {} to T = {:.3}", self.reheat, self.temperature);
        }
    }

    /// Whether the reheat budget is spent.
    pub fn is_frozen(&self, config: &Config) -> bool {
        self.reheat > config.max_reheats
    }
}

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    ReheatLimit,
    IterationLimit,
    TimeLimit,
}

/// Outcome of a TTSA run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TtsaResult {
    /// The accepted schedule when the run stopped
    pub schedule: Schedule,
    pub evaluation: Evaluation,
    pub best_feasible: f64,
    pub best_infeasible: f64,
    /// The schedule that achieved `best_feasible`, if any feasible one was seen
    pub best_feasible_schedule: Option<Schedule>,
    pub iterations: u64,
    pub accepted: u64,
    pub improvements: u64,
    pub final_temperature: f64,
    pub final_penalty: f64,
    pub run_time: Duration,
    pub terminated_by: Termination,
    pub move_counts: Vec<(MoveKind, u64)>,
}
