//! # TTSA
//!
//! A Rust implementation of TTSA, the simulated annealing algorithm for the
//! Traveling Tournament Problem (TTP).
//!
//! Based on the paper "A simulated annealing approach to the traveling
//! tournament problem" by Anagnostopoulos, Michel, Van Hentenryck and Vergados.
//!
//! A random double round robin is built by backtracking, then five
//! neighbourhoods are explored by annealing over an objective that blends
//! travel distance with the number of no-repeat and at-most-3 violations.
//! The weight of the violations adapts to where the best schedules are found,
//! and the temperature is reheated whenever a run of phases brings nothing new.

pub mod annealing;
pub mod config;
pub mod construction;
pub mod error;
pub mod evaluation;
pub mod moves;
pub mod problem;
pub mod schedule;
pub mod utils;

use crate::annealing::{AnnealingState, Termination, TtsaResult};
use crate::config::Config;
use crate::construction::Constructor;
use crate::error::TtsaError;
use crate::evaluation::Evaluation;
use crate::moves::MoveGenerator;
use crate::problem::Problem;

use log::{debug, info};
use rand_chacha::ChaCha8Rng;
use std::time::{Duration, Instant};

/// The main algorithm structure that drives construction and annealing.
pub struct TtsaAlgorithm {
    pub problem: Problem,
    pub config: Config,
    /// Starting state prepared by `initialize`, taken by the next `run`
    pub state: Option<AnnealingState>,
    pub moves: MoveGenerator,
    pub run_time: Duration,
    pub iterations: u64,
    pub accepted: u64,
    pub improvements: u64,
    pub start_time: Instant,
    rng: ChaCha8Rng,
}

impl TtsaAlgorithm {
    /// Create a new TTSA instance for the given problem and configuration.
    pub fn new(problem: Problem, config: Config) -> Result<Self, TtsaError> {
        config.validate()?;
        if problem.number_of_teams() != config.number_of_teams {
            return Err(TtsaError::TeamCountMismatch {
                config: config.number_of_teams,
                matrix: problem.number_of_teams(),
            });
        }

        let rng = config.rng();
        Ok(TtsaAlgorithm {
            problem,
            config,
            state: None,
            moves: MoveGenerator::new(),
            run_time: Duration::from_secs(0),
            iterations: 0,
            accepted: 0,
            improvements: 0,
            start_time: Instant::now(),
            rng,
        })
    }

    /// Build the starting schedule.
    pub fn initialize(&mut self) -> Result<(), TtsaError> {
        let state = self.initial_state()?;
        self.state = Some(state);
        Ok(())
    }

    fn initial_state(&mut self) -> Result<AnnealingState, TtsaError> {
        let schedule = Constructor::build(self.config.number_of_teams, &mut self.rng)?;
        debug_assert!(schedule.validate().is_ok());
        let evaluation = Evaluation::of(&schedule, &self.problem);
        info!(
            "Initial schedule: cost {:.1}, {} violations",
            evaluation.travel_cost, evaluation.violations
        );
        Ok(AnnealingState::new(schedule, evaluation, &self.config))
    }

    /// Run the algorithm until the termination criteria are met.
    ///
    /// Every call is an independent search: the counters and move tallies
    /// start from zero, and the starting schedule is the one prepared by
    /// [`initialize`](Self::initialize) or, if none is pending, a newly
    /// constructed one. The random stream carries on from earlier calls.
    pub fn run(&mut self) -> Result<TtsaResult, TtsaError> {
        self.start_time = Instant::now();
        self.iterations = 0;
        self.accepted = 0;
        self.improvements = 0;
        self.moves = MoveGenerator::new();

        let mut state = match self.state.take() {
            Some(state) => state,
            None => self.initial_state()?,
        };

        info!(
            "Annealing {} teams: T0 = {}, beta = {}, w0 = {}, maxC = {}, maxP = {}, maxR = {}",
            self.config.number_of_teams,
            self.config.initial_temperature,
            self.config.cooling_rate,
            self.config.initial_penalty,
            self.config.max_counter,
            self.config.max_phases,
            self.config.max_reheats
        );

        let terminated_by = loop {
            if let Some(reason) = self.should_terminate(&state) {
                break reason;
            }

            // Moves work on a copy so a rejection leaves the accepted schedule intact
            let mut candidate = state.schedule.clone();
            let kind = self.moves.perturb(&mut candidate, &mut self.rng)?;
            let evaluation = Evaluation::of(&candidate, &self.problem);
            self.iterations += 1;

            if state.should_accept(&evaluation, &mut self.rng) {
                self.accepted += 1;
                if state.accept(candidate, evaluation, &self.config) {
                    self.improvements += 1;
                    debug!("{} found a new best at iteration {}", kind, self.iterations);
                }
            } else {
                state.reject();
            }

            state.advance(&self.config);
        };

        self.run_time = self.start_time.elapsed();
        info!(
            "Stopped ({:?}) after {} iterations: best feasible {:.1}, best infeasible {:.1}",
            terminated_by, self.iterations, state.best_feasible, state.best_infeasible
        );

        let result = TtsaResult {
            schedule: state.schedule,
            evaluation: state.evaluation,
            best_feasible: state.best_feasible,
            best_infeasible: state.best_infeasible,
            best_feasible_schedule: state.best_feasible_schedule,
            iterations: self.iterations,
            accepted: self.accepted,
            improvements: self.improvements,
            final_temperature: state.temperature,
            final_penalty: state.penalty,
            run_time: self.run_time,
            terminated_by,
            move_counts: self.moves.counts(),
        };

        Ok(result)
    }

    /// Check if the termination criteria are met.
    fn should_terminate(&self, state: &AnnealingState) -> Option<Termination> {
        if state.is_frozen(&self.config) {
            return Some(Termination::ReheatLimit);
        }

        if let Some(max_iterations) = self.config.max_iterations {
            if self.iterations >= max_iterations {
                return Some(Termination::IterationLimit);
            }
        }

        if let Some(time_limit) = self.config.time_limit {
            if self.start_time.elapsed() >= time_limit {
                return Some(Termination::TimeLimit);
            }
        }

        None
    }
}
