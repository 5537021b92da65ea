//! Configuration parameters for the TTSA algorithm.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::TtsaError;

/// Configuration settings for the TTSA algorithm.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Number of teams in the league (even, at least 4)
    pub number_of_teams: usize,
    /// Random seed; 0 draws a seed from the operating system
    pub seed: u64,
    /// Initial temperature (τ₀)
    pub initial_temperature: f64,
    /// Geometric cooling factor applied at every phase boundary (β)
    pub cooling_rate: f64,
    /// Initial weight of the violation term in the objective (ω₀)
    pub initial_penalty: f64,
    /// Factor the penalty grows by on a new infeasible best (δ)
    pub infeasible_growth: f64,
    /// Factor the penalty shrinks by on a new feasible best (θ)
    pub feasible_shrink: f64,
    /// Carried for compatibility with published parameter sets; unused by the search (γ)
    pub gamma: f64,
    /// Non-improving moves per phase (maxC)
    pub max_counter: u32,
    /// Phases per reheat (maxP)
    pub max_phases: u32,
    /// Number of reheats before the search stops (maxR)
    pub max_reheats: u32,
    /// Optional cap on the total number of annealing iterations
    pub max_iterations: Option<u64>,
    /// Optional time limit for the algorithm
    pub time_limit: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            number_of_teams: 6,
            seed: 0,
            initial_temperature: 400.0,
            cooling_rate: 0.9999,
            initial_penalty: 4000.0,
            infeasible_growth: 1.04,
            feasible_shrink: 1.04,
            gamma: 0.6,
            max_counter: 5000,
            max_phases: 7100,
            max_reheats: 10,
            max_iterations: None,
            time_limit: None,
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Config::default()
    }

    /// Set the number of teams.
    pub fn with_number_of_teams(mut self, teams: usize) -> Self {
        self.number_of_teams = teams;
        self
    }

    /// Set the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the initial temperature.
    pub fn with_initial_temperature(mut self, temperature: f64) -> Self {
        self.initial_temperature = temperature;
        self
    }

    /// Set the cooling rate.
    pub fn with_cooling_rate(mut self, beta: f64) -> Self {
        self.cooling_rate = beta;
        self
    }

    /// Set the initial penalty weight.
    pub fn with_initial_penalty(mut self, omega: f64) -> Self {
        self.initial_penalty = omega;
        self
    }

    /// Set the penalty growth factor for infeasible improvements.
    pub fn with_infeasible_growth(mut self, delta: f64) -> Self {
        self.infeasible_growth = delta;
        self
    }

    /// Set the penalty shrink factor for feasible improvements.
    pub fn with_feasible_shrink(mut self, theta: f64) -> Self {
        self.feasible_shrink = theta;
        self
    }

    /// Set gamma.
    pub fn with_gamma(mut self, gamma: f64) -> Self {
        self.gamma = gamma;
        self
    }

    /// Set the number of non-improving moves per phase.
    pub fn with_max_counter(mut self, max_counter: u32) -> Self {
        self.max_counter = max_counter;
        self
    }

    /// Set the number of phases per reheat.
    pub fn with_max_phases(mut self, max_phases: u32) -> Self {
        self.max_phases = max_phases;
        self
    }

    /// Set the number of reheats.
    pub fn with_max_reheats(mut self, max_reheats: u32) -> Self {
        self.max_reheats = max_reheats;
        self
    }

    /// Set the iteration budget.
    pub fn with_max_iterations(mut self, iterations: u64) -> Self {
        self.max_iterations = Some(iterations);
        self
    }

    /// Set the time limit.
    pub fn with_time_limit(mut self, duration: Duration) -> Self {
        self.time_limit = Some(duration);
        self
    }

    /// Check that every parameter lies in its admissible range.
    pub fn validate(&self) -> Result<(), TtsaError> {
        let n = self.number_of_teams;
        if n < 4 || n % 2 != 0 {
            return Err(TtsaError::InvalidConfig(format!(
                "number of teams must be even and at least 4, got {}",
                n
            )));
        }
        if !(self.initial_temperature.is_finite() && self.initial_temperature > 0.0) {
            return Err(TtsaError::InvalidConfig(format!(
                "initial temperature must be positive, got {}",
                self.initial_temperature
            )));
        }
        if !(self.cooling_rate > 0.0 && self.cooling_rate < 1.0) {
            return Err(TtsaError::InvalidConfig(format!(
                "cooling rate must lie in (0, 1), got {}",
                self.cooling_rate
            )));
        }
        if !(self.initial_penalty.is_finite() && self.initial_penalty > 0.0) {
            return Err(TtsaError::InvalidConfig(format!(
                "initial penalty must be positive, got {}",
                self.initial_penalty
            )));
        }
        if !(self.infeasible_growth.is_finite() && self.infeasible_growth > 1.0) {
            return Err(TtsaError::InvalidConfig(format!(
                "infeasible growth factor must exceed 1, got {}",
                self.infeasible_growth
            )));
        }
        if !(self.feasible_shrink.is_finite() && self.feasible_shrink > 1.0) {
            return Err(TtsaError::InvalidConfig(format!(
                "feasible shrink factor must exceed 1, got {}",
                self.feasible_shrink
            )));
        }
        if !self.gamma.is_finite() {
            return Err(TtsaError::InvalidConfig(format!(
                "gamma must be finite, got {}",
                self.gamma
            )));
        }
        Ok(())
    }

    /// Build the random stream shared by construction and every move.
    pub fn rng(&self) -> ChaCha8Rng {
        if self.seed == 0 {
            ChaCha8Rng::from_entropy()
        } else {
            ChaCha8Rng::seed_from_u64(self.seed)
        }
    }
}
