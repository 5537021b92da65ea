//! Reporting helpers for TTSA runs.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Duration;

use crate::annealing::TtsaResult;
use crate::error::TtsaError;
use crate::problem::Problem;
use crate::schedule::Schedule;

/// Format a duration as hours, minutes, and seconds.
pub fn format_duration(duration: Duration) -> String {
    let total_seconds = duration.as_secs();
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}h {:02}m {:02}s", hours, minutes, seconds)
}

/// Format an objective value, with `inf` for "never reached".
pub fn format_objective(value: f64) -> String {
    if value.is_finite() {
        format!("{:.2}", value)
    } else {
        "inf".to_string()
    }
}

/// Save a plain-text report of a run.
pub fn save_result<P: AsRef<Path>>(
    result: &TtsaResult,
    problem: &Problem,
    path: P,
) -> Result<(), TtsaError> {
    let mut file = BufWriter::new(File::create(path)?);

    writeln!(file, "TTSA result for instance: {}", problem.name)?;
    writeln!(file, "Best Feasible: {}", format_objective(result.best_feasible))?;
    writeln!(
        file,
        "Best Infeasible: {}",
        format_objective(result.best_infeasible)
    )?;
    writeln!(file, "Final Travel Cost: {:.2}", result.evaluation.travel_cost)?;
    writeln!(file, "Final Violations: {}", result.evaluation.violations)?;
    writeln!(file)?;
    writeln!(file, "Final Schedule:")?;
    write!(file, "{}", result.schedule)?;

    if let Some(best) = &result.best_feasible_schedule {
        writeln!(file)?;
        writeln!(file, "Best Feasible Schedule:")?;
        write!(file, "{}", best)?;
    }

    file.flush()?;
    Ok(())
}

/// Save a run as JSON.
pub fn save_result_json<P: AsRef<Path>>(result: &TtsaResult, path: P) -> Result<(), TtsaError> {
    let file = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(file, result)?;
    Ok(())
}

/// Statistics about the search process.
pub struct SearchStatistics {
    pub iterations: u64,
    pub accepted: u64,
    pub improvements: u64,
    pub runtime: Duration,
    pub best_feasible: f64,
    pub best_infeasible: f64,
    pub final_temperature: f64,
    pub final_penalty: f64,
}

impl SearchStatistics {
    pub fn from_result(result: &TtsaResult) -> Self {
        SearchStatistics {
            iterations: result.iterations,
            accepted: result.accepted,
            improvements: result.improvements,
            runtime: result.run_time,
            best_feasible: result.best_feasible,
            best_infeasible: result.best_infeasible,
            final_temperature: result.final_temperature,
            final_penalty: result.final_penalty,
        }
    }

    /// Format the statistics as a string.
    pub fn format(&self) -> String {
        let acceptance = if self.iterations > 0 {
            100.0 * self.accepted as f64 / self.iterations as f64
        } else {
            0.0
        };

        format!(
            "Search Statistics:
- Iterations: {}
- Accepted Moves: {} ({:.1}%)
- New Bests: {}
- Runtime: {}
- Best Feasible: {}
- Best Infeasible: {}
- Final Temperature: {:.4}
- Final Penalty: {:.2}",
            self.iterations,
            self.accepted,
            acceptance,
            self.improvements,
            format_duration(self.runtime),
            format_objective(self.best_feasible),
            format_objective(self.best_infeasible),
            self.final_temperature,
            self.final_penalty
        )
    }
}

/// Print a schedule with a round header.
pub fn print_schedule(schedule: &Schedule) {
    print!("    ");
    for round in 1..=schedule.number_of_rounds() {
        print!("{:>4}", round);
    }
    println!();
    print!("{}", schedule);
}
