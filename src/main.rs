//! Command-line front end for the TTSA solver.

use clap::Parser;
use log::error;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use ttsa::config::Config;
use ttsa::error::TtsaError;
use ttsa::evaluation::violation_count;
use ttsa::problem::Problem;
use ttsa::utils::{format_objective, print_schedule, save_result_json, SearchStatistics};
use ttsa::TtsaAlgorithm;

/// Traveling Tournament Problem using Simulated Annealing
#[derive(Debug, Parser)]
#[command(name = "ttsa", version, about)]
struct Cli {
    /// Number of teams (even) that should be scheduled
    #[arg(short = 'n', long = "number-teams")]
    number_teams: usize,

    /// Distance matrix file; defaults to data/nl{N}.txt
    #[arg(short, long)]
    distances: Option<PathBuf>,

    /// Random seed (0 picks one from the operating system)
    #[arg(short, long, default_value_t = 0)]
    seed: u64,

    /// Initial temperature
    #[arg(long, default_value_t = 400.0)]
    initial_temperature: f64,

    /// Cooling rate applied at every phase boundary
    #[arg(long, default_value_t = 0.9999)]
    beta: f64,

    /// Initial penalty weight
    #[arg(long, default_value_t = 4000.0)]
    omega: f64,

    /// Penalty growth on an infeasible best
    #[arg(long, default_value_t = 1.04)]
    delta: f64,

    /// Penalty shrink on a feasible best
    #[arg(long, default_value_t = 1.04)]
    theta: f64,

    /// Accepted for compatibility; unused
    #[arg(long, default_value_t = 0.6)]
    gamma: f64,

    /// Non-improving moves per phase
    #[arg(long, default_value_t = 5000)]
    max_c: u32,

    /// Phases per reheat
    #[arg(long, default_value_t = 7100)]
    max_p: u32,

    /// Maximum number of reheats
    #[arg(long, default_value_t = 10)]
    max_r: u32,

    /// Stop after this many iterations
    #[arg(long)]
    max_iterations: Option<u64>,

    /// Stop after this many seconds
    #[arg(long)]
    time_limit_secs: Option<u64>,

    /// Write the result as JSON to this file
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl Cli {
    fn config(&self) -> Config {
        let mut config = Config::new()
            .with_number_of_teams(self.number_teams)
            .with_seed(self.seed)
            .with_initial_temperature(self.initial_temperature)
            .with_cooling_rate(self.beta)
            .with_initial_penalty(self.omega)
            .with_infeasible_growth(self.delta)
            .with_feasible_shrink(self.theta)
            .with_gamma(self.gamma)
            .with_max_counter(self.max_c)
            .with_max_phases(self.max_p)
            .with_max_reheats(self.max_r);

        if let Some(iterations) = self.max_iterations {
            config = config.with_max_iterations(iterations);
        }
        if let Some(seconds) = self.time_limit_secs {
            config = config.with_time_limit(Duration::from_secs(seconds));
        }
        config
    }
}

fn run(cli: &Cli) -> Result<(), TtsaError> {
    let config = cli.config();
    config.validate()?;

    let path = cli
        .distances
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("data/nl{}.txt", cli.number_teams)));
    let problem = Problem::from_file(&path)?;
    let problem = if problem.number_of_teams() > cli.number_teams {
        problem.truncated(cli.number_teams)?
    } else {
        problem
    };

    let mut algorithm = TtsaAlgorithm::new(problem, config)?;
    let result = algorithm.run()?;

    println!("\nThe Final Schedule\n");
    print_schedule(&result.schedule);
    println!();
    println!("Travel Cost: {:.2}", result.evaluation.travel_cost);
    println!("Violations: {}", result.evaluation.violations);

    if let Some(best) = &result.best_feasible_schedule {
        println!(
            "\nThe Best Feasible Schedule ({})\n",
            format_objective(result.best_feasible)
        );
        print_schedule(best);
        println!("Violations: {}", violation_count(best));
    }

    println!();
    println!("{}", SearchStatistics::from_result(&result).format());

    if let Some(output) = &cli.output {
        save_result_json(&result, output)?;
        println!("Result written to {}", output.display());
    }

    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
