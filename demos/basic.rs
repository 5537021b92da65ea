//! Basic example of using the TTSA library.

use std::env;
use std::time::{Duration, Instant};
use ttsa::config::Config;
use ttsa::problem::Problem;
use ttsa::utils::{format_duration, format_objective, print_schedule, save_result};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Get instance path from command line or use default
    let args: Vec<String> = env::args().collect();
    let instance_path = if args.len() > 1 {
        &args[1]
    } else {
        "data/nl6.txt"
    };

    // Load problem
    println!("Loading distances from: {}", instance_path);
    let problem = Problem::from_file(instance_path)?;
    println!(
        "Loaded problem: {} with {} teams",
        problem.name,
        problem.number_of_teams()
    );

    // Configure algorithm
    let config = Config::new()
        .with_number_of_teams(problem.number_of_teams())
        .with_seed(42)
        .with_initial_temperature(400.0)
        .with_cooling_rate(0.9999)
        .with_initial_penalty(4000.0)
        .with_max_counter(100)
        .with_max_phases(50)
        .with_max_reheats(3)
        .with_time_limit(Duration::from_secs(60));

    // Create and run algorithm
    let mut algorithm = ttsa::TtsaAlgorithm::new(problem.clone(), config)?;

    println!("Starting search (time limit: 60s)");
    let start_time = Instant::now();
    let result = algorithm.run()?;
    let runtime = start_time.elapsed();

    // Print results
    println!("Search completed in {}", format_duration(runtime));
    println!("Best feasible: {}", format_objective(result.best_feasible));
    println!("Best infeasible: {}", format_objective(result.best_infeasible));
    if let Some(best) = &result.best_feasible_schedule {
        print_schedule(best);
    }

    // Save result
    let output_path = format!("{}.sol", problem.name);
    println!("Saving result to: {}", output_path);
    save_result(&result, &problem, &output_path)?;

    Ok(())
}
