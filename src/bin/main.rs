use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use transport_simplex::algorithm::construction::Heuristic;
use transport_simplex::algorithm::modi::RefinerConfig;
use transport_simplex::algorithm::portfolio::solve_all;
use transport_simplex::io::{export, import};

/// A transportation problem solver written in rust.
#[derive(Parser)]
#[command(version)]
struct Opts {
    /// File containing the problem description
    #[arg(default_value = "data/in.txt")]
    problem_file: PathBuf,
    /// File to write the solution to
    #[arg(default_value = "data/out.txt")]
    solution_file: PathBuf,
    /// Construction heuristics to start from, comma separated
    #[arg(long, value_delimiter = ',', default_values_t = Heuristic::ALL)]
    heuristic: Vec<Heuristic>,
    /// Give up refining after this many pivots
    #[arg(long)]
    max_iterations: Option<usize>,
    /// Consecutive degenerate pivots before switching to Bland's rule
    #[arg(long, default_value_t = RefinerConfig::default().degenerate_pivot_limit)]
    degenerate_pivot_limit: usize,
}

fn main() -> Result<()> {
    env_logger::init();
    let opts = Opts::parse();

    println!("Reading problem file: \"{}\"...", opts.problem_file.to_string_lossy());
    let problem = import::<i64>(&opts.problem_file)
        .with_context(|| format!("couldn't import {}", opts.problem_file.display()))?;
    info!("{} supply nodes, {} demand nodes", problem.nr_supplies(), problem.nr_demands());

    let config = RefinerConfig {
        max_iterations: opts.max_iterations,
        degenerate_pivot_limit: opts.degenerate_pivot_limit,
    };
    println!("Solving...");
    let portfolio = solve_all(&problem, &opts.heuristic, config)?;
    for (heuristic, result) in portfolio.iter() {
        match result {
            Ok(run) => println!(
                "{:>12}: initial cost {}, optimal cost {}, {} pivots ({} degenerate)",
                heuristic.name(), run.initial_cost, run.cost, run.stats.pivots, run.stats.degenerate_pivots,
            ),
            Err(error) => println!("{:>12}: failed: {}", heuristic.name(), error),
        }
    }
    let best = portfolio.into_best()?;

    export(&opts.solution_file, &best.allocation, best.cost)
        .with_context(|| format!("couldn't write {}", opts.solution_file.display()))?;
    println!("Solution computed, total cost {}.", best.cost);

    Ok(())
}
