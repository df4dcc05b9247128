//! # Heuristic portfolio
//!
//! Every selected construction heuristic gets its own run: construct an initial allocation, then
//! refine it to optimality. The runs share nothing but the problem and are executed in parallel.
//! Because they all end at an optimum, they agree on the cost; they may differ in how much work
//! the refinement took.
use enum_map::EnumMap;
use itertools::Itertools;
use log::{info, warn};
use rayon::prelude::*;
use thiserror::Error;

use crate::algorithm::construction::{ConstructionError, Heuristic};
use crate::algorithm::modi::{refine, RefineError, RefineStats, RefinerConfig};
use crate::data::allocation::Allocation;
use crate::data::number_types::traits::Quantity;
use crate::data::problem::Problem;

/// Result of a single heuristic followed by refinement.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Run<T> {
    /// Heuristic that produced the initial allocation.
    pub heuristic: Heuristic,
    /// Cost of the initial allocation.
    pub initial_cost: T,
    /// The refined allocation.
    pub allocation: Allocation<T>,
    /// Cost of the refined allocation.
    pub cost: T,
    /// Refinement counters.
    pub stats: RefineStats,
}

/// Why a run, or the whole portfolio, did not produce a solution.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum SolveError {
    /// Nothing to run.
    #[error("no construction heuristic was selected")]
    NoHeuristics,
    /// The initial allocation was not feasible.
    #[error(transparent)]
    Construction(#[from] ConstructionError),
    /// The refiner failed on the heuristic's allocation.
    #[error("refining the {heuristic} allocation failed")]
    Refinement {
        /// Heuristic whose allocation was being refined.
        heuristic: Heuristic,
        /// What went wrong.
        #[source]
        source: RefineError,
    },
}

/// Outcome of all runs, by heuristic.
#[derive(Debug, Clone)]
pub struct Portfolio<T> {
    /// `None` for heuristics that were not selected.
    runs: EnumMap<Heuristic, Option<Result<Run<T>, SolveError>>>,
}

impl<T: Quantity> Portfolio<T> {
    /// The cheapest successful run, the earliest heuristic on ties.
    pub fn best(&self) -> Option<&Run<T>> {
        self.iter()
            .filter_map(|(_, result)| result.as_ref().ok())
            .min_by_key(|run| (run.cost, run.heuristic))
    }

    /// The cheapest successful run.
    ///
    /// # Errors
    ///
    /// If no run succeeded, the failure of the earliest heuristic.
    pub fn into_best(self) -> Result<Run<T>, SolveError> {
        let (successes, failures): (Vec<_>, Vec<_>) = self.runs.into_iter()
            .filter_map(|(_, result)| result)
            .partition_result();

        match successes.into_iter().min_by_key(|run| (run.cost, run.heuristic)) {
            Some(run) => Ok(run),
            None => Err(failures.into_iter().next().unwrap_or(SolveError::NoHeuristics)),
        }
    }

    /// The results of the heuristics that were run, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (Heuristic, &Result<Run<T>, SolveError>)> {
        self.runs.iter()
            .filter_map(|(heuristic, result)| result.as_ref().map(|result| (heuristic, result)))
    }

    /// Number of heuristics that were run.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Whether no heuristic was run.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Run each of the given heuristics, in parallel, and refine their allocations.
///
/// Duplicate heuristics are run once. A failing run is logged and kept in the portfolio; it
/// doesn't affect the other runs.
///
/// # Errors
///
/// Only when no heuristic was given.
pub fn solve_all<T: Quantity>(
    problem: &Problem<T>,
    heuristics: &[Heuristic],
    config: RefinerConfig,
) -> Result<Portfolio<T>, SolveError> {
    let heuristics = heuristics.iter().copied().unique().collect::<Vec<_>>();
    if heuristics.is_empty() {
        return Err(SolveError::NoHeuristics);
    }

    let results = heuristics.into_par_iter()
        .map(|heuristic| (heuristic, run(problem, heuristic, config)))
        .collect::<Vec<_>>();

    let mut runs = EnumMap::default();
    for (heuristic, result) in results {
        if let Err(error) = &result {
            warn!("Heuristic {} failed: {}", heuristic, error);
        }
        runs[heuristic] = Some(result);
    }

    Ok(Portfolio { runs })
}

/// Solve a problem to optimality, keeping the best of the given heuristics.
///
/// # Arguments
///
/// * `problem`: Validated problem.
/// * `heuristics`: Construction heuristics to start from.
/// * `config`: Limits for each refinement.
///
/// # Return value
///
/// The cheapest successful run, or the earliest failure if no run succeeded.
pub fn solve<T: Quantity>(
    problem: &Problem<T>,
    heuristics: &[Heuristic],
    config: RefinerConfig,
) -> Result<Run<T>, SolveError> {
    solve_all(problem, heuristics, config)?.into_best()
}

fn run<T: Quantity>(
    problem: &Problem<T>,
    heuristic: Heuristic,
    config: RefinerConfig,
) -> Result<Run<T>, SolveError> {
    let allocation = heuristic.construct(problem)?;
    let initial_cost = allocation.total_cost(problem);

    let refined = refine(problem, allocation, config)
        .map_err(|source| SolveError::Refinement { heuristic, source })?;
    let cost = refined.allocation.total_cost(problem);
    info!(
        "Heuristic {}: initial cost {}, optimal cost {} after {} pivots",
        heuristic, initial_cost, cost, refined.stats.pivots,
    );

    Ok(Run {
        heuristic,
        initial_cost,
        allocation: refined.allocation,
        cost,
        stats: refined.stats,
    })
}
