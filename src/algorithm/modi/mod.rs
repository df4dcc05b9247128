//! # MODI refinement
//!
//! The modified distribution method improves a basic feasible solution until it is optimal. Each
//! iteration derives node potentials from the basis, looks for a non basic cell with a negative
//! reduced cost and moves as much flow as possible around the stepping stone loop that the cell
//! closes with the basis tree.
use log::{debug, info};
use thiserror::Error;

use crate::algorithm::modi::basis::{Basis, Node};
use crate::algorithm::modi::pivot_rule::{FirstNegative, MostNegative, PivotRule};
use crate::algorithm::modi::potentials::Potentials;
use crate::data::allocation::{Allocation, Cell, Infeasibility};
use crate::data::number_types::traits::Quantity;
use crate::data::problem::Problem;

pub mod basis;
pub mod pivot_rule;
pub mod potentials;

/// Limits on the refinement process.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct RefinerConfig {
    /// Give up after this many pivots.
    pub max_iterations: Option<usize>,
    /// After this many consecutive pivots that didn't move any flow, entering cells are selected
    /// with Bland's rule until flow moves again.
    pub degenerate_pivot_limit: usize,
}

impl Default for RefinerConfig {
    fn default() -> Self {
        Self {
            max_iterations: None,
            degenerate_pivot_limit: 50,
        }
    }
}

/// Counters collected while refining.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct RefineStats {
    /// Basis changes.
    pub pivots: usize,
    /// Basis changes with `theta == 0`.
    pub degenerate_pivots: usize,
    /// Zero valued cells made basic to connect the basis tree.
    pub artificial_cells: usize,
    /// Cycles among the initially basic cells that were removed by shifting flow.
    pub cycles_cancelled: usize,
}

/// Outcome of a single iteration.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Step<T> {
    /// No reduced cost is negative; nothing changed.
    Optimal,
    /// One cell entered the basis and another one left it.
    Pivot {
        /// Cell that became basic.
        entering: Cell,
        /// Cell that stopped being basic.
        leaving: Cell,
        /// Quantity moved around the loop.
        theta: T,
        /// Reduced cost of the entering cell before the pivot.
        reduced_cost: T,
    },
}

/// An optimal allocation.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Refined<T> {
    /// The allocation, of which no non basic cell has a negative reduced cost.
    pub allocation: Allocation<T>,
    /// Counters of the run that produced it.
    pub stats: RefineStats,
}

/// Reasons the refiner could not reach an optimum.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum RefineError {
    /// Nodes stayed disconnected from the basis tree after adding zero valued cells.
    #[error("basis could not be completed, {unreached} nodes remain unreached")]
    DegenerateBasis {
        /// Number of nodes without a potential.
        unreached: usize,
    },
    /// The entering cell is not connected to the basis tree through a path.
    #[error("no stepping stone loop exists for entering cell {entering:?}")]
    NoImprovingLoop {
        /// The cell that should have entered the basis.
        entering: Cell,
    },
    /// Still not optimal after the configured number of pivots.
    #[error("no optimum reached within {limit} pivots")]
    IterationLimit {
        /// The configured limit.
        limit: usize,
    },
    /// The allocation doesn't have the shape of the problem.
    #[error(
        "allocation of {allocation:?} cells does not fit a problem with {supplies} supplies and {demands} demands"
    )]
    Dimensions {
        /// Number of supply nodes of the problem.
        supplies: usize,
        /// Number of demand nodes of the problem.
        demands: usize,
        /// Rows and columns of the allocation.
        allocation: (usize, usize),
    },
    /// The allocation doesn't meet all supplies and demands.
    #[error("allocation is not feasible")]
    Infeasible(#[from] Infeasibility),
}

/// Improves an allocation one pivot at a time.
///
/// The basis is kept as a tree over the supply and demand nodes. The flags of the allocation
/// mirror it: a cell is flagged basic exactly when it is an edge of the tree.
#[derive(Debug)]
pub struct Refiner<'a, T> {
    problem: &'a Problem<T>,
    allocation: Allocation<T>,
    basis: Basis,
    config: RefinerConfig,
    stats: RefineStats,
    /// Pivots in a row with `theta == 0`.
    consecutive_degenerate: usize,
}

impl<'a, T: Quantity> Refiner<'a, T> {
    /// Take ownership of an allocation and build a basis tree from its basic cells.
    ///
    /// Flagged cells that would close a cycle with previously inserted cells are brought into the
    /// tree by shifting flow around that cycle, in the direction that doesn't increase the cost.
    ///
    /// # Errors
    ///
    /// If the allocation doesn't match the problem's dimensions or is not feasible.
    pub fn new(
        problem: &'a Problem<T>,
        allocation: Allocation<T>,
        config: RefinerConfig,
    ) -> Result<Self, RefineError> {
        let dimensions = (allocation.nr_supplies(), allocation.nr_demands());
        if dimensions != (problem.nr_supplies(), problem.nr_demands()) {
            return Err(RefineError::Dimensions {
                supplies: problem.nr_supplies(),
                demands: problem.nr_demands(),
                allocation: dimensions,
            });
        }
        allocation.check_feasible(problem)?;

        let mut refiner = Self {
            problem,
            basis: Basis::empty(problem.nr_supplies(), problem.nr_demands()),
            allocation,
            config,
            stats: RefineStats::default(),
            consecutive_degenerate: 0,
        };
        refiner.load_basis();

        Ok(refiner)
    }

    /// The current allocation.
    pub fn allocation(&self) -> &Allocation<T> {
        &self.allocation
    }

    /// The current basis tree.
    pub fn basis(&self) -> &Basis {
        &self.basis
    }

    /// Counters so far.
    pub fn stats(&self) -> RefineStats {
        self.stats
    }

    /// Total cost of the current allocation.
    pub fn cost(&self) -> T {
        self.allocation.total_cost(self.problem)
    }

    /// Perform one iteration.
    ///
    /// # Errors
    ///
    /// When the basis can't be completed to a spanning tree, when the entering cell has no loop or
    /// when the iteration limit is reached before the optimum.
    pub fn step(&mut self) -> Result<Step<T>, RefineError> {
        let potentials = self.potentials()?;

        let candidate = if self.consecutive_degenerate < self.config.degenerate_pivot_limit {
            MostNegative.select_entering(self.problem, &self.basis, &potentials)
        } else {
            FirstNegative.select_entering(self.problem, &self.basis, &potentials)
        };
        let Some((entering, reduced_cost)) = candidate else {
            return Ok(Step::Optimal);
        };

        if let Some(limit) = self.config.max_iterations {
            if self.stats.pivots >= limit {
                return Err(RefineError::IterationLimit { limit });
            }
        }

        let cycle = self.cycle_through(entering)
            .ok_or(RefineError::NoImprovingLoop { entering })?;
        let (theta, leaving) = self.shift(&cycle);

        self.basis.remove(leaving);
        self.allocation.set_basic(leaving, false);
        self.basis.insert(entering);
        self.allocation.set_basic(entering, true);

        self.stats.pivots += 1;
        if theta.is_zero() {
            self.stats.degenerate_pivots += 1;
            self.consecutive_degenerate += 1;
        } else {
            self.consecutive_degenerate = 0;
        }
        debug!(
            "Pivot {}: {:?} enters with reduced cost {}, {:?} leaves, theta = {}",
            self.stats.pivots, entering, reduced_cost, leaving, theta,
        );

        Ok(Step::Pivot { entering, leaving, theta, reduced_cost })
    }

    /// Iterate until the allocation is optimal.
    ///
    /// # Errors
    ///
    /// See `step`.
    pub fn run(mut self) -> Result<Refined<T>, RefineError> {
        while let Step::Pivot { .. } = self.step()? {}

        info!(
            "Optimal after {} pivots ({} degenerate), cost {}",
            self.stats.pivots, self.stats.degenerate_pivots, self.cost(),
        );

        Ok(Refined {
            allocation: self.allocation,
            stats: self.stats,
        })
    }

    /// Potentials for the current basis.
    ///
    /// If the basis doesn't span all nodes, zero valued cells are added until it does. Each added
    /// cell joins an unreached node to the component of supply node 0, such that the basis stays a
    /// forest. The cheapest such cell is chosen, smallest row and then column index on ties.
    fn potentials(&mut self) -> Result<Potentials<T>, RefineError> {
        let limit = self.problem.nr_supplies() + self.problem.nr_demands();

        for _ in 0..limit {
            let reach = match Potentials::compute(self.problem, &self.basis) {
                Ok(potentials) => return Ok(potentials),
                Err(reach) => reach,
            };

            let joining = (0..self.problem.nr_supplies())
                .flat_map(|i| (0..self.problem.nr_demands()).map(move |j| (i, j)))
                .filter(|&(i, j)| reach.supplies[i] != reach.demands[j])
                .min_by_key(|&(i, j)| (self.problem.cost(i, j), i, j));
            let Some(cell) = joining else {
                return Err(RefineError::DegenerateBasis { unreached: reach.nr_unreached() });
            };

            debug!("Basis doesn't reach {} nodes, adding zero cell {:?}", reach.nr_unreached(), cell);
            self.basis.insert(cell);
            self.allocation.set_basic(cell, true);
            self.stats.artificial_cells += 1;
        }

        Potentials::compute(self.problem, &self.basis)
            .map_err(|reach| RefineError::DegenerateBasis { unreached: reach.nr_unreached() })
    }

    /// Insert the flagged cells into the basis in row-major order, cancelling cycles on the way.
    fn load_basis(&mut self) {
        let flagged = self.allocation.basic_cells().collect::<Vec<_>>();

        for cell in flagged {
            match self.cycle_through(cell) {
                None => self.basis.insert(cell),
                Some(mut cycle) => {
                    if self.signed_cost(&cycle) > T::zero() {
                        // Reverse the direction: the cell itself now loses flow
                        cycle.rotate_left(1);
                    }
                    let (theta, leaving) = self.shift(&cycle);
                    self.allocation.set_basic(leaving, false);
                    if leaving != cell {
                        self.basis.remove(leaving);
                        self.basis.insert(cell);
                    }

                    self.stats.cycles_cancelled += 1;
                    debug!("Cancelled cycle through {:?}, moved {}, {:?} left", cell, theta, leaving);
                },
            }
        }
    }

    /// The stepping stone loop of a non basic cell.
    ///
    /// # Return value
    ///
    /// The cell itself followed by the basic cells on the tree path from its demand node back to
    /// its supply node, such that even positions gain flow and odd positions lose it. `None` if
    /// the nodes are not connected.
    fn cycle_through(&self, (i, j): Cell) -> Option<Vec<Cell>> {
        let path = self.basis.path(Node::Demand(j), Node::Supply(i))?;

        let mut cycle = Vec::with_capacity(path.len());
        cycle.push((i, j));
        cycle.extend(path.windows(2).map(|edge| edge[0].edge_to(edge[1])));

        Some(cycle)
    }

    /// Cost change per unit of flow moved around a cycle.
    fn signed_cost(&self, cycle: &[Cell]) -> T {
        cycle.iter()
            .enumerate()
            .map(|(position, &(i, j))| {
                let cost = self.problem.cost(i, j);
                if position % 2 == 0 { cost } else { -cost }
            })
            .sum()
    }

    /// Move the largest possible quantity around a cycle.
    ///
    /// # Return value
    ///
    /// The quantity moved and the losing cell that hit zero, the smallest one if there are several.
    fn shift(&mut self, cycle: &[Cell]) -> (T, Cell) {
        debug_assert!(cycle.len() >= 4 && cycle.len() % 2 == 0);

        let (theta, leaving) = cycle.iter()
            .skip(1)
            .step_by(2)
            .map(|&cell| (self.allocation[cell], cell))
            .min()
            .unwrap_or((T::zero(), cycle[0]));

        for (position, &cell) in cycle.iter().enumerate() {
            if position % 2 == 0 {
                self.allocation.allocate(cell, theta);
            } else {
                self.allocation.withdraw(cell, theta);
            }
        }

        (theta, leaving)
    }
}

/// Refine an allocation to optimality.
///
/// # Arguments
///
/// * `problem`: Problem the allocation was constructed for.
/// * `allocation`: Feasible allocation; its basic flags are used as the starting basis.
/// * `config`: Limits on the process.
///
/// # Return value
///
/// The optimal allocation with the statistics of the run.
pub fn refine<T: Quantity>(
    problem: &Problem<T>,
    allocation: Allocation<T>,
    config: RefinerConfig,
) -> Result<Refined<T>, RefineError> {
    Refiner::new(problem, allocation, config)?.run()
}
