//! # Construction heuristics
//!
//! Strategies to find an initial basic feasible solution. They differ in how much effort they put
//! into starting close to the optimum; none of them guarantees optimality.
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use enum_map::Enum;
use thiserror::Error;

use crate::data::allocation::{Allocation, Infeasibility};
use crate::data::number_types::traits::Quantity;
use crate::data::problem::Problem;

pub use least_cost::LeastCost;
pub use northwest_corner::NorthwestCorner;
pub use vogel::VogelApproximation;

pub mod least_cost;
pub mod northwest_corner;
pub mod vogel;

/// Deciding where to ship first.
///
/// Each implementation consumes a validated problem and produces an allocation that meets all
/// supplies and demands. Every cell that received an allocation is flagged as basic, also when the
/// allocated quantity was zero.
pub trait ConstructionHeuristic {
    /// Compute an initial allocation.
    ///
    /// Works on private copies of the supplies and demands; the problem is only read.
    fn initial_allocation<T: Quantity>(&self, problem: &Problem<T>) -> Allocation<T>;
}

/// The available construction heuristics.
#[derive(Enum, Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum Heuristic {
    /// See `NorthwestCorner`.
    NorthwestCorner,
    /// See `LeastCost`.
    LeastCost,
    /// See `VogelApproximation`.
    VogelApproximation,
}

impl Heuristic {
    /// All heuristics, from least to most effort.
    pub const ALL: [Heuristic; 3] = [
        Heuristic::NorthwestCorner,
        Heuristic::LeastCost,
        Heuristic::VogelApproximation,
    ];

    /// Run this heuristic and verify that its output is feasible.
    ///
    /// # Errors
    ///
    /// When the heuristic left a supply or demand unmet. This should not happen for a validated
    /// problem and indicates a bug; the allocation is not returned.
    pub fn construct<T: Quantity>(
        self,
        problem: &Problem<T>,
    ) -> Result<Allocation<T>, ConstructionError> {
        let allocation = match self {
            Heuristic::NorthwestCorner => NorthwestCorner.initial_allocation(problem),
            Heuristic::LeastCost => LeastCost.initial_allocation(problem),
            Heuristic::VogelApproximation => VogelApproximation.initial_allocation(problem),
        };

        allocation.check_feasible(problem)
            .map_err(|violation| ConstructionError { heuristic: self, violation })?;
        debug_assert!(allocation.nr_positive() <= problem.basis_size());

        Ok(allocation)
    }

    /// Short name, as accepted by the `FromStr` implementation.
    pub fn name(self) -> &'static str {
        match self {
            Heuristic::NorthwestCorner => "northwest",
            Heuristic::LeastCost => "least-cost",
            Heuristic::VogelApproximation => "vogel",
        }
    }
}

impl Display for Heuristic {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Heuristic {
    type Err = UnknownHeuristic;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "northwest" | "northwest-corner" | "nw" => Ok(Heuristic::NorthwestCorner),
            "least-cost" | "leastcost" | "lc" => Ok(Heuristic::LeastCost),
            "vogel" | "vam" => Ok(Heuristic::VogelApproximation),
            _ => Err(UnknownHeuristic(s.to_string())),
        }
    }
}

/// A heuristic name that could not be recognised.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
#[error("unknown heuristic \"{0}\", expected one of: northwest, least-cost, vogel")]
pub struct UnknownHeuristic(pub String);

/// A heuristic produced an allocation that doesn't meet all supplies and demands.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
#[error("{heuristic} heuristic produced an infeasible allocation")]
pub struct ConstructionError {
    /// Heuristic that failed.
    pub heuristic: Heuristic,
    /// First constraint found to be violated.
    #[source]
    pub violation: Infeasibility,
}

/// Remaining supply and demand while a heuristic is allocating.
#[derive(Debug, Clone)]
pub(crate) struct Remainders<T> {
    pub supplies: Vec<T>,
    pub demands: Vec<T>,
}

impl<T: Quantity> Remainders<T> {
    pub fn new(problem: &Problem<T>) -> Self {
        Self {
            supplies: problem.supplies().to_vec(),
            demands: problem.demands().to_vec(),
        }
    }

    /// Ship as much as possible over a cell: the minimum of both remainders.
    pub fn ship(&mut self, (i, j): (usize, usize), allocation: &mut Allocation<T>) -> T {
        let quantity = self.supplies[i].min(self.demands[j]);
        self.supplies[i] = self.supplies[i] - quantity;
        self.demands[j] = self.demands[j] - quantity;
        allocation.allocate((i, j), quantity);

        quantity
    }

    pub fn is_row_active(&self, i: usize) -> bool {
        self.supplies[i].is_positive()
    }

    pub fn is_column_active(&self, j: usize) -> bool {
        self.demands[j].is_positive()
    }
}

#[cfg(test)]
mod test {
    use crate::algorithm::construction::{Heuristic, UnknownHeuristic};
    use crate::tests::{problem_1, problem_2, problem_3};

    #[test]
    fn parse() {
        assert_eq!("northwest".parse(), Ok(Heuristic::NorthwestCorner));
        assert_eq!("LC".parse(), Ok(Heuristic::LeastCost));
        assert_eq!("vam".parse(), Ok(Heuristic::VogelApproximation));
        assert_eq!(
            "simplex".parse::<Heuristic>(),
            Err(UnknownHeuristic("simplex".to_string())),
        );
        for heuristic in Heuristic::ALL {
            assert_eq!(heuristic.to_string().parse(), Ok(heuristic));
        }
    }

    #[test]
    fn all_feasible() {
        for heuristic in Heuristic::ALL {
            for problem in [problem_1::problem(), problem_2::problem(), problem_3::problem()] {
                let allocation = heuristic.construct(&problem).unwrap();
                assert!(allocation.nr_positive() <= problem.basis_size());
                assert!(allocation.nr_basic() <= problem.basis_size());
            }
        }
    }

    #[test]
    fn effort_pays_off() {
        let problem = problem_3::problem();
        let cost = |heuristic: Heuristic| heuristic.construct(&problem).unwrap().total_cost(&problem);

        assert!(cost(Heuristic::LeastCost) <= cost(Heuristic::NorthwestCorner));
        assert!(cost(Heuristic::VogelApproximation) <= cost(Heuristic::LeastCost));
    }
}
