//! # Transportation problems
//!
//! A balanced transportation problem: supply nodes, demand nodes and a unit cost for every pair.
//! Instances are validated once, at construction, and are immutable afterwards. They can be shared
//! between threads solving the same instance with different methods.
use std::fmt::{self, Display, Formatter};

use num_traits::NumCast;
use thiserror::Error;

use crate::data::number_types::traits::{checked_sum, Quantity};

/// A validated, balanced transportation problem.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Problem<T> {
    supplies: Vec<T>,
    demands: Vec<T>,
    /// Row-major, `supplies.len()` rows of `demands.len()` values.
    costs: Vec<T>,
    /// Sum of the supplies, equal to the sum of the demands.
    total: T,
}

impl<T: Quantity> Problem<T> {
    /// Create a new problem instance.
    ///
    /// # Arguments
    ///
    /// * `supplies`: Capacity of each supply node.
    /// * `demands`: Requirement of each demand node.
    /// * `costs`: One row per supply node, containing the unit cost towards each demand node.
    ///
    /// # Errors
    ///
    /// Checked in this order: there should be at least one node of each kind, the cost matrix
    /// should have one row per supply node and one column per demand node, no value can be
    /// negative and total supply should equal total demand.
    ///
    /// Finally, every total the algorithms compute should fit in `T`. These are the total supply,
    /// the cost of any feasible allocation (at most the total supply times the largest unit cost)
    /// and the node potentials and reduced costs (at most `2 (N + M) + 1` times the largest unit
    /// cost in absolute value).
    pub fn new(
        supplies: Vec<T>,
        demands: Vec<T>,
        costs: Vec<Vec<T>>,
    ) -> Result<Self, ProblemError<T>> {
        if supplies.is_empty() || demands.is_empty() {
            return Err(ProblemError::Empty);
        }

        if costs.len() != supplies.len() {
            return Err(ProblemError::ShapeMismatch(format!(
                "{} supply values but {} cost rows", supplies.len(), costs.len(),
            )));
        }
        if let Some((i, row)) = costs.iter().enumerate().find(|(_, row)| row.len() != demands.len()) {
            return Err(ProblemError::ShapeMismatch(format!(
                "{} demand values but cost row {} has {} values", demands.len(), i, row.len(),
            )));
        }

        if let Some(i) = supplies.iter().position(|s| s.is_negative()) {
            return Err(ProblemError::NegativeQuantity(Location::Supply(i)));
        }
        if let Some(j) = demands.iter().position(|d| d.is_negative()) {
            return Err(ProblemError::NegativeQuantity(Location::Demand(j)));
        }
        let negative_cost = costs.iter().enumerate()
            .find_map(|(i, row)| row.iter().position(|c| c.is_negative()).map(|j| (i, j)));
        if let Some((i, j)) = negative_cost {
            return Err(ProblemError::NegativeQuantity(Location::Cost(i, j)));
        }

        let supply = checked_sum(supplies.iter().copied())
            .ok_or(ProblemError::Overflow("total supply"))?;
        let demand = checked_sum(demands.iter().copied())
            .ok_or(ProblemError::Overflow("total demand"))?;
        if supply != demand {
            return Err(ProblemError::Unbalanced { supply, demand });
        }

        let costs = costs.into_iter().flatten().collect::<Vec<_>>();
        let max_cost = costs.iter().copied().max().unwrap_or_else(T::zero);
        if supply.checked_mul(&max_cost).is_none() {
            return Err(ProblemError::Overflow("total cost"));
        }
        let path_bound = 2 * (supplies.len() + demands.len()) + 1;
        let fits = <T as NumCast>::from(path_bound)
            .and_then(|bound| max_cost.checked_mul(&bound))
            .is_some();
        if !fits {
            return Err(ProblemError::Overflow("reduced cost"));
        }

        Ok(Self { supplies, demands, costs, total: supply })
    }

    /// Number of supply nodes, `N`.
    pub fn nr_supplies(&self) -> usize {
        self.supplies.len()
    }

    /// Number of demand nodes, `M`.
    pub fn nr_demands(&self) -> usize {
        self.demands.len()
    }

    /// Number of edges in a spanning tree over all nodes, `N + M - 1`.
    ///
    /// This is the size of a basis.
    pub fn basis_size(&self) -> usize {
        self.nr_supplies() + self.nr_demands() - 1
    }

    /// Capacity of every supply node.
    pub fn supplies(&self) -> &[T] {
        &self.supplies
    }

    /// Requirement of every demand node.
    pub fn demands(&self) -> &[T] {
        &self.demands
    }

    /// Unit cost of shipping from supply node `i` to demand node `j`.
    pub fn cost(&self, i: usize, j: usize) -> T {
        debug_assert!(i < self.nr_supplies() && j < self.nr_demands());

        self.costs[i * self.nr_demands() + j]
    }

    /// All unit costs from supply node `i`.
    pub fn cost_row(&self, i: usize) -> &[T] {
        debug_assert!(i < self.nr_supplies());

        let m = self.nr_demands();
        &self.costs[i * m..(i + 1) * m]
    }

    /// Sum of all supplies, which equals the sum of all demands.
    pub fn total_supply(&self) -> T {
        self.total
    }
}

impl<T: Quantity> Display for Problem<T> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        writeln!(f, "Transportation problem")?;
        writeln!(f, "Supplies: {}\tDemands: {}", self.nr_supplies(), self.nr_demands())?;

        let width = 8;
        write!(f, "{0:width$}", "", width = width)?;
        for demand in &self.demands {
            write!(f, "{0:>width$}", demand, width = width)?;
        }
        writeln!(f)?;

        for (i, supply) in self.supplies.iter().enumerate() {
            write!(f, "{0:<width$}", supply, width = width)?;
            for cost in self.cost_row(i) {
                write!(f, "{0:>width$}", cost, width = width)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

/// Reasons to refuse an instance.
///
/// These are detected before any algorithm runs; they are not recoverable.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum ProblemError<T> {
    /// There are no supply nodes or no demand nodes.
    #[error("problem needs at least one supply node and one demand node")]
    Empty,
    /// The cost matrix dimensions don't match the number of supply and demand nodes.
    ///
    /// The contained `String` is a message for the end user.
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),
    /// A supply, demand or cost is negative.
    #[error("negative value for {0}")]
    NegativeQuantity(Location),
    /// Total supply differs from total demand.
    ///
    /// Balancing with a dummy node changes the problem and is left to the caller.
    #[error("problem is unbalanced: total supply {supply} differs from total demand {demand}")]
    Unbalanced {
        /// Sum of all supplies.
        supply: T,
        /// Sum of all demands.
        demand: T,
    },
    /// A total that the algorithms compute with doesn't fit in the number type.
    #[error("{0} overflows the number type")]
    Overflow(&'static str),
}

/// Position of a value in a problem.
#[allow(missing_docs)]
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Location {
    Supply(usize),
    Demand(usize),
    Cost(usize, usize),
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Location::Supply(i) => write!(f, "supply {}", i),
            Location::Demand(j) => write!(f, "demand {}", j),
            Location::Cost(i, j) => write!(f, "cost ({}, {})", i, j),
        }
    }
}

#[cfg(test)]
mod test {
    use crate::data::problem::{Location, Problem, ProblemError};
    use crate::tests::problem_1;

    #[test]
    fn valid() {
        let problem = problem_1::problem();
        assert_eq!(problem.nr_supplies(), 2);
        assert_eq!(problem.nr_demands(), 3);
        assert_eq!(problem.basis_size(), 4);
        assert_eq!(problem.cost(1, 2), 13);
        assert_eq!(problem.cost_row(0), &[8, 6, 10]);
        assert_eq!(problem.total_supply(), 50);
    }

    #[test]
    fn empty() {
        assert_eq!(
            Problem::<i32>::new(vec![], vec![1], vec![]),
            Err(ProblemError::Empty),
        );
        assert_eq!(
            Problem::<i32>::new(vec![1], vec![], vec![vec![]]),
            Err(ProblemError::Empty),
        );
    }

    #[test]
    fn shape_mismatch() {
        let result = Problem::new(vec![1, 1], vec![2], vec![vec![1]]);
        assert!(matches!(result, Err(ProblemError::ShapeMismatch(_))));

        let result = Problem::new(vec![1, 1], vec![1, 1], vec![vec![1, 2], vec![3]]);
        assert!(matches!(result, Err(ProblemError::ShapeMismatch(_))));
    }

    #[test]
    fn negative() {
        assert_eq!(
            Problem::new(vec![-1, 2], vec![1], vec![vec![1], vec![1]]),
            Err(ProblemError::NegativeQuantity(Location::Supply(0))),
        );
        assert_eq!(
            Problem::new(vec![1], vec![2, -1], vec![vec![1, 1]]),
            Err(ProblemError::NegativeQuantity(Location::Demand(1))),
        );
        assert_eq!(
            Problem::new(vec![1, 1], vec![2], vec![vec![1], vec![-3]]),
            Err(ProblemError::NegativeQuantity(Location::Cost(1, 0))),
        );
    }

    #[test]
    fn unbalanced() {
        let result = Problem::new(vec![5, 5], vec![3, 4], vec![vec![1, 2], vec![3, 4]]);
        assert_eq!(result, Err(ProblemError::Unbalanced { supply: 10, demand: 7 }));
        assert_eq!(
            result.unwrap_err().to_string(),
            "problem is unbalanced: total supply 10 differs from total demand 7",
        );
    }

    #[test]
    fn overflow() {
        assert_eq!(
            Problem::new(vec![i64::MAX, 1], vec![0], vec![vec![1], vec![1]]),
            Err(ProblemError::Overflow("total supply")),
        );
        assert_eq!(
            Problem::new(vec![1], vec![i8::MAX, 1, -1], vec![vec![1, 1, 1]]),
            Err(ProblemError::NegativeQuantity(Location::Demand(2))),
        );
        assert_eq!(
            Problem::new(vec![1], vec![i8::MAX, 1], vec![vec![1, 1]]),
            Err(ProblemError::Overflow("total demand")),
        );
        // 100 units at a unit cost of 2 don't fit in an i8
        assert_eq!(
            Problem::new(vec![50_i8, 50], vec![100], vec![vec![1], vec![2]]),
            Err(ProblemError::Overflow("total cost")),
        );
        // 2 (2 + 2) + 1 = 9 times the largest cost exceeds 127
        assert_eq!(
            Problem::new(vec![1_i8, 0], vec![0, 1], vec![vec![15, 0], vec![0, 0]]),
            Err(ProblemError::Overflow("reduced cost")),
        );
        assert!(Problem::new(vec![1_i8, 0], vec![0, 1], vec![vec![14, 0], vec![0, 0]]).is_ok());
        assert_eq!(
            Problem::<i32>::new(vec![i32::MAX], vec![i32::MAX], vec![vec![0]]).unwrap().total_supply(),
            i32::MAX,
        );
        assert_eq!(
            ProblemError::<i64>::Overflow("total supply").to_string(),
            "total supply overflows the number type",
        );
    }

    #[test]
    fn display() {
        let text = problem_1::problem().to_string();
        assert!(text.starts_with("Transportation problem\nSupplies: 2\tDemands: 3\n"));
        assert_eq!(text.lines().count(), 5);
    }
}
