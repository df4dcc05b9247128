//! # Allocations
//!
//! An allocation assigns a shipped quantity to every (supply, demand) pair. Next to the values, it
//! remembers which cells are basic: positive cells, and zero-valued cells that are kept in the
//! basis to resolve degeneracy.
use std::fmt::{self, Display, Formatter};
use std::ops::Index;

use itertools::{iproduct, Itertools};
use thiserror::Error;

use crate::data::number_types::traits::{checked_sum, Quantity};
use crate::data::problem::Problem;

/// A cell of the allocation matrix: (supply index, demand index).
pub type Cell = (usize, usize);

/// Dense allocation matrix with a basic flag per cell.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Allocation<T> {
    nr_supplies: usize,
    nr_demands: usize,
    /// Row-major.
    values: Vec<T>,
    /// Row-major, same layout as `values`.
    basic: Vec<bool>,
}

impl<T: Quantity> Allocation<T> {
    /// An allocation without any shipments or basic cells.
    pub fn zeros(nr_supplies: usize, nr_demands: usize) -> Self {
        Self {
            nr_supplies,
            nr_demands,
            values: vec![T::zero(); nr_supplies * nr_demands],
            basic: vec![false; nr_supplies * nr_demands],
        }
    }

    /// Create an allocation from plain rows of values.
    ///
    /// Exactly the positive cells are considered basic.
    ///
    /// # Errors
    ///
    /// If there are no rows or no columns, if the rows are not all of the same length or if a value
    /// is negative.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self, AllocationError> {
        let nr_supplies = rows.len();
        let nr_demands = rows.first().map_or(0, Vec::len);
        if nr_supplies == 0 || nr_demands == 0 {
            return Err(AllocationError::Empty);
        }
        if let Some((row, values)) = rows.iter().enumerate().find(|(_, row)| row.len() != nr_demands) {
            return Err(AllocationError::Ragged { row, len: values.len(), expected: nr_demands });
        }

        let values = rows.into_iter().flatten().collect::<Vec<_>>();
        if let Some(index) = values.iter().position(|value| value.is_negative()) {
            return Err(AllocationError::Negative((index / nr_demands, index % nr_demands)));
        }
        let basic = values.iter().map(|value| value.is_positive()).collect();

        Ok(Self { nr_supplies, nr_demands, values, basic })
    }

    /// Number of rows.
    pub fn nr_supplies(&self) -> usize {
        self.nr_supplies
    }

    /// Number of columns.
    pub fn nr_demands(&self) -> usize {
        self.nr_demands
    }

    /// Values shipped from supply node `i`.
    pub fn row(&self, i: usize) -> &[T] {
        debug_assert!(i < self.nr_supplies);

        &self.values[i * self.nr_demands..(i + 1) * self.nr_demands]
    }

    /// All rows, in order.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.values.chunks(self.nr_demands)
    }

    /// Copy of the values as nested vectors.
    pub fn to_rows(&self) -> Vec<Vec<T>> {
        self.rows().map(<[T]>::to_vec).collect()
    }

    /// Whether the cell is part of the basis.
    pub fn is_basic(&self, (i, j): Cell) -> bool {
        self.basic[self.offset(i, j)]
    }

    /// Basic cells in row-major order.
    pub fn basic_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        iproduct!(0..self.nr_supplies, 0..self.nr_demands)
            .filter(move |&cell| self.is_basic(cell))
    }

    /// Number of basic cells, including zero-valued ones.
    pub fn nr_basic(&self) -> usize {
        self.basic.iter().filter(|&&basic| basic).count()
    }

    /// Number of cells with a strictly positive shipment.
    pub fn nr_positive(&self) -> usize {
        self.values.iter().filter(|value| value.is_positive()).count()
    }

    /// Total cost `Σ X[i][j]·costs[i][j]` of this allocation.
    ///
    /// The cost of a feasible allocation always fits, `Problem::new` checks this. Other
    /// allocations may exceed the range of `T`; their cost saturates at `T::max_value()`.
    pub fn total_cost(&self, problem: &Problem<T>) -> T {
        self.checked_total_cost(problem).unwrap_or_else(T::max_value)
    }

    /// Total cost of this allocation, `None` if it doesn't fit in `T`.
    pub fn checked_total_cost(&self, problem: &Problem<T>) -> Option<T> {
        debug_assert_eq!(self.nr_supplies, problem.nr_supplies());
        debug_assert_eq!(self.nr_demands, problem.nr_demands());

        (0..self.nr_supplies)
            .flat_map(|i| self.row(i).iter().zip(problem.cost_row(i)))
            .try_fold(T::zero(), |total, (&value, &cost)| {
                value.checked_mul(&cost).and_then(|cost| total.checked_add(&cost))
            })
    }

    /// Check that every supply is shipped and every demand met exactly.
    ///
    /// # Errors
    ///
    /// The first violation found: a negative value, a row whose sum differs from its supply or a
    /// column whose sum differs from its demand.
    pub fn check_feasible(&self, problem: &Problem<T>) -> Result<(), Infeasibility> {
        debug_assert_eq!(self.nr_supplies, problem.nr_supplies());
        debug_assert_eq!(self.nr_demands, problem.nr_demands());

        if let Some(index) = self.values.iter().position(|value| value.is_negative()) {
            return Err(Infeasibility::Negative((index / self.nr_demands, index % self.nr_demands)));
        }
        for (i, &supply) in problem.supplies().iter().enumerate() {
            if checked_sum(self.row(i).iter().copied()) != Some(supply) {
                return Err(Infeasibility::Row(i));
            }
        }
        for (j, &demand) in problem.demands().iter().enumerate() {
            if checked_sum((0..self.nr_supplies).map(|i| self[(i, j)])) != Some(demand) {
                return Err(Infeasibility::Column(j));
            }
        }

        Ok(())
    }

    /// Ship `quantity` more over `cell` and make it basic.
    pub(crate) fn allocate(&mut self, (i, j): Cell, quantity: T) {
        let index = self.offset(i, j);
        self.values[index] = self.values[index] + quantity;
        self.basic[index] = true;
    }

    /// Ship `quantity` less over `cell`, leaving the basic flag untouched.
    pub(crate) fn withdraw(&mut self, (i, j): Cell, quantity: T) {
        let index = self.offset(i, j);
        debug_assert!(self.values[index] >= quantity);

        self.values[index] = self.values[index] - quantity;
    }

    pub(crate) fn set_basic(&mut self, (i, j): Cell, basic: bool) {
        let index = self.offset(i, j);
        self.basic[index] = basic;
    }

    fn offset(&self, i: usize, j: usize) -> usize {
        debug_assert!(i < self.nr_supplies && j < self.nr_demands);

        i * self.nr_demands + j
    }
}

impl<T: Quantity> Index<Cell> for Allocation<T> {
    type Output = T;

    fn index(&self, (i, j): Cell) -> &Self::Output {
        &self.values[self.offset(i, j)]
    }
}

/// One value per cell, space separated, one line per supply node.
impl<T: Quantity> Display for Allocation<T> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        for row in self.rows() {
            writeln!(f, "{}", row.iter().join(" "))?;
        }

        Ok(())
    }
}

/// Reasons to refuse plain rows as an allocation.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum AllocationError {
    /// There are no rows, or the rows are empty.
    #[error("allocation needs at least one row and one column")]
    Empty,
    /// A row differs in length from the first row.
    #[error("allocation row {row} has {len} values, expected {expected}")]
    Ragged {
        /// Index of the row.
        row: usize,
        /// Its length.
        len: usize,
        /// Length of the first row.
        expected: usize,
    },
    /// A shipment is negative.
    #[error("allocation cell {0:?} is negative")]
    Negative(Cell),
}

/// An allocation which does not satisfy all supplies and demands.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum Infeasibility {
    /// The values in this row don't add up to the supply.
    #[error("row {0} does not sum to its supply")]
    Row(usize),
    /// The values in this column don't add up to the demand.
    #[error("column {0} does not sum to its demand")]
    Column(usize),
    /// A shipment is negative.
    #[error("cell {0:?} is negative")]
    Negative(Cell),
}
