//! # Pivot rules
//!
//! Strategies for choosing the cell that enters the basis.
use rayon::prelude::*;

use crate::algorithm::modi::basis::Basis;
use crate::algorithm::modi::potentials::Potentials;
use crate::data::allocation::Cell;
use crate::data::number_types::traits::Quantity;
use crate::data::problem::Problem;

/// Deciding which cell to bring into the basis.
///
/// Only non basic cells with a negative reduced cost are candidates. When there are none, the
/// current allocation is optimal.
pub trait PivotRule {
    /// Select an entering cell.
    ///
    /// # Return value
    ///
    /// The cell and its (negative) reduced cost, or `None` if no reduced cost is negative.
    fn select_entering<T: Quantity>(
        &self,
        problem: &Problem<T>,
        basis: &Basis,
        potentials: &Potentials<T>,
    ) -> Option<(Cell, T)>;
}

/// Dantzig's rule: the most negative reduced cost, smallest row and then column index on ties.
///
/// Rows are evaluated in parallel.
pub struct MostNegative;

impl PivotRule for MostNegative {
    fn select_entering<T: Quantity>(
        &self,
        problem: &Problem<T>,
        basis: &Basis,
        potentials: &Potentials<T>,
    ) -> Option<(Cell, T)> {
        (0..problem.nr_supplies()).into_par_iter()
            .filter_map(|i| {
                (0..problem.nr_demands())
                    .filter(|&j| !basis.contains((i, j)))
                    .map(|j| (potentials.reduced_cost(problem, i, j), j))
                    .filter(|(reduced_cost, _)| reduced_cost.is_negative())
                    .min()
                    .map(|(reduced_cost, j)| ((i, j), reduced_cost))
            })
            .min_by(|(a_cell, a), (b_cell, b)| a.cmp(b).then_with(|| a_cell.cmp(b_cell)))
    }
}

/// Bland's rule: the first cell in row-major order with a negative reduced cost.
///
/// Slower to converge than `MostNegative`, but combined with choosing the smallest leaving cell it
/// can't cycle on degenerate pivots.
pub struct FirstNegative;

impl PivotRule for FirstNegative {
    fn select_entering<T: Quantity>(
        &self,
        problem: &Problem<T>,
        basis: &Basis,
        potentials: &Potentials<T>,
    ) -> Option<(Cell, T)> {
        (0..problem.nr_supplies())
            .flat_map(|i| (0..problem.nr_demands()).map(move |j| (i, j)))
            .filter(|&cell| !basis.contains(cell))
            .map(|(i, j)| ((i, j), potentials.reduced_cost(problem, i, j)))
            .find(|(_, reduced_cost)| reduced_cost.is_negative())
    }
}
