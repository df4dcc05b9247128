//! # Least cost method
use itertools::iproduct;

use crate::algorithm::construction::{ConstructionHeuristic, Remainders};
use crate::data::allocation::Allocation;
use crate::data::number_types::traits::Quantity;
use crate::data::problem::Problem;

/// Repeatedly ship over the cheapest cell that can still take a shipment.
///
/// The candidates are recomputed after every shipment: only cells of which both the row and the
/// column have a positive remainder are considered. Ties are broken by the smallest row index, and
/// then the smallest column index.
pub struct LeastCost;

impl ConstructionHeuristic for LeastCost {
    fn initial_allocation<T: Quantity>(&self, problem: &Problem<T>) -> Allocation<T> {
        let (n, m) = (problem.nr_supplies(), problem.nr_demands());
        let mut allocation = Allocation::zeros(n, m);
        let mut remainders = Remainders::new(problem);

        while let Some(cell) = cheapest_open_cell(problem, &remainders) {
            remainders.ship(cell, &mut allocation);
        }

        allocation
    }
}

fn cheapest_open_cell<T: Quantity>(
    problem: &Problem<T>,
    remainders: &Remainders<T>,
) -> Option<(usize, usize)> {
    let rows = (0..problem.nr_supplies()).filter(|&i| remainders.is_row_active(i));
    let columns = (0..problem.nr_demands()).filter(|&j| remainders.is_column_active(j));

    iproduct!(rows, columns)
        .min_by_key(|&(i, j)| (problem.cost(i, j), i, j))
}
