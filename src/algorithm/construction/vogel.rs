//! # Vogel's approximation method
//!
//! Each row and column gets a penalty: the extra cost paid when it can't use its cheapest option,
//! i.e. the difference between its two smallest costs. The line with the largest penalty is served
//! first, through its cheapest cell.
use itertools::Itertools;
use rayon::prelude::*;

use crate::algorithm::construction::{ConstructionHeuristic, Remainders};
use crate::data::allocation::Allocation;
use crate::data::number_types::traits::Quantity;
use crate::data::problem::Problem;

/// Serve the row or column with the largest penalty first.
///
/// Penalties are only computed over rows and columns that still have a positive remainder. When a
/// row and a column have the same penalty, the row is chosen. Penalties of different lines are
/// independent and computed in parallel.
pub struct VogelApproximation;

impl ConstructionHeuristic for VogelApproximation {
    fn initial_allocation<T: Quantity>(&self, problem: &Problem<T>) -> Allocation<T> {
        let (n, m) = (problem.nr_supplies(), problem.nr_demands());
        let mut allocation = Allocation::zeros(n, m);
        let mut remainders = Remainders::new(problem);

        loop {
            let rows = (0..n).filter(|&i| remainders.is_row_active(i)).collect::<Vec<_>>();
            let columns = (0..m).filter(|&j| remainders.is_column_active(j)).collect::<Vec<_>>();

            let row_penalty = largest_penalty(&rows, |i| columns.iter().map(move |&j| problem.cost(i, j)));
            let column_penalty = largest_penalty(&columns, |j| rows.iter().map(move |&i| problem.cost(i, j)));
            let (Some((row_penalty, i)), Some((column_penalty, j))) = (row_penalty, column_penalty) else {
                break;
            };

            let cell = if row_penalty >= column_penalty {
                cheapest(&columns, |j| problem.cost(i, j)).map(|j| (i, j))
            } else {
                cheapest(&rows, |i| problem.cost(i, j)).map(|i| (i, j))
            };
            let Some(cell) = cell else {
                break;
            };
            remainders.ship(cell, &mut allocation);
        }

        allocation
    }
}

/// Difference between the two smallest costs, or the only cost if there is just one.
fn penalty<T: Quantity>(costs: impl Iterator<Item = T>) -> Option<T> {
    let mut smallest = costs.k_smallest(2);
    match (smallest.next(), smallest.next()) {
        (Some(first), Some(second)) => Some(second - first),
        (Some(only), None) => Some(only),
        _ => None,
    }
}

/// The line with the largest penalty, preferring the smallest index on ties.
///
/// # Return value
///
/// The penalty and the line index, or `None` if there are no lines or no costs along them.
fn largest_penalty<T, F, I>(lines: &[usize], costs_along: F) -> Option<(T, usize)>
where
    T: Quantity,
    F: Fn(usize) -> I + Sync,
    I: Iterator<Item = T>,
{
    lines.par_iter()
        .filter_map(|&line| penalty(costs_along(line)).map(|value| (value, line)))
        .max_by(|(a, a_line), (b, b_line)| a.cmp(b).then_with(|| b_line.cmp(a_line)))
}

/// Cheapest of the other lines, smallest index on ties.
fn cheapest<T: Quantity>(lines: &[usize], cost: impl Fn(usize) -> T) -> Option<usize> {
    lines.iter().copied().min_by_key(|&line| (cost(line), line))
}
