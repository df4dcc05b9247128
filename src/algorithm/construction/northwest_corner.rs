//! # Northwest corner method
use crate::algorithm::construction::{ConstructionHeuristic, Remainders};
use crate::data::allocation::Allocation;
use crate::data::number_types::traits::Quantity;
use crate::data::problem::Problem;

/// Walk from the top left cell to the bottom right one, ignoring costs.
///
/// Allocate as much as possible in the current cell, then move down if the supply of the row is
/// exhausted, or right otherwise. Each step flags one cell basic, so when a row and column are
/// exhausted at the same time, the next cell enters the basis with value zero.
pub struct NorthwestCorner;

impl ConstructionHeuristic for NorthwestCorner {
    fn initial_allocation<T: Quantity>(&self, problem: &Problem<T>) -> Allocation<T> {
        let (n, m) = (problem.nr_supplies(), problem.nr_demands());
        let mut allocation = Allocation::zeros(n, m);
        let mut remainders = Remainders::new(problem);

        let (mut i, mut j) = (0, 0);
        while i < n && j < m {
            remainders.ship((i, j), &mut allocation);

            if !remainders.is_row_active(i) {
                i += 1;
            } else {
                j += 1;
            }
        }

        allocation
    }
}

#[cfg(test)]
mod test {
    use crate::algorithm::construction::{ConstructionHeuristic, NorthwestCorner};
    use crate::data::problem::Problem;
    use crate::tests::{problem_1, problem_2, problem_3};

    #[test]
    fn staircase() {
        let problem = problem_1::problem();
        let allocation = NorthwestCorner.initial_allocation(&problem);
        assert_eq!(allocation.to_rows(), problem_1::northwest_corner().to_rows());
        assert_eq!(allocation.total_cost(&problem), 515);
        assert_eq!(allocation.nr_basic(), problem.basis_size());

        let problem = problem_3::problem();
        let allocation = NorthwestCorner.initial_allocation(&problem);
        assert_eq!(allocation.to_rows(), problem_3::northwest_corner().to_rows());
        assert_eq!(allocation.total_cost(&problem), 1015);
    }

    #[test]
    fn zero_basic_cell_on_tie() {
        let problem = problem_2::problem();
        let allocation = NorthwestCorner.initial_allocation(&problem);
        assert_eq!(allocation.to_rows(), vec![vec![10, 0], vec![0, 10]]);
        // Row and column 0 run out together, the walk moves down and allocates zero
        assert!(allocation.is_basic((1, 0)));
        assert_eq!(allocation.nr_basic(), problem.basis_size());
        assert_eq!(allocation.nr_positive(), 2);
    }

    #[test]
    fn trailing_zero_demand() {
        let problem = Problem::new(vec![5], vec![5, 0], vec![vec![1, 1]]).unwrap();
        let allocation = NorthwestCorner.initial_allocation(&problem);
        assert_eq!(allocation.to_rows(), vec![vec![5, 0]]);
        // The walk leaves the matrix before reaching the last column
        assert_eq!(allocation.nr_basic(), 1);
    }
}
