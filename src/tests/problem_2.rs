//! Two by two, where every construction method hits a simultaneous row and column exhaustion.
use crate::data::allocation::Allocation;
use crate::data::problem::Problem;

pub const OPTIMAL_COST: i64 = 20;

pub fn problem() -> Problem<i64> {
    Problem::new(
        vec![10, 10],
        vec![10, 10],
        vec![
            vec![1, 2],
            vec![3, 1],
        ],
    ).unwrap()
}

/// Only two positive cells, one short of a basis.
pub fn optimal() -> Allocation<i64> {
    Allocation::from_rows(vec![
        vec![10, 0],
        vec![0, 10],
    ]).unwrap()
}
