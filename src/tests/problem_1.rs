//! Two supply nodes, three demand nodes, non-degenerate.
use crate::data::allocation::Allocation;
use crate::data::problem::Problem;

pub const OPTIMAL_COST: i64 = 465;

pub fn problem() -> Problem<i64> {
    Problem::new(
        vec![20, 30],
        vec![10, 25, 15],
        vec![
            vec![8, 6, 10],
            vec![9, 12, 13],
        ],
    ).unwrap()
}

pub fn northwest_corner() -> Allocation<i64> {
    Allocation::from_rows(vec![
        vec![10, 10, 0],
        vec![0, 15, 15],
    ]).unwrap()
}

pub fn optimal() -> Allocation<i64> {
    Allocation::from_rows(vec![
        vec![0, 20, 0],
        vec![10, 5, 15],
    ]).unwrap()
}
