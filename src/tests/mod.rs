//! # Problems shared by the unit tests.
//!
//! Convention for function names:
//!
//! * `fn problem()`
//! * `fn northwest_corner()`, `fn least_cost()`, `fn vogel()`: initial allocations
//! * `fn optimal()`
//! * `const OPTIMAL_COST`
pub mod problem_1;
pub mod problem_2;
