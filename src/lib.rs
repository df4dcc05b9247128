//! # A transportation problem solver
//!
//! Balanced transportation problems are solved in two stages. A construction heuristic finds an
//! initial basic feasible solution, after which the modified distribution (MODI) method, also
//! known as the stepping stone method, pivots it to optimality. Several heuristics can be raced
//! against each other; they all end up at the same optimal cost.
#![warn(missing_docs)]

pub mod algorithm;
pub mod data;
pub mod io;

#[cfg(test)]
mod tests;
