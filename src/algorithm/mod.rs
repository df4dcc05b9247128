//! # Algorithms
//!
//! Construction of an initial allocation, refinement to optimality and the combination of both
//! over multiple heuristics.
pub mod construction;
pub mod modi;
pub mod portfolio;
