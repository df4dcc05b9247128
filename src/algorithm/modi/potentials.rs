//! # Node potentials
//!
//! Dual values `u` for the supply nodes and `v` for the demand nodes, such that
//! `u[i] + v[j] == cost(i, j)` on every basic cell. Starting from `u[0] = 0`, the values follow
//! from each other along the edges of the basis tree.
use std::iter::once;

use fifo_set::FIFOSet;
use log::trace;

use crate::algorithm::modi::basis::{Basis, Node};
use crate::data::number_types::traits::Quantity;
use crate::data::problem::Problem;

/// Potentials for all nodes.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Potentials<T> {
    u: Vec<T>,
    v: Vec<T>,
}

/// Which nodes were reached while propagating potentials.
///
/// Returned when the basis does not span all nodes.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Reach {
    /// Per supply node.
    pub supplies: Vec<bool>,
    /// Per demand node.
    pub demands: Vec<bool>,
}

impl Reach {
    /// Number of nodes that could not be reached.
    pub fn nr_unreached(&self) -> usize {
        self.supplies.iter().chain(&self.demands).filter(|&&reached| !reached).count()
    }
}

impl<T: Quantity> Potentials<T> {
    /// Propagate potentials through the basis tree, breadth first from supply node 0.
    ///
    /// # Errors
    ///
    /// If the basis doesn't connect all nodes, some potentials can't be derived. The nodes that were
    /// reached are returned such that the basis can be extended.
    pub fn compute(problem: &Problem<T>, basis: &Basis) -> Result<Self, Reach> {
        let mut u = vec![None; problem.nr_supplies()];
        let mut v = vec![None; problem.nr_demands()];
        u[0] = Some(T::zero());

        let mut queue = once(Node::Supply(0)).collect::<FIFOSet<_>>();
        while let Some(node) = queue.pop() {
            for neighbour in basis.neighbours(node) {
                let (i, j) = node.edge_to(neighbour);
                match (node, u[i], v[j]) {
                    (Node::Supply(_), Some(u_i), None) => {
                        v[j] = Some(problem.cost(i, j) - u_i);
                        queue.push(neighbour);
                    },
                    (Node::Demand(_), None, Some(v_j)) => {
                        u[i] = Some(problem.cost(i, j) - v_j);
                        queue.push(neighbour);
                    },
                    _ => {},
                }
            }
        }

        if u.iter().chain(&v).all(Option::is_some) {
            let potentials = Self {
                u: u.into_iter().flatten().collect(),
                v: v.into_iter().flatten().collect(),
            };
            trace!("Potentials: u = {:?}, v = {:?}", potentials.u, potentials.v);

            Ok(potentials)
        } else {
            Err(Reach {
                supplies: u.iter().map(Option::is_some).collect(),
                demands: v.iter().map(Option::is_some).collect(),
            })
        }
    }

    /// Potential of supply node `i`.
    pub fn u(&self, i: usize) -> T {
        self.u[i]
    }

    /// Potential of demand node `j`.
    pub fn v(&self, j: usize) -> T {
        self.v[j]
    }

    /// Reduced cost `cost(i, j) - u[i] - v[j]`.
    ///
    /// Zero for basic cells. For a non basic cell, the change in total cost per unit shipped over
    /// that cell, when the flow is rebalanced along its stepping stone loop.
    pub fn reduced_cost(&self, problem: &Problem<T>, i: usize, j: usize) -> T {
        problem.cost(i, j) - self.u[i] - self.v[j]
    }
}
