//! # Basis tree
//!
//! The basic cells of a transportation problem form a spanning tree over the bipartite graph of
//! supply and demand nodes: every basic cell (i, j) is an edge between supply node i and demand
//! node j. The tree is stored sparsely as adjacency lists.
use std::iter::once;

use fifo_set::FIFOSet;
use itertools::Either;

use crate::data::allocation::Cell;

/// A vertex of the bipartite graph.
#[allow(missing_docs)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum Node {
    Supply(usize),
    Demand(usize),
}

impl Node {
    /// The cell forming the edge between this node and `other`.
    ///
    /// Edges always connect a supply node to a demand node.
    pub fn edge_to(self, other: Node) -> Cell {
        match (self, other) {
            (Node::Supply(i), Node::Demand(j)) | (Node::Demand(j), Node::Supply(i)) => (i, j),
            _ => unreachable!("edges connect a supply node to a demand node"),
        }
    }
}

/// Adjacency lists of the basic cells.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Basis {
    /// For each supply node, the demand nodes it is connected with.
    rows: Vec<Vec<usize>>,
    /// For each demand node, the supply nodes it is connected with.
    columns: Vec<Vec<usize>>,
    len: usize,
}

impl Basis {
    /// A basis without any cells.
    pub fn empty(nr_supplies: usize, nr_demands: usize) -> Self {
        Self {
            rows: vec![Vec::new(); nr_supplies],
            columns: vec![Vec::new(); nr_demands],
            len: 0,
        }
    }

    /// Number of basic cells.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether there are no basic cells.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of supply nodes.
    pub fn nr_supplies(&self) -> usize {
        self.rows.len()
    }

    /// Number of demand nodes.
    pub fn nr_demands(&self) -> usize {
        self.columns.len()
    }

    /// Whether a cell is basic.
    pub fn contains(&self, (i, j): Cell) -> bool {
        self.rows[i].contains(&j)
    }

    pub(crate) fn insert(&mut self, (i, j): Cell) {
        debug_assert!(!self.contains((i, j)));

        self.rows[i].push(j);
        self.columns[j].push(i);
        self.len += 1;
    }

    pub(crate) fn remove(&mut self, (i, j): Cell) {
        debug_assert!(self.contains((i, j)));

        self.rows[i].retain(|&other| other != j);
        self.columns[j].retain(|&other| other != i);
        self.len -= 1;
    }

    /// Nodes connected to `node` by a basic cell.
    pub fn neighbours(&self, node: Node) -> impl Iterator<Item = Node> + '_ {
        match node {
            Node::Supply(i) => Either::Left(self.rows[i].iter().map(|&j| Node::Demand(j))),
            Node::Demand(j) => Either::Right(self.columns[j].iter().map(|&i| Node::Supply(i))),
        }
    }

    /// Path through the tree between two nodes.
    ///
    /// # Return value
    ///
    /// The nodes on the path, starting with `from` and ending with `to`, or `None` if the nodes
    /// are in different components.
    pub fn path(&self, from: Node, to: Node) -> Option<Vec<Node>> {
        let mut parents = vec![None; self.nr_supplies() + self.nr_demands()];
        let mut queue = once(from).collect::<FIFOSet<_>>();

        while let Some(node) = queue.pop() {
            if node == to {
                let mut path = vec![to];
                let mut current = to;
                while let Some(parent) = parents[self.id(current)] {
                    path.push(parent);
                    current = parent;
                }
                path.reverse();

                return Some(path);
            }

            for neighbour in self.neighbours(node) {
                if neighbour != from && parents[self.id(neighbour)].is_none() {
                    parents[self.id(neighbour)] = Some(node);
                    queue.push(neighbour);
                }
            }
        }

        None
    }

    /// Dense index of a node: supply nodes first, then demand nodes.
    fn id(&self, node: Node) -> usize {
        match node {
            Node::Supply(i) => i,
            Node::Demand(j) => self.nr_supplies() + j,
        }
    }
}
