//! Immutable undirected graph in compressed sparse row form.
//!
//! A [`Graph`] is produced once by [`GraphBuilder`] and never mutated. Node
//! identifiers are dense integers in `0..node_count()`; the original tokens
//! from the edge list are kept only for reporting.

mod builder;

use std::ops::Range;

use crate::rng::RandomSource;

pub use self::builder::GraphBuilder;

/// Dense internal node identifier.
pub type NodeId = usize;

/// Connected, symmetric, loop-free graph.
///
/// `neighbors[offsets[v]..offsets[v + 1]]` lists the neighbors of `v` in
/// ascending order. Every undirected edge is stored once per direction.
///
/// # Examples
/// ```
/// use coreper_core::GraphBuilder;
///
/// let graph = GraphBuilder::new().build_from_edges([("a", "b"), ("b", "c")]);
/// assert_eq!(graph.node_count(), 3);
/// assert_eq!(graph.edge_count(), 2);
/// assert_eq!(graph.neighbors(1), &[0, 2]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    name: String,
    external_names: Vec<String>,
    offsets: Vec<usize>,
    neighbors: Vec<NodeId>,
}

impl Graph {
    pub(crate) fn from_parts(
        name: String,
        external_names: Vec<String>,
        offsets: Vec<usize>,
        neighbors: Vec<NodeId>,
    ) -> Self {
        debug_assert_eq!(offsets.len(), external_names.len() + 1);
        debug_assert_eq!(offsets.last().copied(), Some(neighbors.len()));
        Self {
            name,
            external_names,
            offsets,
            neighbors,
        }
    }

    /// Returns the data-source name the graph was built from.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.external_names.len()
    }

    /// Returns whether the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.external_names.is_empty()
    }

    /// Returns the number of undirected edges, each counted once.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.neighbors.len() / 2
    }

    /// Returns the sum of all degrees, i.e. twice the edge count.
    #[must_use]
    pub fn volume(&self) -> usize {
        self.neighbors.len()
    }

    /// Iterates over every internal node identifier.
    #[must_use]
    pub fn nodes(&self) -> Range<NodeId> {
        0..self.node_count()
    }

    /// Returns the degree of `node`.
    #[must_use]
    pub fn degree(&self, node: NodeId) -> usize {
        self.offsets[node + 1] - self.offsets[node]
    }

    /// Returns the neighbors of `node` in ascending order.
    ///
    /// The slice borrows the graph's storage; iterating it again restarts
    /// from the first neighbor.
    #[must_use]
    pub fn neighbors(&self, node: NodeId) -> &[NodeId] {
        &self.neighbors[self.offsets[node]..self.offsets[node + 1]]
    }

    /// Returns the edge-list token `node` was created from.
    #[must_use]
    pub fn external_name(&self, node: NodeId) -> &str {
        &self.external_names[node]
    }

    /// Returns all nodes ordered by descending degree.
    ///
    /// Ties keep ascending node order. This allocates a full permutation of
    /// the node set and is meant for one-off use, not for inner loops.
    #[must_use]
    pub fn nodes_by_descending_degree(&self) -> Vec<NodeId> {
        let mut order: Vec<NodeId> = self.nodes().collect();
        order.sort_by_key(|&node| std::cmp::Reverse(self.degree(node)));
        order
    }

    /// Picks a uniformly random neighbor of `node`.
    ///
    /// `node` must have at least one neighbor; this is only checked in debug
    /// builds.
    pub fn random_neighbor(&self, node: NodeId, rng: &mut RandomSource) -> NodeId {
        let degree = self.degree(node);
        debug_assert!(degree > 0, "node {node} has no neighbors");
        let offset = rng.uniform_inclusive(0, degree - 1);
        self.neighbors[self.offsets[node] + offset]
    }
}

#[cfg(test)]
mod tests;
