//! Edge-type statistics for a colored graph.

use crate::{
    coloring::{Color, Coloring},
    graph::Graph,
};

/// Number of undirected edges by the colors of their endpoints.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct EdgeTally {
    /// Edges with both endpoints in the core.
    pub core_core: usize,
    /// Edges joining the core to the periphery.
    pub core_periphery: usize,
    /// Edges with both endpoints in the periphery.
    pub periphery_periphery: usize,
}

impl EdgeTally {
    /// Returns the total number of tallied edges.
    #[must_use]
    pub fn total(&self) -> usize {
        self.core_core + self.core_periphery + self.periphery_periphery
    }

    /// Derives dominance and robustness from the tally.
    #[must_use]
    pub fn metrics(&self) -> CorePeripheryMetrics {
        CorePeripheryMetrics {
            dominance: self.core_periphery as f64 / self.periphery_periphery as f64,
            robustness: self.core_core as f64 / self.core_periphery as f64,
        }
    }
}

/// Descriptive ratios of a core-periphery split.
///
/// A zero denominator yields an infinite or `NaN` value rather than an error.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CorePeripheryMetrics {
    /// Mixed edges per periphery-internal edge.
    pub dominance: f64,
    /// Core-internal edges per mixed edge.
    pub robustness: f64,
}

/// Counts the edges of `graph` by endpoint colors under `coloring`.
///
/// `coloring` must cover every node of `graph`.
#[must_use]
pub fn edge_tally(graph: &Graph, coloring: &Coloring) -> EdgeTally {
    debug_assert_eq!(graph.node_count(), coloring.len(), "coloring size differs");
    let mut tally = EdgeTally::default();
    for source in graph.nodes() {
        let source_color = coloring.get(source);
        for &target in graph.neighbors(source) {
            if target < source {
                continue;
            }
            match (source_color, coloring.get(target)) {
                (Color::Core, Color::Core) => tally.core_core += 1,
                (Color::Periphery, Color::Periphery) => tally.periphery_periphery += 1,
                _ => tally.core_periphery += 1,
            }
        }
    }
    tally
}

/// Computes dominance and robustness of `coloring` over `graph`.
///
/// # Examples
/// ```
/// use coreper_core::{Color, Coloring, GraphBuilder, dominance_and_robustness};
///
/// let graph = GraphBuilder::new()
///     .build_from_edges([("0", "1"), ("1", "2"), ("2", "3"), ("3", "0")]);
/// let mut coloring = Coloring::new(4, Color::Periphery);
/// coloring.set(0, Color::Core);
/// coloring.set(1, Color::Core);
///
/// let metrics = dominance_and_robustness(&graph, &coloring);
/// assert_eq!(metrics.dominance, 2.0);
/// assert_eq!(metrics.robustness, 0.5);
/// ```
#[must_use]
pub fn dominance_and_robustness(graph: &Graph, coloring: &Coloring) -> CorePeripheryMetrics {
    edge_tally(graph, coloring).metrics()
}
