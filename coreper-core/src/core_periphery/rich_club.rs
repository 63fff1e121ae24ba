//! Rich-club threshold extraction.

use crate::{
    coloring::{Color, Coloring},
    graph::Graph,
};

pub(super) fn extract(graph: &Graph) -> Coloring {
    let mut coloring = Coloring::new(graph.node_count(), Color::Periphery);
    let mut inside_core = 0_usize;
    // Upper bound on the edges that can still end up inside the periphery.
    let mut inside_periphery = graph.edge_count();

    for node in graph.nodes_by_descending_degree() {
        for &neighbor in graph.neighbors(node) {
            if coloring.get(neighbor) == Color::Core {
                inside_core += 1;
            } else {
                inside_periphery -= 1;
            }
        }
        coloring.set(node, Color::Core);

        if inside_core > inside_periphery {
            break;
        }
    }
    coloring
}
