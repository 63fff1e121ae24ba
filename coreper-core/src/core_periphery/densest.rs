//! Iterative densest-subgraph peeling.
//!
//! Each pass peels the current periphery by ascending residual degree and
//! remembers the node set that remained when density peaked. Peel steps that
//! leave the core with more volume than the periphery are not eligible as a
//! peak. The priority queue uses lazy deletion: entries for nodes that were
//! already peeled are skipped when popped.

use std::{cmp::Reverse, collections::BinaryHeap};

use tracing::debug;

use crate::{
    coloring::{Color, Coloring},
    graph::{Graph, NodeId},
};

#[derive(Debug, Clone, Copy)]
struct Volumes {
    core: usize,
    periphery: usize,
}

impl Volumes {
    fn promote(&mut self, degree: usize) {
        self.core += degree;
        self.periphery -= degree;
    }

    fn demote(&mut self, degree: usize) {
        self.core -= degree;
        self.periphery += degree;
    }
}

pub(super) fn extract(graph: &Graph) -> Coloring {
    let mut coloring = Coloring::new(graph.node_count(), Color::Periphery);
    let mut volumes = Volumes {
        core: 0,
        periphery: graph.volume(),
    };

    for pass in 1_usize.. {
        let promoted = densest_periphery_subgraph(graph, &coloring, volumes);
        debug!(pass, promoted = promoted.len(), "densest-core pass finished");
        if promoted.is_empty() {
            break;
        }
        for node in promoted {
            coloring.set(node, Color::Core);
            volumes.promote(graph.degree(node));
        }
    }
    coloring
}

/// Returns the periphery nodes retained at the density peak, or nothing when
/// no positive density was observed.
fn densest_periphery_subgraph(
    graph: &Graph,
    coloring: &Coloring,
    mut volumes: Volumes,
) -> Vec<NodeId> {
    let mut residual: Vec<Option<usize>> = vec![None; graph.node_count()];
    let mut queue = BinaryHeap::new();
    let mut active = 0_usize;
    let mut directed_edges = 0_usize;
    let mut retained = Vec::new();

    for node in coloring.nodes_with(Color::Periphery) {
        let degree = graph.degree(node);
        residual[node] = Some(degree);
        queue.push(Reverse((degree, node)));
        active += 1;
        directed_edges += graph
            .neighbors(node)
            .iter()
            .filter(|&&neighbor| coloring.get(neighbor) == Color::Periphery)
            .count();
        retained.push(node);
        volumes.promote(degree);
    }
    let mut edges = directed_edges / 2;

    let mut max_density = 0.0_f64;
    let mut peeled_since_peak: Vec<NodeId> = Vec::new();

    while active > 0 {
        let Some(Reverse((_, node))) = queue.pop() else {
            break;
        };
        if residual[node].take().is_none() {
            continue;
        }
        active -= 1;
        peeled_since_peak.push(node);

        for &neighbor in graph.neighbors(node) {
            if let Some(degree) = residual[neighbor].as_mut() {
                *degree -= 1;
                queue.push(Reverse((*degree, neighbor)));
                edges -= 1;
            }
        }

        volumes.demote(graph.degree(node));
        if volumes.core > volumes.periphery || active == 0 {
            continue;
        }

        let density = edges as f64 / active as f64;
        if density > max_density {
            max_density = density;
            peeled_since_peak.sort_unstable();
            subtract_sorted(&mut retained, &peeled_since_peak);
            peeled_since_peak.clear();
        }
    }

    if max_density > 0.0 {
        retained
    } else {
        Vec::new()
    }
}

/// Removes from `values` every element of `removed`; both must be ascending.
fn subtract_sorted(values: &mut Vec<NodeId>, removed: &[NodeId]) {
    let mut cursor = removed.iter().peekable();
    values.retain(|value| {
        while cursor.next_if(|&&candidate| candidate < *value).is_some() {}
        cursor.peek().is_none_or(|&&candidate| candidate != *value)
    });
}
