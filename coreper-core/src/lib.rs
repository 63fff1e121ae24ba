//! Coreper core library.
//!
//! Builds connected undirected graphs from edge lists, splits them into a
//! dense core and a sparse periphery, and simulates binary-opinion dynamics
//! seeded from that split.

mod coloring;
mod core_periphery;
mod dynamics;
mod error;
mod graph;
mod rng;
mod simulation;
mod union_find;

pub use crate::{
    coloring::{Color, Coloring},
    core_periphery::{
        CoreMethod, CorePeripheryMetrics, EdgeTally, dominance_and_robustness, edge_tally,
        extract_core_periphery,
    },
    dynamics::{Dynamics, DynamicsKind},
    error::{GraphError, GraphErrorCode, ParseNameError, Result},
    graph::{Graph, GraphBuilder, NodeId},
    rng::{DEFAULT_SEED, RandomSource, derive_seed},
    simulation::{RoundLimit, Simulation, SimulationOutcome, color_volumes},
    union_find::{DisjointSetForest, largest_component},
};
