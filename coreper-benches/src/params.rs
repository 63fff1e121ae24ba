//! Benchmark parameter types.

use std::fmt;

use coreper_core::{CoreMethod, DynamicsKind};

/// Size of a planted core-periphery graph.
#[derive(Clone, Copy, Debug)]
pub struct GraphBenchParams {
    /// Nodes in the planted core.
    pub core_size: usize,
    /// Nodes in the planted periphery.
    pub periphery_size: usize,
}

impl GraphBenchParams {
    /// Returns the total planted node count.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.core_size + self.periphery_size
    }
}

impl fmt::Display for GraphBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "core={},periphery={}", self.core_size, self.periphery_size)
    }
}

/// Parameters of an extraction benchmark run.
#[derive(Clone, Copy, Debug)]
pub struct ExtractionBenchParams {
    /// Graph size.
    pub graph: GraphBenchParams,
    /// Extraction method under test.
    pub method: CoreMethod,
}

impl fmt::Display for ExtractionBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.method, self.graph)
    }
}

/// Parameters of a simulation benchmark run.
#[derive(Clone, Copy, Debug)]
pub struct SimulationBenchParams {
    /// Graph size.
    pub graph: GraphBenchParams,
    /// Dynamics under test.
    pub dynamics: DynamicsKind,
}

impl fmt::Display for SimulationBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.dynamics, self.graph)
    }
}
