//! Benchmark setup error types.

use coreper_core::GraphError;

/// Invalid planted-graph configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlantedError {
    /// The core must hold at least one node.
    #[error("core size must be positive")]
    EmptyCore,
    /// An edge probability was outside `[0, 1]` or not finite.
    #[error("edge probability `{parameter}` must lie in [0, 1], got {value}")]
    InvalidProbability {
        /// Name of the offending parameter.
        parameter: &'static str,
        /// Supplied value.
        value: f64,
    },
}

/// Errors that may occur while preparing benchmark inputs.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Planted graph generation failed.
    #[error("planted graph generation failed: {0}")]
    Planted(#[from] PlantedError),
    /// Graph construction from the generated edge list failed.
    #[error("graph construction failed: {0}")]
    Graph(#[from] GraphError),
}
