//! Core-periphery extraction.
//!
//! Both strategies start with every node in the periphery and only ever move
//! nodes into the core:
//!
//! - [`CoreMethod::RichClub`] walks nodes by descending degree and stops once
//!   the edges confirmed inside the core outnumber the edges that could still
//!   lie inside the periphery.
//! - [`CoreMethod::DensestCore`] repeatedly peels the periphery down to its
//!   densest volume-balanced subgraph and promotes that subgraph, until a
//!   pass finds nothing to promote.
//!
//! [`edge_tally`] and [`dominance_and_robustness`] describe any coloring after
//! the fact; neither feeds back into extraction.

mod densest;
mod diagnostics;
mod rich_club;

use std::{fmt, str::FromStr};

use tracing::{info, instrument};

use crate::{
    coloring::{Color, Coloring},
    error::ParseNameError,
    graph::Graph,
};

pub use self::diagnostics::{
    CorePeripheryMetrics, EdgeTally, dominance_and_robustness, edge_tally,
};

/// Extraction strategy.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum CoreMethod {
    /// Degree-ordered rich-club threshold.
    #[default]
    RichClub,
    /// Iterative densest-subgraph peeling.
    DensestCore,
}

impl CoreMethod {
    const EXPECTED: &'static str = "KRichClub, DensestCore";

    /// Returns the configuration token naming this method.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RichClub => "KRichClub",
            Self::DensestCore => "DensestCore",
        }
    }
}

impl fmt::Display for CoreMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CoreMethod {
    type Err = ParseNameError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "KRichClub" => Ok(Self::RichClub),
            "DensestCore" => Ok(Self::DensestCore),
            other => Err(ParseNameError::new(
                "core extraction method",
                other,
                Self::EXPECTED,
            )),
        }
    }
}

/// Colors `graph` into core and periphery using `method`.
///
/// The returned coloring covers every node of `graph`. The function reads no
/// state besides its arguments, so repeated calls agree.
///
/// # Examples
/// ```
/// use coreper_core::{Color, CoreMethod, GraphBuilder, extract_core_periphery};
///
/// let graph = GraphBuilder::new().build_from_edges([
///     ("a", "b"), ("a", "c"), ("a", "d"), ("b", "c"),
///     ("b", "d"), ("c", "d"), ("d", "e"), ("e", "f"),
/// ]);
/// let coloring = extract_core_periphery(&graph, CoreMethod::RichClub);
/// let core: Vec<_> = coloring.nodes_with(Color::Core).collect();
/// assert_eq!(core, [0, 1, 3]);
/// ```
#[must_use]
#[instrument(
    name = "core_periphery.extract",
    skip(graph, method),
    fields(graph = %graph.name(), nodes = graph.node_count(), method = %method),
)]
pub fn extract_core_periphery(graph: &Graph, method: CoreMethod) -> Coloring {
    let coloring = match method {
        CoreMethod::RichClub => rich_club::extract(graph),
        CoreMethod::DensestCore => densest::extract(graph),
    };
    info!(
        core_size = coloring.count(Color::Core),
        periphery_size = coloring.count(Color::Periphery),
        "core extracted"
    );
    coloring
}

#[cfg(test)]
mod tests;
