//! Repeated dynamics runs from a fixed initial coloring.

use std::{fmt, str::FromStr};

use tracing::{Span, debug, field, instrument};

use crate::{
    coloring::{Color, Coloring},
    dynamics::{Dynamics, DynamicsKind},
    error::ParseNameError,
    graph::Graph,
    rng::RandomSource,
};

/// Upper bound on the number of rounds in one run.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum RoundLimit {
    /// As many rounds as the graph has nodes (configuration token `-1`).
    NodeCount,
    /// A fixed number of rounds.
    Fixed(usize),
}

impl RoundLimit {
    const EXPECTED: &'static str = "a non-negative integer or -1";

    /// Resolves the limit against `graph`.
    #[must_use]
    pub fn rounds_for(self, graph: &Graph) -> usize {
        match self {
            Self::NodeCount => graph.node_count(),
            Self::Fixed(rounds) => rounds,
        }
    }
}

impl fmt::Display for RoundLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NodeCount => f.write_str("-1"),
            Self::Fixed(rounds) => write!(f, "{rounds}"),
        }
    }
}

impl FromStr for RoundLimit {
    type Err = ParseNameError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value == "-1" {
            return Ok(Self::NodeCount);
        }
        value
            .parse()
            .map(Self::Fixed)
            .map_err(|_| ParseNameError::new("round limit", value, Self::EXPECTED))
    }
}

/// Result of one simulation run.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationOutcome {
    /// First color whose volume reached the win threshold, if any.
    pub winning_color: Option<Color>,
    /// Final node share per color, indexed by [`Color::index`].
    pub fractions: [f64; 2],
    /// Final volume share per color, indexed by [`Color::index`].
    pub volumes: [f64; 2],
    /// Rounds executed.
    pub rounds: usize,
}

/// Returns each color's share of the graph volume under `coloring`.
///
/// An empty graph reports `NaN` shares.
///
/// # Examples
/// ```
/// use coreper_core::{Color, Coloring, GraphBuilder, color_volumes};
///
/// let graph = GraphBuilder::new().build_from_edges([("a", "b"), ("b", "c")]);
/// let mut coloring = Coloring::new(3, Color::Periphery);
/// coloring.set(1, Color::Core);
/// assert_eq!(color_volumes(&graph, &coloring), [0.5, 0.5]);
/// ```
#[must_use]
pub fn color_volumes(graph: &Graph, coloring: &Coloring) -> [f64; 2] {
    let mut degrees = [0_usize; 2];
    for node in graph.nodes() {
        degrees[coloring.get(node).index()] += graph.degree(node);
    }
    let volume = graph.volume() as f64;
    degrees.map(|degree| degree as f64 / volume)
}

/// Runs one dynamics rule repeatedly from the same initial coloring.
///
/// The generator carries over between runs, so consecutive runs are
/// different samples while the whole sequence stays reproducible.
#[derive(Debug, Clone)]
pub struct Simulation<'g> {
    graph: &'g Graph,
    dynamics: Dynamics<'g>,
    initial: Coloring,
    current: Coloring,
    next: Coloring,
}

impl<'g> Simulation<'g> {
    /// Prepares runs of `kind` over `graph` starting from `initial`.
    ///
    /// `initial` must cover every node of `graph`; this is checked in debug
    /// builds only.
    #[must_use]
    pub fn new(graph: &'g Graph, kind: DynamicsKind, initial: Coloring, rng: RandomSource) -> Self {
        debug_assert_eq!(initial.len(), graph.node_count(), "coloring size differs");
        Self {
            graph,
            dynamics: Dynamics::new(kind, graph, rng),
            current: initial.clone(),
            next: initial.clone(),
            initial,
        }
    }

    /// Returns the coloring every run starts from.
    #[must_use]
    pub fn initial(&self) -> &Coloring {
        &self.initial
    }

    /// Runs rounds until `limit` is reached or a color's volume share reaches
    /// `win_threshold`.
    #[instrument(
        name = "simulation.run",
        skip(self, limit, win_threshold),
        fields(
            graph = %self.graph.name(),
            dynamics = %self.dynamics.kind(),
            limit = %limit,
            win_threshold = win_threshold,
            rounds = field::Empty,
        ),
    )]
    pub fn run(&mut self, limit: RoundLimit, win_threshold: f64) -> SimulationOutcome {
        self.current.assign_from(&self.initial);
        let max_rounds = limit.rounds_for(self.graph);

        let mut rounds = 0;
        while rounds < max_rounds && self.largest_volume() < win_threshold {
            self.dynamics.simulate_round(&self.current, &mut self.next);
            self.current.swap(&mut self.next);
            rounds += 1;
        }

        let volumes = color_volumes(self.graph, &self.current);
        let winning_color = Color::ALL
            .into_iter()
            .find(|color| volumes[color.index()] >= win_threshold);
        Span::current().record("rounds", rounds);
        debug!(
            rounds,
            winner = winning_color.map_or("none", Color::as_str),
            "simulation finished"
        );
        SimulationOutcome {
            winning_color,
            fractions: self.current.fractions(),
            volumes,
            rounds,
        }
    }

    fn largest_volume(&self) -> f64 {
        let [core, periphery] = color_volumes(self.graph, &self.current);
        core.max(periphery)
    }
}
