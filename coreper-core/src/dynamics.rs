//! Synchronous binary-opinion dynamics.
//!
//! One round computes every node's next color from the current coloring
//! only; the caller swaps the two colorings afterwards.

use std::{fmt, str::FromStr};

use crate::{
    coloring::Coloring,
    error::ParseNameError,
    graph::Graph,
    rng::RandomSource,
};

/// Update rule applied to every node in a round.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum DynamicsKind {
    /// Adopt the color of one uniformly random neighbor.
    #[default]
    VoterModel,
    /// Sample two neighbors with replacement; adopt their color if they
    /// agree, otherwise keep the current color.
    TwoChoices,
}

impl DynamicsKind {
    const EXPECTED: &'static str = "VoterModel, TwoChoices";

    /// Returns the configuration token naming this rule.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::VoterModel => "VoterModel",
            Self::TwoChoices => "TwoChoices",
        }
    }
}

impl fmt::Display for DynamicsKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DynamicsKind {
    type Err = ParseNameError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "VoterModel" => Ok(Self::VoterModel),
            "TwoChoices" => Ok(Self::TwoChoices),
            other => Err(ParseNameError::new("dynamics", other, Self::EXPECTED)),
        }
    }
}

/// Opinion dynamics bound to a graph and a private generator.
///
/// # Examples
/// ```
/// use coreper_core::{Color, Coloring, Dynamics, DynamicsKind, GraphBuilder, RandomSource};
///
/// let graph = GraphBuilder::new().build_from_edges([("a", "b"), ("b", "c")]);
/// let mut current = Coloring::new(3, Color::Core);
/// current.set(1, Color::Periphery);
/// let mut next = current.clone();
///
/// let mut dynamics = Dynamics::new(DynamicsKind::VoterModel, &graph, RandomSource::from_seed(1));
/// dynamics.simulate_round(&current, &mut next);
/// assert_eq!(next.get(1), Color::Core);
/// assert_eq!(next.get(0), Color::Periphery);
/// ```
#[derive(Debug, Clone)]
pub struct Dynamics<'g> {
    kind: DynamicsKind,
    graph: &'g Graph,
    rng: RandomSource,
}

impl<'g> Dynamics<'g> {
    /// Binds `kind` to `graph`, drawing neighbors from `rng`.
    #[must_use]
    pub fn new(kind: DynamicsKind, graph: &'g Graph, rng: RandomSource) -> Self {
        Self { kind, graph, rng }
    }

    /// Returns the update rule.
    #[must_use]
    pub fn kind(&self) -> DynamicsKind {
        self.kind
    }

    /// Writes the colors after one round into `next`.
    ///
    /// Both colorings must cover every node of the graph.
    pub fn simulate_round(&mut self, current: &Coloring, next: &mut Coloring) {
        debug_assert_eq!(current.len(), self.graph.node_count());
        debug_assert_eq!(next.len(), self.graph.node_count());
        match self.kind {
            DynamicsKind::VoterModel => self.voter_round(current, next),
            DynamicsKind::TwoChoices => self.two_choices_round(current, next),
        }
    }

    fn voter_round(&mut self, current: &Coloring, next: &mut Coloring) {
        for node in self.graph.nodes() {
            let neighbor = self.graph.random_neighbor(node, &mut self.rng);
            next.set(node, current.get(neighbor));
        }
    }

    fn two_choices_round(&mut self, current: &Coloring, next: &mut Coloring) {
        for node in self.graph.nodes() {
            let first = current.get(self.graph.random_neighbor(node, &mut self.rng));
            let second = current.get(self.graph.random_neighbor(node, &mut self.rng));
            let color = if first == second {
                first
            } else {
                current.get(node)
            };
            next.set(node, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    use crate::{Color, GraphBuilder};

    fn path() -> Graph {
        GraphBuilder::new().build_from_edges([("a", "b"), ("b", "c")])
    }

    fn alternating() -> Coloring {
        let mut coloring = Coloring::new(3, Color::Core);
        coloring.set(1, Color::Periphery);
        coloring
    }

    #[rstest]
    #[case("VoterModel", DynamicsKind::VoterModel)]
    #[case("TwoChoices", DynamicsKind::TwoChoices)]
    fn kind_tokens_round_trip(#[case] token: &str, #[case] kind: DynamicsKind) {
        assert_eq!(token.parse::<DynamicsKind>(), Ok(kind));
        assert_eq!(kind.to_string(), token);
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let err = "Majority".parse::<DynamicsKind>().expect_err("unknown rule");
        assert_eq!(err.kind(), "dynamics");
        assert_eq!(err.provided(), "Majority");
    }

    #[rstest]
    #[case(DynamicsKind::VoterModel)]
    #[case(DynamicsKind::TwoChoices)]
    fn rounds_read_only_the_current_coloring(#[case] kind: DynamicsKind) {
        let graph = path();
        let current = alternating();
        for seed in 0..16 {
            let mut next = Coloring::new(3, Color::Core);
            let mut dynamics = Dynamics::new(kind, &graph, RandomSource::from_seed(seed));
            dynamics.simulate_round(&current, &mut next);
            assert_eq!(next.get(0), Color::Periphery);
            assert_eq!(next.get(1), Color::Core);
            assert_eq!(next.get(2), Color::Periphery);
        }
    }

    #[rstest]
    #[case(DynamicsKind::VoterModel)]
    #[case(DynamicsKind::TwoChoices)]
    fn consensus_is_absorbing(#[case] kind: DynamicsKind) {
        let graph = GraphBuilder::new().build_from_edges([
            ("a", "b"),
            ("b", "c"),
            ("c", "a"),
            ("c", "d"),
        ]);
        let current = Coloring::new(4, Color::Periphery);
        let mut next = Coloring::new(4, Color::Core);
        let mut dynamics = Dynamics::new(kind, &graph, RandomSource::from_seed(3));
        dynamics.simulate_round(&current, &mut next);
        assert_eq!(next, current);
    }

    #[test]
    fn two_choices_keeps_color_when_samples_disagree() {
        let graph = GraphBuilder::new().build_from_edges([("hub", "x"), ("hub", "y")]);
        let mut current = Coloring::new(3, Color::Core);
        current.set(1, Color::Periphery);
        let mut dynamics =
            Dynamics::new(DynamicsKind::TwoChoices, &graph, RandomSource::from_seed(5));

        let mut kept = 0;
        for _ in 0..200 {
            let mut next = current.clone();
            dynamics.simulate_round(&current, &mut next);
            if next.get(0) == Color::Core {
                kept += 1;
            }
        }
        // The hub turns periphery only when both samples hit `x`.
        assert!(kept > 100, "hub kept its color {kept} times");
    }

    #[test]
    fn rounds_are_reproducible_under_a_seed() {
        let graph = GraphBuilder::new().build_from_edges([
            ("a", "b"),
            ("b", "c"),
            ("c", "d"),
            ("d", "a"),
            ("a", "c"),
        ]);
        let mut current = Coloring::new(4, Color::Periphery);
        current.set(0, Color::Core);
        current.set(3, Color::Core);

        let run = |seed| {
            let mut dynamics =
                Dynamics::new(DynamicsKind::VoterModel, &graph, RandomSource::from_seed(seed));
            let mut next = current.clone();
            dynamics.simulate_round(&current, &mut next);
            next
        };
        assert_eq!(run(8), run(8));
    }
}
