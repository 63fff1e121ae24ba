use std::io::Cursor;

use coreper_test_support::fixtures::{FOUR_CYCLE, K4_WITH_TAIL, TRIANGLE_WITH_DETACHED_PAIR};
use proptest::prelude::*;
use rstest::rstest;

use super::*;
use crate::graph::GraphBuilder;

fn build(input: &str) -> Graph {
    GraphBuilder::new()
        .build_from_reader(Cursor::new(input))
        .expect("fixture parses")
}

fn core_of(coloring: &Coloring) -> Vec<usize> {
    coloring.nodes_with(Color::Core).collect()
}

fn coloring_with_core(len: usize, core: &[usize]) -> Coloring {
    let mut coloring = Coloring::new(len, Color::Periphery);
    for &node in core {
        coloring.set(node, Color::Core);
    }
    coloring
}

#[rstest]
#[case("KRichClub", CoreMethod::RichClub)]
#[case("DensestCore", CoreMethod::DensestCore)]
fn method_tokens_round_trip(#[case] token: &str, #[case] method: CoreMethod) {
    assert_eq!(token.parse::<CoreMethod>(), Ok(method));
    assert_eq!(method.to_string(), token);
}

#[rstest]
#[case("krichclub")]
#[case("")]
#[case("Densest")]
fn unknown_method_token_is_rejected(#[case] token: &str) {
    let err = token.parse::<CoreMethod>().expect_err("token must be rejected");
    assert_eq!(err.provided(), token);
    assert_eq!(err.kind(), "core extraction method");
    assert!(err.to_string().contains("KRichClub, DensestCore"));
}

#[rstest]
#[case::rich_club_k4(CoreMethod::RichClub, K4_WITH_TAIL, &[0, 1, 3])]
#[case::densest_k4(CoreMethod::DensestCore, K4_WITH_TAIL, &[2, 3])]
#[case::rich_club_triangle(CoreMethod::RichClub, TRIANGLE_WITH_DETACHED_PAIR, &[0, 1])]
#[case::densest_triangle(CoreMethod::DensestCore, TRIANGLE_WITH_DETACHED_PAIR, &[])]
#[case::rich_club_cycle(CoreMethod::RichClub, FOUR_CYCLE, &[0, 1, 2])]
fn extraction_matches_hand_traced_cores(
    #[case] method: CoreMethod,
    #[case] input: &str,
    #[case] core: &[usize],
) {
    let graph = build(input);
    let coloring = extract_core_periphery(&graph, method);
    assert_eq!(coloring.len(), graph.node_count());
    assert_eq!(core_of(&coloring), core);
}

#[rstest]
#[case(CoreMethod::RichClub)]
#[case(CoreMethod::DensestCore)]
fn extraction_is_idempotent(#[case] method: CoreMethod) {
    let graph = build(K4_WITH_TAIL);
    assert_eq!(
        extract_core_periphery(&graph, method),
        extract_core_periphery(&graph, method)
    );
}

#[rstest]
#[case(CoreMethod::RichClub)]
#[case(CoreMethod::DensestCore)]
fn empty_graph_yields_empty_coloring(#[case] method: CoreMethod) {
    let graph = build("");
    let coloring = extract_core_periphery(&graph, method);
    assert!(coloring.is_empty());
}

#[test]
fn four_cycle_tally_counts_each_edge_once() {
    let graph = build(FOUR_CYCLE);
    let coloring = coloring_with_core(4, &[0, 1]);
    let tally = edge_tally(&graph, &coloring);
    assert_eq!(
        tally,
        EdgeTally {
            core_core: 1,
            core_periphery: 2,
            periphery_periphery: 1,
        }
    );
    assert_eq!(tally.total(), graph.edge_count());

    let metrics = dominance_and_robustness(&graph, &coloring);
    assert_eq!(metrics.dominance, 2.0);
    assert_eq!(metrics.robustness, 0.5);
}

#[test]
fn zero_denominators_are_not_errors() {
    let graph = build(FOUR_CYCLE);

    let alternating = dominance_and_robustness(&graph, &coloring_with_core(4, &[0, 2]));
    assert!(alternating.dominance.is_infinite());
    assert_eq!(alternating.robustness, 0.0);

    let all_periphery = dominance_and_robustness(&graph, &coloring_with_core(4, &[]));
    assert_eq!(all_periphery.dominance, 0.0);
    assert!(all_periphery.robustness.is_nan());
}

fn graph_strategy() -> impl Strategy<Value = Graph> {
    prop::collection::vec((0_u8..20, 0_u8..20), 1..60).prop_map(|edges| {
        GraphBuilder::new()
            .build_from_edges(edges.iter().map(|(s, t)| (s.to_string(), t.to_string())))
    })
}

proptest! {
    #[test]
    fn rich_club_core_is_a_degree_prefix(graph in graph_strategy()) {
        let coloring = extract_core_periphery(&graph, CoreMethod::RichClub);
        let order = graph.nodes_by_descending_degree();
        let core_size = coloring.count(Color::Core);
        prop_assert!(graph.is_empty() || core_size > 0);
        for (position, node) in order.into_iter().enumerate() {
            let expected = if position < core_size { Color::Core } else { Color::Periphery };
            prop_assert_eq!(coloring.get(node), expected);
        }
    }

    #[test]
    fn densest_core_terminates_with_a_valid_coloring(graph in graph_strategy()) {
        let coloring = extract_core_periphery(&graph, CoreMethod::DensestCore);
        prop_assert_eq!(coloring.len(), graph.node_count());
        prop_assert_eq!(
            coloring.count(Color::Core) + coloring.count(Color::Periphery),
            graph.node_count()
        );
        prop_assert_eq!(coloring, extract_core_periphery(&graph, CoreMethod::DensestCore));
    }

    #[test]
    fn tally_covers_every_edge(graph in graph_strategy(), mask in any::<u32>()) {
        let mut coloring = Coloring::new(graph.node_count(), Color::Periphery);
        for node in graph.nodes() {
            if mask & (1 << (node % 32)) != 0 {
                coloring.set(node, Color::Core);
            }
        }
        prop_assert_eq!(edge_tally(&graph, &coloring).total(), graph.edge_count());
    }
}
