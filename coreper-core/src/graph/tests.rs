use std::{collections::HashSet, io::Cursor};

use coreper_test_support::fixtures::{
    K4_WITH_TAIL, TRIANGLE_WITH_DETACHED_PAIR, write_edge_list,
};
use proptest::prelude::*;
use rstest::rstest;
use tempfile::TempDir;

use super::{Graph, GraphBuilder, builder::compile};
use crate::{RandomSource, error::GraphError};

fn build(input: &str) -> Graph {
    GraphBuilder::new()
        .build_from_reader(Cursor::new(input))
        .expect("fixture parses")
}

fn names(graph: &Graph) -> Vec<&str> {
    graph.nodes().map(|node| graph.external_name(node)).collect()
}

fn assert_symmetric(graph: &Graph) {
    for node in graph.nodes() {
        for &neighbor in graph.neighbors(node) {
            assert!(
                graph.neighbors(neighbor).contains(&node),
                "{neighbor} lacks back edge to {node}"
            );
        }
    }
}

#[test]
fn detached_pair_is_dropped() {
    let graph = build(TRIANGLE_WITH_DETACHED_PAIR);
    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.edge_count(), 3);
    assert_eq!(graph.volume(), 6);
    assert_eq!(names(&graph), ["A", "B", "C"]);
    for node in graph.nodes() {
        assert_eq!(graph.degree(node), 2);
    }
    assert_symmetric(&graph);
}

#[test]
fn ids_follow_first_appearance() {
    let graph = build(K4_WITH_TAIL);
    assert_eq!(names(&graph), ["a", "b", "c", "d", "e", "f"]);
    assert_eq!(graph.edge_count(), 8);
    assert_eq!(graph.neighbors(3), &[0, 1, 2, 4]);
    assert_eq!(graph.neighbors(5), &[4]);
}

#[rstest]
#[case::comment_and_blank("# header\n\na b\n", 1)]
#[case::whitespace_only("a b\n   \t\nb c\n", 2)]
#[case::extra_tokens("a b 0.5 extra\nb c\n", 2)]
#[case::duplicates("a b\nb a\na b\n", 1)]
#[case::self_loops("a a\na b\nb b\n", 1)]
fn parses_edge_list_variants(#[case] input: &str, #[case] edges: usize) {
    assert_eq!(build(input).edge_count(), edges);
}

#[test]
fn indented_hash_is_a_token() {
    let graph = build(" # x\n");
    assert_eq!(names(&graph), ["#", "x"]);
}

#[rstest]
#[case::empty("")]
#[case::comments_only("# nothing here\n")]
#[case::only_self_loops("a a\nb b\n")]
fn degenerate_input_yields_empty_graph(#[case] input: &str) {
    let graph = build(input);
    assert!(graph.is_empty());
    assert_eq!(graph.edge_count(), 0);
    assert!(graph.nodes_by_descending_degree().is_empty());
}

#[test]
fn malformed_line_reports_line_number() {
    let err = GraphBuilder::new()
        .with_name("broken")
        .build_from_reader(Cursor::new("a b\n# fine\nlonely\n"))
        .expect_err("single token must fail");
    assert_eq!(err.code().as_str(), "GRAPH_MALFORMED_LINE");
    match err {
        GraphError::MalformedLine {
            name,
            line,
            content,
        } => {
            assert_eq!(name, "broken");
            assert_eq!(line, 3);
            assert_eq!(content, "lonely");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn invalid_utf8_is_a_read_error() {
    let err = GraphBuilder::new()
        .build_from_reader(Cursor::new(b"a b\n\xff c\n".to_vec()))
        .expect_err("invalid utf-8 must fail");
    assert_eq!(err.code().as_str(), "GRAPH_READ");
    assert!(matches!(err, GraphError::Read { line: 2, .. }));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = TempDir::new().expect("tempdir");
    let err = GraphBuilder::new()
        .build_from_path(&dir.path().join("absent.txt"))
        .expect_err("missing file must fail");
    assert_eq!(err.code().as_str(), "GRAPH_IO");
    assert!(err.to_string().contains("absent.txt"));
}

#[test]
fn name_comes_from_file_stem_unless_overridden() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_edge_list(dir.path(), "karate.txt", K4_WITH_TAIL).expect("write fixture");

    let derived = GraphBuilder::new().build_from_path(&path).expect("graph");
    assert_eq!(derived.name(), "karate");

    let named = GraphBuilder::new()
        .with_name("club")
        .build_from_path(&path)
        .expect("graph");
    assert_eq!(named.name(), "club");
    assert_eq!(named.node_count(), derived.node_count());
}

#[test]
fn in_memory_graph_uses_default_name() {
    let graph = GraphBuilder::new().build_from_edges([("x", "y")]);
    assert_eq!(graph.name(), "edge_list");
}

#[test]
fn connectivity_ignores_edge_direction() {
    let graph = build("a b\nc b\n");
    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.degree(1), 2);
}

#[test]
fn seed_does_not_change_the_graph() {
    let left = GraphBuilder::new()
        .with_seed(1)
        .build_from_reader(Cursor::new(TRIANGLE_WITH_DETACHED_PAIR))
        .expect("graph");
    let right = GraphBuilder::new()
        .with_seed(99)
        .build_from_reader(Cursor::new(TRIANGLE_WITH_DETACHED_PAIR))
        .expect("graph");
    assert_eq!(left, right);
}

#[test]
fn degree_order_is_stable() {
    let graph = build(K4_WITH_TAIL);
    assert_eq!(graph.nodes_by_descending_degree(), [3, 0, 1, 2, 4, 5]);
}

#[test]
fn random_neighbor_covers_every_neighbor() {
    let graph = build(K4_WITH_TAIL);
    let mut rng = RandomSource::from_seed(17);
    let seen: HashSet<usize> = (0..512).map(|_| graph.random_neighbor(3, &mut rng)).collect();
    assert_eq!(seen, HashSet::from([0, 1, 2, 4]));
}

#[test]
fn neighbor_view_restarts() {
    let graph = build(K4_WITH_TAIL);
    let view = graph.neighbors(0);
    let first: Vec<_> = view.iter().collect();
    let second: Vec<_> = view.iter().collect();
    assert_eq!(first, second);
}

#[rstest]
#[case::gap(3, &[(0, 2), (2, 0)], &[0, 1, 1, 2], &[2, 0])]
#[case::trailing_isolated(3, &[(0, 1), (1, 0)], &[0, 1, 2, 2], &[1, 0])]
#[case::empty(0, &[], &[0], &[])]
fn compile_fills_offset_gaps(
    #[case] node_count: usize,
    #[case] edges: &[(usize, usize)],
    #[case] offsets: &[usize],
    #[case] neighbors: &[usize],
) {
    let (actual_offsets, actual_neighbors) = compile(node_count, edges);
    assert_eq!(actual_offsets, offsets);
    assert_eq!(actual_neighbors, neighbors);
}

fn edge_strategy() -> impl Strategy<Value = Vec<(u8, u8)>> {
    prop::collection::vec((0_u8..16, 0_u8..16), 0..40)
}

proptest! {
    #[test]
    fn built_graphs_are_canonical(edges in edge_strategy(), seed in any::<u64>()) {
        let graph = GraphBuilder::new()
            .with_seed(seed)
            .build_from_edges(edges.iter().map(|(s, t)| (s.to_string(), t.to_string())));

        prop_assert_eq!(graph.offsets.len(), graph.node_count() + 1);
        for node in graph.nodes() {
            let neighbors = graph.neighbors(node);
            prop_assert!(neighbors.windows(2).all(|pair| pair[0] < pair[1]));
            prop_assert!(!neighbors.contains(&node));
            for &neighbor in neighbors {
                prop_assert!(graph.neighbors(neighbor).contains(&node));
            }
        }

        if let Some(start) = graph.nodes().next() {
            let mut seen = HashSet::from([start]);
            let mut stack = vec![start];
            while let Some(node) = stack.pop() {
                for &neighbor in graph.neighbors(node) {
                    if seen.insert(neighbor) {
                        stack.push(neighbor);
                    }
                }
            }
            prop_assert_eq!(seen.len(), graph.node_count());
        }
    }
}
