//! Span and event coverage for the instrumented entry points.

use coreper_core::{
    Color, Coloring, CoreMethod, DynamicsKind, GraphBuilder, RandomSource, RoundLimit,
    Simulation, extract_core_periphery,
};
use coreper_test_support::{fixtures::K4_WITH_TAIL, recording::capture};

#[test]
fn graph_build_span_records_source_and_sizes() {
    let (graph, layer) = capture(|| {
        GraphBuilder::new()
            .with_name("k4")
            .with_seed(9)
            .build_from_reader(K4_WITH_TAIL.as_bytes())
            .expect("graph builds")
    });

    let span = layer.span("graph.build").expect("graph.build span");
    assert_eq!(span.field("name"), Some("k4"));
    assert_eq!(span.field("seed"), Some("9"));
    assert_eq!(span.field("parsed_edges"), Some("8"));

    let built = layer.events_with_message("graph built");
    assert_eq!(built.len(), 1);
    assert_eq!(built[0].field("nodes"), Some("6"));
    assert_eq!(built[0].field("edges"), Some(graph.edge_count().to_string().as_str()));
}

#[test]
fn missing_file_is_recorded_on_the_open_span() {
    let ((), layer) = capture(|| {
        let result = GraphBuilder::new().build_from_path("/nonexistent/coreper/graph.txt".as_ref());
        assert!(result.is_err());
    });

    let span = layer.span("graph.open").expect("graph.open span");
    assert_eq!(span.field("path"), Some("/nonexistent/coreper/graph.txt"));
    assert!(
        layer
            .events()
            .iter()
            .any(|event| event.level == tracing::Level::ERROR)
    );
}

#[test]
fn extraction_span_names_the_method() {
    let graph = GraphBuilder::new()
        .build_from_reader(K4_WITH_TAIL.as_bytes())
        .expect("graph builds");

    let (_, layer) = capture(|| extract_core_periphery(&graph, CoreMethod::DensestCore));

    let span = layer
        .span("core_periphery.extract")
        .expect("extraction span");
    assert_eq!(span.field("method"), Some("DensestCore"));
    assert_eq!(span.field("nodes"), Some("6"));
    let done = layer.events_with_message("core extracted");
    assert_eq!(done[0].field("core_size"), Some("2"));
    assert_eq!(
        layer.events_with_message("densest-core pass finished").len(),
        2
    );
}

#[test]
fn simulation_span_records_rounds() {
    let graph = GraphBuilder::new()
        .build_from_reader(K4_WITH_TAIL.as_bytes())
        .expect("graph builds");
    let mut simulation = Simulation::new(
        &graph,
        DynamicsKind::VoterModel,
        Coloring::new(graph.node_count(), Color::Core),
        RandomSource::from_seed(1),
    );

    let (outcome, layer) = capture(|| simulation.run(RoundLimit::NodeCount, 0.9));

    let span = layer.span("simulation.run").expect("simulation span");
    assert_eq!(span.field("dynamics"), Some("VoterModel"));
    assert_eq!(span.field("limit"), Some("-1"));
    assert_eq!(span.field("rounds"), Some(outcome.rounds.to_string().as_str()));
}
