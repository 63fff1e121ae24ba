//! Graph construction benchmarks.
//!
//! Measures parsing an edge list, dropping detached components, and shuffling
//! the surviving nodes into the graph's compact identifier space.
#![expect(
    missing_docs,
    reason = "Criterion macros generate items without doc comments"
)]

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

use coreper_benches::{
    error::BenchSetupError,
    params::GraphBenchParams,
    planted::{PlantedConfig, PlantedGraph},
};
use coreper_core::GraphBuilder;

/// Seed used for sampling and for node shuffling.
const SEED: u64 = 42;

/// Planted graph sizes to benchmark.
const SIZES: &[GraphBenchParams] = &[
    GraphBenchParams {
        core_size: 20,
        periphery_size: 200,
    },
    GraphBenchParams {
        core_size: 50,
        periphery_size: 1_000,
    },
    GraphBenchParams {
        core_size: 100,
        periphery_size: 4_000,
    },
];

fn build_from_reader_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("build_from_reader");
    group.sample_size(20);

    for params in SIZES {
        let planted = PlantedGraph::generate(&PlantedConfig::typical(
            params.core_size,
            params.periphery_size,
            SEED,
        ))?;
        let text = planted.to_edge_list();
        let builder = GraphBuilder::new().with_seed(SEED);
        // Fail setup rather than timing an error path.
        builder.build_from_reader(text.as_bytes())?;

        group.throughput(Throughput::Elements(planted.edges().len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(params),
            &text,
            |b, text| b.iter(|| black_box(builder.build_from_reader(text.as_bytes()))),
        );
    }

    group.finish();
    Ok(())
}

fn build_from_reader(c: &mut Criterion) {
    if let Err(err) = build_from_reader_impl(c) {
        panic!("build_from_reader benchmark setup failed: {err}");
    }
}

criterion_group!(benches, build_from_reader);
criterion_main!(benches);
