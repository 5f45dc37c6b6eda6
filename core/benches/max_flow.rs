use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use maxflow_core::{FlowNetwork, GraphDescription, MaxFlowSolver, SolverConfig, Terminals, solve_all};
use maxflow_core::io::EdgeSpec;

/// Layered network: source, `layers` layers of `width` vertices, sink.
/// Consecutive layers are fully connected with capacities varying by position.
fn layered(layers: usize, width: usize) -> GraphDescription {
    let vertex_count = layers * width + 2;
    let sink = vertex_count - 1;
    let vertex = |layer: usize, slot: usize| 1 + layer * width + slot;
    let mut edges = Vec::new();

    for slot in 0..width {
        edges.push(EdgeSpec { from: 0, to: vertex(0, slot), capacity: 100 });
        edges.push(EdgeSpec { from: vertex(layers - 1, slot), to: sink, capacity: 100 });
    }
    for layer in 0..layers - 1 {
        for a in 0..width {
            for b in 0..width {
                let capacity = ((a * 7 + b * 13 + layer * 3) % 17 + 1) as i64;
                edges.push(EdgeSpec { from: vertex(layer, a), to: vertex(layer + 1, b), capacity });
            }
        }
    }

    GraphDescription::new(vertex_count, edges)
}

fn bench_single(c: &mut Criterion) {
    let solver = MaxFlowSolver::with_config(SolverConfig {
        verify_result: false,
        record_paths: false,
    });

    let mut group = c.benchmark_group("edmonds_karp");
    for &(layers, width) in &[(4, 8), (8, 16), (16, 16)] {
        let network: FlowNetwork = layered(layers, width).build_network().unwrap();
        let sink = network.vertex_count() - 1;
        group.bench_with_input(
            BenchmarkId::new("layered", format!("{}x{}", layers, width)),
            &network,
            |b, network| {
                b.iter_batched(
                    || network.clone(),
                    |mut network| black_box(solver.max_flow(&mut network, 0, sink).unwrap()),
                    BatchSize::SmallInput,
                )
            },
        );
    }
    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let solver = MaxFlowSolver::new();
    let descriptions: Vec<GraphDescription> = (0..32).map(|i| layered(4 + i % 4, 8)).collect();

    c.bench_function("solve_all 32 graphs", |b| {
        b.iter(|| black_box(solve_all(&solver, &descriptions, Terminals::FirstLast)))
    });
}

criterion_group!(benches, bench_single, bench_batch);
criterion_main!(benches);
