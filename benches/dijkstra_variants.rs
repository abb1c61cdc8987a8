use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dijkstra_ops::config::make_rng;
use dijkstra_ops::graph::generators::{generate_random_graph, Density};
use dijkstra_ops::Strategy;

fn benchmark_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("Dijkstra strategies");
    let mut rng = make_rng(Some(2024));

    let densities = [
        ("sparse", Density::PerNode { edges: 3.0 }),
        ("log", Density::LogOverN { scale: 2.0 }),
        ("dense", Density::Fixed { value: 0.5 }),
    ];

    for (label, density) in densities {
        for n in [100, 500, 1000] {
            let graph = generate_random_graph(n, (1, 100), density.resolve(n), None, &mut rng)
                .expect("valid generator parameters");

            for strategy in Strategy::ALL {
                group.bench_with_input(
                    BenchmarkId::new(format!("{}_{}", strategy, label), n),
                    &graph,
                    |b, graph| b.iter(|| black_box(strategy.run(graph, 0).expect("source exists"))),
                );
            }
        }
    }

    group.finish();
}

criterion_group!(benches, benchmark_strategies);
criterion_main!(benches);
