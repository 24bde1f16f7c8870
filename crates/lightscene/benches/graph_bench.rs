//! Criterion benchmarks for graph relabelling.
//! Focus sizes: grid side in {5, 10, 20}.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use lightscene::graph::{Graph, GraphCfg, NodeKey};

/// n×n grid with right and up neighbours joined.
fn grid(n: usize) -> Graph<String> {
    let mut nodes = Vec::with_capacity(n * n);
    let mut edges = Vec::new();
    for i in 0..n {
        for j in 0..n {
            let p = [i as f64, j as f64, 0.0];
            nodes.push(p);
            if i + 1 < n {
                edges.push((p, [(i + 1) as f64, j as f64, 0.0]));
            }
            if j + 1 < n {
                edges.push((p, [i as f64, (j + 1) as f64, 0.0]));
            }
        }
    }
    Graph::new(&nodes, &edges, GraphCfg::default()).unwrap()
}

fn bench_graph(c: &mut Criterion) {
    let mut group = c.benchmark_group("graph");
    for &n in &[5usize, 10, 20] {
        group.bench_with_input(BenchmarkId::new("build", n), &n, |b, &n| {
            b.iter(|| grid(n))
        });

        group.bench_with_input(BenchmarkId::new("label_all", n), &n, |b, &n| {
            b.iter_batched(
                || grid(n),
                |mut g| {
                    let keys: Vec<NodeKey> = g.nodes().collect();
                    for (i, k) in keys.into_iter().enumerate() {
                        let _up = g.set_node_label(k, "dist", i.to_string()).unwrap();
                    }
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("parent_edge_sweep", n), &n, |b, &n| {
            b.iter_batched(
                || grid(n),
                |mut g| {
                    let keys: Vec<NodeKey> = g.nodes().collect();
                    for k in keys {
                        let edges = g.adjacent_edges(k).unwrap();
                        for e in edges {
                            let _up = g.set_parent_edge(k, e).unwrap();
                        }
                    }
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_graph);
criterion_main!(benches);
