//! Lala Benchmarks
//!
//! This module contains benchmarks for the hash tree. The benchmarks are
//! implemented using the Criterion framework, which provides statistical
//! analysis and performance regression detection.
//!
//! To run the benchmarks:
//! ```bash
//! cargo bench --features benchmarking
//! ```

use criterion::{
    black_box, criterion_group, criterion_main, measurement::WallTime, BenchmarkId, Criterion,
    SamplingMode, Throughput,
};
use lala_lib::{HashTree, RenderOptions};
use std::time::Duration;

/// Builds a tree with `width` children per node, `depth` levels deep.
fn build_tree(width: usize, depth: usize) -> HashTree<String> {
    let mut tree = HashTree::new();
    if depth == 0 {
        return tree;
    }
    for i in 0..width {
        tree.add_tree(format!("k{depth}_{i}"), build_tree(width, depth - 1));
    }
    tree
}

/// Benchmark path insertion and lookup
fn bench_paths(c: &mut Criterion) {
    let mut group = c.benchmark_group("hash_tree_paths");
    group.sampling_mode(SamplingMode::Flat);
    group.measurement_time(Duration::from_secs(2));
    group.warm_up_time(Duration::from_secs(1));

    for depth in [4, 16, 64].iter() {
        let path: Vec<String> = (0..*depth).map(|i| format!("segment_{i}")).collect();

        group.throughput(Throughput::Elements(*depth as u64));
        group.bench_with_input(BenchmarkId::new("ensure", depth), &path, |b, path| {
            b.iter(|| {
                let mut tree = HashTree::new();
                black_box(tree.ensure(path.iter().cloned()).len());
            });
        });

        let mut tree = HashTree::new();
        tree.ensure(path.iter().cloned());
        group.bench_with_input(BenchmarkId::new("resolve", depth), &path, |b, path| {
            b.iter(|| black_box(tree.resolve(path).is_some()));
        });
    }

    group.finish();
}

/// Benchmark whole-tree operations
fn bench_whole_tree(c: &mut Criterion) {
    let mut group = c.benchmark_group("hash_tree_whole");
    group.sampling_mode(SamplingMode::Flat);
    group.measurement_time(Duration::from_secs(2));

    for width in [2, 4, 8].iter() {
        let tree = build_tree(*width, 4);
        group.throughput(Throughput::Elements(tree.total_keys() as u64));

        group.bench_with_input(BenchmarkId::new("search_miss", width), &tree, |b, tree| {
            b.iter(|| black_box(tree.search("absent").is_none()));
        });

        group.bench_with_input(BenchmarkId::new("render", width), &tree, |b, tree| {
            b.iter(|| black_box(tree.render(RenderOptions::default()).len()));
        });

        group.bench_with_input(BenchmarkId::new("merge_self", width), &tree, |b, tree| {
            b.iter_batched(
                || (tree.clone(), tree.clone()),
                |(mut left, right)| {
                    left.merge(right);
                    black_box(left.len())
                },
                criterion::BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

// Group all benchmarks together
criterion_group! {
    name = benches;
    config = Criterion::default()
        .with_measurement(WallTime)
        .significance_level(0.01)
        .noise_threshold(0.02)
        .confidence_level(0.99);
    targets = bench_paths, bench_whole_tree
}

criterion_main!(benches);
