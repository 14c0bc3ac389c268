//! Benchmark for TreeVector vs standard Vec.
//!
//! Compares the persistent vector against `Vec` for the operations that
//! matter to its use case: growing at the back, random access, in-order
//! iteration and point updates that keep the old version alive.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use treevec::TreeVector;

// =============================================================================
// push_back Benchmark
// =============================================================================

fn benchmark_push_back(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("push_back");

    for size in [100, 1000, 10000] {
        group.bench_with_input(
            BenchmarkId::new("TreeVector", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let mut vector: TreeVector<i32> = TreeVector::new();
                    for index in 0..size {
                        vector = vector.push_back(black_box(index));
                    }
                    black_box(vector)
                });
            },
        );

        group.bench_with_input(BenchmarkId::new("Vec", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let mut vector = Vec::new();
                for index in 0..size {
                    vector.push(black_box(index));
                }
                black_box(vector)
            });
        });
    }

    group.finish();
}

// =============================================================================
// get Benchmark (Random Access)
// =============================================================================

fn benchmark_get(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("get");

    for size in [100, 1000, 10000] {
        let tree_vector: TreeVector<i32> = (0..size).collect();
        let standard_vector: Vec<i32> = (0..size).collect();

        group.bench_with_input(
            BenchmarkId::new("TreeVector", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let mut sum = 0;
                    for index in 0..usize::try_from(size).unwrap() {
                        if let Some(&value) = tree_vector.get(black_box(index)) {
                            sum += value;
                        }
                    }
                    black_box(sum)
                });
            },
        );

        group.bench_with_input(BenchmarkId::new("Vec", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let mut sum = 0;
                for index in 0..usize::try_from(size).unwrap() {
                    if let Some(&value) = standard_vector.get(black_box(index)) {
                        sum += value;
                    }
                }
                black_box(sum)
            });
        });
    }

    group.finish();
}

// =============================================================================
// Iteration Benchmark
// =============================================================================

fn benchmark_iterate(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("iterate");

    for size in [1000, 10000, 100_000] {
        let tree_vector: TreeVector<i64> = (0..size).collect();
        let standard_vector: Vec<i64> = (0..size).collect();

        group.bench_with_input(BenchmarkId::new("TreeVector", size), &size, |bencher, _| {
            bencher.iter(|| {
                let sum: i64 = tree_vector.iter().sum();
                black_box(sum)
            });
        });

        group.bench_with_input(BenchmarkId::new("Vec", size), &size, |bencher, _| {
            bencher.iter(|| {
                let sum: i64 = standard_vector.iter().sum();
                black_box(sum)
            });
        });
    }

    group.finish();
}

// =============================================================================
// set_at Benchmark (Persistent Point Update)
// =============================================================================

fn benchmark_set_at(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("set_at");

    for size in [1000, 10000] {
        let tree_vector: TreeVector<i32> = (0..size).collect();
        let standard_vector: Vec<i32> = (0..size).collect();
        let indices: Vec<usize> = (0..usize::try_from(size).unwrap()).step_by(7).collect();

        group.bench_with_input(BenchmarkId::new("TreeVector", size), &size, |bencher, _| {
            bencher.iter(|| {
                for &index in &indices {
                    // The old version stays alive: this is the workload a
                    // persistent structure is for.
                    black_box(tree_vector.set_at(black_box(index), -1).unwrap());
                }
            });
        });

        // Vec must copy the whole buffer to keep the old version.
        group.bench_with_input(BenchmarkId::new("Vec (clone)", size), &size, |bencher, _| {
            bencher.iter(|| {
                for &index in &indices {
                    let mut copy = standard_vector.clone();
                    copy[black_box(index)] = -1;
                    black_box(copy);
                }
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_push_back,
    benchmark_get,
    benchmark_iterate,
    benchmark_set_at
);
criterion_main!(benches);
