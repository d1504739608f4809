//! Chunk index benchmarks for veridex.
//!
//! These measure the operations that dominate index cost in practice:
//! building over a chunk, point lookups through the hint-assisted search,
//! and the incremental validation path with its neighbour flag updates.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use veridex::{BTreeIndex, DependencyType, ScalarValue, ValueSegment};

fn shuffled(count: usize) -> Vec<i64> {
    // Deterministic shuffle; no RNG dependency needed for a benchmark.
    let mut values: Vec<i64> = (0..count as i64).collect();
    for i in (1..values.len()).rev() {
        let j = (i * 7919 + 13) % (i + 1);
        values.swap(i, j);
    }
    values
}

fn key(v: i64) -> Vec<ScalarValue> {
    vec![ScalarValue::Int(v)]
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("index_build");

    for count in [1_000usize, 10_000] {
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("shuffled", count), &count, |b, &count| {
            let values = shuffled(count);
            b.iter(|| {
                let segment = ValueSegment::from_values(values.iter().copied());
                let index = BTreeIndex::build(vec![segment.into_shared()]).unwrap();
                black_box(index.key_count())
            });
        });
    }

    group.finish();
}

fn bench_point_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("index_lookup");

    for count in [1_000usize, 10_000] {
        let segment = ValueSegment::from_values(shuffled(count));
        let index = BTreeIndex::build(vec![segment.into_shared()]).unwrap();

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("contains", count), &count, |b, &count| {
            b.iter(|| {
                let mut hits = 0usize;
                for v in 0..count as i64 {
                    if index.contains_key(&key(v)) {
                        hits += 1;
                    }
                }
                black_box(hits)
            });
        });
    }

    group.finish();
}

fn bench_validation(c: &mut Criterion) {
    let mut group = c.benchmark_group("validation");

    for count in [1_000usize, 10_000] {
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(
            BenchmarkId::new("od_insert", count),
            &count,
            |b, &count| {
                let values = shuffled(count);
                b.iter(|| {
                    let segment = ValueSegment::from_values(values.iter().copied());
                    let mut index = BTreeIndex::build(vec![segment.into_shared()]).unwrap();
                    for &v in &values {
                        index.insert_entry_for_validation(
                            &key(v),
                            &key(v * 3),
                            DependencyType::Od,
                        );
                    }
                    black_box(index.global_violation_count())
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("fd_update_churn", count),
            &count,
            |b, &count| {
                let values = shuffled(count);
                b.iter(|| {
                    let segment = ValueSegment::from_values(values.iter().copied());
                    let mut index = BTreeIndex::build(vec![segment.into_shared()]).unwrap();
                    for &v in &values {
                        index.insert_entry_for_validation(&key(v), &key(v), DependencyType::Fd);
                    }
                    for &v in &values {
                        index.update_entry_for_validation(
                            &key(v),
                            &key(v),
                            &key(v + 1),
                            DependencyType::Fd,
                        );
                    }
                    black_box(index.global_violation_count())
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_build, bench_point_lookup, bench_validation);
criterion_main!(benches);
