//! gcsim Benchmarks
//!
//! Measures heap commands and both collectors on generated object graphs.
//! Run with: `cargo bench --package gcsim`

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion, Throughput};
use gcsim::{collector, Algorithm, Heap, ObjectId, Session, SimConfig};

/// Chain of `len` objects hanging off one root, plus `garbage` objects in a ring
fn build_graph(len: usize, garbage: usize) -> Heap {
    let mut heap = Heap::new((len + garbage) * 10).unwrap();

    let chain: Vec<ObjectId> = (0..len)
        .map(|_| heap.create_object(None, None).unwrap())
        .collect();
    for pair in chain.windows(2) {
        heap.create_reference(pair[0], pair[1]).unwrap();
    }

    let ring: Vec<ObjectId> = (0..garbage)
        .map(|_| heap.create_object(None, None).unwrap())
        .collect();
    for (i, &from) in ring.iter().enumerate() {
        let to = ring[(i + 1) % ring.len()];
        if from != to {
            heap.create_reference(from, to).unwrap();
        }
    }

    heap
}

/// Star of `count` leaves around one hub, with the hub destroyed
fn build_orphans(count: usize) -> Heap {
    let mut heap = Heap::new((count + 1) * 10).unwrap();
    let hub = heap.create_object(Some("hub"), None).unwrap();
    for _ in 0..count {
        let leaf = heap.create_object(None, None).unwrap();
        heap.create_reference(hub, leaf).unwrap();
    }
    heap.remove_objects(&[hub]);
    heap
}

fn bench_session_creation(c: &mut Criterion) {
    let mut group = c.benchmark_group("session_creation");

    group.bench_function("default_config", |b| {
        b.iter(|| black_box(Session::new(SimConfig::default()).unwrap()))
    });

    group.bench_function("large_capacity", |b| {
        b.iter(|| black_box(Session::new(SimConfig::with_capacity(1 << 30)).unwrap()))
    });

    group.finish();
}

fn bench_create_object(c: &mut Criterion) {
    let mut group = c.benchmark_group("create_object");

    for &count in &[100usize, 1_000, 10_000] {
        group.throughput(Throughput::Elements(count as u64));
        group.bench_function(format!("objects_{}", count), |b| {
            b.iter_batched(
                || Heap::new(count * 10).unwrap(),
                |mut heap| {
                    for _ in 0..count {
                        let _ = black_box(heap.create_object(None, None));
                    }
                    heap
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_create_reference(c: &mut Criterion) {
    let mut group = c.benchmark_group("create_reference");

    group.bench_function("new_edges_1000", |b| {
        b.iter_batched(
            || {
                let mut heap = Heap::new(20_000).unwrap();
                let ids: Vec<ObjectId> = (0..1_001)
                    .map(|_| heap.create_object(None, None).unwrap())
                    .collect();
                (heap, ids)
            },
            |(mut heap, ids)| {
                for pair in ids.windows(2) {
                    let _ = black_box(heap.create_reference(pair[0], pair[1]));
                }
                heap
            },
            BatchSize::SmallInput,
        )
    });

    let mut heap = build_graph(2, 0);
    let ids: Vec<ObjectId> = heap.objects().map(|object| object.id()).collect();
    group.bench_function("duplicate_edge", |b| {
        b.iter(|| black_box(heap.create_reference(ids[0], ids[1])))
    });

    group.finish();
}

fn bench_tracing(c: &mut Criterion) {
    let mut group = c.benchmark_group("mark_sweep");

    for &(live, garbage) in &[(1_000usize, 0usize), (1_000, 1_000), (10_000, 10_000)] {
        group.throughput(Throughput::Elements((live + garbage) as u64));
        group.bench_function(format!("live_{}_garbage_{}", live, garbage), |b| {
            b.iter_batched(
                || build_graph(live, garbage),
                |mut heap| black_box(collector::collect(&mut heap, Algorithm::Tracing)),
                BatchSize::LargeInput,
            )
        });
    }

    group.finish();
}

fn bench_reference_counting(c: &mut Criterion) {
    let mut group = c.benchmark_group("reference_counting");

    group.bench_function("no_candidates_10000", |b| {
        b.iter_batched(
            || build_graph(5_000, 5_000),
            |mut heap| black_box(collector::collect(&mut heap, Algorithm::ReferenceCounting)),
            BatchSize::LargeInput,
        )
    });

    group.bench_function("orphans_10000", |b| {
        b.iter_batched(
            || build_orphans(10_000),
            |mut heap| black_box(collector::collect(&mut heap, Algorithm::ReferenceCounting)),
            BatchSize::LargeInput,
        )
    });

    group.finish();
}

fn bench_snapshot(c: &mut Criterion) {
    let mut group = c.benchmark_group("snapshot");

    let heap = build_graph(1_000, 1_000);
    group.bench_function("capture_2000", |b| b.iter(|| black_box(heap.snapshot())));

    let snapshot = heap.snapshot();
    group.bench_function("to_json_2000", |b| {
        b.iter(|| black_box(snapshot.to_json().unwrap()))
    });

    group.finish();
}

fn bench_session_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("session_cycle");

    group.bench_function("allocate_link_collect", |b| {
        b.iter_batched(
            || Session::new(SimConfig::with_capacity(10_000)).unwrap(),
            |mut session| {
                let root = session.create_object(Some("root"), Some(10)).unwrap();
                let mut previous = root.id;
                for _ in 0..100 {
                    let next = session.create_object(None, None).unwrap();
                    session.create_reference(previous, next.id).unwrap();
                    previous = next.id;
                }
                black_box(session.run_collection(Algorithm::Tracing))
            },
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_session_creation,
    bench_create_object,
    bench_create_reference,
    bench_tracing,
    bench_reference_counting,
    bench_snapshot,
    bench_session_cycle
);
criterion_main!(benches);
