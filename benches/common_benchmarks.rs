use std::hint::black_box;

use criterion::BenchmarkId;
use criterion::Criterion;
use criterion::criterion_group;
use criterion::criterion_main;
type RandomState = hashbrown::DefaultHashBuilder;
type OrderlyMap<K, V> = orderly_map::ordered_map::OrderedMap<K, V, RandomState>;

type HashLinkedMap<K, V> = hashlink::LinkedHashMap<K, V, RandomState>;
type IndexMap<K, V> = indexmap::IndexMap<K, V, RandomState>;

const SIZES: &[usize] = &[1000, 10000];

fn filled(size: usize) -> OrderlyMap<usize, usize> {
    let mut map = OrderlyMap::with_capacity_and_hasher(size, RandomState::default());
    for i in 0..size {
        map.set(i, i * 2);
    }
    map
}

fn bench_set(c: &mut Criterion) {
    let mut group = c.benchmark_group("set");

    for &size in SIZES {
        group.throughput(criterion::Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("orderly_map", size), &size, |b, &size| {
            b.iter(|| {
                let mut map: OrderlyMap<usize, usize> = OrderlyMap::default();
                for i in 0..size {
                    map.set(black_box(i), black_box(i * 2));
                }
                map
            })
        });

        group.bench_with_input(
            BenchmarkId::new("orderly_map_preallocated", size),
            &size,
            |b, &size| {
                b.iter(|| {
                    let mut map: OrderlyMap<usize, usize> =
                        OrderlyMap::with_capacity_and_hasher(size, RandomState::default());
                    for i in 0..size {
                        map.set(black_box(i), black_box(i * 2));
                    }
                    map
                })
            },
        );

        group.bench_with_input(BenchmarkId::new("indexmap", size), &size, |b, &size| {
            b.iter(|| {
                let mut map = IndexMap::default();
                for i in 0..size {
                    map.insert(black_box(i), black_box(i * 2));
                }
                map
            })
        });

        group.bench_with_input(BenchmarkId::new("hashlinked", size), &size, |b, &size| {
            b.iter(|| {
                let mut map = HashLinkedMap::default();
                for i in 0..size {
                    map.insert(black_box(i), black_box(i * 2));
                }
                map
            })
        });
    }

    group.finish();
}

fn bench_delete_from_middle(c: &mut Criterion) {
    let mut group = c.benchmark_group("delete_from_middle");

    for &size in SIZES {
        group.throughput(criterion::Throughput::Elements((size / 2) as u64));

        group.bench_with_input(BenchmarkId::new("orderly_map", size), &size, |b, &size| {
            b.iter_batched(
                || filled(size),
                |mut map| {
                    for i in (size / 4)..(size * 3 / 4) {
                        map.delete(black_box(&i));
                    }
                    map
                },
                criterion::BatchSize::SmallInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("indexmap", size), &size, |b, &size| {
            b.iter_batched(
                || (0..size).map(|i| (i, i * 2)).collect::<IndexMap<_, _>>(),
                |mut map| {
                    for i in (size / 4)..(size * 3 / 4) {
                        map.shift_remove(black_box(&i));
                    }
                    map
                },
                criterion::BatchSize::SmallInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("hashlinked", size), &size, |b, &size| {
            b.iter_batched(
                || (0..size).map(|i| (i, i * 2)).collect::<HashLinkedMap<_, _>>(),
                |mut map| {
                    for i in (size / 4)..(size * 3 / 4) {
                        map.remove(black_box(&i));
                    }
                    map
                },
                criterion::BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("get");

    for &size in SIZES {
        group.throughput(criterion::Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("orderly_map", size), &size, |b, &size| {
            let map = filled(size);
            b.iter(|| {
                let mut sum = 0;
                for i in 0..size {
                    sum += map.get(black_box(&i)).copied().unwrap_or_default();
                }
                sum
            })
        });

        group.bench_with_input(BenchmarkId::new("indexmap", size), &size, |b, &size| {
            let map: IndexMap<_, _> = (0..size).map(|i| (i, i * 2)).collect();
            b.iter(|| {
                let mut sum = 0;
                for i in 0..size {
                    sum += map.get(black_box(&i)).copied().unwrap_or_default();
                }
                sum
            })
        });
    }

    group.finish();
}

fn bench_iteration_sparse(c: &mut Criterion) {
    let mut group = c.benchmark_group("iteration_sparse");

    for &size in SIZES {
        group.bench_with_input(BenchmarkId::new("orderly_map", size), &size, |b, &size| {
            let mut map = filled(size);
            for i in (0..size).step_by(3) {
                map.delete(&i);
            }

            b.iter(|| {
                let mut sum = 0;
                for (key, value) in map.iter() {
                    sum += black_box(*key) + black_box(*value);
                }
                sum
            })
        });

        group.bench_with_input(BenchmarkId::new("hashlinked", size), &size, |b, &size| {
            let mut map: HashLinkedMap<_, _> = (0..size).map(|i| (i, i * 2)).collect();
            for i in (0..size).step_by(3) {
                map.remove(&i);
            }

            b.iter(|| {
                let mut sum = 0;
                for (key, value) in map.iter() {
                    sum += black_box(*key) + black_box(*value);
                }
                sum
            })
        });
    }

    group.finish();
}

fn bench_sort_values(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort_values");

    for &size in SIZES {
        group.throughput(criterion::Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("orderly_map", size), &size, |b, &size| {
            b.iter_batched(
                || {
                    let mut map = OrderlyMap::with_capacity_and_hasher(size, RandomState::default());
                    for i in 0..size {
                        map.set(i, (i * 7919) % size);
                    }
                    map
                },
                |mut map| {
                    map.sort_values(|a, b| a < b);
                    map
                },
                criterion::BatchSize::SmallInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("indexmap", size), &size, |b, &size| {
            b.iter_batched(
                || (0..size).map(|i| (i, (i * 7919) % size)).collect::<IndexMap<_, _>>(),
                |mut map| {
                    map.sort_by(|_, a, _, b| a.cmp(b));
                    map
                },
                criterion::BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_get_index(c: &mut Criterion) {
    let mut group = c.benchmark_group("get_index");

    for &size in SIZES {
        group.bench_with_input(BenchmarkId::new("orderly_map", size), &size, |b, &size| {
            let map = filled(size);
            b.iter(|| map.get_index(black_box(size / 3)))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_set,
    bench_delete_from_middle,
    bench_get,
    bench_iteration_sparse,
    bench_sort_values,
    bench_get_index,
);
criterion_main!(benches);
