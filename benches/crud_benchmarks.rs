use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use llrb_tree::{LlrbMap, LlrbSet};
use std::collections::{BTreeMap, BTreeSet};
use std::hint::black_box;

const SIZES: [usize; 3] = [1_000, 10_000, 100_000];

// ─── Key sequences ──────────────────────────────────────────────────────────

fn ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).collect()
}

fn random_keys(n: usize) -> Vec<i64> {
    // Deterministic LCG so runs are comparable.
    let mut keys = Vec::with_capacity(n);
    let mut x: u64 = 12345;
    for _ in 0..n {
        x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
        keys.push((x >> 33) as i64);
    }
    keys
}

// ─── Map ────────────────────────────────────────────────────────────────────

fn bench_map_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("map_insert");
    for n in SIZES {
        for (order, keys) in [("ordered", ordered_keys(n)), ("random", random_keys(n))] {
            group.bench_with_input(BenchmarkId::new(format!("LlrbMap/{order}"), n), &keys, |b, keys| {
                b.iter(|| keys.iter().map(|&k| (k, k)).collect::<LlrbMap<_, _>>());
            });
            group.bench_with_input(BenchmarkId::new(format!("BTreeMap/{order}"), n), &keys, |b, keys| {
                b.iter(|| keys.iter().map(|&k| (k, k)).collect::<BTreeMap<_, _>>());
            });
        }
    }
    group.finish();
}

fn bench_map_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("map_get");
    for n in SIZES {
        let keys = random_keys(n);
        let llrb: LlrbMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();
        let btree: BTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();

        group.bench_function(BenchmarkId::new("LlrbMap", n), |b| {
            b.iter(|| keys.iter().filter_map(|k| llrb.get(k)).sum::<i64>());
        });
        group.bench_function(BenchmarkId::new("BTreeMap", n), |b| {
            b.iter(|| keys.iter().filter_map(|k| btree.get(k)).sum::<i64>());
        });
    }
    group.finish();
}

fn bench_map_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("map_remove");
    for n in SIZES {
        let keys = random_keys(n);
        let llrb: LlrbMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();
        let btree: BTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();

        group.bench_function(BenchmarkId::new("LlrbMap", n), |b| {
            b.iter_batched(
                || llrb.clone(),
                |mut map| {
                    for k in &keys {
                        map.remove(k);
                    }
                    map
                },
                criterion::BatchSize::LargeInput,
            );
        });
        group.bench_function(BenchmarkId::new("BTreeMap", n), |b| {
            b.iter_batched(
                || btree.clone(),
                |mut map| {
                    for k in &keys {
                        map.remove(k);
                    }
                    map
                },
                criterion::BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

fn bench_map_delete_min(c: &mut Criterion) {
    let mut group = c.benchmark_group("map_delete_min");
    for n in SIZES {
        let llrb: LlrbMap<i64, i64> = random_keys(n).into_iter().map(|k| (k, k)).collect();
        let btree: BTreeMap<i64, i64> = llrb.iter().map(|(&k, &v)| (k, v)).collect();

        group.bench_function(BenchmarkId::new("LlrbMap", n), |b| {
            b.iter_batched(
                || llrb.clone(),
                |mut map| while map.delete_min().is_ok() {},
                criterion::BatchSize::LargeInput,
            );
        });
        group.bench_function(BenchmarkId::new("BTreeMap", n), |b| {
            b.iter_batched(
                || btree.clone(),
                |mut map| while map.pop_first().is_some() {},
                criterion::BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

// ─── Order statistics ───────────────────────────────────────────────────────

fn bench_select(c: &mut Criterion) {
    let mut group = c.benchmark_group("select");
    for n in SIZES {
        let llrb: LlrbMap<i64, i64> = ordered_keys(n).into_iter().map(|k| (k, k)).collect();
        let btree: BTreeMap<i64, i64> = llrb.iter().map(|(&k, &v)| (k, v)).collect();
        let ranks: Vec<usize> = random_keys(256).into_iter().map(|k| k as usize % n).collect();

        group.bench_function(BenchmarkId::new("LlrbMap", n), |b| {
            b.iter(|| ranks.iter().filter_map(|&r| llrb.select(r).ok()).sum::<i64>());
        });
        // BTreeMap has no rank index, so this is a linear scan per lookup.
        group.bench_function(BenchmarkId::new("BTreeMap", n), |b| {
            b.iter(|| ranks.iter().filter_map(|&r| btree.keys().nth(r)).sum::<i64>());
        });
    }
    group.finish();
}

fn bench_rank_and_count(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank_and_count");
    for n in SIZES {
        let keys = random_keys(n);
        let llrb: LlrbMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();
        let probes = &keys[..keys.len().min(256)];

        group.bench_function(BenchmarkId::new("rank", n), |b| {
            b.iter(|| probes.iter().map(|k| llrb.rank(k)).sum::<usize>());
        });
        group.bench_function(BenchmarkId::new("len_between", n), |b| {
            b.iter(|| probes.windows(2).map(|w| llrb.len_between(&w[0], &w[1])).sum::<usize>());
        });
        group.bench_function(BenchmarkId::new("floor", n), |b| {
            b.iter(|| probes.iter().filter_map(|k| llrb.floor(&(k - 1)).ok().flatten()).count());
        });
    }
    group.finish();
}

// ─── Set ────────────────────────────────────────────────────────────────────

fn bench_set_insert_contains(c: &mut Criterion) {
    let mut group = c.benchmark_group("set_insert_contains");
    for n in SIZES {
        let keys = random_keys(n);

        group.bench_function(BenchmarkId::new("LlrbSet", n), |b| {
            b.iter(|| {
                let set: LlrbSet<i64> = keys.iter().copied().collect();
                keys.iter().filter(|k| set.contains(black_box(*k))).count()
            });
        });
        group.bench_function(BenchmarkId::new("BTreeSet", n), |b| {
            b.iter(|| {
                let set: BTreeSet<i64> = keys.iter().copied().collect();
                keys.iter().filter(|k| set.contains(black_box(*k))).count()
            });
        });
    }
    group.finish();
}

criterion_group!(map_benches, bench_map_insert, bench_map_get, bench_map_remove, bench_map_delete_min,);

criterion_group!(order_statistic_benches, bench_select, bench_rank_and_count,);

criterion_group!(set_benches, bench_set_insert_contains,);

criterion_main!(map_benches, order_statistic_benches, set_benches);
