//! Policy comparison benchmarks over an in-memory store.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::Zipf;

use kvscache::{AnyCache, CachePolicy, KvCache, MemoryStore};

const CAPACITY: usize = 256;
const KEY_SPACE: usize = 1024;
const OPS: usize = 4096;

/// Zipf-distributed key sequence; seeded so every run replays the same keys.
fn workload() -> Vec<String> {
    let zipf = Zipf::new(KEY_SPACE as u64, 1.01).unwrap();
    StdRng::seed_from_u64(42)
        .sample_iter(zipf)
        .take(OPS)
        .map(|rank| format!("key{}", rank as usize - 1))
        .collect()
}

fn populated_store() -> MemoryStore {
    MemoryStore::with_entries((0..KEY_SPACE).map(|i| (format!("key{}", i), format!("value{}", i))))
}

fn bench_get(criterion: &mut Criterion) {
    let keys = workload();
    let mut group = criterion.benchmark_group("get");

    for policy in CachePolicy::ALL {
        group.bench_with_input(BenchmarkId::from_parameter(policy), &keys, |bencher, keys| {
            let mut cache = AnyCache::new(policy, populated_store(), CAPACITY).unwrap();
            bencher.iter(|| {
                for key in keys {
                    black_box(cache.get(key).unwrap());
                }
            });
        });
    }
    group.finish();
}

fn bench_set_get(criterion: &mut Criterion) {
    let keys = workload();
    let mut group = criterion.benchmark_group("set_get");

    for policy in CachePolicy::ALL {
        group.bench_with_input(BenchmarkId::from_parameter(policy), &keys, |bencher, keys| {
            let mut cache = AnyCache::new(policy, populated_store(), CAPACITY).unwrap();
            bencher.iter(|| {
                for (i, key) in keys.iter().enumerate() {
                    if i % 4 == 0 {
                        cache.set(key, "updated").unwrap();
                    } else {
                        black_box(cache.get(key).unwrap());
                    }
                }
                cache.flush().unwrap();
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_get, bench_set_get);
criterion_main!(benches);
