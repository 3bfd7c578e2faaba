//! Micro-benchmark for neighbourhood operators.
//!
//! Covers:
//! 1. Random sampling at a bounded Hamming distance
//! 2. Exhaustive enumeration at radius 2
//! 3. Hamming distance between random sequences

use bitseq::BitSequence;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn random_sequence(n: usize, seed: u64) -> BitSequence {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    BitSequence::random(n, 0.5, &mut rng).unwrap()
}

fn bench_random_select(c: &mut Criterion) {
    let mut group = c.benchmark_group("random_select_in_neighbourhood");

    for n in [64, 1_024, 16_384] {
        let data = random_sequence(n, 42);
        let mut rng = ChaCha8Rng::seed_from_u64(123);

        group.bench_with_input(BenchmarkId::new("radius_1_8", n), &data, |b, data| {
            b.iter(|| {
                data.random_select_in_neighbourhood(1, black_box(8), &mut rng)
                    .unwrap()
            })
        });
    }

    group.finish();
}

fn bench_enumerate(c: &mut Criterion) {
    let mut group = c.benchmark_group("neighbours");

    for n in [32, 128] {
        let data = random_sequence(n, 7);

        group.bench_with_input(BenchmarkId::new("radius_2", n), &data, |b, data| {
            b.iter(|| data.neighbours(black_box(2)).unwrap().count())
        });
    }

    group.finish();
}

fn bench_hamming(c: &mut Criterion) {
    let mut group = c.benchmark_group("hamming_distance");

    for n in [1_024, 65_536] {
        let a = random_sequence(n, 1);
        let b = random_sequence(n, 2);

        group.bench_with_input(BenchmarkId::new("plain", n), &(&a, &b), |bench, (a, b)| {
            bench.iter(|| a.hamming_distance_to(black_box(b)).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_random_select, bench_enumerate, bench_hamming);
criterion_main!(benches);
