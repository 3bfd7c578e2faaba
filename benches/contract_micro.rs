//! Micro-benchmark for structural compression.
//!
//! Measures contracting many disjoint ranges and expanding them again.

use bitseq::BitSequence;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Contract every `width`-bit block from the end toward the start so stored
/// positions of the remaining blocks stay put.
fn contract_blocks(data: &BitSequence, width: usize) -> BitSequence {
    let mut out = data.clone();
    let blocks = data.number_of_bits() / width;
    for block in (0..blocks).rev() {
        let first = block * width;
        out.contract(first, first + width).unwrap();
    }
    out
}

fn bench_contract(c: &mut Criterion) {
    let mut group = c.benchmark_group("contract");

    for n in [256, 4_096] {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let data = BitSequence::random(n, 0.5, &mut rng).unwrap();

        group.bench_with_input(BenchmarkId::new("blocks_of_8", n), &data, |b, data| {
            b.iter(|| contract_blocks(black_box(data), 8))
        });

        let contracted = contract_blocks(&data, 8);
        group.bench_with_input(
            BenchmarkId::new("uncontracted", n),
            &contracted,
            |b, contracted| b.iter(|| black_box(contracted).uncontracted()),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_contract);
criterion_main!(benches);
