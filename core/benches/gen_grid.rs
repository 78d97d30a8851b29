use criterion::{Criterion, criterion_group, criterion_main};
use rollcraft_core::{GridGenerator, RandomGridGenerator, Session};
use std::hint::black_box;

fn bench_generate(c: &mut Criterion) {
    let mut seed = 0u64;
    c.bench_function("generate_grid", |b| {
        b.iter(|| {
            seed = seed.wrapping_add(1);
            black_box(RandomGridGenerator::new(black_box(seed)).generate())
        })
    });
}

fn bench_full_round(c: &mut Criterion) {
    c.bench_function("reveal_all_cells", |b| {
        b.iter(|| {
            let mut session = Session::from_seed(black_box(17));
            for index in 0..9 {
                let _ = session.reveal(index);
            }
            session.claim();
            black_box(session.balance())
        })
    });
}

criterion_group!(benches, bench_generate, bench_full_round);
criterion_main!(benches);
