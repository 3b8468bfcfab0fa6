use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use minesweep_core::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::hint::black_box;

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for (name, config) in DifficultyTable::default().iter() {
        group.bench_function(name.name(), |b| {
            let mut rng = SmallRng::seed_from_u64(0);
            b.iter(|| generate(black_box(config), &mut rng).unwrap());
        });
    }
    group.finish();
}

fn bench_flood_fill(c: &mut Criterion) {
    // a single mine in the corner leaves one huge blank region
    let board = Board::from_mine_coords((255, 255), &[(254, 254)]).unwrap();

    c.bench_function("flood_fill_255x255", |b| {
        b.iter_batched(
            || board.clone(),
            |board| board.reveal(black_box((0, 0))).unwrap(),
            BatchSize::LargeInput,
        );
    });
}

criterion_group!(benches, bench_generate, bench_flood_fill);
criterion_main!(benches);
