use autosweep_core::*;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn generate_boards(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for (width, height, mines) in [(9, 9, 10), (12, 12, 28), (16, 16, 76)] {
        let config = GameConfig::new_unchecked(width, height, mines);
        let board = Board::new(config);
        let start = usize::from(config.total_tiles()) / 2;
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{width}x{height}/{mines}")),
            &board,
            |b, board| {
                let mut generator = RandomMineGenerator::seeded(42);
                b.iter(|| generator.generate(black_box(board), start).unwrap())
            },
        );
    }
    group.finish();
}

criterion_group!(benches, generate_boards);
criterion_main!(benches);
