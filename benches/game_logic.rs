use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tui_2048::core::{Board, BoardEngine, EngineConfig};
use tui_2048::types::Direction;

fn busy_board() -> Board {
    let rows = vec![
        vec![2, 2, 4, 4],
        vec![8, 0, 8, 16],
        vec![2, 4, 4, 2],
        vec![0, 32, 32, 64],
    ];
    Board::from_rows(&rows).unwrap()
}

fn bench_resolve(c: &mut Criterion) {
    let board = busy_board();

    c.bench_function("resolve_left_4x4", |b| {
        b.iter(|| {
            let mut board = board.clone();
            black_box(board.resolve(black_box(Direction::Left)));
        })
    });
}

fn bench_can_move(c: &mut Criterion) {
    let board = busy_board();

    c.bench_function("legal_directions_4x4", |b| {
        b.iter(|| black_box(board.legal_directions()))
    });
}

fn bench_apply(c: &mut Criterion) {
    let mut engine = BoardEngine::new(EngineConfig::default().with_seed(12345)).unwrap();
    engine.start_game();
    let mut i = 0usize;

    c.bench_function("engine_apply_cycle", |b| {
        b.iter(|| {
            let report = engine.apply(Direction::ALL[i % 4]).unwrap();
            i += 1;
            if report.outcome.is_terminal() {
                engine.restart();
            }
        })
    });
}

fn bench_start(c: &mut Criterion) {
    let mut engine = BoardEngine::new(EngineConfig::default().with_seed(7).with_size(8)).unwrap();

    c.bench_function("restart_8x8", |b| b.iter(|| black_box(engine.restart())));
}

criterion_group!(benches, bench_resolve, bench_can_move, bench_apply, bench_start);
criterion_main!(benches);
