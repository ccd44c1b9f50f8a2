use criterion::{black_box, criterion_group, criterion_main, Criterion};

use duotris::core::{Board, Session, Shape, SimpleRng};
use duotris::types::{Intent, PieceKind};

fn bench_session_tick(c: &mut Criterion) {
    let mut session = Session::new(12345);
    session.begin(2);

    c.bench_function("session_tick", |b| {
        b.iter(|| {
            session.tick();
            black_box(session.drop_interval_ms());
        })
    });
}

fn bench_hard_drop(c: &mut Criterion) {
    c.bench_function("hard_drop_to_lock", |b| {
        b.iter(|| {
            let mut session = Session::new(12345);
            session.begin(1);
            session.apply(0, black_box(Intent::HardDrop));
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut board = Board::new();
            for y in 16..20 {
                for x in 0..10 {
                    board.set(x, y, Some(PieceKind::I));
                }
            }
            black_box(board.clear_completed_lines());
        })
    });
}

fn bench_inject_garbage(c: &mut Criterion) {
    let mut rng = SimpleRng::new(99);
    c.bench_function("inject_2_garbage_rows", |b| {
        b.iter(|| {
            let mut board = Board::new();
            board.inject_garbage(black_box(2), &mut rng);
        })
    });
}

fn bench_collision_scan(c: &mut Criterion) {
    let board = Board::new();
    let shape = Shape::of(PieceKind::T);
    c.bench_function("collides_probe", |b| {
        b.iter(|| black_box(board.collides(&shape, black_box(4), black_box(10))))
    });
}

fn bench_rotation(c: &mut Criterion) {
    let shape = Shape::of(PieceKind::L);
    c.bench_function("rotate_cw", |b| b.iter(|| black_box(shape.rotate_cw())));
}

criterion_group!(
    benches,
    bench_session_tick,
    bench_hard_drop,
    bench_line_clear,
    bench_inject_garbage,
    bench_collision_scan,
    bench_rotation
);
criterion_main!(benches);
