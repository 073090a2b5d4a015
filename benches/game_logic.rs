use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sprint40::core::{ActivePiece, Board, Engine, RunSnapshot};
use sprint40::input::InputHandler;
use sprint40::types::{GameAction, PieceKind, Rotation, Tuning};

fn playing_engine() -> Engine {
    let mut engine = Engine::new(12345, Tuning::default());
    for _ in 0..3 {
        engine.update(1000);
    }
    engine
}

fn bench_update(c: &mut Criterion) {
    let mut engine = playing_engine();

    c.bench_function("engine_update_16ms", |b| {
        b.iter(|| {
            engine.update(black_box(16));
            if engine.state() != sprint40::types::EngineState::Playing {
                engine.restart();
            }
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut board = Board::new();
            for y in 18..22 {
                board.fill_row_except(y, &[], PieceKind::I);
            }
            black_box(board.clear_lines())
        })
    });
}

fn bench_drop_distance(c: &mut Criterion) {
    let mut board = Board::new();
    for y in 12..22 {
        board.fill_row_except(y, &[y % 10], PieceKind::S);
    }
    let piece = ActivePiece::spawn(PieceKind::T);

    c.bench_function("drop_distance", |b| {
        b.iter(|| black_box(board.drop_distance(black_box(&piece))))
    });
}

fn bench_hard_drop_cycle(c: &mut Criterion) {
    let mut engine = playing_engine();

    c.bench_function("hard_drop_cycle", |b| {
        b.iter(|| {
            if !engine.hard_drop() {
                engine.restart();
                for _ in 0..3 {
                    engine.update(1000);
                }
            }
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    let mut engine = playing_engine();

    c.bench_function("rotate_cw", |b| {
        b.iter(|| {
            engine.rotate_cw();
        })
    });

    let board = Board::new();
    let piece = ActivePiece {
        kind: PieceKind::I,
        rotation: Rotation::West,
        x: -1,
        y: 5,
    };
    c.bench_function("kick_resolve_wall", |b| {
        b.iter(|| {
            sprint40::core::try_rotate(black_box(&piece), Rotation::North, |p| board.can_place(p))
        })
    });
}

fn bench_input_update(c: &mut Criterion) {
    let mut input = InputHandler::with_config(100, 0);
    input.handle_press(GameAction::MoveRight);

    c.bench_function("input_update_arr0", |b| {
        b.iter(|| black_box(input.update(black_box(16))))
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let engine = playing_engine();
    let mut snap = RunSnapshot::default();

    c.bench_function("snapshot_into", |b| {
        b.iter(|| {
            engine.snapshot_into(&mut snap);
            black_box(&snap);
        })
    });
}

criterion_group!(
    benches,
    bench_update,
    bench_line_clear,
    bench_drop_distance,
    bench_hard_drop_cycle,
    bench_rotate,
    bench_input_update,
    bench_snapshot
);
criterion_main!(benches);
