//! Benchmarks for move generation.
//!
//! Covers plain move generation on positions from different game phases,
//! capture-heavy positions where the longest-chain search dominates, and a
//! shallow perft from the starting position.

use dama::board::{color::Color, Board};
use dama::dama_position;
use dama::move_generator::MoveGenerator;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

/// Test positions representing different game phases and move complexity.
fn benchmark_positions() -> Vec<(String, Board)> {
    vec![
        ("starting".to_string(), Board::starting_position()),
        // Several men can jump and chains branch
        (
            "captures".to_string(),
            dama_position! {
                ........
                ........
                .b.b.b..
                ..w.....
                .b...b..
                ..w.w...
                ........
                ........
            },
        ),
        // Kings sliding across an open board
        (
            "kings".to_string(),
            dama_position! {
                B......B
                ........
                ..b..b..
                ........
                ........
                ..w..w..
                ........
                W......W
            },
        ),
        (
            "endgame".to_string(),
            dama_position! {
                ........
                ...b....
                ........
                ........
                ....W...
                ........
                ........
                ........
            },
        ),
    ]
}

fn benchmark_move_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("Move Generation");
    group.sample_size(10);
    group.warm_up_time(std::time::Duration::from_millis(100));
    group.measurement_time(std::time::Duration::from_secs(1));

    let move_generator = MoveGenerator::default();

    for (name, board) in benchmark_positions() {
        for color in [Color::White, Color::Black] {
            group.bench_with_input(
                BenchmarkId::new(format!("{}_{:?}", name, color), &name),
                &name,
                |b, _| {
                    b.iter(|| {
                        let moves = move_generator.generate_moves(black_box(&board), color);
                        black_box(moves)
                    })
                },
            );
        }
    }

    group.finish();
}

fn benchmark_count_positions(c: &mut Criterion) {
    let mut group = c.benchmark_group("Count Positions");
    group.sample_size(10);

    let move_generator = MoveGenerator::default();
    let board = Board::starting_position();

    for depth in 2..=4u8 {
        group.bench_with_input(BenchmarkId::new("starting", depth), &depth, |b, &depth| {
            b.iter(|| move_generator.count_positions(depth, black_box(&board), Color::White))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_move_generation,
    benchmark_count_positions
);
criterion_main!(benches);
