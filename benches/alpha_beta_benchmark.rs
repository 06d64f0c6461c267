use std::time::Duration;

use dama::alpha_beta_searcher::{analyze, find_best_move, EngineConfig, SearchContext};
use dama::board::color::Color;
use dama::board::Board;
use dama::dama_position;
use dama::evaluate::{WeightedEvaluator, Weights};

use criterion::{criterion_group, criterion_main, Criterion};

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Alpha Beta");
    group.sample_size(10);

    group.bench_function("starting position depth 4", |b| {
        b.iter(search_starting_position)
    });
    group.bench_function("king endgame depth 6", |b| b.iter(search_king_endgame));
    group.bench_function("analysis depth 3", |b| b.iter(analyze_starting_position));

    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);

fn context(max_depth: u8) -> SearchContext {
    SearchContext::new(EngineConfig {
        time_limit: Duration::from_secs(60),
        max_depth,
    })
}

fn search_starting_position() {
    let board = Board::starting_position();
    let evaluator = WeightedEvaluator::new(Weights::default());
    let mut context = context(4);

    find_best_move(&mut context, &board, Color::White, &[], &evaluator).unwrap();
}

fn search_king_endgame() {
    let board = dama_position! {
        ........
        .b...b..
        ........
        ...W....
        ........
        ..w.....
        ......B.
        ........
    };
    let evaluator = WeightedEvaluator::new(Weights::default());
    let mut context = context(6);

    find_best_move(&mut context, &board, Color::White, &[], &evaluator).unwrap();
}

fn analyze_starting_position() {
    let board = Board::starting_position();
    let evaluator = WeightedEvaluator::new(Weights::default());
    let mut context = context(3);

    analyze(&mut context, &board, Color::White, &evaluator, 3).unwrap();
}
