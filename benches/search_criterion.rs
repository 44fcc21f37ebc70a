use std::hint::black_box;
use std::time::Duration;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::SeedableRng;

use duo_board::game_state::board_types::Color;
use duo_board::rules::checkers_rules::CheckersRules;
use duo_board::rules::chess_rules::ChessRules;
use duo_board::rules::perft::perft;
use duo_board::rules::rule_engine::RuleEngine;
use duo_board::search::alpha_beta::{search_best_move, SearchConfig};
use duo_board::search::checkers_scoring::CheckersScorer;
use duo_board::search::chess_scoring::ChessScorer;

fn bench_perft(c: &mut Criterion) {
    let mut group = c.benchmark_group("perft");
    group.sample_size(20);
    group.measurement_time(Duration::from_secs(5));

    for depth in 1..=3u8 {
        let mut state = ChessRules.new_game();
        let nodes = perft(&ChessRules, &mut state, depth)
            .expect("perft should run")
            .nodes;
        group.throughput(Throughput::Elements(nodes as u64));
        group.bench_with_input(BenchmarkId::new("chess", depth), &depth, |b, &depth| {
            b.iter(|| {
                let counts = perft(&ChessRules, &mut state, black_box(depth)).expect("perft");
                black_box(counts.nodes)
            })
        });
    }

    for depth in 1..=5u8 {
        let mut state = CheckersRules.new_game();
        let nodes = perft(&CheckersRules, &mut state, depth)
            .expect("perft should run")
            .nodes;
        group.throughput(Throughput::Elements(nodes as u64));
        group.bench_with_input(BenchmarkId::new("checkers", depth), &depth, |b, &depth| {
            b.iter(|| {
                let counts = perft(&CheckersRules, &mut state, black_box(depth)).expect("perft");
                black_box(counts.nodes)
            })
        });
    }

    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("alpha_beta");
    group.sample_size(10);
    group.measurement_time(Duration::from_secs(8));

    for depth in [2u8, 3, 4] {
        let mut state = ChessRules.new_game();
        group.bench_with_input(BenchmarkId::new("chess_start", depth), &depth, |b, &depth| {
            let mut rng = StdRng::seed_from_u64(1);
            let config = SearchConfig {
                depth,
                eval_noise: 0,
            };
            b.iter(|| {
                let result = search_best_move(
                    &ChessRules,
                    &ChessScorer,
                    &mut state,
                    Color::White,
                    black_box(config),
                    &mut rng,
                )
                .expect("search should run");
                black_box(result.best_move)
            })
        });
    }

    for depth in [3u8, 4, 5] {
        let mut state = CheckersRules.new_game();
        group.bench_with_input(BenchmarkId::new("checkers_start", depth), &depth, |b, &depth| {
            let mut rng = StdRng::seed_from_u64(1);
            let config = SearchConfig {
                depth,
                eval_noise: 0,
            };
            b.iter(|| {
                let result = search_best_move(
                    &CheckersRules,
                    &CheckersScorer,
                    &mut state,
                    Color::White,
                    black_box(config),
                    &mut rng,
                )
                .expect("search should run");
                black_box(result.best_move)
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_perft, bench_search);
criterion_main!(benches);
