use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use arena_chess::game_state::board::Board;
use arena_chess::search::board_scoring::Evaluator;
use arena_chess::search::searcher::{Search, SearchConfig};

const POSITIONS: &[(&str, &str)] = &[
    ("start", "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
    (
        "kiwipete",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    ),
    ("endgame", "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1"),
];

fn bench_fixed_depth_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search_fixed_depth");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(5));
    group.sample_size(10);

    let evaluator = Evaluator::deterministic();
    for depth in [2u8, 3] {
        let search = Search::new(SearchConfig::fixed_depth(depth));
        for (name, fen) in POSITIONS {
            let mut board = Board::from_fen(fen).expect("benchmark FEN should parse");
            group.bench_with_input(
                BenchmarkId::from_parameter(format!("{name}_d{depth}")),
                &depth,
                |b, _| {
                    b.iter(|| black_box(search.search(black_box(&mut board), &evaluator).best_move));
                },
            );
        }
    }

    group.finish();
}

criterion_group!(search_benches, bench_fixed_depth_search);
criterion_main!(search_benches);
