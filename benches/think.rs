use criterion::{black_box, criterion_group, criterion_main, Criterion};

use chess_think::*;

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

pub fn criterion_fixed_depth(c: &mut Criterion) {
    // Setup
    let setups = [
        ("cached", SearchConfig::cached()),
        ("quiescent", SearchConfig::quiescent()),
        ("baseline", SearchConfig::baseline()),
    ];
    let depth = 3;

    // Benchmarks

    for (name, config) in setups {
        c.bench_function(&format!("kiwipete_depth_{depth}_{name}"), |b| {
            b.iter(|| {
                let mut position = ChessPosition::from_fen(KIWIPETE).unwrap();
                let mut searcher = Searcher::new(config.clone());
                let report = searcher.search_depth(&mut position, black_box(depth)).unwrap();
                assert!(report.best_move.is_some());
            })
        });
    }
}

pub fn criterion_mate_in_one(c: &mut Criterion) {
    // Setup
    let position = ChessPosition::from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1").unwrap();

    // Benchmarks

    c.bench_function("back_rank_mate_think", |b| {
        b.iter(|| {
            let mut position = position.clone();
            let mut searcher = Searcher::new(SearchConfig::baseline());
            let best = searcher.think(&mut position, black_box(&60_000u64)).unwrap();
            assert_eq!(best.to_string(), "a1a8");
        })
    });
}

criterion_group!(benches, criterion_fixed_depth, criterion_mate_in_one);
criterion_main!(benches);
