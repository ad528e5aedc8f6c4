use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rustc_hash::FxHashMap;

use ashta_chamma::{
    movable_pieces, roll, BoardType, GameRng, GameSession, GameState, PlayerSetup, RollContext,
    TurnPhase,
};

fn four_player_setups() -> Vec<PlayerSetup> {
    vec![
        PlayerSetup::new("a", "pebble"),
        PlayerSetup::new("b", "bangle"),
        PlayerSetup::new("c", "button"),
        PlayerSetup::new("d", "splint"),
    ]
}

fn bench_roll_generation(c: &mut Criterion) {
    let state = GameState::new(four_player_setups(), BoardType::Standard);
    let attempts = FxHashMap::default();
    let mut rng = GameRng::new(42);

    c.bench_function("roll_generation", |b| {
        b.iter(|| {
            let ctx = RollContext {
                state: black_box(&state),
                pity: 3,
                attempts: &attempts,
            };
            black_box(roll::roll(&ctx, &mut rng))
        })
    });
}

fn bench_legality_scan(c: &mut Criterion) {
    let state = GameState::new(four_player_setups(), BoardType::InnerGadulu);
    let player = state.current_player();

    c.bench_function("movable_pieces", |b| {
        b.iter(|| {
            for points in [1u8, 2, 3, 4, 8] {
                black_box(movable_pieces(player, points, state.board));
            }
        })
    });
}

fn bench_playout(c: &mut Criterion) {
    c.bench_function("playout_1000_rolls", |b| {
        b.iter(|| {
            let mut session =
                GameSession::new(four_player_setups(), BoardType::Standard, 42).unwrap();
            for _ in 0..1000 {
                if session.phase() == TurnPhase::GameOver {
                    break;
                }
                let report = session.request_roll().unwrap();
                let mut next = report.movable.first().copied();
                while let Some(piece) = next {
                    session.select_piece(piece).unwrap();
                    // A leftover Ashta half stays pending; spend it too.
                    next = session.movable().first().copied();
                }
            }
            black_box(session.state().history.len())
        })
    });
}

criterion_group!(
    benches,
    bench_roll_generation,
    bench_legality_scan,
    bench_playout
);
criterion_main!(benches);
