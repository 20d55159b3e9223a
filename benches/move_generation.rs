use criterion::{black_box, criterion_group, criterion_main, Criterion};

use royal_ur::core::{GameRng, MatchState, PieceId, Position, Side};
use royal_ur::rules::{legal_moves, MatchEngine};
use royal_ur::MatchConfig;

fn midgame_state() -> MatchState {
    let mut state = MatchState::new(Side::Light);
    let placements = [
        (0, Position::Path(2)),
        (1, Position::Path(6)),
        (2, Position::Path(9)),
        (3, Position::Finished),
        (7, Position::Path(5)),
        (8, Position::Path(7)),
        (9, Position::Path(12)),
    ];
    for (id, pos) in placements {
        let _ = state.place_piece(PieceId::new(id), pos);
    }
    state
}

fn bench_legal_moves(c: &mut Criterion) {
    let state = midgame_state();
    c.bench_function("legal_moves_midgame", |b| {
        b.iter(|| {
            for roll in 1..=4 {
                black_box(legal_moves(black_box(&state), roll));
            }
        })
    });
}

fn bench_random_playout(c: &mut Criterion) {
    c.bench_function("random_playout", |b| {
        let mut seed = 0u64;
        b.iter(|| {
            seed += 1;
            let mut engine = MatchEngine::new(MatchConfig::default().with_seed(seed));
            let mut picker = GameRng::new(seed ^ 0xA5A5);
            while !engine.state().is_over() {
                engine.roll_dice();
                let moves = engine.state().possible_moves().to_vec();
                match picker.choose(&moves) {
                    Some(&piece) => engine.move_piece(piece),
                    None => engine.switch_turn(),
                }
            }
            black_box(engine.state().winner())
        })
    });
}

criterion_group!(benches, bench_legal_moves, bench_random_playout);
criterion_main!(benches);
