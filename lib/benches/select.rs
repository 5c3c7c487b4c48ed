use snake_core::{parse_str, Legality, PriorityStrategy, Strategy, Turn};

fn recorded_turns() -> Vec<Turn> {
    [
        include_str!("../fixtures/start_of_game.json"),
        include_str!("../fixtures/mid_game.json"),
        include_str!("../fixtures/coiled.json"),
        include_str!("../fixtures/wall_hugger.json"),
    ]
    .iter()
    .map(|raw| parse_str(raw).unwrap())
    .collect()
}

fn main() {
    divan::main();
}

#[divan::bench]
fn parse_recorded_turns() -> Vec<Turn> {
    recorded_turns()
}

#[divan::bench(args = [Legality::Boundary, Legality::Occupancy])]
fn choose_move(bencher: divan::Bencher, legality: Legality) {
    let turns = recorded_turns();
    let strategy = PriorityStrategy::new(legality);
    bencher.bench_local(|| {
        for turn in &turns {
            divan::black_box(strategy.choose_move(divan::black_box(turn)));
        }
    });
}

#[divan::bench]
fn decode_with_simd_json(bencher: divan::Bencher) {
    let raw = include_str!("../fixtures/mid_game.json");
    bencher
        .with_inputs(|| raw.as_bytes().to_vec())
        .bench_local_values(|mut bytes| snake_core::decode(&mut bytes).unwrap());
}
