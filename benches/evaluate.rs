use cardroom::Card;
use cardroom::Evaluator;
use criterion::criterion_group;
use criterion::criterion_main;
use criterion::Criterion;

fn cards(names: &[&str]) -> Vec<Card> {
    names.iter().map(|s| s.parse().unwrap()).collect()
}

fn build_standard_table(c: &mut Criterion) {
    c.bench_function("build 52-card 5-hand lookup table", |b| {
        b.iter(|| Evaluator::new(4, 13, 5, 0, true, None).unwrap())
    });
}

fn evaluate_holdem_hand(c: &mut Criterion) {
    let evaluator = Evaluator::new(4, 13, 5, 0, true, None).unwrap();
    let hole = cards(&["As", "Kd"]);
    let board = cards(&["2c", "7d", "9s", "Jc", "Qd"]);
    c.bench_function("evaluate 7-card hold'em hand", |b| {
        b.iter(|| evaluator.evaluate(&hole, &board))
    });
}

fn evaluate_omaha_hand(c: &mut Criterion) {
    let evaluator = Evaluator::new(4, 13, 5, 2, true, None).unwrap();
    let hole = cards(&["As", "Kd", "Th", "7c"]);
    let board = cards(&["2c", "7d", "9s", "Jc", "Qd"]);
    c.bench_function("evaluate omaha hand", |b| {
        b.iter(|| evaluator.evaluate(&hole, &board))
    });
}

criterion_group!(
    benches,
    build_standard_table,
    evaluate_holdem_hand,
    evaluate_omaha_hand
);
criterion_main!(benches);
