use criterion::{Criterion, black_box, criterion_group, criterion_main};
use witness_calculator::fixture::{self, FixtureCalculator};
use witness_calculator::{InputAssignment, WitnessCalculator};

/// A realistic input file: one 256-element vector signal of bn254-sized
/// decimal strings plus a handful of scalars.
fn sample_input_json() -> String {
    let digits =
        "21888242871839275222246405745257275088548364400416034343698204186575808495616";
    let elements: Vec<String> = (0..256).map(|i| format!("\"{digits}{i}\"")).collect();
    format!(
        r#"{{"in": [{}], "nonce": 7, "salt": "0xdeadbeef"}}"#,
        elements.join(",")
    )
}

fn bench_parse_input(c: &mut Criterion) {
    let json = sample_input_json();
    c.bench_function("parse_input_assignment", |b| {
        b.iter(|| InputAssignment::from_json_str(black_box(&json)).unwrap())
    });
}

fn bench_fixture_pipeline(c: &mut Criterion) {
    let signals: Vec<String> = (0..64).map(|i| format!("signal_{i}")).collect();
    let bytecode = fixture::encode(&signals, &[0u8; 4096]);
    let inputs: InputAssignment = signals
        .iter()
        .map(|name| (name.clone(), witness_calculator::SignalValue::scalar(1)))
        .collect();

    c.bench_function("fixture_parse_and_calculate", |b| {
        b.iter(|| {
            let mut calc = FixtureCalculator::parse(black_box(&bytecode)).unwrap();
            calc.calculate_wtns_bin(black_box(&inputs), 0).unwrap()
        })
    });
}

criterion_group!(benches, bench_parse_input, bench_fixture_pipeline);
criterion_main!(benches);
