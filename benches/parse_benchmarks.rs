use criterion::{Criterion, black_box, criterion_group, criterion_main};

use factordrill::engine::parse_answer;
use factordrill::generator::{Difficulty, ProblemSource, RandomProblemGenerator};

fn bench_parse(c: &mut Criterion) {
    let inputs = [
        "(x+3)(x-2)",
        "( X - 12 ) * ( x + 7 )",
        "(x-4)^2",
        "（ｘ＋３）（ｘ－２）",
        "(x+3)(y-2)",
    ];

    c.bench_function("parse_answer (mixed inputs)", |b| {
        b.iter(|| {
            for input in &inputs {
                let _ = parse_answer(black_box(input));
            }
        })
    });
}

fn bench_generate(c: &mut Criterion) {
    let mut generator = RandomProblemGenerator::seeded(Difficulty::default(), 42)
        .expect("default difficulty is valid");

    c.bench_function("next_problem (normal)", |b| {
        b.iter(|| black_box(generator.next_problem()))
    });
}

criterion_group!(benches, bench_parse, bench_generate);
criterion_main!(benches);
