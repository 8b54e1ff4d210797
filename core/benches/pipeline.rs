use criterion::{black_box, criterion_group, criterion_main, Criterion};

use math::Polynomial;
use pipeline_core::{EvaluationRequest, Pipeline};

const X: f32 = 1.01;
const TERMS: usize = 64;
const CHAIN_LENGTHS: &[usize] = &[1, 2, 4, 8];

fn bench_chain_evaluation(c: &mut Criterion) {
    let mut group = c.benchmark_group("chain_evaluation");
    let polynomial: Polynomial<f32> = Polynomial::random(TERMS, 4.0);
    let coefficients = polynomial.into_coefficients();

    for &workers in CHAIN_LENGTHS {
        let pipeline = Pipeline::new(workers).expect("valid worker count");
        group.bench_function(format!("{workers}-workers"), |b| {
            b.iter(|| {
                let request =
                    EvaluationRequest::new(black_box(X), coefficients.clone())
                        .expect("coefficient list is non-empty");
                let evaluation =
                    pipeline.evaluate(request).expect("evaluation completes");
                black_box(evaluation.accumulated())
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_chain_evaluation);
criterion_main!(benches);
