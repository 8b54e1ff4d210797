use pipeline_core::params::VERIFY_TOLERANCE;
use pipeline_core::{EvaluationRequest, Pipeline};

const X: f32 = 2.0;
const COEFFICIENTS: [f32; 4] = [1.0, 2.0, 3.0, 4.0];
const WORKERS: usize = 4;

/// Evaluate 4*x^3 + 3*x^2 + 2*x + 1 at x = 2 across a four-worker chain,
/// so that every worker owns exactly one term. The pipelined result must
/// match the coordinator's direct evaluation.
fn main() {
    let pipeline = Pipeline::new(WORKERS).expect("worker count should be valid");
    let request = EvaluationRequest::new(X, COEFFICIENTS.to_vec())
        .expect("coefficient list should be non-empty");

    let evaluation = pipeline
        .evaluate(request)
        .expect("evaluation should complete");

    assert_eq!(evaluation.accumulated(), 49.0);
    assert!(
        evaluation.comparison().within(VERIFY_TOLERANCE),
        "pipelined result must match the direct evaluation"
    );

    print!("{evaluation}");
}
