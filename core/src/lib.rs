//! Distributed polynomial evaluation over a fixed chain of workers.
//!
//! A coordinator broadcasts the evaluation point and coefficients to every
//! worker, each worker derives its own contiguous slice of term indices,
//! and a single running sum is handed hop by hop along the chain until the
//! last worker holds the full evaluation. The last worker then cross-checks
//! the pipelined result against a direct evaluation obtained from the
//! coordinator over a dedicated side channel.

pub mod broadcast;
pub mod chain;
pub mod error;
pub mod params;
pub mod partition;
pub mod pipeline;
pub mod report;
pub mod request;
pub mod verify;
mod worker;

pub use chain::Role;
pub use error::{PipelineError, Result};
pub use partition::TermRange;
pub use pipeline::Pipeline;
pub use report::{Comparison, Evaluation, TermTrace, WorkerReport};
pub use request::EvaluationRequest;
