use thiserror::Error;

use crate::params::MAX_WORKERS;

/// Result type specialized for pipeline operations.
pub type Result<T, E = PipelineError> = std::result::Result<T, E>;

/// Errors that can arise while running the distributed evaluation pipeline.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("no polynomial coefficients provided")]
    EmptyCoefficients,
    #[error("invalid worker count {0}: expected 1..={max}", max = MAX_WORKERS)]
    InvalidWorkerCount(usize),
    #[error("worker {rank}: {channel} channel closed before the exchange completed")]
    ChannelClosed {
        rank: usize,
        channel: &'static str,
    },
    #[error("failed to spawn worker {rank}")]
    SpawnFailed {
        rank: usize,
        #[source]
        source: std::io::Error,
    },
    #[error("worker {0} panicked during evaluation")]
    WorkerPanicked(usize),
    #[error("verification request from unknown worker {0}")]
    InvalidRank(usize),
    #[error("final worker returned no verification result")]
    MissingComparison,
}
