//! The evaluation harness: wires every worker into the chain, launches one
//! thread per participant, and gathers their reports.

use std::thread;

use num_traits::Float;

use crate::broadcast::broadcast_channels;
use crate::chain::chain_stations;
use crate::error::{PipelineError, Result};
use crate::params::validate_worker_count;
use crate::report::Evaluation;
use crate::request::EvaluationRequest;
use crate::verify::verify_channels;
use crate::worker::{Duty, Worker};

/// A fixed-size chain of cooperating workers.
///
/// Workers are launched together for the lifetime of one evaluation; there
/// is no dynamic worker creation and no shared mutable state between them.
/// All coordination happens through blocking message passing, so a stalled
/// participant stalls the whole run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pipeline {
    workers: usize,
}

impl Pipeline {
    /// Initialize a pipeline with the given chain length.
    pub fn new(workers: usize) -> Result<Self> {
        if !validate_worker_count(workers) {
            return Err(PipelineError::InvalidWorkerCount(workers));
        }
        Ok(Self { workers })
    }

    /// Number of workers in the chain.
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Run one distributed evaluation.
    ///
    /// Rank 0 acts as the coordinator: it broadcasts the request, computes
    /// the first partial sum, and answers the tail's verification request.
    /// The returned [`Evaluation`] carries every worker's report in rank
    /// order plus the tail's comparison against the direct result.
    pub fn evaluate<F>(&self, request: EvaluationRequest<F>) -> Result<Evaluation<F>>
    where
        F: Float + Send + 'static,
    {
        let workers = self.workers;
        let x = request.x();

        let (broadcast_sender, broadcast_receivers) = broadcast_channels(workers);
        let (responder, mut clients) = verify_channels(workers);
        let stations = chain_stations(workers, clients.pop());
        drop(clients);

        let mut duties = Vec::with_capacity(workers);
        duties.push(Duty::Coordinator {
            broadcast: broadcast_sender,
            verify: responder,
            request,
        });
        duties.extend(
            broadcast_receivers
                .into_iter()
                .map(|broadcast| Duty::Member { broadcast }),
        );

        let mut handles = Vec::with_capacity(workers);
        for (rank, (duty, station)) in duties.into_iter().zip(stations).enumerate() {
            let worker = Worker {
                rank,
                workers,
                duty,
                station,
            };
            let handle = thread::Builder::new()
                .name(format!("worker-{rank}"))
                .spawn(move || worker.run())
                .map_err(|source| PipelineError::SpawnFailed { rank, source })?;
            handles.push(handle);
        }

        let mut reports = Vec::with_capacity(workers);
        for (rank, handle) in handles.into_iter().enumerate() {
            let report = handle
                .join()
                .map_err(|_| PipelineError::WorkerPanicked(rank))??;
            reports.push(report);
        }

        let comparison = match reports.last().and_then(|report| report.comparison) {
            Some(comparison) => comparison,
            None => return Err(PipelineError::MissingComparison),
        };

        Ok(Evaluation::new(x, workers, reports, comparison))
    }
}

#[cfg(test)]
mod tests {
    use crate::chain::Role;
    use crate::params::{MAX_WORKERS, VERIFY_TOLERANCE};

    use super::*;

    #[test]
    fn test_rejects_zero_workers() {
        let err = Pipeline::new(0).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidWorkerCount(0)));
    }

    #[test]
    fn test_rejects_oversized_chain() {
        let err = Pipeline::new(MAX_WORKERS + 1).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidWorkerCount(_)));
    }

    #[test]
    fn test_solo_evaluation() {
        let pipeline = Pipeline::new(1).unwrap();
        let request = EvaluationRequest::new(2.0f32, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let evaluation = pipeline.evaluate(request).unwrap();
        assert_eq!(evaluation.accumulated(), 49.0);
        assert_eq!(evaluation.reference(), 49.0);
        assert!(evaluation.comparison().within(VERIFY_TOLERANCE));
    }

    #[test]
    fn test_chain_evaluation_gathers_reports_in_rank_order() {
        let pipeline = Pipeline::new(3).unwrap();
        let request = EvaluationRequest::new(1.0f32, vec![1.0; 6]).unwrap();
        let evaluation = pipeline.evaluate(request).unwrap();

        assert_eq!(evaluation.reports().len(), 3);
        for (rank, report) in evaluation.reports().iter().enumerate() {
            assert_eq!(report.rank, rank);
            assert_eq!(report.terms.len(), 2);
            assert_eq!(report.partial, 2.0);
        }
        assert_eq!(evaluation.accumulated(), 6.0);
        assert_eq!(evaluation.difference(), 0.0);
    }

    #[test]
    fn test_only_the_tail_carries_a_comparison() {
        let pipeline = Pipeline::new(4).unwrap();
        let request = EvaluationRequest::new(2.0f32, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let evaluation = pipeline.evaluate(request).unwrap();
        let reports = evaluation.reports();
        assert!(reports[..3].iter().all(|r| r.comparison.is_none()));
        assert!(reports[3].comparison.is_some());

        let roles: Vec<_> = reports.iter().map(|r| r.role).collect();
        assert_eq!(roles, [Role::Head, Role::Middle, Role::Middle, Role::Tail]);
    }

    #[test]
    fn test_solo_worker_reports_the_collapsed_role() {
        let pipeline = Pipeline::new(1).unwrap();
        let request = EvaluationRequest::new(1.0f32, vec![1.0, 2.0]).unwrap();
        let evaluation = pipeline.evaluate(request).unwrap();
        assert_eq!(evaluation.reports()[0].role, Role::Solo);
    }
}
