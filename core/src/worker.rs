//! Per-worker execution: broadcast, partition, partial sum, chain step,
//! verification.

use num_traits::Float;

use crate::broadcast::{BroadcastReceiver, BroadcastSender};
use crate::chain::{Role, Station};
use crate::error::{PipelineError, Result};
use crate::partition::TermRange;
use crate::report::{Comparison, TermTrace, WorkerReport};
use crate::request::EvaluationRequest;
use crate::verify::VerifyResponder;

/// What a worker owes the rest of the chain besides its own terms.
///
/// Rank 0 doubles as the coordinator: it is the broadcast source and, once
/// its chain step is done, the verification responder. Everyone else is a
/// plain member.
pub(crate) enum Duty<F> {
    Coordinator {
        broadcast: BroadcastSender<F>,
        verify: VerifyResponder<F>,
        request: EvaluationRequest<F>,
    },
    Member {
        broadcast: BroadcastReceiver<F>,
    },
}

/// One participant of the chain, fully wired and ready to run on its own
/// thread.
pub(crate) struct Worker<F> {
    pub(crate) rank: usize,
    pub(crate) workers: usize,
    pub(crate) duty: Duty<F>,
    pub(crate) station: Station<F>,
}

impl<F: Float> Worker<F> {
    /// Run this worker to completion and return its report.
    pub(crate) fn run(self) -> Result<WorkerReport<F>> {
        let Worker {
            rank,
            workers,
            duty,
            station,
        } = self;
        let role = Role::of(rank, workers);

        // parameter broadcast; nobody proceeds until everyone holds a copy
        let (request, responder) = match duty {
            Duty::Coordinator {
                broadcast,
                verify,
                request,
            } => {
                broadcast.distribute(&request)?;
                (request, Some(verify))
            }
            Duty::Member { broadcast } => (broadcast.receive()?, None),
        };

        let x = request.x();
        let poly = request.polynomial();

        // the partition is recomputed locally from the same formula on
        // every worker; ranges never travel
        let range = TermRange::for_rank(rank, workers, request.term_count());

        let mut terms = Vec::with_capacity(range.len());
        let mut partial = F::zero();
        for index in range.indices() {
            let value = poly.term_value(index, x);
            partial = partial + value;
            terms.push(TermTrace { index, value });
        }

        let (accumulated, comparison) = match station {
            Station::Head { next } => {
                next.send(partial).map_err(|_| chain_closed(rank))?;
                (partial, None)
            }
            Station::Middle { prev, next } => {
                let upstream = prev.recv().map_err(|_| chain_closed(rank))?;
                let accumulated = upstream + partial;
                next.send(accumulated).map_err(|_| chain_closed(rank))?;
                (accumulated, None)
            }
            Station::Tail { prev, verify } => {
                let upstream = prev.recv().map_err(|_| chain_closed(rank))?;
                let accumulated = upstream + partial;
                let reference = verify.request_reference()?;
                (accumulated, Some(Comparison::new(accumulated, reference)))
            }
            Station::Solo => {
                // coordinator and tail are the same participant; the
                // reference is computed in-process, no exchange
                let reference = poly.evaluate(x);
                (partial, Some(Comparison::new(partial, reference)))
            }
        };

        // the coordinator answers exactly one verification request per run,
        // issued by whichever worker closed the chain
        if let Some(responder) = responder {
            if workers > 1 {
                responder.respond_once(&poly, x)?;
            }
        }

        Ok(WorkerReport {
            rank,
            role,
            range,
            terms,
            partial,
            accumulated,
            comparison,
        })
    }
}

fn chain_closed(rank: usize) -> PipelineError {
    PipelineError::ChannelClosed {
        rank,
        channel: "chain",
    }
}
