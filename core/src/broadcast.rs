//! One-to-all parameter distribution.
//!
//! The coordinator fans a clone of the [`EvaluationRequest`] out to every
//! other worker over a dedicated rendezvous channel, then all participants
//! meet at a barrier. The operation is a blocking collective: nobody
//! proceeds past it until everyone holds a copy.

use std::sync::mpsc::{sync_channel, Receiver, SyncSender};
use std::sync::{Arc, Barrier};

use num_traits::Float;

use crate::error::{PipelineError, Result};
use crate::request::EvaluationRequest;

/// Coordinator half of the parameter broadcast.
pub struct BroadcastSender<F> {
    outbound: Vec<SyncSender<EvaluationRequest<F>>>,
    barrier: Arc<Barrier>,
}

/// Member half of the parameter broadcast, one per non-coordinator worker.
pub struct BroadcastReceiver<F> {
    rank: usize,
    inbound: Receiver<EvaluationRequest<F>>,
    barrier: Arc<Barrier>,
}

/// Wire up the broadcast for `workers` participants.
///
/// Returns the coordinator side plus one receiver per rank in `1..workers`,
/// in rank order.
pub(crate) fn broadcast_channels<F>(
    workers: usize,
) -> (BroadcastSender<F>, Vec<BroadcastReceiver<F>>) {
    let barrier = Arc::new(Barrier::new(workers));
    let mut outbound = Vec::with_capacity(workers.saturating_sub(1));
    let mut receivers = Vec::with_capacity(workers.saturating_sub(1));
    for rank in 1..workers {
        let (tx, rx) = sync_channel(0);
        outbound.push(tx);
        receivers.push(BroadcastReceiver {
            rank,
            inbound: rx,
            barrier: Arc::clone(&barrier),
        });
    }
    (BroadcastSender { outbound, barrier }, receivers)
}

impl<F: Float> BroadcastSender<F> {
    /// Fan `request` out to every member, then wait for the collective.
    pub(crate) fn distribute(&self, request: &EvaluationRequest<F>) -> Result<()> {
        for (offset, tx) in self.outbound.iter().enumerate() {
            tx.send(request.clone())
                .map_err(|_| PipelineError::ChannelClosed {
                    rank: offset + 1,
                    channel: "broadcast",
                })?;
        }
        self.barrier.wait();
        Ok(())
    }
}

impl<F> BroadcastReceiver<F> {
    /// Block until the coordinator's copy arrives and the collective completes.
    pub(crate) fn receive(self) -> Result<EvaluationRequest<F>> {
        let request = self
            .inbound
            .recv()
            .map_err(|_| PipelineError::ChannelClosed {
                rank: self.rank,
                channel: "broadcast",
            })?;
        self.barrier.wait();
        Ok(request)
    }
}
