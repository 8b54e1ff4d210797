//! Out-of-band verification exchange between the final worker and the
//! coordinator.
//!
//! The exchange is decoupled from both the broadcast and the accumulation
//! chain: requests travel on their own multi-producer channel, responses on
//! a per-worker return channel, so chain traffic can never be mistaken for
//! verification traffic. The coordinator's receive is wildcard-source — it
//! learns the requester's rank from the message rather than assuming the
//! tail's identity.

use std::sync::mpsc::{sync_channel, Receiver, SyncSender};

use num_traits::Float;
use serde::{Deserialize, Serialize};

use math::Polynomial;

use crate::error::{PipelineError, Result};

/// Request sent by the final worker to obtain a reference value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyRequest {
    pub rank: usize,
}

/// The coordinator's answer: the directly-computed evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct VerifyResponse<F> {
    pub reference: F,
}

/// Coordinator side of the exchange.
pub struct VerifyResponder<F> {
    requests: Receiver<VerifyRequest>,
    responses: Vec<SyncSender<VerifyResponse<F>>>,
}

/// Worker side of the exchange, one per non-coordinator worker.
pub struct VerifyClient<F> {
    rank: usize,
    requests: SyncSender<VerifyRequest>,
    response: Receiver<VerifyResponse<F>>,
}

/// Wire up the exchange for `workers` participants.
///
/// Returns the coordinator side plus one client per rank in `1..workers`,
/// in rank order. All clients share the request channel; each has its own
/// response channel.
pub(crate) fn verify_channels<F>(
    workers: usize,
) -> (VerifyResponder<F>, Vec<VerifyClient<F>>) {
    let (request_tx, request_rx) = sync_channel(0);
    let mut responses = Vec::with_capacity(workers.saturating_sub(1));
    let mut clients = Vec::with_capacity(workers.saturating_sub(1));
    for rank in 1..workers {
        let (tx, rx) = sync_channel(0);
        responses.push(tx);
        clients.push(VerifyClient {
            rank,
            requests: request_tx.clone(),
            response: rx,
        });
    }
    (
        VerifyResponder {
            requests: request_rx,
            responses,
        },
        clients,
    )
}

impl<F: Float> VerifyResponder<F> {
    /// Wait for a verification request from any worker, evaluate directly,
    /// and answer on the requester's response channel.
    pub(crate) fn respond_once(&self, poly: &Polynomial<F>, x: F) -> Result<()> {
        let request = self
            .requests
            .recv()
            .map_err(|_| PipelineError::ChannelClosed {
                rank: 0,
                channel: "verify-request",
            })?;
        let reference = poly.evaluate(x);
        let outbound = self
            .responses
            .get(request.rank.wrapping_sub(1))
            .ok_or(PipelineError::InvalidRank(request.rank))?;
        outbound
            .send(VerifyResponse { reference })
            .map_err(|_| PipelineError::ChannelClosed {
                rank: request.rank,
                channel: "verify-response",
            })?;
        Ok(())
    }
}

impl<F: Float> VerifyClient<F> {
    /// Ask the coordinator for the direct evaluation, blocking until the
    /// response arrives.
    pub(crate) fn request_reference(&self) -> Result<F> {
        self.requests
            .send(VerifyRequest { rank: self.rank })
            .map_err(|_| PipelineError::ChannelClosed {
                rank: self.rank,
                channel: "verify-request",
            })?;
        let response = self
            .response
            .recv()
            .map_err(|_| PipelineError::ChannelClosed {
                rank: self.rank,
                channel: "verify-response",
            })?;
        Ok(response.reference)
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;

    #[test]
    fn test_round_trip_returns_direct_evaluation() {
        let workers = 3;
        let (responder, mut clients) = verify_channels::<f32>(workers);
        let tail = clients.pop().unwrap();
        drop(clients);

        let handle = thread::spawn(move || tail.request_reference());

        let poly = Polynomial::new(vec![1.0, 2.0, 3.0, 4.0]);
        responder.respond_once(&poly, 2.0).unwrap();

        let reference = handle.join().unwrap().unwrap();
        assert_eq!(reference, 49.0);
    }

    #[test]
    fn test_responder_discovers_requester_rank() {
        // any worker may request; the middle one does here
        let workers = 4;
        let (responder, mut clients) = verify_channels::<f32>(workers);
        let middle = clients.remove(1);
        drop(clients);

        let handle = thread::spawn(move || middle.request_reference());

        let poly = Polynomial::new(vec![5.0]);
        responder.respond_once(&poly, 0.0).unwrap();
        assert_eq!(handle.join().unwrap().unwrap(), 5.0);
    }

    #[test]
    fn test_respond_fails_when_all_requesters_vanish() {
        let (responder, clients) = verify_channels::<f32>(2);
        drop(clients);

        let poly = Polynomial::new(vec![1.0]);
        let err = responder.respond_once(&poly, 1.0).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::ChannelClosed {
                rank: 0,
                channel: "verify-request",
            }
        ));
    }
}
