//! The accumulation chain.
//!
//! Each worker's position is fixed once at startup from `(rank, workers)`
//! and never re-derived. The [`Station`] state machine owns the channel
//! endpoints its role needs, so a worker cannot hold a link its role is not
//! allowed to use. Every edge is a rendezvous handoff: a hop completes only
//! when both sides meet, which is what imposes the strict total order along
//! the chain.

use std::sync::mpsc::{sync_channel, Receiver, SyncSender};

use serde::{Deserialize, Serialize};

use crate::verify::VerifyClient;

/// Chain position, selected once from `(rank, workers)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// First worker; seeds the accumulated sum and forwards it.
    Head,
    /// Interior worker; receives, adds its partial sum, forwards.
    Middle,
    /// Last worker; receives, adds, then verifies and reports.
    Tail,
    /// Only worker of a single-participant chain; head and tail collapse.
    Solo,
}

impl Role {
    /// Classify a worker by rank within a chain of `workers` participants.
    pub fn of(rank: usize, workers: usize) -> Self {
        debug_assert!(rank < workers, "rank {rank} out of {workers}");
        match (rank, workers) {
            (0, 1) => Role::Solo,
            (0, _) => Role::Head,
            (rank, workers) if rank + 1 == workers => Role::Tail,
            _ => Role::Middle,
        }
    }

    /// Whether this worker blocks on a predecessor before accumulating.
    pub fn receives(&self) -> bool {
        matches!(self, Role::Middle | Role::Tail)
    }

    /// Whether this worker forwards the running sum to a successor.
    pub fn forwards(&self) -> bool {
        matches!(self, Role::Head | Role::Middle)
    }

    /// Whether this worker produces the final comparison.
    pub fn reports(&self) -> bool {
        matches!(self, Role::Tail | Role::Solo)
    }
}

/// A worker's chain state with the endpoints that state is entitled to.
pub(crate) enum Station<F> {
    Head {
        next: SyncSender<F>,
    },
    Middle {
        prev: Receiver<F>,
        next: SyncSender<F>,
    },
    Tail {
        prev: Receiver<F>,
        verify: VerifyClient<F>,
    },
    Solo,
}

/// Build the stations for every rank, creating one rendezvous channel per
/// directed edge of the chain. `tail_client` is handed to the last worker
/// for the verification exchange.
pub(crate) fn chain_stations<F>(
    workers: usize,
    tail_client: Option<VerifyClient<F>>,
) -> Vec<Station<F>> {
    debug_assert_eq!(tail_client.is_some(), workers > 1);
    let Some(verify) = tail_client else {
        return vec![Station::Solo];
    };

    let mut stations = Vec::with_capacity(workers);
    let (tx, mut rx) = sync_channel(0);
    stations.push(Station::Head { next: tx });
    for _ in 1..workers - 1 {
        let (next_tx, next_rx) = sync_channel(0);
        stations.push(Station::Middle {
            prev: rx,
            next: next_tx,
        });
        rx = next_rx;
    }
    stations.push(Station::Tail { prev: rx, verify });
    stations
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_worker_is_solo() {
        assert_eq!(Role::of(0, 1), Role::Solo);
    }

    #[test]
    fn test_two_workers_split_head_and_tail() {
        assert_eq!(Role::of(0, 2), Role::Head);
        assert_eq!(Role::of(1, 2), Role::Tail);
    }

    #[test]
    fn test_interior_ranks_are_middle() {
        assert_eq!(Role::of(0, 5), Role::Head);
        assert_eq!(Role::of(1, 5), Role::Middle);
        assert_eq!(Role::of(3, 5), Role::Middle);
        assert_eq!(Role::of(4, 5), Role::Tail);
    }

    #[test]
    fn test_role_flags() {
        assert!(!Role::Head.receives());
        assert!(Role::Head.forwards());
        assert!(Role::Middle.receives());
        assert!(Role::Middle.forwards());
        assert!(Role::Tail.receives());
        assert!(!Role::Tail.forwards());
        assert!(Role::Tail.reports());
        assert!(Role::Solo.reports());
        assert!(!Role::Solo.receives());
        assert!(!Role::Solo.forwards());
    }

    #[test]
    fn test_station_layout_matches_roles() {
        let (_, mut clients) = crate::verify::verify_channels::<f32>(4);
        let stations = chain_stations(4, clients.pop());
        assert_eq!(stations.len(), 4);
        assert!(matches!(stations[0], Station::Head { .. }));
        assert!(matches!(stations[1], Station::Middle { .. }));
        assert!(matches!(stations[2], Station::Middle { .. }));
        assert!(matches!(stations[3], Station::Tail { .. }));
    }

    #[test]
    fn test_station_layout_for_single_worker() {
        let stations = chain_stations::<f32>(1, None);
        assert_eq!(stations.len(), 1);
        assert!(matches!(stations[0], Station::Solo));
    }
}
