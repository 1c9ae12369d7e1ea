//! The peer table: liveness tracking driven entirely by authenticated
//! DISCOVERY packets.

use std::time::Instant;

/// What the core remembers about a discovered peer. Grows monotonically —
/// the core never evicts an entry; pruning stale peers is an external
/// policy concern.
#[derive(Debug, Clone, Copy)]
pub struct PeerInfo {
    pub last_seen: Instant,
}
