//! The bounded FIFO of decrypted, dispatched application packets.
//!
//! Back-pressure policy is **drop-oldest**: a producer that outruns the
//! application loses the stalest undelivered packet rather than the newest
//! one, on the theory that a consumer that falls behind cares more about
//! catching up with recent state than about replaying everything it missed.

use std::collections::VecDeque;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::stats::RxCounters;
use crate::types::DeliveredPacket;

/// How often [`RxQueue::recv`] re-polls the queue while waiting for a
/// deadline. Decrypting and dispatching a packet is cheap, so this only
/// bounds how quickly a blocked `receive()` notices a fresh arrival.
const POLL_INTERVAL: Duration = Duration::from_millis(5);

pub struct RxQueue {
    capacity: usize,
    inner: Mutex<VecDeque<DeliveredPacket>>,
}

impl RxQueue {
    pub fn new(capacity: usize) -> Self {
        RxQueue { capacity, inner: Mutex::new(VecDeque::with_capacity(capacity)) }
    }

    /// Enqueues `packet`, dropping the oldest entry first if the queue is
    /// already at capacity. Only ever called from the RX task.
    pub async fn push(&self, packet: DeliveredPacket, stats: &RxCounters) {
        let mut queue = self.inner.lock().await;
        if queue.len() >= self.capacity {
            queue.pop_front();
            stats.record_queue_full();
        }
        queue.push_back(packet);
    }

    /// Pops the oldest queued packet, waiting up to `timeout` for one to
    /// arrive. `None`/`Some(Duration::ZERO)` means non-blocking.
    pub async fn recv(&self, timeout: Option<Duration>) -> Option<DeliveredPacket> {
        if let Some(packet) = self.inner.lock().await.pop_front() {
            return Some(packet);
        }
        let deadline = match timeout {
            Some(d) if !d.is_zero() => Instant::now() + d,
            _ => return None,
        };
        loop {
            if Instant::now() >= deadline {
                return None;
            }
            tokio::time::sleep(POLL_INTERVAL.min(deadline.saturating_duration_since(Instant::now()))).await;
            if let Some(packet) = self.inner.lock().await.pop_front() {
                return Some(packet);
            }
        }
    }
}
