//! Receive-path drop counters.
//!
//! Receive-side failures never propagate to a caller: a malformed,
//! unauthenticated, replayed or otherwise unusable frame is dropped and
//! counted here instead of being turned into an error the application has
//! to handle.

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct RxCounters {
    short_frame: AtomicU64,
    bad_version: AtomicU64,
    unknown_kind: AtomicU64,
    self_echo: AtomicU64,
    unknown_sender: AtomicU64,
    auth_failure: AtomicU64,
    replay: AtomicU64,
    queue_full: AtomicU64,
}

/// A point-in-time snapshot of [`RxCounters`], returned by
/// [`crate::Transceiver::rx_stats`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RxStats {
    pub short_frame: u64,
    pub bad_version: u64,
    pub unknown_kind: u64,
    pub self_echo: u64,
    pub unknown_sender: u64,
    pub auth_failure: u64,
    pub replay: u64,
    pub queue_full: u64,
}

impl RxCounters {
    pub fn record_short_frame(&self) {
        self.short_frame.fetch_add(1, Ordering::Relaxed);
    }
    pub fn record_bad_version(&self) {
        self.bad_version.fetch_add(1, Ordering::Relaxed);
    }
    pub fn record_unknown_kind(&self) {
        self.unknown_kind.fetch_add(1, Ordering::Relaxed);
    }
    pub fn record_self_echo(&self) {
        self.self_echo.fetch_add(1, Ordering::Relaxed);
    }
    pub fn record_unknown_sender(&self) {
        self.unknown_sender.fetch_add(1, Ordering::Relaxed);
    }
    pub fn record_auth_failure(&self) {
        self.auth_failure.fetch_add(1, Ordering::Relaxed);
    }
    pub fn record_replay(&self) {
        self.replay.fetch_add(1, Ordering::Relaxed);
    }
    pub fn record_queue_full(&self) {
        self.queue_full.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> RxStats {
        RxStats {
            short_frame: self.short_frame.load(Ordering::Relaxed),
            bad_version: self.bad_version.load(Ordering::Relaxed),
            unknown_kind: self.unknown_kind.load(Ordering::Relaxed),
            self_echo: self.self_echo.load(Ordering::Relaxed),
            unknown_sender: self.unknown_sender.load(Ordering::Relaxed),
            auth_failure: self.auth_failure.load(Ordering::Relaxed),
            replay: self.replay.load(Ordering::Relaxed),
            queue_full: self.queue_full.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_start_at_zero() {
        let counters = RxCounters::default();
        assert_eq!(counters.snapshot(), RxStats::default());
    }

    #[test]
    fn each_recorder_increments_only_its_own_field() {
        let counters = RxCounters::default();
        counters.record_replay();
        counters.record_replay();
        let snap = counters.snapshot();
        assert_eq!(snap.replay, 2);
        assert_eq!(snap.auth_failure, 0);
    }
}
