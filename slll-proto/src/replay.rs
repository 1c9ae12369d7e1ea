use std::collections::HashMap;

use crate::types::SenderId;

/// Tracks, per sender, the highest counter value accepted so far and
/// rejects anything that is not strictly greater.
///
/// This is deliberately stricter than a sliding-window scheme: a quiet
/// LoRa link makes reordering rare, and strict monotonicity removes an
/// entire class of state-machine bugs at the cost of silently accepting
/// packet loss (the counter simply jumps forward on the next arrival).
/// State does not persist across restarts — see `DESIGN.md` for the
/// operational implication.
#[derive(Debug, Default)]
pub struct ReplayGuard {
    last_counter: HashMap<SenderId, u64>,
}

impl ReplayGuard {
    pub fn new() -> Self {
        ReplayGuard { last_counter: HashMap::new() }
    }

    /// Accepts `counter` for `sender_id` iff it is strictly greater than
    /// the highest counter previously accepted for that sender (absent ==
    /// nothing accepted yet). On acceptance, updates the stored high-water
    /// mark; on rejection, state is left untouched.
    pub fn check_and_update(&mut self, sender_id: SenderId, counter: u64) -> bool {
        let accepted = match self.last_counter.get(&sender_id) {
            Some(&last) => counter > last,
            None => true,
        };
        if accepted {
            self.last_counter.insert(sender_id, counter);
        }
        accepted
    }

    /// The highest counter accepted for `sender_id`, if any.
    pub fn highest_seen(&self, sender_id: SenderId) -> Option<u64> {
        self.last_counter.get(&sender_id).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_counter_from_a_sender_is_always_accepted() {
        let mut guard = ReplayGuard::new();
        assert!(guard.check_and_update(SenderId(1), 1));
    }

    #[test]
    fn strictly_increasing_counters_are_accepted() {
        let mut guard = ReplayGuard::new();
        for c in 1..=5 {
            assert!(guard.check_and_update(SenderId(1), c));
        }
    }

    #[test]
    fn exact_replay_is_rejected() {
        let mut guard = ReplayGuard::new();
        assert!(guard.check_and_update(SenderId(1), 5));
        assert!(!guard.check_and_update(SenderId(1), 5));
    }

    #[test]
    fn reordered_lower_counter_is_rejected() {
        let mut guard = ReplayGuard::new();
        assert!(guard.check_and_update(SenderId(1), 5));
        assert!(!guard.check_and_update(SenderId(1), 3));
    }

    #[test]
    fn rejection_does_not_mutate_state() {
        let mut guard = ReplayGuard::new();
        guard.check_and_update(SenderId(1), 5);
        guard.check_and_update(SenderId(1), 2);
        assert_eq!(guard.highest_seen(SenderId(1)), Some(5));
    }

    #[test]
    fn gaps_from_lost_packets_are_accepted() {
        let mut guard = ReplayGuard::new();
        assert!(guard.check_and_update(SenderId(1), 1));
        assert!(guard.check_and_update(SenderId(1), 100));
    }

    #[test]
    fn senders_are_tracked_independently() {
        let mut guard = ReplayGuard::new();
        guard.check_and_update(SenderId(1), 10);
        assert!(guard.check_and_update(SenderId(2), 1));
    }
}
