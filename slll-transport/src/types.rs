use std::time::Duration;

use slll_proto::{MessageKind, SenderId};

/// A decrypted, authenticated, non-DISCOVERY packet waiting for the
/// application to pick it up via [`crate::Transceiver::receive`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveredPacket {
    pub sender_id: SenderId,
    pub kind: MessageKind,
    pub payload: Vec<u8>,
}

/// Tunables for [`crate::Transceiver::new`].
#[derive(Debug, Clone, Copy)]
pub struct TransceiverOptions {
    /// Depth of the application-visible RX queue before drop-oldest
    /// back-pressure kicks in.
    pub rx_queue_capacity: usize,
    /// Delay before the first DISCOVERY beacon.
    pub discovery_warmup: Duration,
    /// Steady-state interval between DISCOVERY beacons.
    pub discovery_interval: Duration,
    /// Starting value of the outbound counter, for a caller resuming a
    /// counter it persisted across a restart. Zero means "this sender has
    /// never sent before".
    pub send_counter_hint: u64,
}

impl Default for TransceiverOptions {
    fn default() -> Self {
        TransceiverOptions {
            rx_queue_capacity: 32,
            discovery_warmup: Duration::from_secs(1),
            discovery_interval: Duration::from_secs(5),
            send_counter_hint: 0,
        }
    }
}
