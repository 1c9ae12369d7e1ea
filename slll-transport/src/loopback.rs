//! An in-process [`Radio`] for tests and the loopback demo, with no
//! hardware dependency.
//!
//! A shared broadcast point delivers every sent frame to all radios
//! attached to the same network, built on a `tokio::sync::broadcast`
//! channel rather than a polled list.

use thiserror::Error;
use tokio::sync::broadcast;

/// Shared in-process network that [`LoopbackRadio`]s attach to. Cloning is
/// cheap; every clone sees the same broadcast bus.
#[derive(Clone)]
pub struct LoopbackNetwork {
    sender: broadcast::Sender<Vec<u8>>,
}

impl LoopbackNetwork {
    /// `capacity` bounds how many not-yet-received frames the broadcast
    /// channel retains per subscriber before the slowest one starts
    /// lagging (see [`LoopbackError::Lagged`]).
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        LoopbackNetwork { sender }
    }

    /// Attaches a new radio to this network.
    pub fn attach(&self) -> LoopbackRadio {
        LoopbackRadio { sender: self.sender.clone(), receiver: self.sender.subscribe() }
    }
}

impl Default for LoopbackNetwork {
    fn default() -> Self {
        LoopbackNetwork::new(64)
    }
}

#[derive(Debug, Error)]
pub enum LoopbackError {
    /// No other radio is attached to receive this frame; the network is
    /// otherwise fine, so this is not treated as send failure by callers
    /// that tolerate zero peers.
    #[error("loopback network has no subscribers")]
    NoSubscribers,
    /// The receiver fell behind and `n` frames were dropped before it
    /// could read them. The next `receive` call skips past the gap.
    #[error("receiver lagged, {0} frames dropped")]
    Lagged(u64),
}

/// One node's attachment to a [`LoopbackNetwork`]. A frame sent on one
/// `LoopbackRadio` is delivered to every `LoopbackRadio` attached to the
/// same network, including the sender itself — `tokio::sync::broadcast`
/// fans out to every subscriber uniformly, with no notion of "the
/// sender's own queue" to skip. Self-echo is therefore the core's problem,
/// not the radio's: [`crate::transceiver::Transceiver`] drops any packet
/// whose `sender_id` matches its own, which covers this case for free.
pub struct LoopbackRadio {
    sender: broadcast::Sender<Vec<u8>>,
    receiver: broadcast::Receiver<Vec<u8>>,
}

impl crate::radio::Radio for LoopbackRadio {
    type Error = LoopbackError;

    async fn send(&mut self, frame: &[u8]) -> Result<(), Self::Error> {
        // A send with zero subscribers is not an error: a lone node
        // starting up before any peer attaches is normal.
        let _ = self.sender.send(frame.to_vec());
        Ok(())
    }

    async fn receive(&mut self) -> Result<Option<Vec<u8>>, Self::Error> {
        match self.receiver.try_recv() {
            Ok(frame) => Ok(Some(frame)),
            Err(broadcast::error::TryRecvError::Empty) => Ok(None),
            Err(broadcast::error::TryRecvError::Lagged(n)) => Err(LoopbackError::Lagged(n)),
            Err(broadcast::error::TryRecvError::Closed) => Ok(None),
        }
    }
}
