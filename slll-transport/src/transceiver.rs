//! The concurrent transceiver: owns the radio, the send counter, the peer
//! table, the receive queue, and the RX/discovery background tasks.
//!
//! The constructor spawns two background tasks (`rx_loop`,
//! `discovery_loop`) over shared `tokio::sync` state: one polls the radio
//! and drives authenticated frames into the peer table or the RX queue,
//! the other periodically announces this node's presence.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;

use slll_proto::constants::MAX_PAYLOAD_SIZE;
use slll_proto::{build_header, crypto, KeyStore, MessageKind, Packet, ReplayGuard, SenderId};

use crate::error::SendError;
use crate::peer::PeerInfo;
use crate::radio::Radio;
use crate::rx_queue::RxQueue;
use crate::stats::{RxCounters, RxStats};
use crate::types::{DeliveredPacket, TransceiverOptions};

/// Shutdown grace period given to each background task in [`Transceiver::stop`]
/// before it is abandoned daemon-style.
const TASK_JOIN_TIMEOUT: Duration = Duration::from_secs(1);
/// How long the RX task sleeps after an empty or failing radio poll.
const RX_POLL_IDLE: Duration = Duration::from_millis(10);

/// State shared between the public `send` API and the discovery task, so
/// that a DISCOVERY beacon is sent through the exact same path an
/// application-level `send` would use (and therefore consumes a counter
/// value identically — every outbound frame advances the nonce counter,
/// discovery included).
///
/// The counter and the radio are guarded by one `Mutex`, not two: spec.md
/// §5 requires the counter bump and `radio.send` to be one atomic critical
/// section, so that the order packets are assigned counters in matches the
/// order they hit the wire. Splitting the lock lets one caller's
/// higher counter reach the radio before another caller's lower one,
/// which makes the peer's `ReplayGuard` permanently reject the
/// later-arriving, lower, but perfectly legitimate packet as a replay.
struct SendState<R: Radio> {
    own_id: SenderId,
    key_store: Arc<KeyStore>,
    radio: Arc<Mutex<(u64, R)>>,
}

impl<R: Radio> SendState<R> {
    async fn send(&self, kind: MessageKind, payload: &[u8]) -> Result<(), SendError> {
        if payload.len() > MAX_PAYLOAD_SIZE {
            return Err(SendError::PayloadTooLarge { len: payload.len(), max: MAX_PAYLOAD_SIZE });
        }

        let key = self.key_store.get_key(self.own_id).ok_or(SendError::MissingKey)?;

        let mut guard = self.radio.lock().await;
        let (counter, radio) = &mut *guard;
        let next = counter.checked_add(1).ok_or(SendError::CounterExhausted)?;
        *counter = next;

        let nonce = crypto::build_nonce(next, self.own_id.into());
        let mut ciphertext = payload.to_vec();
        let header = build_header(self.own_id, kind, &nonce);
        let tag = crypto::encrypt(key, &nonce, &header, &mut ciphertext)?;

        let packet = Packet::new(self.own_id, kind, nonce, ciphertext, tag);
        let frame = packet.serialize();

        radio.send(&frame).await.map_err(|e| SendError::Radio(e.to_string()))
    }
}

/// The application-facing handle. Dropping it guarantees the RX and
/// discovery tasks are stopped regardless of whether [`Transceiver::stop`]
/// was ever called.
pub struct Transceiver<R: Radio> {
    own_id: SenderId,
    send_state: Arc<SendState<R>>,
    peers: Arc<RwLock<HashMap<SenderId, PeerInfo>>>,
    rx_queue: Arc<RxQueue>,
    stats: Arc<RxCounters>,
    running: Arc<AtomicBool>,
    rx_task: Option<JoinHandle<()>>,
    discovery_task: Option<JoinHandle<()>>,
}

impl<R: Radio> Transceiver<R> {
    /// Builds a transceiver over `radio` and starts its RX and discovery
    /// tasks immediately. `key_store` must contain `own_id`'s own key in
    /// addition to its peers' — outbound encryption looks its key up in
    /// the same table as every other sender.
    pub fn new(
        radio: R,
        own_id: SenderId,
        key_store: KeyStore,
        options: TransceiverOptions,
    ) -> Self {
        let key_store = Arc::new(key_store);
        let radio = Arc::new(Mutex::new((options.send_counter_hint, radio)));
        let send_state = Arc::new(SendState { own_id, key_store: key_store.clone(), radio: radio.clone() });
        let peers = Arc::new(RwLock::new(HashMap::new()));
        let rx_queue = Arc::new(RxQueue::new(options.rx_queue_capacity));
        let stats = Arc::new(RxCounters::default());
        let running = Arc::new(AtomicBool::new(true));

        let rx_task = tokio::spawn(rx_loop(
            radio,
            own_id,
            key_store,
            peers.clone(),
            rx_queue.clone(),
            stats.clone(),
            running.clone(),
        ));

        let discovery_task = tokio::spawn(discovery_loop(
            send_state.clone(),
            own_id,
            options.discovery_warmup,
            options.discovery_interval,
            running.clone(),
        ));

        Transceiver {
            own_id,
            send_state,
            peers,
            rx_queue,
            stats,
            running,
            rx_task: Some(rx_task),
            discovery_task: Some(discovery_task),
        }
    }

    /// Encrypts and transmits `payload` under `kind`. Synchronous from the
    /// caller's point of view: it never waits on the RX task.
    pub async fn send(&self, kind: MessageKind, payload: &[u8]) -> Result<(), SendError> {
        self.send_state.send(kind, payload).await
    }

    /// Waits up to `timeout` for a decrypted application packet. `None` or
    /// `Some(Duration::ZERO)` polls once without blocking. DISCOVERY
    /// packets are never returned here — they are consumed internally by
    /// the RX task.
    pub async fn receive(&self, timeout: Option<Duration>) -> Option<DeliveredPacket> {
        self.rx_queue.recv(timeout).await
    }

    /// A snapshot of the currently known peers and when each was last seen.
    pub async fn get_peers(&self) -> HashMap<SenderId, PeerInfo> {
        self.peers.read().await.clone()
    }

    pub fn get_sender_id(&self) -> SenderId {
        self.own_id
    }

    /// Receive-path drop counters, for observability: these conditions
    /// are counted, never surfaced to the caller as errors.
    pub fn rx_stats(&self) -> RxStats {
        self.stats.snapshot()
    }

    /// Signals both background tasks to stop and waits briefly for them to
    /// exit. A task that has not exited within the grace period is
    /// abandoned rather than forcibly killed.
    pub async fn stop(&mut self) {
        self.running.store(false, Ordering::Relaxed);
        if let Some(handle) = self.rx_task.take() {
            let _ = tokio::time::timeout(TASK_JOIN_TIMEOUT, handle).await;
        }
        if let Some(handle) = self.discovery_task.take() {
            let _ = tokio::time::timeout(TASK_JOIN_TIMEOUT, handle).await;
        }
    }
}

impl<R: Radio> Drop for Transceiver<R> {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Relaxed);
        if let Some(handle) = self.rx_task.take() {
            handle.abort();
        }
        if let Some(handle) = self.discovery_task.take() {
            handle.abort();
        }
    }
}

async fn discovery_loop<R: Radio>(
    send_state: Arc<SendState<R>>,
    own_id: SenderId,
    warmup: Duration,
    interval: Duration,
    running: Arc<AtomicBool>,
) {
    tokio::time::sleep(warmup).await;
    while running.load(Ordering::Relaxed) {
        let payload = own_id.to_be_bytes();
        if let Err(e) = send_state.send(MessageKind::Discovery, &payload).await {
            log::debug!("discovery beacon failed to send: {e}");
        }
        tokio::time::sleep(interval).await;
    }
}

async fn rx_loop<R: Radio>(
    radio: Arc<Mutex<(u64, R)>>,
    own_id: SenderId,
    key_store: Arc<KeyStore>,
    peers: Arc<RwLock<HashMap<SenderId, PeerInfo>>>,
    rx_queue: Arc<RxQueue>,
    stats: Arc<RxCounters>,
    running: Arc<AtomicBool>,
) {
    let mut replay_guard = ReplayGuard::new();

    while running.load(Ordering::Relaxed) {
        let frame = {
            let mut guard = radio.lock().await;
            let (_, radio) = &mut *guard;
            radio.receive().await
        };

        let bytes = match frame {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                tokio::time::sleep(RX_POLL_IDLE).await;
                continue;
            }
            Err(e) => {
                log::debug!("radio error while receiving: {e}");
                tokio::time::sleep(RX_POLL_IDLE).await;
                continue;
            }
        };

        process_frame(&bytes, own_id, &key_store, &mut replay_guard, &peers, &rx_queue, &stats).await;
    }
}

/// One pass of the RX state machine: `raw -> parsed -> keyed -> authentic
/// -> fresh -> {dispatched | queued}`. Every early return is a silent
/// drop, counted in `stats`.
async fn process_frame(
    bytes: &[u8],
    own_id: SenderId,
    key_store: &KeyStore,
    replay_guard: &mut ReplayGuard,
    peers: &RwLock<HashMap<SenderId, PeerInfo>>,
    rx_queue: &RxQueue,
    stats: &RxCounters,
) {
    let packet = match Packet::parse(bytes) {
        Ok(p) => p,
        Err(e) => {
            use slll_proto::CodecError;
            match e {
                CodecError::ShortFrame { .. } => stats.record_short_frame(),
                CodecError::BadVersion { .. } => stats.record_bad_version(),
                CodecError::UnknownKind(_) => stats.record_unknown_kind(),
            }
            log::debug!("dropping unparseable frame: {e}");
            return;
        }
    };

    if packet.sender_id() == own_id {
        stats.record_self_echo();
        return;
    }

    let Some(key) = key_store.get_key(packet.sender_id()) else {
        stats.record_unknown_sender();
        return;
    };

    let header = packet.header();
    let mut plaintext = packet.ciphertext().to_vec();
    if crypto::decrypt(key, packet.nonce(), &header, &mut plaintext, packet.tag()).is_err() {
        stats.record_auth_failure();
        return;
    }

    if !replay_guard.check_and_update(packet.sender_id(), packet.counter()) {
        stats.record_replay();
        return;
    }

    if packet.kind() == MessageKind::Discovery {
        peers.write().await.insert(packet.sender_id(), PeerInfo { last_seen: Instant::now() });
        return;
    }

    let delivered =
        DeliveredPacket { sender_id: packet.sender_id(), kind: packet.kind(), payload: plaintext };
    rx_queue.push(delivered, stats).await;
}
