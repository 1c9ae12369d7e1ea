//! Two in-process SLLL nodes talking over a [`LoopbackNetwork`] instead of
//! real LoRa hardware, merged into one process so the demo needs no second
//! terminal or IPC-mediated test network.
//!
//! Run with `RUST_LOG=debug cargo run -p loopback-node` to see dropped
//! packets and discovery beacons logged.

use std::time::Duration;

use slll_proto::{KeyStore, MessageKind, SenderId};
use slll_transport::{LoopbackNetwork, Transceiver, TransceiverOptions};

const NODE_A: SenderId = SenderId(0xA3F9_1C42);
const NODE_B: SenderId = SenderId(0xB4E8_2D53);

#[tokio::main]
async fn main() {
    env_logger::init();

    let mut keys_a = KeyStore::new();
    keys_a.add_key(NODE_A, b"0123456789abcdef".to_vec()).expect("16-byte key");
    keys_a.add_key(NODE_B, b"fedcba9876543210".to_vec()).expect("16-byte key");

    let mut keys_b = KeyStore::new();
    keys_b.add_key(NODE_A, b"0123456789abcdef".to_vec()).expect("16-byte key");
    keys_b.add_key(NODE_B, b"fedcba9876543210".to_vec()).expect("16-byte key");

    let network = LoopbackNetwork::default();
    let options = TransceiverOptions {
        discovery_warmup: Duration::from_millis(250),
        discovery_interval: Duration::from_secs(5),
        ..Default::default()
    };

    let node_a = Transceiver::new(network.attach(), NODE_A, keys_a, options);
    let mut node_b = Transceiver::new(network.attach(), NODE_B, keys_b, options);

    log::info!("node {NODE_A} sending DATA to node {NODE_B}");
    node_a.send(MessageKind::Data, b"Hello LoRa").await.expect("send should succeed");

    match node_b.receive(Some(Duration::from_secs(1))).await {
        Some(packet) => {
            let text = String::from_utf8_lossy(&packet.payload);
            log::info!("node {NODE_B} received from {}: {text:?}", packet.sender_id);
        }
        None => log::warn!("node {NODE_B} did not receive anything within the timeout"),
    }

    // Give the discovery beacon time to fire at least once.
    tokio::time::sleep(Duration::from_millis(500)).await;
    for (id, peer) in node_b.get_peers().await {
        log::info!("node {NODE_B} knows peer {id}, last seen {:?} ago", peer.last_seen.elapsed());
    }

    node_b.stop().await;
}
