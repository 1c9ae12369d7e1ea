//! The concurrent transceiver that drives [`slll_proto`]'s wire format,
//! AEAD engine and replay guard against a [`radio::Radio`].
//!
//! This crate consumes a `Radio` and a `slll_proto::KeyStore` and exposes
//! nothing but the [`Transceiver`] handle. Concrete radios (hardware
//! drivers, the `demos/loopback-node` binary, integration tests) plug in
//! at [`Transceiver::new`].

pub mod config;
pub mod error;
pub mod loopback;
pub mod peer;
pub mod radio;
mod rx_queue;
mod stats;
mod transceiver;
pub mod types;

pub use config::{ConfigError, SlllConfig};
pub use error::{ParameterError, SendError};
pub use loopback::{LoopbackError, LoopbackNetwork, LoopbackRadio};
pub use peer::PeerInfo;
pub use radio::{ParameterConstraint, ParameterTable, ParameterType, ParameterValue, Radio, RadioParameter};
pub use stats::RxStats;
pub use transceiver::Transceiver;
pub use types::{DeliveredPacket, TransceiverOptions};
