//! Wire format, AEAD engine, replay protection and key store for the
//! Secure LoRa Link Layer.
//!
//! This crate is deliberately free of any concurrency or radio concerns —
//! see `slll-transport` for the transceiver that drives these primitives
//! against a radio. Everything here is synchronous and allocation-light
//! enough to run once per packet without surprises.

pub mod constants;
pub mod crypto;
pub mod error;
pub mod keystore;
pub mod packet;
pub mod replay;
pub mod types;

pub use crypto::build_nonce;
pub use error::{CodecError, CryptoError};
pub use keystore::{Key, KeyStore};
pub use packet::{build_header, Packet};
pub use replay::ReplayGuard;
pub use types::{MessageKind, SenderId};
