//! Environment-driven configuration loading.
//!
//! Reads `SENDER_ID` (a hex integer) and `KEYS` (comma-separated
//! `id_hex:key_hex` pairs) from the process environment, and fails on
//! anything missing or malformed rather than defaulting.

use std::env::VarError;

use slll_proto::{CryptoError, KeyStore, SenderId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    MissingVar(&'static str),
    #[error("SENDER_ID {0:?} is not a valid hex 32-bit integer")]
    InvalidSenderId(String),
    #[error("KEYS entry {0:?} is not of the form id_hex:key_hex")]
    InvalidKeyEntry(String),
    #[error("KEYS entry for id {0:?} has a bad key: {1}")]
    InvalidKey(String, CryptoError),
}

/// The node's own id and the key table it was configured with.
pub struct SlllConfig {
    pub own_id: SenderId,
    pub key_store: KeyStore,
}

impl SlllConfig {
    /// Reads `SENDER_ID` and `KEYS` from the process environment.
    ///
    /// `SENDER_ID` may be written with or without a `0x` prefix. `KEYS` is
    /// a comma-separated list of `id_hex:key_hex` pairs; an empty string is
    /// treated as zero entries rather than one malformed entry.
    pub fn from_env() -> Result<Self, ConfigError> {
        let sender_id_raw = read_var("SENDER_ID")?;
        let own_id = parse_sender_id(&sender_id_raw)?;

        let keys_raw = read_var("KEYS")?;
        let mut key_store = KeyStore::new();
        for entry in keys_raw.split(',').filter(|s| !s.is_empty()) {
            let (id_hex, key_hex) = entry
                .split_once(':')
                .ok_or_else(|| ConfigError::InvalidKeyEntry(entry.to_string()))?;
            let id = parse_sender_id(id_hex)
                .map_err(|_| ConfigError::InvalidKeyEntry(entry.to_string()))?;
            let key_bytes = hex::decode(key_hex)
                .map_err(|_| ConfigError::InvalidKeyEntry(entry.to_string()))?;
            key_store
                .add_key(id, key_bytes)
                .map_err(|e| ConfigError::InvalidKey(id_hex.to_string(), e))?;
        }

        Ok(SlllConfig { own_id, key_store })
    }
}

fn read_var(name: &'static str) -> Result<String, ConfigError> {
    match std::env::var(name) {
        Ok(value) => Ok(value),
        Err(VarError::NotPresent) => Err(ConfigError::MissingVar(name)),
        Err(VarError::NotUnicode(_)) => Err(ConfigError::MissingVar(name)),
    }
}

fn parse_sender_id(raw: &str) -> Result<SenderId, ConfigError> {
    let trimmed = raw.trim().trim_start_matches("0x").trim_start_matches("0X");
    u32::from_str_radix(trimmed, 16)
        .map(SenderId::from)
        .map_err(|_| ConfigError::InvalidSenderId(raw.to_string()))
}
