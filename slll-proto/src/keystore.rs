use std::collections::HashMap;

use crate::constants::KEY_SIZES;
use crate::error::CryptoError;
use crate::types::SenderId;

/// An opaque symmetric key shared between a sender and its authorized
/// receivers. Length is checked once at construction time against AES-GCM's
/// accepted sizes (16/24/32 bytes); everything downstream can assume it is
/// valid.
#[derive(Clone)]
pub struct Key(Vec<u8>);

impl Key {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self, CryptoError> {
        let bytes = bytes.into();
        if KEY_SIZES.contains(&bytes.len()) {
            Ok(Key(bytes))
        } else {
            Err(CryptoError::InvalidKeyLength { found: bytes.len() })
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Key").field(&format_args!("<{} bytes redacted>", self.0.len())).finish()
    }
}

/// Maps sender id to shared symmetric key. Populated at startup and
/// read-mostly; see the crate-level docs for the locking discipline
/// required if a caller mutates it after the transceiver has started.
#[derive(Debug, Default, Clone)]
pub struct KeyStore {
    keys: HashMap<SenderId, Key>,
}

impl KeyStore {
    pub fn new() -> Self {
        KeyStore { keys: HashMap::new() }
    }

    /// Inserts or overwrites the key for `id`. Rejects a key whose length
    /// AES-GCM cannot accept.
    pub fn add_key(&mut self, id: SenderId, key: impl Into<Vec<u8>>) -> Result<(), CryptoError> {
        let key = Key::new(key)?;
        self.keys.insert(id, key);
        Ok(())
    }

    pub fn get_key(&self, id: SenderId) -> Option<&Key> {
        self.keys.get(&id)
    }

    pub fn has_sender(&self, id: SenderId) -> bool {
        self.keys.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_sender_has_no_key() {
        let store = KeyStore::new();
        assert!(store.get_key(SenderId(1)).is_none());
        assert!(!store.has_sender(SenderId(1)));
    }

    #[test]
    fn add_then_lookup_round_trips() {
        let mut store = KeyStore::new();
        store.add_key(SenderId(1), vec![0u8; 16]).unwrap();
        assert!(store.has_sender(SenderId(1)));
        assert_eq!(store.get_key(SenderId(1)).unwrap().as_bytes(), &[0u8; 16][..]);
    }

    #[test]
    fn overwriting_a_key_replaces_it() {
        let mut store = KeyStore::new();
        store.add_key(SenderId(1), vec![1u8; 16]).unwrap();
        store.add_key(SenderId(1), vec![2u8; 16]).unwrap();
        assert_eq!(store.get_key(SenderId(1)).unwrap().as_bytes(), &[2u8; 16][..]);
    }

    #[test]
    fn rejects_wrong_length_keys() {
        let mut store = KeyStore::new();
        let err = store.add_key(SenderId(1), vec![0u8; 15]).unwrap_err();
        assert_eq!(err, CryptoError::InvalidKeyLength { found: 15 });
        assert!(store.get_key(SenderId(1)).is_none());
    }

    #[test]
    fn accepts_all_three_aes_gcm_key_sizes() {
        let mut store = KeyStore::new();
        for (id, len) in [(1u32, 16), (2, 24), (3, 32)] {
            store.add_key(SenderId(id), vec![0u8; len]).unwrap();
        }
    }
}
