//! Authenticated encryption with a counter-derived nonce.
//!
//! The nonce is fully determined by `(counter, sender_id)`; since counters
//! are strictly increasing per sender and sender ids are unique, the pair
//! is never reused under a given key. That is the AEAD's only
//! safety-critical invariant — see [`crate::replay`] for the receive-side
//! half of the guarantee.

use aes_gcm::aead::{generic_array::GenericArray, AeadInPlace, KeyInit};
use aes_gcm::{aes::Aes192, Aes128Gcm, Aes256Gcm, AesGcm};

use crate::constants::{AUTH_TAG_SIZE, NONCE_SIZE};
use crate::error::CryptoError;
use crate::keystore::Key;

type Aes192Gcm = AesGcm<Aes192, aes_gcm::aead::consts::U12>;

enum Cipher {
    Aes128(Aes128Gcm),
    Aes192(Box<Aes192Gcm>),
    Aes256(Aes256Gcm),
}

impl Cipher {
    fn new(key: &Key) -> Self {
        match key.len() {
            16 => Cipher::Aes128(Aes128Gcm::new(GenericArray::from_slice(key.as_bytes()))),
            24 => Cipher::Aes192(Box::new(Aes192Gcm::new(GenericArray::from_slice(key.as_bytes())))),
            32 => Cipher::Aes256(Aes256Gcm::new(GenericArray::from_slice(key.as_bytes()))),
            // KeyStore::add_key already rejects any other length.
            other => unreachable!("unexpected key length {other}"),
        }
    }

    fn encrypt_in_place_detached(
        &self,
        nonce: &GenericArray<u8, aes_gcm::aead::consts::U12>,
        aad: &[u8],
        buffer: &mut [u8],
    ) -> Result<[u8; AUTH_TAG_SIZE], CryptoError> {
        let tag = match self {
            Cipher::Aes128(c) => c.encrypt_in_place_detached(nonce, aad, buffer),
            Cipher::Aes192(c) => c.encrypt_in_place_detached(nonce, aad, buffer),
            Cipher::Aes256(c) => c.encrypt_in_place_detached(nonce, aad, buffer),
        }
        .map_err(|_| CryptoError::AuthFailure)?;
        let mut out = [0u8; AUTH_TAG_SIZE];
        out.copy_from_slice(tag.as_slice());
        Ok(out)
    }

    fn decrypt_in_place_detached(
        &self,
        nonce: &GenericArray<u8, aes_gcm::aead::consts::U12>,
        aad: &[u8],
        buffer: &mut [u8],
        tag: &[u8; AUTH_TAG_SIZE],
    ) -> Result<(), CryptoError> {
        let tag = GenericArray::from_slice(tag);
        match self {
            Cipher::Aes128(c) => c.decrypt_in_place_detached(nonce, aad, buffer, tag),
            Cipher::Aes192(c) => c.decrypt_in_place_detached(nonce, aad, buffer, tag),
            Cipher::Aes256(c) => c.decrypt_in_place_detached(nonce, aad, buffer, tag),
        }
        .map_err(|_| CryptoError::AuthFailure)
    }
}

/// Builds the 12-byte nonce `big_endian(counter) ∥ big_endian(sender_id)`.
pub fn build_nonce(counter: u64, sender_id: u32) -> [u8; NONCE_SIZE] {
    let mut nonce = [0u8; NONCE_SIZE];
    nonce[..8].copy_from_slice(&counter.to_be_bytes());
    nonce[8..].copy_from_slice(&sender_id.to_be_bytes());
    nonce
}

/// Encrypts `plaintext` in place under `key`/`nonce`, authenticating `aad`
/// (the packet header). Returns the detached authentication tag.
pub fn encrypt(
    key: &Key,
    nonce: &[u8; NONCE_SIZE],
    aad: &[u8],
    plaintext: &mut [u8],
) -> Result<[u8; AUTH_TAG_SIZE], CryptoError> {
    let cipher = Cipher::new(key);
    let nonce = GenericArray::from_slice(nonce);
    cipher.encrypt_in_place_detached(nonce, aad, plaintext)
}

/// Verifies `tag` over `aad` and decrypts `ciphertext` in place under
/// `key`/`nonce`. On tag mismatch, `ciphertext` is left in an unspecified
/// (but still fully-owned, non-aliased) state and the caller MUST discard
/// it — no partial plaintext is exposed through the `Result`.
pub fn decrypt(
    key: &Key,
    nonce: &[u8; NONCE_SIZE],
    aad: &[u8],
    ciphertext: &mut [u8],
    tag: &[u8; AUTH_TAG_SIZE],
) -> Result<(), CryptoError> {
    let cipher = Cipher::new(key);
    let nonce = GenericArray::from_slice(nonce);
    cipher.decrypt_in_place_detached(nonce, aad, ciphertext, tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key128() -> Key {
        Key::new(vec![0x42; 16]).unwrap()
    }

    #[test]
    fn encrypt_then_decrypt_recovers_plaintext() {
        let key = key128();
        let nonce = build_nonce(1, 0xA3F9_1C42);
        let aad = b"header-bytes";
        let mut buf = b"hello lora".to_vec();
        let tag = encrypt(&key, &nonce, aad, &mut buf).unwrap();

        decrypt(&key, &nonce, aad, &mut buf, &tag).unwrap();
        assert_eq!(&buf, b"hello lora");
    }

    #[test]
    fn tampered_ciphertext_fails_to_authenticate() {
        let key = key128();
        let nonce = build_nonce(1, 1);
        let aad = b"hdr";
        let mut buf = b"payload".to_vec();
        let tag = encrypt(&key, &nonce, aad, &mut buf).unwrap();

        buf[0] ^= 0x01;
        assert_eq!(decrypt(&key, &nonce, aad, &mut buf, &tag).unwrap_err(), CryptoError::AuthFailure);
    }

    #[test]
    fn tampered_tag_fails_to_authenticate() {
        let key = key128();
        let nonce = build_nonce(1, 1);
        let aad = b"hdr";
        let mut buf = b"payload".to_vec();
        let mut tag = encrypt(&key, &nonce, aad, &mut buf).unwrap();
        tag[0] ^= 0x01;

        assert_eq!(decrypt(&key, &nonce, aad, &mut buf, &tag).unwrap_err(), CryptoError::AuthFailure);
    }

    #[test]
    fn tampered_aad_fails_to_authenticate() {
        let key = key128();
        let nonce = build_nonce(1, 1);
        let mut buf = b"payload".to_vec();
        let tag = encrypt(&key, &nonce, b"hdr-a", &mut buf).unwrap();

        assert_eq!(decrypt(&key, &nonce, b"hdr-b", &mut buf, &tag).unwrap_err(), CryptoError::AuthFailure);
    }

    #[test]
    fn different_key_sizes_all_work() {
        for len in [16, 24, 32] {
            let key = Key::new(vec![0x11; len]).unwrap();
            let nonce = build_nonce(1, 1);
            let mut buf = b"x".to_vec();
            let tag = encrypt(&key, &nonce, b"aad", &mut buf).unwrap();
            decrypt(&key, &nonce, b"aad", &mut buf, &tag).unwrap();
            assert_eq!(buf, b"x");
        }
    }

    #[test]
    fn empty_plaintext_round_trips() {
        let key = key128();
        let nonce = build_nonce(1, 1);
        let mut buf: Vec<u8> = Vec::new();
        let tag = encrypt(&key, &nonce, b"aad", &mut buf).unwrap();
        decrypt(&key, &nonce, b"aad", &mut buf, &tag).unwrap();
        assert!(buf.is_empty());
    }

    #[test]
    fn nonce_encodes_counter_and_sender_big_endian() {
        let nonce = build_nonce(1, 0xA3F9_1C42);
        assert_eq!(&nonce[..8], &1u64.to_be_bytes());
        assert_eq!(&nonce[8..], &0xA3F9_1C42u32.to_be_bytes());
    }
}
