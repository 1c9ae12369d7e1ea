use thiserror::Error;

/// Failures produced while parsing a raw wire frame into a [`crate::Packet`].
///
/// None of these are authentication failures — parsing never touches key
/// material. See [`CryptoError`] for the authenticated-decrypt path.
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum CodecError {
    /// The frame is shorter than [`crate::constants::MIN_FRAME_SIZE`].
    #[error("frame too short: {len} bytes, need at least {min}")]
    ShortFrame { len: usize, min: usize },
    /// The version byte was not [`crate::constants::PROTOCOL_VERSION`].
    #[error("unsupported protocol version {found}, expected {expected}")]
    BadVersion { found: u8, expected: u8 },
    /// The kind byte did not match a known [`crate::MessageKind`] variant.
    #[error("unknown message kind {0}")]
    UnknownKind(u8),
}

/// Failures from the AEAD engine and key material handling.
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum CryptoError {
    /// A key was supplied with a length AES-GCM does not accept.
    #[error("invalid key length {found}, expected 16, 24 or 32 bytes")]
    InvalidKeyLength { found: usize },
    /// Authenticated decryption failed: the tag did not verify. No plaintext
    /// is produced for this condition.
    #[error("authentication failed")]
    AuthFailure,
}
