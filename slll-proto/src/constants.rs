//! Protocol-wide constants: field widths, the wire version, and the payload ceiling.

/// Current and only supported wire version.
pub const PROTOCOL_VERSION: u8 = 1;

/// Width in bytes of the [`crate::SenderId`] field.
pub const SENDER_ID_SIZE: usize = 4;
/// Width in bytes of the [`crate::MessageKind`] field.
pub const KIND_SIZE: usize = 1;
/// Width in bytes of the nonce (counter ∥ sender_id).
pub const NONCE_SIZE: usize = 12;
/// Width in bytes of the AES-GCM authentication tag.
pub const AUTH_TAG_SIZE: usize = 16;

/// `version ∥ sender_id ∥ kind ∥ nonce`, the span bound as AEAD associated data.
pub const HEADER_SIZE: usize =
    core::mem::size_of::<u8>() + SENDER_ID_SIZE + KIND_SIZE + NONCE_SIZE;

/// Minimum legal wire frame: header with zero-length ciphertext plus the tag.
pub const MIN_FRAME_SIZE: usize = HEADER_SIZE + AUTH_TAG_SIZE;

/// Largest application payload a single frame may carry.
pub const MAX_PAYLOAD_SIZE: usize = 128;

/// Width in bytes of a symmetric key for the smallest supported AES-GCM variant (AES-128-GCM).
pub const MIN_KEY_SIZE: usize = 16;

/// Every key length AES-GCM accepts here: AES-128/192/256-GCM.
pub const KEY_SIZES: [usize; 3] = [MIN_KEY_SIZE, 24, 32];
