use slll_proto::CryptoError;
use thiserror::Error;

/// Failures surfaced synchronously from [`crate::Transceiver::send`].
///
/// Receive-path conditions never produce one of these — they are dropped
/// and counted instead, see [`crate::Transceiver::rx_stats`].
#[derive(Debug, Error)]
pub enum SendError {
    /// The node's own key is absent from its [`slll_proto::KeyStore`].
    #[error("no key for own sender id")]
    MissingKey,
    /// `payload.len() > slll_proto::constants::MAX_PAYLOAD_SIZE`.
    #[error("payload of {len} bytes exceeds the {max}-byte ceiling")]
    PayloadTooLarge { len: usize, max: usize },
    /// The outbound counter has reached `u64::MAX`; this sender can never
    /// send another packet without violating nonce uniqueness.
    #[error("outbound counter exhausted, sender must not send again")]
    CounterExhausted,
    /// The underlying radio rejected the transmission.
    #[error("radio error: {0}")]
    Radio(String),
    /// The AEAD engine refused to encrypt the payload.
    #[error("encryption failed: {0}")]
    Crypto(#[from] CryptoError),
}

/// Failures from the radio parameter-introspection API.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ParameterError {
    #[error("unknown parameter {0:?}")]
    UnknownParameter(String),
    #[error("parameter {0:?} is read-only")]
    ReadOnly(String),
    #[error("value for {name:?} is out of range")]
    OutOfRange { name: String },
    #[error("value for {name:?} has the wrong type")]
    WrongType { name: String },
}
