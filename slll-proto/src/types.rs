use core::fmt;

/// A 32-bit node identifier. Uniqueness across the deployment is an
/// operational precondition, not something this crate can enforce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SenderId(pub u32);

impl SenderId {
    /// Big-endian wire encoding of this id.
    pub fn to_be_bytes(self) -> [u8; 4] {
        self.0.to_be_bytes()
    }

    /// Parse a big-endian 4-byte encoding, as found in a packet header or a
    /// DISCOVERY payload.
    pub fn from_be_bytes(bytes: [u8; 4]) -> Self {
        SenderId(u32::from_be_bytes(bytes))
    }
}

impl From<u32> for SenderId {
    fn from(value: u32) -> Self {
        SenderId(value)
    }
}

impl From<SenderId> for u32 {
    fn from(value: SenderId) -> Self {
        value.0
    }
}

impl fmt::Display for SenderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08X}", self.0)
    }
}

/// The one-byte message kind enumeration carried in every packet header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum MessageKind {
    Data = 1,
    Ack = 2,
    Command = 3,
    Response = 4,
    Discovery = 5,
}

impl MessageKind {
    /// Maps a wire byte to a known kind, or `None` for any unrecognized
    /// value (the caller drops the packet rather than treating it as data).
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(MessageKind::Data),
            2 => Some(MessageKind::Ack),
            3 => Some(MessageKind::Command),
            4 => Some(MessageKind::Response),
            5 => Some(MessageKind::Discovery),
            _ => None,
        }
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }
}
