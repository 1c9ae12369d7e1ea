use crate::constants::{AUTH_TAG_SIZE, HEADER_SIZE, KIND_SIZE, MIN_FRAME_SIZE, NONCE_SIZE, PROTOCOL_VERSION, SENDER_ID_SIZE};
use crate::error::CodecError;
use crate::types::{MessageKind, SenderId};

/// An on-wire packet: header fields plus the ciphertext and tag that follow
/// them. `parse` only validates framing — it does not authenticate;
/// authentication is the AEAD engine's job (see [`crate::crypto`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    sender_id: SenderId,
    kind: MessageKind,
    nonce: [u8; NONCE_SIZE],
    ciphertext: Vec<u8>,
    tag: [u8; AUTH_TAG_SIZE],
}

/// Builds the 18-byte `version ∥ sender_id ∥ kind ∥ nonce` header
/// standalone, for callers (the AEAD engine's caller) that need the AAD
/// span before a ciphertext and tag exist yet to construct a full
/// [`Packet`].
pub fn build_header(sender_id: SenderId, kind: MessageKind, nonce: &[u8; NONCE_SIZE]) -> [u8; HEADER_SIZE] {
    let mut header = [0u8; HEADER_SIZE];
    let mut offset = 0;
    header[offset] = PROTOCOL_VERSION;
    offset += 1;
    header[offset..offset + SENDER_ID_SIZE].copy_from_slice(&sender_id.to_be_bytes());
    offset += SENDER_ID_SIZE;
    header[offset] = kind.as_u8();
    offset += KIND_SIZE;
    header[offset..offset + NONCE_SIZE].copy_from_slice(nonce);
    header
}

impl Packet {
    pub fn new(
        sender_id: SenderId,
        kind: MessageKind,
        nonce: [u8; NONCE_SIZE],
        ciphertext: Vec<u8>,
        tag: [u8; AUTH_TAG_SIZE],
    ) -> Self {
        Packet { sender_id, kind, nonce, ciphertext, tag }
    }

    pub fn sender_id(&self) -> SenderId {
        self.sender_id
    }

    pub fn kind(&self) -> MessageKind {
        self.kind
    }

    pub fn nonce(&self) -> &[u8; NONCE_SIZE] {
        &self.nonce
    }

    /// The sender's counter value this packet was encrypted under, read
    /// back out of the first 8 bytes of the nonce. Used by a receiver to
    /// feed [`crate::ReplayGuard::check_and_update`].
    pub fn counter(&self) -> u64 {
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&self.nonce[..8]);
        u64::from_be_bytes(bytes)
    }

    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }

    pub fn tag(&self) -> &[u8; AUTH_TAG_SIZE] {
        &self.tag
    }

    /// The 18-byte `version ∥ sender_id ∥ kind ∥ nonce` header. This exact
    /// span is what the AEAD engine binds as associated data.
    pub fn header(&self) -> [u8; HEADER_SIZE] {
        build_header(self.sender_id, self.kind, &self.nonce)
    }

    /// `header ∥ ciphertext` — everything on the wire except the trailing
    /// authentication tag.
    pub fn header_and_ciphertext(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(HEADER_SIZE + self.ciphertext.len());
        out.extend_from_slice(&self.header());
        out.extend_from_slice(&self.ciphertext);
        out
    }

    /// `header ∥ ciphertext ∥ tag`, ready to hand to [`crate::Radio::send`].
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = self.header_and_ciphertext();
        out.extend_from_slice(&self.tag);
        out
    }

    /// Parses a raw frame. Requires `bytes.len() >= 34`, `version == 1`, and
    /// a recognized [`MessageKind`] byte. Does not authenticate.
    pub fn parse(bytes: &[u8]) -> Result<Self, CodecError> {
        if bytes.len() < MIN_FRAME_SIZE {
            return Err(CodecError::ShortFrame { len: bytes.len(), min: MIN_FRAME_SIZE });
        }

        let mut offset = 0;
        let version = bytes[offset];
        offset += 1;
        if version != PROTOCOL_VERSION {
            return Err(CodecError::BadVersion { found: version, expected: PROTOCOL_VERSION });
        }

        let mut sender_id_bytes = [0u8; SENDER_ID_SIZE];
        sender_id_bytes.copy_from_slice(&bytes[offset..offset + SENDER_ID_SIZE]);
        let sender_id = SenderId::from_be_bytes(sender_id_bytes);
        offset += SENDER_ID_SIZE;

        let kind_byte = bytes[offset];
        let kind = MessageKind::from_u8(kind_byte).ok_or(CodecError::UnknownKind(kind_byte))?;
        offset += KIND_SIZE;

        let mut nonce = [0u8; NONCE_SIZE];
        nonce.copy_from_slice(&bytes[offset..offset + NONCE_SIZE]);
        offset += NONCE_SIZE;

        debug_assert_eq!(offset, HEADER_SIZE);

        let ciphertext_and_tag = &bytes[offset..];
        let tag_offset = ciphertext_and_tag.len() - AUTH_TAG_SIZE;
        let ciphertext = ciphertext_and_tag[..tag_offset].to_vec();
        let mut tag = [0u8; AUTH_TAG_SIZE];
        tag.copy_from_slice(&ciphertext_and_tag[tag_offset..]);

        Ok(Packet { sender_id, kind, nonce, ciphertext, tag })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(ciphertext: Vec<u8>) -> Packet {
        Packet::new(SenderId(0xA3F9_1C42), MessageKind::Data, [7u8; NONCE_SIZE], ciphertext, [9u8; AUTH_TAG_SIZE])
    }

    #[test]
    fn parse_of_serialize_round_trips() {
        for len in [0, 1, 128] {
            let p = sample(vec![0x42; len]);
            let bytes = p.serialize();
            assert_eq!(bytes.len(), 34 + len);
            let parsed = Packet::parse(&bytes).unwrap();
            assert_eq!(parsed, p);
        }
    }

    #[test]
    fn header_and_ciphertext_excludes_only_the_tag() {
        let p = sample(vec![1, 2, 3]);
        let serialized = p.serialize();
        let hc = p.header_and_ciphertext();
        assert_eq!(&serialized[..serialized.len() - 16], &hc[..]);
    }

    #[test]
    fn rejects_short_frame() {
        let err = Packet::parse(&[0u8; 33]).unwrap_err();
        assert_eq!(err, CodecError::ShortFrame { len: 33, min: 34 });
    }

    #[test]
    fn accepts_exactly_minimum_frame() {
        let bytes = sample(Vec::new()).serialize();
        assert_eq!(bytes.len(), 34);
        Packet::parse(&bytes).unwrap();
    }

    #[test]
    fn rejects_bad_version() {
        let mut bytes = sample(vec![]).serialize();
        bytes[0] = 2;
        assert_eq!(
            Packet::parse(&bytes).unwrap_err(),
            CodecError::BadVersion { found: 2, expected: 1 }
        );
    }

    #[test]
    fn rejects_unknown_kind() {
        let mut bytes = sample(vec![]).serialize();
        bytes[5] = 0;
        assert_eq!(Packet::parse(&bytes).unwrap_err(), CodecError::UnknownKind(0));
        bytes[5] = 200;
        assert_eq!(Packet::parse(&bytes).unwrap_err(), CodecError::UnknownKind(200));
    }

    #[test]
    fn counter_reads_back_the_leading_nonce_bytes() {
        let mut nonce = [0u8; NONCE_SIZE];
        nonce[..8].copy_from_slice(&42u64.to_be_bytes());
        let p = Packet::new(SenderId(1), MessageKind::Data, nonce, vec![], [0u8; AUTH_TAG_SIZE]);
        assert_eq!(p.counter(), 42);
    }

    #[test]
    fn header_is_exactly_eighteen_bytes_in_wire_order() {
        let p = sample(vec![]);
        let header = p.header();
        assert_eq!(header[0], 1);
        assert_eq!(&header[1..5], &0xA3F9_1C42u32.to_be_bytes());
        assert_eq!(header[5], MessageKind::Data.as_u8());
        assert_eq!(&header[6..18], &[7u8; 12]);
    }
}
