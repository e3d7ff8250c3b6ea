//! Capture envelope — the message wrapper MI prepends before publishing a
//! raw wire payload to the bus.
//!
//! Wire format (spec §3, §6), exactly 10 bytes of header followed by the
//! verbatim payload:
//!
//! ```text
//! ┌──────────────────┬──────────────┬───────────────────────┐
//! │ capture_time_sec  │ source_port  │ raw payload            │
//! │ f64 LE (8 bytes)  │ u16 LE (2B)  │ variable length        │
//! └──────────────────┴──────────────┴───────────────────────┘
//! ```

/// Size of the fixed envelope header in bytes.
pub const HEADER_LEN: usize = 10;

/// A captured packet: wall-clock capture timestamp, source UDP port, and the
/// raw wire payload exactly as received.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureEnvelope {
    /// Seconds since Unix epoch, captured at receive time.
    pub capture_time_sec: f64,
    /// Source UDP port the datagram arrived on.
    pub source_port: u16,
    /// Raw wire payload, unmodified.
    pub payload: Vec<u8>,
}

impl CaptureEnvelope {
    /// Encode into the bus wire format: `f64 LE || u16 LE || payload`.
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(HEADER_LEN + self.payload.len());
        buf.extend_from_slice(&self.capture_time_sec.to_le_bytes());
        buf.extend_from_slice(&self.source_port.to_le_bytes());
        buf.extend_from_slice(&self.payload);
        buf
    }

    /// Decode from the bus wire format.
    ///
    /// Tolerates arbitrary payload length, including zero. Returns `None` if
    /// `bytes` is shorter than [`HEADER_LEN`].
    pub fn decode(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < HEADER_LEN {
            return None;
        }
        let capture_time_sec = f64::from_le_bytes(bytes[0..8].try_into().ok()?);
        let source_port = u16::from_le_bytes(bytes[8..10].try_into().ok()?);
        let payload = bytes[HEADER_LEN..].to_vec();
        Some(Self { capture_time_sec, source_port, payload })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_with_payload() {
        let env = CaptureEnvelope {
            capture_time_sec: 1_700_000_000.123456,
            source_port: 10302,
            payload: vec![b'B', b'6', b'0', b'4', b'F', 1, 2, 3, 4, 5],
        };
        let bytes = env.encode();
        assert_eq!(bytes.len(), HEADER_LEN + env.payload.len());
        let decoded = CaptureEnvelope::decode(&bytes).unwrap();
        assert_eq!(decoded, env);
    }

    #[test]
    fn round_trip_empty_payload() {
        let env = CaptureEnvelope { capture_time_sec: 0.0, source_port: 0, payload: vec![] };
        let bytes = env.encode();
        assert_eq!(bytes.len(), HEADER_LEN);
        assert_eq!(CaptureEnvelope::decode(&bytes).unwrap(), env);
    }

    #[test]
    fn round_trip_20_byte_synthetic() {
        // Any 20-byte envelope (10-byte header + 10-byte payload) must
        // round-trip byte-for-byte (spec §8 property 6).
        let original: [u8; 20] = [
            0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, // timestamp bytes
            0x10, 0x27, // port bytes
            b'A', b'3', b'0', b'1', b'F', b'X', b'Y', b'Z', 0, 0, // payload
        ];
        let decoded = CaptureEnvelope::decode(&original).unwrap();
        assert_eq!(decoded.encode(), original.to_vec());
    }

    #[test]
    fn decode_rejects_short_buffer() {
        assert!(CaptureEnvelope::decode(&[0u8; 5]).is_none());
    }
}
