//! NMF packet header decoding.

use crate::error::NmfError;

/// Size of the fixed packet header in bytes.
pub const HEADER_SIZE: usize = 28;

/// Decoded NMF packet header.
///
/// All fields sit at fixed little-endian offsets within the 28-byte header:
/// type and stream id are single signed bytes, the subtype is a signed
/// 16-bit value, the two timestamps are IEEE-754 doubles, and the two sizes
/// are unsigned 32-bit values. `packet_size` counts the parameter block plus
/// the payload; it never includes the header itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PacketHeader {
    pub packet_type: i8,
    pub packet_subtype: i16,
    pub stream_id: i8,
    pub start_time: f64,
    pub end_time: f64,
    pub packet_size: u32,
    pub parameters_size: u32,
}

impl PacketHeader {
    /// Decode the header found at `offset` in the container.
    ///
    /// Only the raw field decode happens here; cross-field invariants are
    /// enforced by the reader loop.
    pub fn parse(data: &[u8], offset: usize) -> Result<Self, NmfError> {
        let available = data.len().saturating_sub(offset);
        if available < HEADER_SIZE {
            return Err(NmfError::TruncatedHeader { offset, available });
        }
        let h = &data[offset..offset + HEADER_SIZE];

        Ok(Self {
            packet_type: h[0] as i8,
            packet_subtype: i16::from_le_bytes([h[1], h[2]]),
            stream_id: h[3] as i8,
            start_time: f64_at(h, 4),
            end_time: f64_at(h, 12),
            packet_size: u32_at(h, 20),
            parameters_size: u32_at(h, 24),
        })
    }

    /// Whether this packet carries an audio payload.
    pub fn is_media(&self) -> bool {
        matches!(
            (self.packet_type, self.packet_subtype),
            (4, 0) | (4, 3) | (5, 300)
        )
    }

    /// Whether this packet terminates the container's media sequence.
    pub fn is_terminal(&self) -> bool {
        self.packet_type == 7
    }
}

fn u32_at(b: &[u8], off: usize) -> u32 {
    u32::from_le_bytes([b[off], b[off + 1], b[off + 2], b[off + 3]])
}

fn f64_at(b: &[u8], off: usize) -> f64 {
    f64::from_le_bytes([
        b[off],
        b[off + 1],
        b[off + 2],
        b[off + 3],
        b[off + 4],
        b[off + 5],
        b[off + 6],
        b[off + 7],
    ])
}
