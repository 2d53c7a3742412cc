//! Extracted media chunk.

use bytes::Bytes;

/// One media payload extracted from one packet.
#[derive(Debug, Clone)]
pub struct Chunk {
    /// Compression code from the packet's parameter block, if one was found.
    pub compression: Option<i8>,

    /// Source stream: 0 = caller, 1 = receiver.
    pub stream_id: i8,

    /// Raw payload bytes, a zero-copy slice of the container.
    pub data: Bytes,
}
