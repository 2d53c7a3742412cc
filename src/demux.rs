//! Per-stream accumulation of media chunks.

use bytes::{Bytes, BytesMut};

use crate::codec::Codec;
use crate::error::{CodecError, NmfError};
use crate::nmf::Chunk;

/// Stream id of the caller side.
pub const CALLER: i8 = 0;
/// Stream id of the receiver side.
pub const RECEIVER: i8 = 1;

/// Accumulated audio for one side of a call.
///
/// Bytes are appended in chunk arrival order and never reordered. The
/// compression code tracks the most recent marker seen on this stream.
#[derive(Debug, Default)]
pub struct StreamBuffer {
    data: BytesMut,
    compression: Option<i8>,
}

impl StreamBuffer {
    fn push(&mut self, chunk: &Chunk) {
        self.data.extend_from_slice(&chunk.data);
        if chunk.compression.is_some() {
            self.compression = chunk.compression;
        }
    }

    /// Raw audio bytes in arrival order.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Whether any audio was collected for this stream.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Last compression code observed on this stream, if any.
    pub fn compression(&self) -> Option<i8> {
        self.compression
    }

    /// Codec to decode this stream with.
    ///
    /// A stream that never carried a compression marker defaults to G.729;
    /// a marker outside the known table is an error.
    pub fn codec(&self) -> Result<Codec, CodecError> {
        match self.compression {
            Some(code) => Codec::from_code(code),
            None => Ok(Codec::DEFAULT),
        }
    }

    /// Consume the buffer, freezing the accumulated bytes.
    pub fn into_bytes(self) -> Bytes {
        self.data.freeze()
    }
}

/// Caller and receiver buffers demuxed from one container.
#[derive(Debug, Default)]
pub struct Streams {
    pub caller: StreamBuffer,
    pub receiver: StreamBuffer,
}

impl Streams {
    /// Fold a chunk sequence into per-stream buffers.
    ///
    /// Chunks with a stream id other than caller or receiver are dropped;
    /// that is policy, not an error. Any parse error discards the partial
    /// buffers.
    pub fn accumulate<I>(chunks: I) -> Result<Self, NmfError>
    where
        I: IntoIterator<Item = Result<Chunk, NmfError>>,
    {
        let mut streams = Streams::default();
        for chunk in chunks {
            let chunk = chunk?;
            match chunk.stream_id {
                CALLER => streams.caller.push(&chunk),
                RECEIVER => streams.receiver.push(&chunk),
                _ => {}
            }
        }
        Ok(streams)
    }
}
