//! NMF container reader.

use std::path::Path;

use bytes::Bytes;
use tracing::trace;

use super::chunk::Chunk;
use super::header::{PacketHeader, HEADER_SIZE};
use super::params::scan_compression;
use crate::error::NmfError;

/// Reader that walks an NMF container and yields its media chunks.
///
/// The reader owns the container bytes and a cursor, and is single-pass and
/// forward-only: once the terminal packet is consumed the reader is
/// exhausted, and re-parsing means building a new reader over the same
/// bytes. The whole container is held in memory, so cost is proportional to
/// file size; call recordings are small enough that this has not been worth
/// a streaming cursor.
///
/// A parse error poisons the reader: the failing file is abandoned and
/// subsequent calls yield nothing.
#[derive(Debug)]
pub struct ChunkReader {
    data: Bytes,
    cursor: usize,
    done: bool,
}

impl ChunkReader {
    /// Read a container file into memory and build a reader over it.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, NmfError> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|_| NmfError::FileNotFound {
            path: path.display().to_string(),
        })?;
        Ok(Self::new(Bytes::from(data)))
    }

    /// Build a reader over in-memory container bytes.
    pub fn new(data: Bytes) -> Self {
        Self {
            data,
            cursor: 0,
            done: false,
        }
    }

    /// Advance to the next media chunk.
    ///
    /// Returns `Ok(None)` once the terminal packet has been reached; any
    /// bytes after it are ignored. Packets that are not media are skipped
    /// without touching their bodies.
    pub fn next_chunk(&mut self) -> Result<Option<Chunk>, NmfError> {
        let result = self.advance();
        if result.is_err() {
            self.done = true;
        }
        result
    }

    fn advance(&mut self) -> Result<Option<Chunk>, NmfError> {
        while !self.done {
            let header = PacketHeader::parse(&self.data, self.cursor)?;

            if header.packet_size < header.parameters_size {
                return Err(NmfError::MalformedPacket {
                    offset: self.cursor,
                    packet_size: header.packet_size,
                    parameters_size: header.parameters_size,
                });
            }

            if header.is_terminal() {
                // The terminal packet's body is never read, so it does not
                // need to fit in the container.
                trace!(offset = self.cursor, "terminal packet");
                self.done = true;
                return Ok(None);
            }

            let body_start = self.cursor + HEADER_SIZE;
            let next = body_start + header.packet_size as usize;
            if next > self.data.len() {
                return Err(NmfError::UnterminatedStream {
                    offset: self.cursor,
                    overrun: next - self.data.len(),
                });
            }

            let media = header.is_media().then(|| {
                let params_end = body_start + header.parameters_size as usize;
                Chunk {
                    compression: scan_compression(&self.data[body_start..params_end]),
                    stream_id: header.stream_id,
                    data: self.data.slice(params_end..next),
                }
            });

            self.cursor = next;

            if let Some(chunk) = media {
                trace!(
                    stream_id = chunk.stream_id,
                    compression = ?chunk.compression,
                    len = chunk.data.len(),
                    "media chunk"
                );
                return Ok(Some(chunk));
            }
        }
        Ok(None)
    }
}

/// Iterator adapter for ChunkReader.
impl Iterator for ChunkReader {
    type Item = Result<Chunk, NmfError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_chunk() {
            Ok(Some(chunk)) => Some(Ok(chunk)),
            Ok(None) => None,
            Err(e) => Some(Err(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nmf::params::RECORD_SIZE;

    /// Append a 28-byte packet header.
    fn push_header(
        buf: &mut Vec<u8>,
        packet_type: i8,
        packet_subtype: i16,
        stream_id: i8,
        packet_size: u32,
        parameters_size: u32,
    ) {
        buf.push(packet_type as u8);
        buf.extend_from_slice(&packet_subtype.to_le_bytes());
        buf.push(stream_id as u8);
        buf.extend_from_slice(&0f64.to_le_bytes()); // start time
        buf.extend_from_slice(&0f64.to_le_bytes()); // end time
        buf.extend_from_slice(&packet_size.to_le_bytes());
        buf.extend_from_slice(&parameters_size.to_le_bytes());
    }

    /// Append a compression marker record for `code`.
    fn push_marker(buf: &mut Vec<u8>, code: u8) {
        buf.extend_from_slice(&10i16.to_le_bytes()); // type id: marker
        buf.extend_from_slice(&1i32.to_le_bytes()); // data size
        buf.push(code);
        buf.resize(buf.len() + 15, 0); // rest of record payload
    }

    /// Append a media packet (type 4, subtype 0) carrying one marker record
    /// and `payload`.
    fn push_media_packet(buf: &mut Vec<u8>, stream_id: i8, code: u8, payload: &[u8]) {
        let packet_size = (RECORD_SIZE + payload.len()) as u32;
        push_header(buf, 4, 0, stream_id, packet_size, RECORD_SIZE as u32);
        push_marker(buf, code);
        buf.extend_from_slice(payload);
    }

    fn push_terminal(buf: &mut Vec<u8>) {
        push_header(buf, 7, 0, 0, 0, 0);
    }

    fn collect_chunks(buf: Vec<u8>) -> Vec<Chunk> {
        ChunkReader::new(Bytes::from(buf))
            .collect::<Result<Vec<_>, _>>()
            .unwrap()
    }

    #[test]
    fn test_single_media_packet() {
        let mut buf = Vec::new();
        push_media_packet(&mut buf, 0, 3, b"audio-bytes");
        push_terminal(&mut buf);

        let chunks = collect_chunks(buf);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].compression, Some(3));
        assert_eq!(chunks[0].stream_id, 0);
        assert_eq!(&chunks[0].data[..], b"audio-bytes");
    }

    #[test]
    fn test_media_subtypes() {
        // type 4 subtype 3 and type 5 subtype 300 are media; type 4
        // subtype 1 is not
        let mut buf = Vec::new();
        push_header(&mut buf, 4, 3, 0, 2, 0);
        buf.extend_from_slice(b"ab");
        push_header(&mut buf, 4, 1, 0, 2, 0);
        buf.extend_from_slice(b"xx");
        push_header(&mut buf, 5, 300, 1, 2, 0);
        buf.extend_from_slice(b"cd");
        push_terminal(&mut buf);

        let chunks = collect_chunks(buf);
        assert_eq!(chunks.len(), 2);
        assert_eq!(&chunks[0].data[..], b"ab");
        assert_eq!(&chunks[1].data[..], b"cd");
        assert_eq!(chunks[1].stream_id, 1);
    }

    #[test]
    fn test_chunk_length_is_packet_minus_params() {
        let mut buf = Vec::new();
        push_media_packet(&mut buf, 0, 0, &[0x55; 160]);
        push_terminal(&mut buf);

        let chunks = collect_chunks(buf);
        assert_eq!(chunks[0].data.len(), 160);
    }

    #[test]
    fn test_no_marker_yields_unknown_compression() {
        let mut buf = Vec::new();
        push_header(&mut buf, 4, 0, 0, 5, 0); // empty parameter block
        buf.extend_from_slice(b"hello");
        push_terminal(&mut buf);

        let chunks = collect_chunks(buf);
        assert_eq!(chunks[0].compression, None);
    }

    #[test]
    fn test_trailing_bytes_after_terminal_ignored() {
        let mut buf = Vec::new();
        push_media_packet(&mut buf, 0, 3, b"audio");
        push_terminal(&mut buf);
        buf.extend_from_slice(&[0xff; 100]); // garbage past the terminal

        let mut reader = ChunkReader::new(Bytes::from(buf));
        assert!(reader.next_chunk().unwrap().is_some());
        assert!(reader.next_chunk().unwrap().is_none());
        assert!(reader.next_chunk().unwrap().is_none());
    }

    #[test]
    fn test_terminal_packet_size_not_bounds_checked() {
        // A terminal packet claiming a huge body still ends the pass cleanly.
        let mut buf = Vec::new();
        push_header(&mut buf, 7, 0, 0, 1_000_000, 0);

        let mut reader = ChunkReader::new(Bytes::from(buf));
        assert!(reader.next_chunk().unwrap().is_none());
    }

    #[test]
    fn test_malformed_packet() {
        let mut buf = Vec::new();
        push_header(&mut buf, 4, 0, 0, 10, 22); // params larger than packet

        let err = ChunkReader::new(Bytes::from(buf)).next_chunk().unwrap_err();
        assert!(matches!(
            err,
            NmfError::MalformedPacket {
                offset: 0,
                packet_size: 10,
                parameters_size: 22
            }
        ));
    }

    #[test]
    fn test_unterminated_stream() {
        let mut buf = Vec::new();
        push_header(&mut buf, 4, 0, 0, 50, 0); // body runs past the end
        buf.extend_from_slice(&[0u8; 10]);

        let err = ChunkReader::new(Bytes::from(buf)).next_chunk().unwrap_err();
        assert!(matches!(err, NmfError::UnterminatedStream { offset: 0, .. }));
    }

    #[test]
    fn test_truncated_header() {
        let buf = vec![0u8; 20];
        let err = ChunkReader::new(Bytes::from(buf)).next_chunk().unwrap_err();
        assert!(matches!(
            err,
            NmfError::TruncatedHeader {
                offset: 0,
                available: 20
            }
        ));
    }

    #[test]
    fn test_missing_terminal_at_exact_end() {
        // Container ends cleanly after a packet but without a terminal:
        // the next header read finds nothing.
        let mut buf = Vec::new();
        push_media_packet(&mut buf, 0, 3, b"audio");

        let mut reader = ChunkReader::new(Bytes::from(buf));
        assert!(reader.next_chunk().unwrap().is_some());
        let err = reader.next_chunk().unwrap_err();
        assert!(matches!(err, NmfError::TruncatedHeader { available: 0, .. }));
    }

    #[test]
    fn test_error_poisons_reader() {
        let buf = vec![0u8; 20];
        let mut reader = ChunkReader::new(Bytes::from(buf));
        assert!(reader.next_chunk().is_err());
        assert!(reader.next_chunk().unwrap().is_none());
    }

    #[test]
    fn test_empty_container() {
        let err = ChunkReader::new(Bytes::new()).next_chunk().unwrap_err();
        assert!(matches!(
            err,
            NmfError::TruncatedHeader {
                offset: 0,
                available: 0
            }
        ));
    }

    #[test]
    fn test_open_missing_file() {
        let err = ChunkReader::open("/nonexistent/recording.nmf").unwrap_err();
        assert!(matches!(err, NmfError::FileNotFound { .. }));
    }
}
