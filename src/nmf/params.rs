//! Parameter-block scanning.
//!
//! The region between a packet's header and its payload is a run of 22-byte
//! records: a signed 16-bit type id, a signed 32-bit data size, and 16 bytes
//! of payload. The record with type id 10 carries the compression code of
//! the packet's audio chunk; every other record type is ignored here.

/// Size of one parameter record.
pub const RECORD_SIZE: usize = 22;

/// Record type id of the compression marker.
const COMPRESSION_TYPE_ID: i16 = 10;

/// Offset of the 16-byte record payload within a record.
const PAYLOAD_OFFSET: usize = 6;

/// Scan a parameter block for the compression marker record.
///
/// Records are walked in order from offset 0 and the first marker wins;
/// scanning stops there even if later records would also match. A block with
/// no marker yields `None`, and a partial trailing record is never read.
pub fn scan_compression(block: &[u8]) -> Option<i8> {
    let mut offset = 0;
    while offset + RECORD_SIZE <= block.len() {
        let type_id = i16::from_le_bytes([block[offset], block[offset + 1]]);
        if type_id == COMPRESSION_TYPE_ID {
            let data_size = i32::from_le_bytes([
                block[offset + 2],
                block[offset + 3],
                block[offset + 4],
                block[offset + 5],
            ]);
            let payload = &block[offset + PAYLOAD_OFFSET..offset + RECORD_SIZE];
            return extract_code(payload, data_size);
        }
        offset += RECORD_SIZE;
    }
    None
}

/// Decode the compression code from a marker record's payload.
///
/// The value occupies the first `data_size` bytes of the payload and its
/// first byte, read as a signed integer, is the code. A `data_size` outside
/// the payload bounds yields no code.
fn extract_code(payload: &[u8], data_size: i32) -> Option<i8> {
    if data_size < 1 || data_size as usize > payload.len() {
        return None;
    }
    Some(payload[0] as i8)
}
