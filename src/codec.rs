//! Compression-code to codec mapping.

use crate::error::CodecError;

/// Audio codecs that can appear in an NMF recording.
///
/// The set is closed: every compression code a parameter block can carry maps
/// to one of these variants, and anything else is an `UnknownCompression`
/// error at lookup time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(non_camel_case_types)]
pub enum Codec {
    G729,
    G726,
    Alaw,
    Mulaw,
    G723_1,
    G722,
}

impl Codec {
    /// Codec assumed for a stream that never carried a compression marker.
    pub const DEFAULT: Codec = Codec::G729;

    /// Look up the codec for a compression code from a parameter record.
    pub fn from_code(code: i8) -> Result<Self, CodecError> {
        match code {
            0 | 8 => Ok(Codec::G729),
            1 | 2 => Ok(Codec::G726),
            3 => Ok(Codec::Alaw),
            7 => Ok(Codec::Mulaw),
            9 | 10 => Ok(Codec::G723_1),
            19 => Ok(Codec::G722),
            _ => Err(CodecError::UnknownCompression { code }),
        }
    }

    /// Demuxer name ffmpeg expects for raw audio in this codec.
    pub fn ffmpeg_format(&self) -> &'static str {
        match self {
            Codec::G729 => "g729",
            Codec::G726 => "g726",
            Codec::Alaw => "alaw",
            Codec::Mulaw => "mulaw",
            Codec::G723_1 => "g723_1",
            Codec::G722 => "g722",
        }
    }
}
