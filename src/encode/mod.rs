//! External audio encoding.
//!
//! Demuxed streams leave this crate as `(codec, raw bytes)` pairs; turning
//! them into listenable files is delegated to an external encoder behind the
//! `Encoder` trait. The stock implementation shells out to ffmpeg.

mod ffmpeg;

pub use ffmpeg::FfmpegEncoder;

use std::path::Path;

use crate::codec::Codec;
use crate::error::EncodeError;

/// Capability to encode raw stream audio and mix the two encoded sides.
///
/// Nothing in the parsing core assumes an encoder is installed or working;
/// a missing or failing backend surfaces as `EncodeError` on the call.
pub trait Encoder {
    /// Encode raw `data` in `codec` into the file at `output`.
    fn encode(&self, codec: Codec, data: &[u8], output: &Path) -> Result<(), EncodeError>;

    /// Mix two encoded files into one combined file at `output`.
    fn mix(&self, left: &Path, right: &Path, output: &Path) -> Result<(), EncodeError>;
}
