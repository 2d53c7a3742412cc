//! Single-file conversion pipeline.

use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::info;

use crate::demux::Streams;
use crate::encode::Encoder;
use crate::error::Result;
use crate::nmf::ChunkReader;

/// Demux one container and write the mixed recording under `output_dir`.
///
/// The caller and receiver streams are encoded to intermediate files in a
/// temporary directory, then mixed into `<stem>_combined.mp3` under
/// `output_dir`. The intermediates are removed with the temporary directory.
/// Both sides are encoded even when empty, so a one-sided call still mixes
/// against a silent input.
///
/// Parsing completes fully before the encoder is touched; a parse error
/// discards the partial stream buffers and nothing is encoded.
pub fn convert_file<E: Encoder>(path: &Path, output_dir: &Path, encoder: &E) -> Result<PathBuf> {
    let reader = ChunkReader::open(path)?;
    let streams = Streams::accumulate(reader)?;

    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("recording");
    let output = output_dir.join(format!("{stem}_combined.mp3"));

    let work = TempDir::new()?;
    let caller_mp3 = work.path().join("caller.mp3");
    let receiver_mp3 = work.path().join("receiver.mp3");

    encoder.encode(streams.caller.codec()?, streams.caller.data(), &caller_mp3)?;
    encoder.encode(
        streams.receiver.codec()?,
        streams.receiver.data(),
        &receiver_mp3,
    )?;
    encoder.mix(&caller_mp3, &receiver_mp3, &output)?;

    info!(input = %path.display(), output = %output.display(), "converted");
    Ok(output)
}
