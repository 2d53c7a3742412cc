//! ffmpeg subprocess encoder.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::debug;

use super::Encoder;
use crate::codec::Codec;
use crate::error::EncodeError;

/// Filter graph that overlays the two call sides into one track.
const MIX_FILTER: &str = "[0:a][1:a]amix=inputs=2:duration=longest:dropout_transition=2";

/// Encoder backed by an external `ffmpeg` binary.
///
/// Raw stream bytes are piped over stdin with the codec passed as the input
/// format; mixing reads the two intermediate files and applies `amix`.
pub struct FfmpegEncoder {
    binary: PathBuf,
}

impl FfmpegEncoder {
    /// Encoder resolving `ffmpeg` from PATH.
    pub fn new() -> Self {
        Self::with_binary("ffmpeg")
    }

    /// Encoder using a specific ffmpeg binary.
    pub fn with_binary<P: Into<PathBuf>>(binary: P) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    fn binary_name(&self) -> String {
        self.binary.display().to_string()
    }

    fn run(&self, mut command: Command) -> Result<(), EncodeError> {
        let status = command.status().map_err(|source| EncodeError::Spawn {
            binary: self.binary_name(),
            source,
        })?;
        if !status.success() {
            return Err(EncodeError::Failed {
                binary: self.binary_name(),
                status,
            });
        }
        Ok(())
    }
}

impl Default for FfmpegEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Encoder for FfmpegEncoder {
    fn encode(&self, codec: Codec, data: &[u8], output: &Path) -> Result<(), EncodeError> {
        debug!(
            format = codec.ffmpeg_format(),
            len = data.len(),
            output = %output.display(),
            "encoding stream"
        );

        let mut child = Command::new(&self.binary)
            .arg("-hide_banner")
            .arg("-y")
            .args(["-f", codec.ffmpeg_format()])
            .args(["-i", "pipe:0"])
            .arg(output)
            .stdin(Stdio::piped())
            .spawn()
            .map_err(|source| EncodeError::Spawn {
                binary: self.binary_name(),
                source,
            })?;

        {
            // Scoped so the pipe closes before we wait.
            let mut stdin = child.stdin.take().expect("stdin is piped");
            stdin.write_all(data)?;
        }

        let status = child.wait()?;
        if !status.success() {
            return Err(EncodeError::Failed {
                binary: self.binary_name(),
                status,
            });
        }
        Ok(())
    }

    fn mix(&self, left: &Path, right: &Path, output: &Path) -> Result<(), EncodeError> {
        debug!(
            left = %left.display(),
            right = %right.display(),
            output = %output.display(),
            "mixing streams"
        );

        let mut command = Command::new(&self.binary);
        command
            .arg("-y")
            .arg("-i")
            .arg(left)
            .arg("-i")
            .arg(right)
            .args(["-filter_complex", MIX_FILTER])
            .arg(output);
        self.run(command)
    }
}
