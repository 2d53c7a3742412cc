//! Error types for nmfmix.

use thiserror::Error;

/// Main error type for nmfmix operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Error reading or parsing an NMF container
    #[error("NMF error: {0}")]
    Nmf(#[from] NmfError),

    /// Compression code with no known codec
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    /// Error driving the external encoder
    #[error("Encode error: {0}")]
    Encode(#[from] EncodeError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to NMF container parsing.
///
/// All of these are fatal for the file being parsed; the batch runner logs
/// them and moves on to the next file.
#[derive(Error, Debug)]
pub enum NmfError {
    /// Container path unreadable
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    /// Fewer than 28 bytes available where a packet header is expected
    #[error("Truncated header at offset {offset}: need 28 bytes, have {available}")]
    TruncatedHeader { offset: usize, available: usize },

    /// Packet claims a parameter block larger than the whole packet
    #[error(
        "Malformed packet at offset {offset}: packet size {packet_size} \
         smaller than parameter block size {parameters_size}"
    )]
    MalformedPacket {
        offset: usize,
        packet_size: u32,
        parameters_size: u32,
    },

    /// Container ran out before a terminal packet was seen
    #[error(
        "Unterminated stream: packet at offset {offset} runs {overrun} bytes \
         past the end of the container"
    )]
    UnterminatedStream { offset: usize, overrun: usize },
}

/// Errors related to codec selection.
#[derive(Error, Debug)]
pub enum CodecError {
    /// Compression code not present in the codec table
    #[error("Unknown compression code: {code}")]
    UnknownCompression { code: i8 },
}

/// Errors related to the external encoder.
#[derive(Error, Debug)]
pub enum EncodeError {
    /// Encoder binary could not be started
    #[error("Failed to spawn {binary}: {source}")]
    Spawn {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    /// Encoder ran but reported failure
    #[error("{binary} exited with {status}")]
    Failed {
        binary: String,
        status: std::process::ExitStatus,
    },

    /// I/O error feeding data to the encoder
    #[error("Encoder I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
