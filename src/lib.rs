//! nmfmix - Demux NMF call recordings and mix both sides into one file.
//!
//! NMF containers interleave packets for the caller and receiver sides of a
//! recorded call. This library parses the container, accumulates each side's
//! raw audio in arrival order, and drives an external encoder to produce
//! per-stream encodings and a combined mix.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use nmfmix::encode::FfmpegEncoder;
//!
//! fn main() -> anyhow::Result<()> {
//!     let encoder = FfmpegEncoder::new();
//!     let summary = nmfmix::run_batch(Path::new("recordings"), Path::new("out"), &encoder)?;
//!     println!("{} converted, {} failed", summary.converted, summary.failed);
//!     Ok(())
//! }
//! ```

pub mod batch;
pub mod cli;
pub mod codec;
pub mod convert;
pub mod demux;
pub mod encode;
pub mod error;
pub mod nmf;

pub use batch::{run_batch, BatchSummary};
pub use convert::convert_file;
pub use error::{Error, Result};
