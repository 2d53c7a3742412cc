//! Command-line argument definitions.

use clap::Parser;
use std::path::PathBuf;

/// Convert NMF call recordings into mixed MP3 files.
#[derive(Parser, Debug)]
#[command(name = "nmfmix")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Directory of NMF recordings, or a single .nmf file
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Directory for converted output
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Path to the ffmpeg binary
    #[arg(long = "ffmpeg", value_name = "PATH", default_value = "ffmpeg")]
    pub ffmpeg: PathBuf,

    /// Write log output to a file instead of stderr
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}
