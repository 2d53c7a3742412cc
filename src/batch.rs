//! Batch conversion over a directory tree.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{error, warn};

use crate::convert::convert_file;
use crate::encode::Encoder;
use crate::error::Result;

/// Extension of NMF container files, matched case-insensitively.
const NMF_EXTENSION: &str = "nmf";

/// Outcome counts for one batch run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    /// Files converted successfully.
    pub converted: usize,
    /// Files skipped after a fatal per-file error.
    pub failed: usize,
}

/// Convert every NMF file under `source`, mirroring its directory layout
/// under `output`.
///
/// A failing file is logged and counted, and the batch moves on; only errors
/// setting up the walk itself abort the run. A `source` that is a plain file
/// is converted as a batch of one.
pub fn run_batch<E: Encoder>(source: &Path, output: &Path, encoder: &E) -> Result<BatchSummary> {
    let mut summary = BatchSummary::default();

    if source.is_file() {
        fs::create_dir_all(output)?;
        convert_one(source, output, encoder, &mut summary);
        return Ok(summary);
    }

    let mut files = Vec::new();
    collect_nmf_files(source, &mut files)?;
    files.sort();

    if files.is_empty() {
        warn!(source = %source.display(), "no .nmf files found");
        return Ok(summary);
    }

    for file in &files {
        let relative = file
            .parent()
            .and_then(|dir| dir.strip_prefix(source).ok())
            .unwrap_or_else(|| Path::new(""));
        let out_dir = output.join(relative);
        fs::create_dir_all(&out_dir)?;
        convert_one(file, &out_dir, encoder, &mut summary);
    }

    Ok(summary)
}

fn convert_one<E: Encoder>(file: &Path, out_dir: &Path, encoder: &E, summary: &mut BatchSummary) {
    match convert_file(file, out_dir, encoder) {
        Ok(_) => summary.converted += 1,
        Err(e) => {
            error!(file = %file.display(), error = %e, "skipping file");
            summary.failed += 1;
        }
    }
}

/// Recursively collect NMF files under `dir`.
fn collect_nmf_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_nmf_files(&path, files)?;
        } else if is_nmf(&path) {
            files.push(path);
        }
    }
    Ok(())
}

fn is_nmf(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(NMF_EXTENSION))
        .unwrap_or(false)
}
