use std::io;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, HgtError>;

/// Failures while reading or building an HGT raster.
#[derive(Error, Debug)]
pub enum HgtError {
    #[error("unexpected HGT file size: {bytes} bytes (expected 25934402 or 2884802)")]
    InvalidFileSize { bytes: u64 },
    #[error("HGT data ended early: read {read} of {expected} samples")]
    TruncatedRead { expected: usize, read: usize },
    #[error("cannot parse HGT coordinates from filename: {0}")]
    UnparsableFileName(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}
