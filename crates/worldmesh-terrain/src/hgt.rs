//! SRTM HGT file parser and writer.
//!
//! HGT files are flat arrays of big-endian i16 elevation values
//! covering 1° × 1° tiles. The filename encodes the SW corner
//! coordinates (e.g., N46E015.hgt).

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::time::Instant;

use tracing::{debug, info, warn};
use worldmesh_core::constants::HGT_SAMPLE_BYTES;
use worldmesh_core::enums::HgtType;

use crate::error::{HgtError, Result};
use crate::grid::HeightGrid;

/// Parse an HGT filename to extract the SW corner coordinates.
/// Format: `N46E015.hgt` or `S10W045.hgt`; south and west are negative.
pub fn parse_hgt_filename(filename: &str) -> Result<(i32, i32)> {
    let unparsable = || HgtError::UnparsableFileName(filename.to_string());

    let name = filename
        .strip_suffix(".hgt")
        .or_else(|| filename.strip_suffix(".HGT"))
        .ok_or_else(unparsable)?;

    let bytes = name.as_bytes();
    if bytes.len() != 7 {
        return Err(unparsable());
    }

    let lat_sign = match bytes[0] {
        b'N' | b'n' => 1,
        b'S' | b's' => -1,
        _ => return Err(unparsable()),
    };
    let lon_sign = match bytes[3] {
        b'E' | b'e' => 1,
        b'W' | b'w' => -1,
        _ => return Err(unparsable()),
    };

    let lat = parse_degrees(&bytes[1..3]).ok_or_else(unparsable)?;
    let lon = parse_degrees(&bytes[4..7]).ok_or_else(unparsable)?;
    if lat > 90 || lon > 180 {
        return Err(unparsable());
    }

    Ok((lat * lat_sign, lon * lon_sign))
}

/// Zero-padded decimal digits only; no signs or whitespace.
fn parse_degrees(digits: &[u8]) -> Option<i32> {
    if !digits.iter().all(u8::is_ascii_digit) {
        return None;
    }
    Some(
        digits
            .iter()
            .fold(0, |acc, &d| acc * 10 + i32::from(d - b'0')),
    )
}

/// Canonical tile name for a SW corner, e.g. `N46E015.hgt`.
pub fn hgt_filename(lat_origin: i32, lon_origin: i32) -> String {
    let ns = if lat_origin < 0 { 'S' } else { 'N' };
    let ew = if lon_origin < 0 { 'W' } else { 'E' };
    format!(
        "{ns}{:02}{ew}{:03}.hgt",
        lat_origin.unsigned_abs(),
        lon_origin.unsigned_abs()
    )
}

/// Determine the tile type from the file size.
/// 1 arc-second: 3601 × 3601 × 2 = 25,934,402 bytes
/// 3 arc-second: 1201 × 1201 × 2 = 2,884,802 bytes
pub fn classify_byte_len(bytes: u64) -> Result<HgtType> {
    HgtType::from_byte_len(bytes).ok_or(HgtError::InvalidFileSize { bytes })
}

fn decode_samples(data: &[u8]) -> Vec<i16> {
    data.chunks_exact(HGT_SAMPLE_BYTES)
        .map(|c| i16::from_be_bytes([c[0], c[1]]))
        .collect()
}

/// Parse raw HGT bytes into elevation values.
pub fn parse_hgt_bytes(data: &[u8]) -> Result<(Vec<i16>, HgtType)> {
    let hgt_type = classify_byte_len(data.len() as u64)?;
    Ok((decode_samples(data), hgt_type))
}

/// Read exactly one tile's worth of samples from `reader`.
///
/// Fails with `TruncatedRead` if the stream ends before every sample
/// of `hgt_type` has been read. Trailing bytes are not consumed.
pub fn read_samples<R: Read>(reader: R, hgt_type: HgtType) -> Result<Vec<i16>> {
    let expected = hgt_type.sample_count();
    let mut data = Vec::with_capacity(hgt_type.byte_len());
    reader
        .take(hgt_type.byte_len() as u64)
        .read_to_end(&mut data)?;

    let read = data.len() / HGT_SAMPLE_BYTES;
    if read != expected {
        return Err(HgtError::TruncatedRead { expected, read });
    }

    Ok(decode_samples(&data))
}

/// Load a single HGT file into a HeightGrid.
pub fn load_hgt(path: &Path) -> Result<HeightGrid> {
    let start = Instant::now();
    let filename = path
        .file_name()
        .and_then(|f| f.to_str())
        .ok_or_else(|| HgtError::UnparsableFileName(path.display().to_string()))?;

    let (lat_origin, lon_origin) = parse_hgt_filename(filename).inspect_err(|e| warn!("{e}"))?;

    let file = File::open(path)?;
    let byte_len = file.metadata()?.len();
    let hgt_type = classify_byte_len(byte_len).inspect_err(|e| warn!("{}: {e}", path.display()))?;
    debug!("{filename}: {hgt_type:?} tile at lat {lat_origin}, lon {lon_origin}");

    let elevations = read_samples(BufReader::new(file), hgt_type)?;
    let grid = HeightGrid::new(lat_origin, lon_origin, hgt_type, elevations)?;

    info!(
        "parsed {} ({} × {} samples, {}..{} m) in {} ms",
        filename,
        grid.grid_size(),
        grid.grid_size(),
        grid.header.min_elevation,
        grid.header.max_elevation,
        start.elapsed().as_millis()
    );
    Ok(grid)
}

/// Serialize a HeightGrid to HGT bytes.
pub fn serialize_hgt(grid: &HeightGrid) -> Vec<u8> {
    let mut buf = Vec::with_capacity(grid.header.hgt_type.byte_len());
    for &elev in grid.elevations() {
        buf.extend_from_slice(&elev.to_be_bytes());
    }
    buf
}

/// Write a HeightGrid into `dir` under its canonical tile name.
/// Returns the path written.
pub fn write_hgt(grid: &HeightGrid, dir: &Path) -> Result<std::path::PathBuf> {
    let path = dir.join(hgt_filename(grid.header.lat_origin, grid.header.lon_origin));
    std::fs::write(&path, serialize_hgt(grid))?;
    Ok(path)
}
