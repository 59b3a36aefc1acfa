//! Enumeration types shared across crates.

use serde::{Deserialize, Serialize};

use crate::constants::*;

/// SRTM tile resolution, determined from the file size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HgtType {
    /// 1 arc-second, 3601 × 3601 samples.
    Hgt1,
    /// 3 arc-second, 1201 × 1201 samples.
    Hgt3,
}

impl HgtType {
    /// Samples per side.
    pub fn grid_size(self) -> usize {
        match self {
            HgtType::Hgt1 => HGT1_GRID_SIZE,
            HgtType::Hgt3 => HGT3_GRID_SIZE,
        }
    }

    /// Cells per degree of latitude or longitude.
    pub fn samples_per_degree(self) -> f64 {
        match self {
            HgtType::Hgt1 => HGT1_SAMPLES_PER_DEGREE,
            HgtType::Hgt3 => HGT3_SAMPLES_PER_DEGREE,
        }
    }

    /// Arc-seconds spanned by one cell.
    pub fn arc_seconds(self) -> u32 {
        match self {
            HgtType::Hgt1 => 1,
            HgtType::Hgt3 => 3,
        }
    }

    pub fn sample_count(self) -> usize {
        self.grid_size() * self.grid_size()
    }

    /// Exact file size in bytes.
    pub fn byte_len(self) -> usize {
        self.sample_count() * HGT_SAMPLE_BYTES
    }

    /// Classify a file by its size. Any size other than the two tile
    /// sizes is rejected.
    pub fn from_byte_len(bytes: u64) -> Option<Self> {
        [HgtType::Hgt1, HgtType::Hgt3]
            .into_iter()
            .find(|t| t.byte_len() as u64 == bytes)
    }

    pub fn from_arc_seconds(arc_seconds: u32) -> Option<Self> {
        match arc_seconds {
            1 => Some(HgtType::Hgt1),
            3 => Some(HgtType::Hgt3),
            _ => None,
        }
    }
}

/// Height sampling mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Interpolation {
    /// Raw value of the cell the query truncates into.
    #[default]
    Nearest,
    /// Weighted blend of the four surrounding samples.
    Bilinear,
}
