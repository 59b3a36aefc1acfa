//! HeightGrid: a parsed SRTM tile.

use serde::{Deserialize, Serialize};
use worldmesh_core::constants::{HGT_SAMPLE_BYTES, HGT_VOID};
use worldmesh_core::enums::HgtType;

use crate::error::{HgtError, Result};

/// Tile metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HgtHeader {
    /// Southwest corner latitude (whole degrees).
    pub lat_origin: i32,
    /// Southwest corner longitude (whole degrees).
    pub lon_origin: i32,
    pub hgt_type: HgtType,
    /// Lowest non-void elevation (meters).
    pub min_elevation: i16,
    /// Highest non-void elevation (meters).
    pub max_elevation: i16,
    /// Number of void samples.
    pub void_count: usize,
}

impl HgtHeader {
    pub fn grid_size(&self) -> usize {
        self.hgt_type.grid_size()
    }

    /// North edge latitude (degrees).
    pub fn north_lat(&self) -> f64 {
        self.lat_origin as f64 + 1.0
    }

    /// East edge longitude (degrees).
    pub fn east_lon(&self) -> f64 {
        self.lon_origin as f64 + 1.0
    }
}

/// Elevation samples of one tile, row-major, row 0 = north edge,
/// column 0 = west edge. The origin is the last row, first column.
#[derive(Debug, Clone)]
pub struct HeightGrid {
    pub header: HgtHeader,
    elevations: Vec<i16>,
}

impl HeightGrid {
    /// Wrap decoded samples. The sample count must match `hgt_type`.
    ///
    /// Too few samples is a `TruncatedRead`. Too many is reported as
    /// `InvalidFileSize` with the byte length the samples would occupy on
    /// disk, since such a buffer could not have come from a valid tile.
    pub fn new(
        lat_origin: i32,
        lon_origin: i32,
        hgt_type: HgtType,
        elevations: Vec<i16>,
    ) -> Result<Self> {
        let expected = hgt_type.sample_count();
        if elevations.len() < expected {
            return Err(HgtError::TruncatedRead {
                expected,
                read: elevations.len(),
            });
        }
        if elevations.len() > expected {
            return Err(HgtError::InvalidFileSize {
                bytes: (elevations.len() * HGT_SAMPLE_BYTES) as u64,
            });
        }

        let mut min_elevation = i16::MAX;
        let mut max_elevation = i16::MIN;
        let mut void_count = 0;
        for &e in &elevations {
            if e == HGT_VOID {
                void_count += 1;
                continue;
            }
            min_elevation = min_elevation.min(e);
            max_elevation = max_elevation.max(e);
        }
        if void_count == elevations.len() {
            min_elevation = 0;
            max_elevation = 0;
        }

        Ok(Self {
            header: HgtHeader {
                lat_origin,
                lon_origin,
                hgt_type,
                min_elevation,
                max_elevation,
                void_count,
            },
            elevations,
        })
    }

    pub fn grid_size(&self) -> usize {
        self.header.grid_size()
    }

    /// All samples, row-major.
    pub fn elevations(&self) -> &[i16] {
        &self.elevations
    }

    /// Samples of one row (west to east).
    pub fn row(&self, row: usize) -> Option<&[i16]> {
        let n = self.grid_size();
        (row < n).then(|| &self.elevations[row * n..(row + 1) * n])
    }

    /// Raw sample at integer grid coordinates, `None` outside the grid.
    pub fn raw_elevation(&self, row: usize, col: usize) -> Option<i16> {
        let n = self.grid_size();
        if row >= n || col >= n {
            return None;
        }
        Some(self.elevations[row * n + col])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp_grid() -> HeightGrid {
        let n = HgtType::Hgt3.grid_size();
        let elevations = (0..n * n).map(|i| (i % 1000) as i16).collect();
        HeightGrid::new(46, 15, HgtType::Hgt3, elevations).unwrap()
    }

    #[test]
    fn test_header_bounds() {
        let grid = ramp_grid();
        assert_eq!(grid.header.north_lat(), 47.0);
        assert_eq!(grid.header.east_lon(), 16.0);
        assert_eq!(grid.grid_size(), 1201);
        assert_eq!(grid.header.min_elevation, 0);
        assert_eq!(grid.header.max_elevation, 999);
        assert_eq!(grid.header.void_count, 0);
    }

    #[test]
    fn test_raw_elevation_row_major() {
        let grid = ramp_grid();
        assert_eq!(grid.raw_elevation(0, 0), Some(0));
        assert_eq!(grid.raw_elevation(0, 5), Some(5));
        // Row 1 starts at flat index 1201.
        assert_eq!(grid.raw_elevation(1, 0), Some(201));
        assert_eq!(grid.raw_elevation(1201, 0), None);
        assert_eq!(grid.raw_elevation(0, 1201), None);
        assert_eq!(grid.row(1).unwrap()[0], 201);
        assert!(grid.row(1201).is_none());
    }

    #[test]
    fn test_wrong_sample_count() {
        let short = vec![0i16; 10];
        match HeightGrid::new(0, 0, HgtType::Hgt3, short) {
            Err(HgtError::TruncatedRead { expected, read }) => {
                assert_eq!(expected, 1201 * 1201);
                assert_eq!(read, 10);
            }
            other => panic!("expected TruncatedRead, got {other:?}"),
        }

        let long = vec![0i16; 1201 * 1201 + 1];
        match HeightGrid::new(0, 0, HgtType::Hgt3, long) {
            Err(HgtError::InvalidFileSize { bytes }) => assert_eq!(bytes, 2 * (1201 * 1201 + 1)),
            other => panic!("expected InvalidFileSize, got {other:?}"),
        }
    }

    #[test]
    fn test_header_serde_roundtrip() {
        let header = ramp_grid().header;
        let json = serde_json::to_string(&header).unwrap();
        assert!(json.contains("\"hgt_type\":\"Hgt3\""));
        let back: HgtHeader = serde_json::from_str(&json).unwrap();
        assert_eq!(back, header);
    }

    #[test]
    fn test_voids_excluded_from_range() {
        let n = HgtType::Hgt3.grid_size();
        let mut elevations = vec![120i16; n * n];
        elevations[0] = HGT_VOID;
        elevations[7] = HGT_VOID;
        elevations[9] = 80;
        let grid = HeightGrid::new(0, 0, HgtType::Hgt3, elevations).unwrap();
        assert_eq!(grid.header.void_count, 2);
        assert_eq!(grid.header.min_elevation, 80);
        assert_eq!(grid.header.max_elevation, 120);
    }
}
