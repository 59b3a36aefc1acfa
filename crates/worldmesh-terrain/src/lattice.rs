//! Regular lat/lon sample lattice over a tile.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use worldmesh_core::constants::*;
use worldmesh_core::types::Point;

/// Placement and spacing of the lattice, all in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatticeConfig {
    /// Offset of the first row from the tile's south edge.
    pub offset_lat: f64,
    /// Offset of the first column from the tile's west edge.
    pub offset_lon: f64,
    pub extent_lat: f64,
    pub extent_lon: f64,
    pub resolution_lat: f64,
    pub resolution_lon: f64,
}

impl Default for LatticeConfig {
    fn default() -> Self {
        Self {
            offset_lat: DEFAULT_LATTICE_OFFSET,
            offset_lon: DEFAULT_LATTICE_OFFSET,
            extent_lat: DEFAULT_LATTICE_EXTENT,
            extent_lon: DEFAULT_LATTICE_EXTENT,
            resolution_lat: DEFAULT_LATTICE_RESOLUTION,
            resolution_lon: DEFAULT_LATTICE_RESOLUTION,
        }
    }
}

/// Samples along one axis: both ends included, tolerating half a step
/// of rounding at the far end.
fn steps(extent: f64, resolution: f64) -> Option<usize> {
    if !(resolution.is_finite() && resolution > 0.0 && extent.is_finite() && extent >= 0.0) {
        return None;
    }
    Some((extent / resolution + 0.5).floor() as usize + 1)
}

/// Lattice points for the tile whose SW corner is `(lat_origin, lon_origin)`.
///
/// Points carry `x = lat`, `y = lon`, latitude in the outer loop, and ids
/// counting from 1 in generation order. An unusable config (non-positive
/// resolution, negative or non-finite extent) yields no points.
pub fn generate_lattice(lat_origin: i32, lon_origin: i32, config: &LatticeConfig) -> Vec<Point> {
    let (Some(rows), Some(cols)) = (
        steps(config.extent_lat, config.resolution_lat),
        steps(config.extent_lon, config.resolution_lon),
    ) else {
        warn!("rejected lattice config {config:?}");
        return Vec::new();
    };

    let lat_start = lat_origin as f64 + config.offset_lat;
    let lon_start = lon_origin as f64 + config.offset_lon;

    let mut points = Vec::with_capacity(rows * cols);
    let mut id = 1u32;
    for i in 0..rows {
        let lat = lat_start + i as f64 * config.resolution_lat;
        for j in 0..cols {
            let lon = lon_start + j as f64 * config.resolution_lon;
            points.push(Point::new(lat, lon, id));
            id += 1;
        }
    }

    debug!("lattice {rows} × {cols} from ({lat_start}, {lon_start})");
    points
}
