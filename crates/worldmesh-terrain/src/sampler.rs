//! Height queries against a parsed tile.
//!
//! Latitude grows northward while rows grow southward, so a query is
//! first measured in cells north of the origin and only then turned
//! into a row index. The truncated cell is the south-west corner of
//! the enclosing cell.

use worldmesh_core::constants::{CELL_SNAP_EPSILON, INVALID_HEIGHT};
use worldmesh_core::enums::Interpolation;

use crate::grid::HeightGrid;

/// A query resolved to grid coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
struct CellCoords {
    /// Row of the south-west corner (row 0 = north edge).
    row: usize,
    /// Column of the south-west corner.
    col: usize,
    /// Fraction of a cell east of `col`.
    fx: f64,
    /// Fraction of a cell north of `row`.
    fy: f64,
}

/// Pull values within `CELL_SNAP_EPSILON` of an integer onto it.
fn snap(cells: f64) -> f64 {
    let nearest = cells.round();
    if (cells - nearest).abs() < CELL_SNAP_EPSILON {
        nearest
    } else {
        cells
    }
}

impl HeightGrid {
    fn cell_coords(&self, lat: f64, lon: f64) -> Option<CellCoords> {
        let h = &self.header;
        let per_degree = h.hgt_type.samples_per_degree();
        let lat_cells = snap((lat - h.lat_origin as f64) * per_degree);
        let lon_cells = snap((lon - h.lon_origin as f64) * per_degree);

        if !lat_cells.is_finite() || !lon_cells.is_finite() || lat_cells < 0.0 || lon_cells < 0.0 {
            return None;
        }

        let last = self.grid_size() - 1;
        let south = lat_cells.trunc();
        let west = lon_cells.trunc();
        if south > last as f64 || west > last as f64 {
            return None;
        }

        Some(CellCoords {
            row: last - south as usize,
            col: west as usize,
            fx: lon_cells - west,
            fy: lat_cells - south,
        })
    }

    /// Height at `(lat, lon)` in meters, or `INVALID_HEIGHT` when the
    /// query falls outside the tile or is not a finite coordinate.
    pub fn height(&self, lat: f64, lon: f64, mode: Interpolation) -> f64 {
        self.try_height(lat, lon, mode).unwrap_or(INVALID_HEIGHT)
    }

    /// Like [`height`](Self::height) but with `None` instead of the sentinel.
    pub fn try_height(&self, lat: f64, lon: f64, mode: Interpolation) -> Option<f64> {
        match mode {
            Interpolation::Nearest => self.nearest_height(lat, lon),
            Interpolation::Bilinear => self.bilinear_height(lat, lon),
        }
    }

    /// Raw value of the cell the query truncates into. Void samples are
    /// returned as stored.
    pub fn nearest_height(&self, lat: f64, lon: f64) -> Option<f64> {
        let c = self.cell_coords(lat, lon)?;
        self.raw_elevation(c.row, c.col).map(f64::from)
    }

    /// Bilinear blend of the four samples around the query.
    ///
    /// On the north and east edges the enclosing cell has no neighbors,
    /// so the raw south-west sample is returned instead.
    pub fn bilinear_height(&self, lat: f64, lon: f64) -> Option<f64> {
        let c = self.cell_coords(lat, lon)?;
        let q11 = f64::from(self.raw_elevation(c.row, c.col)?);

        if c.row == 0 {
            return Some(q11);
        }
        let (Some(q12), Some(q21), Some(q22)) = (
            self.raw_elevation(c.row, c.col + 1),
            self.raw_elevation(c.row - 1, c.col),
            self.raw_elevation(c.row - 1, c.col + 1),
        ) else {
            return Some(q11);
        };

        let (fx, fy) = (c.fx, c.fy);
        Some(
            q11 * (1.0 - fx) * (1.0 - fy)
                + f64::from(q12) * fx * (1.0 - fy)
                + f64::from(q21) * (1.0 - fx) * fy
                + f64::from(q22) * fx * fy,
        )
    }
}
