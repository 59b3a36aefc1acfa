//! Format constants and tuning parameters.

// --- SRTM rasters ---

/// Samples per side of a 1 arc-second tile.
pub const HGT1_GRID_SIZE: usize = 3601;

/// Samples per side of a 3 arc-second tile.
pub const HGT3_GRID_SIZE: usize = 1201;

/// Cells per degree for 1 arc-second data.
pub const HGT1_SAMPLES_PER_DEGREE: f64 = 3600.0;

/// Cells per degree for 3 arc-second data.
pub const HGT3_SAMPLES_PER_DEGREE: f64 = 1200.0;

/// Bytes per raw sample (big-endian i16).
pub const HGT_SAMPLE_BYTES: usize = 2;

/// Void marker in HGT files (no data).
pub const HGT_VOID: i16 = -32768;

/// Height returned for any query that cannot be answered.
pub const INVALID_HEIGHT: f64 = -10000.0;

/// Fractional cell coordinates this close to an integer snap onto it.
pub const CELL_SNAP_EPSILON: f64 = 1e-6;

// --- Triangulation ---

/// Super-triangle padding as a multiple of the larger bounding-box side.
pub const SUPER_TRIANGLE_MARGIN: f64 = 20.0;

/// Id carried by super-triangle corners.
pub const SUPER_VERTEX_ID: u32 = u32::MAX;

/// Relative margin inside a circumcircle a point must reach before the
/// strict check counts it. Absorbs rounding on cocircular lattices.
pub const CIRCUMCIRCLE_TOLERANCE: f64 = 1e-8;

// --- Lattice defaults (degrees) ---

pub const DEFAULT_LATTICE_OFFSET: f64 = 0.0;
pub const DEFAULT_LATTICE_EXTENT: f64 = 0.02;
pub const DEFAULT_LATTICE_RESOLUTION: f64 = 0.0001;

// --- Geodesy ---

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;
