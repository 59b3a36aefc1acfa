//! Terrain system for worldmesh.
//!
//! SRTM heightmap loading, height sampling, lat/lon lattice
//! generation, and great-circle distance.

pub use worldmesh_core as core;

pub mod error;
pub mod geodesy;
pub mod grid;
pub mod hgt;
pub mod lattice;
pub mod sampler;

// Re-export key types for convenience.
pub use error::{HgtError, Result};
pub use geodesy::haversine_distance;
pub use grid::{HeightGrid, HgtHeader};
pub use hgt::{hgt_filename, load_hgt, parse_hgt_filename, write_hgt};
pub use lattice::{generate_lattice, LatticeConfig};

#[cfg(test)]
mod tests;
