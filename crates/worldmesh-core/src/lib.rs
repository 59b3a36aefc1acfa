//! Core types and definitions for worldmesh.
//!
//! This crate defines the vocabulary shared by the triangulation engine,
//! the terrain crate, and the tooling: points, raster and interpolation
//! enums, and constants. It performs no I/O.

pub mod constants;
pub mod enums;
pub mod types;

pub use enums::{HgtType, Interpolation};
pub use types::Point;
