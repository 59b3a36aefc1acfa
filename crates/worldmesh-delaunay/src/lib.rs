//! Incremental Delaunay triangulation for worldmesh.
//!
//! Bowyer–Watson insertion over a 2D point set. Points live in one owned
//! vertex store; triangles and edges refer to them by index.

pub mod bowyer_watson;
pub mod cavity;
pub mod edge;
pub mod error;
pub mod mesh;
pub mod triangle;

pub use worldmesh_core as core;

// Re-export key types for convenience.
pub use bowyer_watson::{super_triangle, triangulate, BowyerWatson};
pub use cavity::{classify, Cavity};
pub use edge::Edge;
pub use error::{Result, TriangulationError};
pub use mesh::Mesh;
pub use triangle::{Circumcircle, Triangle, VertexId};
