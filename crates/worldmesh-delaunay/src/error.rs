use thiserror::Error;

pub type Result<T> = std::result::Result<T, TriangulationError>;

/// Reasons a point set cannot be triangulated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TriangulationError {
    #[error("point {id} has a non-finite coordinate ({x}, {y})")]
    NonFiniteCoordinate { id: u32, x: f64, y: f64 },
    #[error("points {first} and {second} share the coordinate ({x}, {y})")]
    DuplicatePoint { first: u32, second: u32, x: f64, y: f64 },
    #[error("triangle {ids:?} has no finite circumcircle (collinear vertices)")]
    DegenerateGeometry { ids: [u32; 3] },
}
