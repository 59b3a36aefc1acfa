//! Fundamental geometric types.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// A 2D input point with a caller-assigned label.
///
/// Equality compares `(x, y)` only: two points at the same position with
/// different ids are equal. The engine relies on this when it compares
/// vertices by position, so callers must not use `==` to tell labels apart.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub id: u32,
}

impl Point {
    pub fn new(x: f64, y: f64, id: u32) -> Self {
        Self { x, y, id }
    }

    /// Unlabeled point (id 0).
    pub fn at(x: f64, y: f64) -> Self {
        Self::new(x, y, 0)
    }

    pub fn position(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: &Point) -> f64 {
        self.position().distance(other.position())
    }

    /// Dot product treating both points as vectors from the origin.
    pub fn dot(&self, other: &Point) -> f64 {
        self.position().dot(other.position())
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y
    }
}

impl From<Point> for DVec2 {
    fn from(p: Point) -> Self {
        p.position()
    }
}
