//! Bowyer–Watson incremental insertion.
//!
//! The working mesh starts as a single super-triangle that strictly encloses
//! every input point. Each insertion removes the triangles whose
//! circumcircle contains the new point and fans the resulting hole from it.
//! After the last point, every triangle touching a super-triangle corner is
//! dropped.
//!
//! The exact triangle set depends on insertion order. Callers that need
//! reproducible output must fix the order of their input.

use std::collections::HashMap;
use std::time::Instant;

use tracing::{debug, info};
use worldmesh_core::constants::{SUPER_TRIANGLE_MARGIN, SUPER_VERTEX_ID};
use worldmesh_core::types::Point;

use crate::cavity::classify;
use crate::error::{Result, TriangulationError};
use crate::mesh::Mesh;
use crate::triangle::{Triangle, VertexId};

/// Corners of a triangle enclosing the bounding box of `points`, padded by
/// `SUPER_TRIANGLE_MARGIN` times the larger box side.
///
/// Returns `None` for an empty input. A zero-size box (a single point)
/// is padded as if its side were 1.
pub fn super_triangle(points: &[Point]) -> Option<[Point; 3]> {
    let first = points.first()?;
    let (mut min_x, mut min_y) = (first.x, first.y);
    let (mut max_x, mut max_y) = (min_x, min_y);

    for p in points {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }

    let delta = match (max_x - min_x).max(max_y - min_y) {
        d if d > 0.0 => d,
        _ => 1.0,
    };
    let mid_x = (min_x + max_x) / 2.0;
    let mid_y = (min_y + max_y) / 2.0;
    let m = SUPER_TRIANGLE_MARGIN;

    Some([
        Point::new(mid_x - m * delta, mid_y - delta, SUPER_VERTEX_ID),
        Point::new(mid_x, mid_y + m * delta, SUPER_VERTEX_ID),
        Point::new(mid_x + m * delta, mid_y - delta, SUPER_VERTEX_ID),
    ])
}

/// Reject non-finite coordinates and positional duplicates.
fn validate(points: &[Point]) -> Result<()> {
    let mut seen: HashMap<(u64, u64), u32> = HashMap::with_capacity(points.len());

    for p in points {
        if !p.is_finite() {
            return Err(TriangulationError::NonFiniteCoordinate {
                id: p.id,
                x: p.x,
                y: p.y,
            });
        }
        // Adding 0.0 folds -0.0 into +0.0.
        let key = ((p.x + 0.0).to_bits(), (p.y + 0.0).to_bits());
        if let Some(&first) = seen.get(&key) {
            return Err(TriangulationError::DuplicatePoint {
                first,
                second: p.id,
                x: p.x,
                y: p.y,
            });
        }
        seen.insert(key, p.id);
    }

    Ok(())
}

/// Incremental triangulation state.
///
/// The vertex store holds the input points in order, followed by the three
/// super-triangle corners.
#[derive(Debug, Clone)]
pub struct BowyerWatson {
    store: Vec<Point>,
    triangles: Vec<Triangle>,
    input_count: usize,
    next: usize,
}

impl BowyerWatson {
    /// Validate `points` and set up the super-triangle.
    pub fn new(points: &[Point]) -> Result<Self> {
        validate(points)?;

        let mut store = points.to_vec();
        let input_count = store.len();
        let mut triangles = Vec::new();

        if let Some(corners) = super_triangle(points) {
            debug!(
                "super-triangle corners: ({}, {}), ({}, {}), ({}, {})",
                corners[0].x, corners[0].y, corners[1].x, corners[1].y, corners[2].x, corners[2].y
            );
            store.extend_from_slice(&corners);
            triangles.push(Triangle::new(
                input_count,
                input_count + 1,
                input_count + 2,
                &store,
            )?);
        }

        Ok(Self {
            store,
            triangles,
            input_count,
            next: 0,
        })
    }

    /// Insert the next input point. Returns `false` once every point has
    /// been inserted.
    ///
    /// On error the working mesh is left as it was before the call.
    pub fn insert_next(&mut self) -> Result<bool> {
        if self.next >= self.input_count {
            return Ok(false);
        }
        self.insert(self.next)?;
        self.next += 1;
        Ok(true)
    }

    fn insert(&mut self, v: VertexId) -> Result<()> {
        let cavity = classify(&self.triangles, &self.store[v]);

        let mut triangles = cavity.kept;
        triangles.reserve(cavity.boundary.len());
        for edge in cavity.boundary {
            triangles.push(Triangle::from_edge(edge, v, &self.store)?);
        }

        self.triangles = triangles;
        Ok(())
    }

    /// Number of input points inserted so far.
    pub fn inserted(&self) -> usize {
        self.next
    }

    /// Size of the working mesh, super-triangle fans included.
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Working mesh, super-triangle fans included.
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn is_super_vertex(&self, v: VertexId) -> bool {
        v >= self.input_count
    }

    /// Drop every triangle touching a super-triangle corner and hand over
    /// the mesh. Points not yet inserted are kept in the store but appear in
    /// no triangle.
    pub fn finish(self) -> Mesh {
        let Self {
            mut store,
            mut triangles,
            input_count,
            ..
        } = self;

        triangles.retain(|t| t.vertices().iter().all(|&v| v < input_count));
        store.truncate(input_count);

        Mesh::new(store, triangles)
    }
}

/// Triangulate `points` in the given order.
///
/// Output triangles index into `Mesh::points`, which preserves the input
/// order; use `Mesh::triangle_ids` for the caller's labels.
pub fn triangulate(points: &[Point]) -> Result<Mesh> {
    let start = Instant::now();
    let mut engine = BowyerWatson::new(points)?;
    while engine.insert_next()? {}
    let mesh = engine.finish();

    info!(
        "triangulated {} points into {} triangles in {:.3}s",
        points.len(),
        mesh.len(),
        start.elapsed().as_secs_f64()
    );
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_super_triangle_encloses_points() {
        let points = vec![
            Point::new(0.0, 0.0, 1),
            Point::new(4.0, 1.0, 2),
            Point::new(2.0, 3.0, 3),
        ];
        let corners = super_triangle(&points).unwrap();

        // delta = 4, mid = (2, 1.5)
        assert_eq!(corners[0], Point::at(2.0 - 80.0, 1.5 - 4.0));
        assert_eq!(corners[1], Point::at(2.0, 1.5 + 80.0));
        assert_eq!(corners[2], Point::at(2.0 + 80.0, 1.5 - 4.0));
        assert!(corners.iter().all(|c| c.id == SUPER_VERTEX_ID));

        let store: Vec<Point> = corners.to_vec();
        let tri = Triangle::new(0, 1, 2, &store).unwrap();
        for p in &points {
            assert!(tri.circumcircle().strictly_contains(p.position()));
        }
    }

    #[test]
    fn test_super_triangle_empty_and_single() {
        assert!(super_triangle(&[]).is_none());

        let corners = super_triangle(&[Point::at(3.0, 3.0)]).unwrap();
        assert_eq!(corners[0], Point::at(3.0 - 20.0, 2.0));
        assert_eq!(corners[1], Point::at(3.0, 23.0));
    }

    #[test]
    fn test_validate_rejects_duplicates() {
        let points = vec![
            Point::new(0.0, 0.0, 7),
            Point::new(1.0, 0.0, 8),
            Point::new(-0.0, 0.0, 9),
        ];
        let err = BowyerWatson::new(&points).unwrap_err();
        assert_eq!(
            err,
            TriangulationError::DuplicatePoint {
                first: 7,
                second: 9,
                x: -0.0,
                y: 0.0
            }
        );
    }

    #[test]
    fn test_validate_rejects_non_finite() {
        let points = vec![Point::new(0.0, 0.0, 1), Point::new(f64::NAN, 1.0, 2)];
        match BowyerWatson::new(&points) {
            Err(TriangulationError::NonFiniteCoordinate { id, .. }) => assert_eq!(id, 2),
            other => panic!("expected NonFiniteCoordinate, got {other:?}"),
        }
    }

    #[test]
    fn test_incremental_insertion_steps() {
        let points = vec![
            Point::new(0.0, 0.0, 0),
            Point::new(0.0, 1.0, 1),
            Point::new(1.0, 1.0, 2),
        ];
        let mut engine = BowyerWatson::new(&points).unwrap();
        assert_eq!(engine.triangle_count(), 1);

        // The first point splits the super-triangle into three.
        assert!(engine.insert_next().unwrap());
        assert_eq!(engine.triangle_count(), 3);
        assert_eq!(engine.inserted(), 1);

        while engine.insert_next().unwrap() {}
        assert_eq!(engine.inserted(), 3);
        assert!(!engine.insert_next().unwrap());
        assert!(engine.is_super_vertex(3));
        assert!(!engine.is_super_vertex(2));

        let mesh = engine.finish();
        assert_eq!(mesh.len(), 1);
        assert_eq!(mesh.points().len(), 3);
    }
}
