//! Immutable mesh triangles with their circumcircle.

use glam::DVec2;
use worldmesh_core::constants::CIRCUMCIRCLE_TOLERANCE;
use worldmesh_core::types::Point;

use crate::edge::Edge;
use crate::error::{Result, TriangulationError};

/// Index into the vertex store.
pub type VertexId = usize;

/// Circle through the three vertices of a triangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circumcircle {
    pub center: DVec2,
    pub radius: f64,
}

impl Circumcircle {
    /// Circumcircle of `a`, `b`, `c`, or `None` when the points are
    /// collinear (the center is not finite).
    ///
    /// `a` is translated to the origin and the 2×2 system for the
    /// translated `b`, `c` is solved in closed form.
    pub fn through(a: DVec2, b: DVec2, c: DVec2) -> Option<Self> {
        let b = b - a;
        let c = c - a;

        let d = 2.0 * (b.x * c.y - b.y * c.x);
        let b_sq = b.length_squared();
        let c_sq = c.length_squared();

        let u = DVec2::new((c.y * b_sq - b.y * c_sq) / d, (b.x * c_sq - c.x * b_sq) / d);
        if !u.is_finite() {
            return None;
        }

        Some(Self {
            center: u + a,
            radius: u.length(),
        })
    }

    /// Inclusive containment: points exactly on the circle count as inside.
    pub fn contains(&self, p: DVec2) -> bool {
        self.center.distance(p) <= self.radius
    }

    /// Strict containment, used for validating finished meshes.
    ///
    /// The point must lie inside by more than `CIRCUMCIRCLE_TOLERANCE`
    /// times the radius, so cocircular points whose coordinates carry
    /// rounding noise (e.g. lattices with a 0.0001° step) are not counted.
    pub fn strictly_contains(&self, p: DVec2) -> bool {
        self.center.distance(p) < self.radius * (1.0 - CIRCUMCIRCLE_TOLERANCE)
    }
}

/// Triangle over three vertex-store indices.
///
/// Vertices are fixed at construction and the circumcircle is computed
/// eagerly, so there is no way to observe a stale circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    vertices: [VertexId; 3],
    circle: Circumcircle,
}

impl Triangle {
    /// Build the triangle `(a, b, c)` against `store`.
    ///
    /// Fails with `DegenerateGeometry` when the vertices are collinear.
    ///
    /// # Panics
    ///
    /// Panics if any index is out of bounds for `store`.
    pub fn new(a: VertexId, b: VertexId, c: VertexId, store: &[Point]) -> Result<Self> {
        let (pa, pb, pc) = (store[a], store[b], store[c]);
        let circle = Circumcircle::through(pa.position(), pb.position(), pc.position()).ok_or(
            TriangulationError::DegenerateGeometry {
                ids: [pa.id, pb.id, pc.id],
            },
        )?;

        Ok(Self {
            vertices: [a, b, c],
            circle,
        })
    }

    /// Triangle spanned by `edge` and the apex `p`.
    pub fn from_edge(edge: Edge, p: VertexId, store: &[Point]) -> Result<Self> {
        Self::new(edge.p1, edge.p2, p, store)
    }

    pub fn a(&self) -> VertexId {
        self.vertices[0]
    }

    pub fn b(&self) -> VertexId {
        self.vertices[1]
    }

    pub fn c(&self) -> VertexId {
        self.vertices[2]
    }

    pub fn vertices(&self) -> [VertexId; 3] {
        self.vertices
    }

    /// The three edges `(A, C)`, `(C, B)`, `(B, A)`.
    pub fn edges(&self) -> [Edge; 3] {
        let [a, b, c] = self.vertices;
        [Edge::new(a, c), Edge::new(c, b), Edge::new(b, a)]
    }

    pub fn has_vertex(&self, v: VertexId) -> bool {
        self.vertices.contains(&v)
    }

    pub fn circumcircle(&self) -> &Circumcircle {
        &self.circle
    }

    pub fn circumcenter(&self) -> DVec2 {
        self.circle.center
    }

    pub fn circumradius(&self) -> f64 {
        self.circle.radius
    }

    /// Inclusive in-circumcircle test used during insertion.
    pub fn is_in_circumcircle(&self, p: &Point) -> bool {
        self.circle.contains(p.position())
    }

    /// Unsigned area, computed from the store.
    pub fn area(&self, store: &[Point]) -> f64 {
        let [a, b, c] = self.vertices.map(|v| store[v].position());
        0.5 * (b - a).perp_dot(c - a).abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0, 10),
            Point::new(1.0, 0.0, 11),
            Point::new(0.0, 1.0, 12),
            Point::new(2.0, 0.0, 13),
        ]
    }

    #[test]
    fn test_circumcircle_right_triangle() {
        let tri = Triangle::new(0, 1, 2, &store()).unwrap();
        assert!((tri.circumcenter().x - 0.5).abs() < 1e-12);
        assert!((tri.circumcenter().y - 0.5).abs() < 1e-12);
        assert!((tri.circumradius() - 0.5f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_circumcircle_independent_of_vertex_order() {
        let s = store();
        let t1 = Triangle::new(0, 1, 2, &s).unwrap();
        let t2 = Triangle::new(2, 0, 1, &s).unwrap();
        assert!((t1.circumcenter() - t2.circumcenter()).length() < 1e-12);
        assert!((t1.circumradius() - t2.circumradius()).abs() < 1e-12);
    }

    #[test]
    fn test_in_circumcircle() {
        let tri = Triangle::new(0, 1, 2, &store()).unwrap();

        assert!(tri.is_in_circumcircle(&Point::at(0.5, 0.5)));
        assert!(!tri.is_in_circumcircle(&Point::at(2.0, 0.0)));
        assert!(!tri.is_in_circumcircle(&Point::at(0.0, 2.0)));
        assert!(tri.is_in_circumcircle(&Point::at(0.01, 0.01)), "slightly inside");
        assert!(!tri.is_in_circumcircle(&Point::at(-0.01, -0.01)), "slightly outside");
    }

    #[test]
    fn test_in_circumcircle_is_inclusive() {
        // (1, 1) lies exactly on the circle through the unit right triangle.
        let tri = Triangle::new(0, 1, 2, &store()).unwrap();
        let on_circle = Point::at(1.0, 1.0);
        assert!(tri.is_in_circumcircle(&on_circle));
        assert!(!tri.circumcircle().strictly_contains(on_circle.position()));
    }

    #[test]
    fn test_strict_check_ignores_lattice_rounding() {
        // One cell of a 0.0001° lattice; the fourth corner is cocircular.
        let step = 0.0001;
        let lattice = vec![
            Point::new(46.0 + 7.0 * step, 15.0 + 3.0 * step, 0),
            Point::new(46.0 + 8.0 * step, 15.0 + 3.0 * step, 1),
            Point::new(46.0 + 7.0 * step, 15.0 + 4.0 * step, 2),
        ];
        let tri = Triangle::new(0, 1, 2, &lattice).unwrap();
        let corner = DVec2::new(46.0 + 8.0 * step, 15.0 + 4.0 * step);
        assert!(!tri.circumcircle().strictly_contains(corner));

        // A point clearly inside still counts.
        let inside = DVec2::new(46.0 + 7.5 * step, 15.0 + 3.5 * step);
        assert!(tri.circumcircle().strictly_contains(inside));
    }

    #[test]
    fn test_collinear_triangle_is_degenerate() {
        let err = Triangle::new(0, 1, 3, &store()).unwrap_err();
        assert_eq!(
            err,
            TriangulationError::DegenerateGeometry { ids: [10, 11, 13] }
        );
        assert!(Circumcircle::through(DVec2::ZERO, DVec2::X, DVec2::X).is_none());
    }

    #[test]
    fn test_edges_follow_vertex_order() {
        let tri = Triangle::new(0, 1, 2, &store()).unwrap();
        let [e1, e2, e3] = tri.edges();
        assert_eq!((e1.p1, e1.p2), (0, 2));
        assert_eq!((e2.p1, e2.p2), (2, 1));
        assert_eq!((e3.p1, e3.p2), (1, 0));
        assert!(tri.has_vertex(1));
        assert!(!tri.has_vertex(3));
    }

    #[test]
    fn test_area() {
        let tri = Triangle::new(0, 1, 2, &store()).unwrap();
        assert!((tri.area(&store()) - 0.5).abs() < 1e-12);
    }
}
