//! Finished triangulation output.

use std::collections::HashSet;

use worldmesh_core::types::Point;

use crate::edge::Edge;
use crate::triangle::{Triangle, VertexId};

/// Triangles over an owned vertex store.
///
/// `points()` is the caller's input in its original order; triangle vertex
/// indices point into it.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    points: Vec<Point>,
    triangles: Vec<Triangle>,
}

impl Mesh {
    pub(crate) fn new(points: Vec<Point>, triangles: Vec<Triangle>) -> Self {
        Self { points, triangles }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Number of triangles.
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Input point at store index `v`, `None` past the end.
    pub fn vertex(&self, v: VertexId) -> Option<&Point> {
        self.points.get(v)
    }

    pub fn triangle_points(&self, t: &Triangle) -> [Point; 3] {
        t.vertices().map(|v| self.points[v])
    }

    /// Caller-assigned ids of the triangle's vertices, in `A, B, C` order.
    pub fn triangle_ids(&self, t: &Triangle) -> [u32; 3] {
        t.vertices().map(|v| self.points[v].id)
    }

    /// Every edge of the mesh once, in order of first appearance.
    pub fn unique_edges(&self) -> Vec<Edge> {
        let mut seen = HashSet::with_capacity(self.triangles.len() * 2);
        self.triangles
            .iter()
            .flat_map(|t| t.edges())
            .filter(|e| seen.insert(*e))
            .collect()
    }

    /// Pairs `(triangle index, vertex)` where an input point lies strictly
    /// inside a triangle's circumcircle.
    ///
    /// Points on a circle are not counted, including points that miss it
    /// only by rounding (within `CIRCUMCIRCLE_TOLERANCE` of the radius), so
    /// regular lattices pass.
    pub fn delaunay_violations(&self) -> Vec<(usize, VertexId)> {
        let mut violations = Vec::new();
        for (ti, t) in self.triangles.iter().enumerate() {
            for (v, p) in self.points.iter().enumerate() {
                if t.has_vertex(v) {
                    continue;
                }
                if t.circumcircle().strictly_contains(p.position()) {
                    violations.push((ti, v));
                }
            }
        }
        violations
    }

    pub fn is_delaunay(&self) -> bool {
        self.delaunay_violations().is_empty()
    }

    /// Sum of triangle areas.
    pub fn area(&self) -> f64 {
        self.triangles.iter().map(|t| t.area(&self.points)).sum()
    }
}
