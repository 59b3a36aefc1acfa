//! Partition of the working mesh around a newly inserted point.

use std::collections::HashMap;

use worldmesh_core::types::Point;

use crate::edge::Edge;
use crate::triangle::Triangle;

/// Result of classifying the mesh against one point.
#[derive(Debug, Clone, Default)]
pub struct Cavity {
    /// Triangles whose circumcircle excludes the point.
    pub kept: Vec<Triangle>,
    /// Triangles whose circumcircle contains the point (inclusive).
    pub removed: Vec<Triangle>,
    /// Edges of the hole left by `removed`, in discovery order.
    pub boundary: Vec<Edge>,
}

/// Split `triangles` into kept and removed sets for point `p`, and find the
/// boundary of the hole.
///
/// An edge is on the boundary iff it occurs exactly once among the edges of
/// the removed triangles; edges shared by two removed triangles are interior.
pub fn classify(triangles: &[Triangle], p: &Point) -> Cavity {
    let (removed, kept): (Vec<Triangle>, Vec<Triangle>) =
        triangles.iter().partition(|t| t.is_in_circumcircle(p));

    let edges: Vec<Edge> = removed.iter().flat_map(|t| t.edges()).collect();

    let mut counts: HashMap<Edge, usize> = HashMap::with_capacity(edges.len());
    for &edge in &edges {
        *counts.entry(edge).or_insert(0) += 1;
    }

    let boundary = edges
        .into_iter()
        .filter(|e| counts.get(e).copied() == Some(1))
        .collect();

    Cavity {
        kept,
        removed,
        boundary,
    }
}
