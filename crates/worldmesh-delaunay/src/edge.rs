//! Undirected mesh edges.

use std::hash::{Hash, Hasher};

use crate::triangle::VertexId;

/// Unordered pair of vertex indices.
///
/// `Edge::new(a, b) == Edge::new(b, a)`; the hash agrees with that.
#[derive(Debug, Clone, Copy, Eq)]
pub struct Edge {
    pub p1: VertexId,
    pub p2: VertexId,
}

impl Edge {
    pub fn new(p1: VertexId, p2: VertexId) -> Self {
        Self { p1, p2 }
    }

    /// Endpoints with the smaller index first.
    pub fn key(&self) -> (VertexId, VertexId) {
        if self.p1 <= self.p2 {
            (self.p1, self.p2)
        } else {
            (self.p2, self.p1)
        }
    }

    pub fn contains(&self, v: VertexId) -> bool {
        self.p1 == v || self.p2 == v
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Hash for Edge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}
