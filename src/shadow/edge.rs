use crate::math::{polygon_2d, Point3, Vector3};

/// A directed triangle edge carrying its extrusion tangent.
///
/// Ordering and adjacency ignore direction: `(i, j)` and `(j, i)` share the
/// key `(min, max)` so the two half-edges of an interior edge sort next to
/// each other.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub v0: u32,
    pub v1: u32,
    pub tangent: Vector3,
    reversed: bool,
}

impl Edge {
    /// Creates the directed edge `v0 → v1`, computing its tangent from `positions`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range for `positions`.
    #[must_use]
    pub fn new(v0: u32, v1: u32, positions: &[Point3]) -> Self {
        let a = &positions[v0 as usize];
        let b = &positions[v1 as usize];
        Self {
            v0,
            v1,
            tangent: polygon_2d::edge_tangent(a, b),
            reversed: v0 > v1,
        }
    }

    /// Returns `true` if `v0 > v1`.
    #[must_use]
    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    /// Direction-independent sort key.
    #[must_use]
    pub fn key(&self) -> (u32, u32) {
        if self.reversed {
            (self.v1, self.v0)
        } else {
            (self.v0, self.v1)
        }
    }

    /// Returns `true` if both edges join the same two vertices.
    #[must_use]
    pub fn same_adjacency(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

/// Emits the three directed edges `(a→b), (b→c), (c→a)` of every triangle.
#[must_use]
pub fn populate_edges(positions: &[Point3], triangles: &[[u32; 3]]) -> Vec<Edge> {
    let mut edges = Vec::with_capacity(triangles.len() * 3);
    for &[a, b, c] in triangles {
        edges.push(Edge::new(a, b, positions));
        edges.push(Edge::new(b, c, positions));
        edges.push(Edge::new(c, a, positions));
    }
    edges
}

/// Sorts edges so that half-edges joining the same vertices become adjacent.
pub fn sort_edges(edges: &mut [Edge]) {
    edges.sort_unstable_by_key(Edge::key);
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square() -> (Vec<Point3>, Vec<[u32; 3]>) {
        let positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        (positions, vec![[0, 1, 2], [0, 2, 3]])
    }

    #[test]
    fn key_ignores_direction() {
        let (positions, _) = square();
        let forward = Edge::new(0, 2, &positions);
        let backward = Edge::new(2, 0, &positions);
        assert!(!forward.is_reversed());
        assert!(backward.is_reversed());
        assert_eq!(forward.key(), (0, 2));
        assert!(forward.same_adjacency(&backward));
        // Opposite halves carry opposite tangents.
        assert_relative_eq!(forward.tangent, -backward.tangent, epsilon = 1e-12);
    }

    #[test]
    fn three_edges_per_triangle_in_winding_order() {
        let (positions, triangles) = square();
        let edges = populate_edges(&positions, &triangles);
        assert_eq!(edges.len(), 6);
        let pairs: Vec<(u32, u32)> = edges.iter().map(|e| (e.v0, e.v1)).collect();
        assert_eq!(pairs, vec![(0, 1), (1, 2), (2, 0), (0, 2), (2, 3), (3, 0)]);
    }

    #[test]
    fn sort_makes_shared_edge_adjacent() {
        let (positions, triangles) = square();
        let mut edges = populate_edges(&positions, &triangles);
        sort_edges(&mut edges);
        let keys: Vec<(u32, u32)> = edges.iter().map(Edge::key).collect();
        assert_eq!(keys, vec![(0, 1), (0, 2), (0, 2), (0, 3), (1, 2), (2, 3)]);
    }

    #[test]
    fn tangents_are_unit_length() {
        let positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(3.0, 0.5, 0.0),
            Point3::new(-1.0, 7.0, 0.0),
        ];
        for e in populate_edges(&positions, &[[0, 1, 2]]) {
            assert_relative_eq!(e.tangent.norm(), 1.0, epsilon = 1e-12);
            assert_relative_eq!(e.tangent.z, 0.0);
        }
    }
}
