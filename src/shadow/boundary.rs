use super::edge::Edge;

/// Returns `true` if the edge at `index` of a sorted edge list is a boundary edge.
///
/// An edge is on the boundary iff neither sorted neighbour joins the same two
/// vertices. Edges shared by three or more triangles are not detected here;
/// see [`find_non_manifold`].
#[must_use]
pub fn is_boundary_edge(sorted: &[Edge], index: usize) -> bool {
    let current = &sorted[index];
    let differs_from_prev = index == 0 || !current.same_adjacency(&sorted[index - 1]);
    let differs_from_next = sorted
        .get(index + 1)
        .is_none_or(|next| !current.same_adjacency(next));
    differs_from_prev && differs_from_next
}

/// Iterates the boundary edges of a sorted edge list, in sort order.
pub fn boundary_edges(sorted: &[Edge]) -> impl Iterator<Item = &Edge> {
    (0..sorted.len())
        .filter(|&i| is_boundary_edge(sorted, i))
        .map(move |i| &sorted[i])
}

/// An undirected edge used by more than two triangles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NonManifoldEdge {
    pub v0: u32,
    pub v1: u32,
    pub count: usize,
}

/// Finds runs of three or more equal keys in a sorted edge list.
#[must_use]
pub fn find_non_manifold(sorted: &[Edge]) -> Vec<NonManifoldEdge> {
    sorted
        .chunk_by(Edge::same_adjacency)
        .filter(|run| run.len() > 2)
        .map(|run| {
            let (v0, v1) = run[0].key();
            NonManifoldEdge {
                v0,
                v1,
                count: run.len(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Point3;
    use crate::shadow::edge::{populate_edges, sort_edges};

    fn sorted_edges(positions: &[Point3], triangles: &[[u32; 3]]) -> Vec<Edge> {
        let mut edges = populate_edges(positions, triangles);
        sort_edges(&mut edges);
        edges
    }

    fn square_positions() -> Vec<Point3> {
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ]
    }

    #[test]
    fn square_has_four_boundary_edges() {
        let edges = sorted_edges(&square_positions(), &[[0, 1, 2], [0, 2, 3]]);
        let boundary: Vec<(u32, u32)> = boundary_edges(&edges).map(Edge::key).collect();
        assert_eq!(boundary, vec![(0, 1), (0, 3), (1, 2), (2, 3)]);
    }

    #[test]
    fn diagonal_is_interior() {
        let edges = sorted_edges(&square_positions(), &[[0, 1, 2], [0, 2, 3]]);
        for (i, e) in edges.iter().enumerate() {
            if e.key() == (0, 2) {
                assert!(!is_boundary_edge(&edges, i));
            }
        }
    }

    #[test]
    fn single_triangle_is_all_boundary() {
        let edges = sorted_edges(&square_positions(), &[[0, 1, 2]]);
        assert!((0..edges.len()).all(|i| is_boundary_edge(&edges, i)));
    }

    #[test]
    fn first_and_last_edges_are_checked_one_sided() {
        let edges = sorted_edges(&square_positions(), &[[0, 1, 2], [0, 2, 3]]);
        assert!(is_boundary_edge(&edges, 0));
        assert!(is_boundary_edge(&edges, edges.len() - 1));
    }

    #[test]
    fn fan_around_shared_edge_is_non_manifold() {
        let mut positions = square_positions();
        positions.push(Point3::new(0.5, -1.0, 0.0));
        // Three triangles hanging off edge (0, 2).
        let edges = sorted_edges(&positions, &[[0, 1, 2], [0, 2, 3], [2, 0, 4]]);
        let bad = find_non_manifold(&edges);
        assert_eq!(bad, vec![NonManifoldEdge { v0: 0, v1: 2, count: 3 }]);
    }

    #[test]
    fn manifold_mesh_has_no_findings() {
        let edges = sorted_edges(&square_positions(), &[[0, 1, 2], [0, 2, 3]]);
        assert!(find_non_manifold(&edges).is_empty());
    }
}
