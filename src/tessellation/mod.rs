mod tessellate_contour;

pub use tessellate_contour::TessellateContour;

use crate::math::{polygon_2d, Point2, Point3};

/// Per-vertex payload carried through tessellation.
///
/// Original contour vertices carry `(P[i], P[i])`; edge midpoint companions
/// carry the two endpoints of the edge they split, `(P[i], P[i+1])`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtrusionData {
    pub start: Point2,
    pub end: Point2,
}

impl ExtrusionData {
    /// Payload of an original contour vertex.
    #[must_use]
    pub fn vertex(p: &Point3) -> Self {
        let p = p.xy();
        Self { start: p, end: p }
    }

    /// Payload of the midpoint companion of edge `a → b`.
    #[must_use]
    pub fn edge(a: &Point3, b: &Point3) -> Self {
        Self {
            start: a.xy(),
            end: b.xy(),
        }
    }

    /// Packs the payload as `[x0, y0, x1, y1]`.
    #[must_use]
    pub fn to_array(&self) -> [f64; 4] {
        [self.start.x, self.start.y, self.end.x, self.end.y]
    }
}

/// A single input vertex of the tessellator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContourVertex {
    pub position: Point2,
    pub data: ExtrusionData,
}

/// Parameters controlling contour tessellation.
#[derive(Debug, Clone, Copy)]
pub struct TessellationParams {
    /// Interleave a midpoint companion after every contour vertex.
    pub subdivide_edges: bool,
}

impl Default for TessellationParams {
    fn default() -> Self {
        Self {
            subdivide_edges: true,
        }
    }
}

/// Triangle soup produced by tessellating a contour.
#[derive(Debug, Clone, Default)]
pub struct ContourMesh {
    /// Vertex positions (z = 0).
    pub positions: Vec<Point3>,
    /// Payload of each vertex.
    pub extrusion: Vec<ExtrusionData>,
    /// Triangle indices, counter-clockwise.
    pub indices: Vec<[u32; 3]>,
}

impl ContourMesh {
    /// Returns `true` if the mesh has no triangles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Builds the tessellator input for a contour.
///
/// For `P[0..n]` this emits `P[i]` followed by `midpoint(P[i], P[i+1])` for
/// every `i` (wrapping at the end), giving `2n` vertices. With `subdivide`
/// off only the originals are emitted.
#[must_use]
pub fn build_contour_input(points: &[Point3], subdivide: bool) -> Vec<ContourVertex> {
    let n = points.len();
    let mut input = Vec::with_capacity(if subdivide { 2 * n } else { n });
    for i in 0..n {
        let current = &points[i];
        input.push(ContourVertex {
            position: current.xy(),
            data: ExtrusionData::vertex(current),
        });
        if subdivide {
            let next = &points[(i + 1) % n];
            input.push(ContourVertex {
                position: polygon_2d::midpoint(current, next),
                data: ExtrusionData::edge(current, next),
            });
        }
    }
    input
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point3 {
        Point3::new(x, y, 0.0)
    }

    #[test]
    fn input_interleaves_midpoints() {
        let input = build_contour_input(&[p(0.0, 0.0), p(2.0, 0.0), p(0.0, 2.0)], true);
        assert_eq!(input.len(), 6);

        assert_eq!(input[0].position, Point2::new(0.0, 0.0));
        assert_eq!(input[0].data.to_array(), [0.0, 0.0, 0.0, 0.0]);

        assert_eq!(input[1].position, Point2::new(1.0, 0.0));
        assert_eq!(input[1].data.to_array(), [0.0, 0.0, 2.0, 0.0]);

        // Last companion wraps back to the first vertex.
        assert_eq!(input[5].position, Point2::new(0.0, 1.0));
        assert_eq!(input[5].data.to_array(), [0.0, 2.0, 0.0, 0.0]);
    }

    #[test]
    fn input_without_subdivision_keeps_originals() {
        let input = build_contour_input(&[p(0.0, 0.0), p(2.0, 0.0), p(0.0, 2.0)], false);
        assert_eq!(input.len(), 3);
        assert!(input.iter().all(|v| v.data.start == v.data.end));
    }

    #[test]
    fn input_drops_z() {
        let input = build_contour_input(&[Point3::new(1.0, 2.0, 9.0)], true);
        assert_eq!(input[0].position, Point2::new(1.0, 2.0));
        // Single point: companion is the point itself.
        assert_eq!(input[1].position, Point2::new(1.0, 2.0));
    }
}
