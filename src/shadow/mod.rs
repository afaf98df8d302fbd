pub mod boundary;
mod build;
pub mod edge;
mod extrusion;
mod projection;
mod vertex;

pub use build::{extrude_contour_mesh, BuildShadowMesh};
pub use projection::ProjectShadow;
pub use vertex::ShadowVertex;

use crate::math::{Aabb, BoundingSphere, Point3, Vector4};
use crate::tessellation::ExtrusionData;

/// How tangents are assigned to an original vertex touched by several boundary edges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CornerTangents {
    /// The last boundary edge processed in sort order wins.
    #[default]
    LastWriter,
    /// All incoming boundary tangents are summed and normalized.
    Blend,
}

/// What to do when an edge is shared by more than two triangles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ManifoldCheck {
    /// Log a warning and build the mesh anyway.
    #[default]
    Permissive,
    /// Fail with [`MeshError::NonManifoldEdge`](crate::error::MeshError::NonManifoldEdge).
    Strict,
}

/// Parameters controlling shadow mesh generation.
#[derive(Debug, Clone, Copy)]
pub struct ShadowMeshParams {
    /// Interleave edge midpoints into the contour before tessellating.
    pub subdivide_edges: bool,
    /// Tangent assignment at vertices shared by several silhouette edges.
    pub corner_tangents: CornerTangents,
    /// Handling of edges shared by more than two triangles.
    pub manifold_check: ManifoldCheck,
}

impl Default for ShadowMeshParams {
    fn default() -> Self {
        Self {
            subdivide_edges: true,
            corner_tangents: CornerTangents::LastWriter,
            manifold_check: ManifoldCheck::Permissive,
        }
    }
}

/// A shadow-caster mesh: the tessellated interior plus the extrusion skirt.
///
/// The first [`source_triangle_count`](Self::source_triangle_count) triangles
/// cover the contour interior; every following triangle is an extrusion
/// triangle `(v0, copy, v1)` whose middle vertex was appended for it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShadowMesh {
    /// Vertex positions (z = 0).
    pub positions: Vec<Point3>,
    /// Per-vertex extrusion direction in xyz, `w = 0`. Zero for interior vertices.
    pub tangents: Vec<Vector4>,
    /// Per-vertex payload forwarded from tessellation.
    pub extrusion: Vec<ExtrusionData>,
    /// Triangle indices.
    pub indices: Vec<[u32; 3]>,
    /// Bounds of all positions.
    pub bounds: Aabb,
    /// Number of leading triangles produced by tessellation.
    source_triangle_count: usize,
}

impl ShadowMesh {
    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles, including extrusion triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }

    /// Number of triangles covering the contour interior.
    #[must_use]
    pub fn source_triangle_count(&self) -> usize {
        self.source_triangle_count.min(self.indices.len())
    }

    /// Returns `true` if the mesh has no triangles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Triangles covering the contour interior.
    #[must_use]
    pub fn source_triangles(&self) -> &[[u32; 3]] {
        self.split_triangles().0
    }

    /// Triangles forming the extrusion skirt.
    #[must_use]
    pub fn extrusion_triangles(&self) -> &[[u32; 3]] {
        self.split_triangles().1
    }

    /// Splits the index buffer into interior and skirt triangles. If the
    /// buffer was truncated below the interior count, everything is interior.
    fn split_triangles(&self) -> (&[[u32; 3]], &[[u32; 3]]) {
        self.indices
            .split_at_checked(self.source_triangle_count)
            .unwrap_or((&self.indices, &[]))
    }

    /// Bounding sphere of the mesh bounds, for light culling.
    #[must_use]
    pub fn bounding_sphere(&self) -> BoundingSphere {
        BoundingSphere::from_aabb(&self.bounds)
    }

    /// Interleaved single-precision vertices ready for upload.
    #[must_use]
    pub fn vertices(&self) -> Vec<ShadowVertex> {
        self.positions
            .iter()
            .zip(&self.tangents)
            .zip(&self.extrusion)
            .map(|((p, t), e)| ShadowVertex::new(p, t, e))
            .collect()
    }

    /// Triangle indices flattened into a single index buffer.
    #[must_use]
    pub fn flat_indices(&self) -> Vec<u32> {
        self.indices.iter().flatten().copied().collect()
    }
}
