use tracing::{debug, warn};

use crate::error::{MeshError, Result};
use crate::math::{Aabb, Point3, Vector4};
use crate::tessellation::{ContourMesh, TessellateContour, TessellationParams};

use super::boundary::find_non_manifold;
use super::edge::{populate_edges, sort_edges};
use super::extrusion::append_extrusion;
use super::{ManifoldCheck, ShadowMesh, ShadowMeshParams};

/// Builds the shadow mesh of a closed contour.
pub struct BuildShadowMesh<'a> {
    contour: &'a [Point3],
    params: ShadowMeshParams,
}

impl<'a> BuildShadowMesh<'a> {
    /// Creates a new `BuildShadowMesh` operation.
    #[must_use]
    pub fn new(contour: &'a [Point3], params: ShadowMeshParams) -> Self {
        Self { contour, params }
    }

    /// Executes the build: tessellate, find the silhouette, append the skirt.
    ///
    /// Contours with fewer than 3 points produce an empty mesh with zero bounds.
    ///
    /// # Errors
    ///
    /// Returns an error if the contour contains non-finite coordinates, or if
    /// [`ManifoldCheck::Strict`] is set and an edge is shared by more than two
    /// triangles.
    pub fn execute(&self) -> Result<ShadowMesh> {
        let tessellation = TessellationParams {
            subdivide_edges: self.params.subdivide_edges,
        };
        let interior = TessellateContour::new(self.contour, tessellation).execute()?;
        extrude_contour_mesh(interior, &self.params)
    }
}

/// Appends the extrusion skirt to an already triangulated contour mesh.
///
/// # Errors
///
/// Returns [`MeshError::PayloadMismatch`] if positions and payloads differ in
/// length, [`MeshError::IndexOutOfRange`] if a triangle references a missing
/// vertex, or [`MeshError::NonManifoldEdge`] under [`ManifoldCheck::Strict`].
pub fn extrude_contour_mesh(interior: ContourMesh, params: &ShadowMeshParams) -> Result<ShadowMesh> {
    let vertex_count = interior.positions.len();
    if interior.extrusion.len() != vertex_count {
        return Err(MeshError::PayloadMismatch {
            positions: vertex_count,
            payloads: interior.extrusion.len(),
        }
        .into());
    }
    if let Some(&index) = interior
        .indices
        .iter()
        .flatten()
        .find(|&&i| i as usize >= vertex_count)
    {
        return Err(MeshError::IndexOutOfRange {
            index,
            vertex_count,
        }
        .into());
    }

    let source_triangle_count = interior.indices.len();
    let mut mesh = ShadowMesh {
        tangents: vec![Vector4::zeros(); vertex_count],
        positions: interior.positions,
        extrusion: interior.extrusion,
        indices: interior.indices,
        bounds: Aabb::default(),
        source_triangle_count,
    };

    let mut edges = populate_edges(&mesh.positions, &mesh.indices);
    sort_edges(&mut edges);

    for bad in find_non_manifold(&edges) {
        match params.manifold_check {
            ManifoldCheck::Strict => {
                return Err(MeshError::NonManifoldEdge {
                    v0: bad.v0,
                    v1: bad.v1,
                    count: bad.count,
                }
                .into());
            }
            ManifoldCheck::Permissive => {
                warn!(v0 = bad.v0, v1 = bad.v1, count = bad.count, "non-manifold edge in shadow mesh");
            }
        }
    }

    let skirt = append_extrusion(&mut mesh, &edges, params.corner_tangents);
    mesh.bounds = Aabb::from_points(&mesh.positions);

    debug!(
        vertices = mesh.positions.len(),
        triangles = mesh.indices.len(),
        skirt,
        "built shadow mesh"
    );

    Ok(mesh)
}
