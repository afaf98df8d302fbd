use crate::math::{Vector3, TOLERANCE};

use super::boundary::boundary_edges;
use super::edge::Edge;
use super::{CornerTangents, ShadowMesh};

/// Appends one extrusion triangle per boundary edge of `sorted`.
///
/// For a boundary edge `v0 → v1` with tangent `t`, `v1` receives the tangent
/// `-t`, a copy of `v0` carrying `-t` is appended, and the triangle
/// `(v0, copy, v1)` is added. Returns the number of triangles appended, which
/// is also the number of vertices appended.
#[allow(clippy::cast_possible_truncation)]
pub fn append_extrusion(mesh: &mut ShadowMesh, sorted: &[Edge], corners: CornerTangents) -> usize {
    let mut blended = match corners {
        CornerTangents::LastWriter => Vec::new(),
        CornerTangents::Blend => vec![Vector3::zeros(); mesh.positions.len()],
    };

    let mut added = 0;
    for edge in boundary_edges(sorted) {
        let tangent = -edge.tangent;
        let v0 = edge.v0 as usize;
        let v1 = edge.v1 as usize;

        match corners {
            CornerTangents::LastWriter => mesh.tangents[v1] = tangent.push(0.0),
            CornerTangents::Blend => blended[v1] += tangent,
        }

        let copy = mesh.positions.len() as u32;
        mesh.positions.push(mesh.positions[v0]);
        mesh.extrusion.push(mesh.extrusion[v0]);
        mesh.tangents.push(tangent.push(0.0));
        mesh.indices.push([edge.v0, copy, edge.v1]);
        added += 1;
    }

    for (i, sum) in blended.iter().enumerate() {
        if let Some(dir) = sum.try_normalize(TOLERANCE) {
            mesh.tangents[i] = dir.push(0.0);
        }
    }

    added
}
