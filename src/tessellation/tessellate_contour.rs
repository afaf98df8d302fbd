use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use spade::handles::{FixedFaceHandle, FixedVertexHandle, InnerTag};
use spade::{
    ConstrainedDelaunayTriangulation, InsertionError, Point2 as SpadePoint2, Triangulation,
};
use tracing::{debug, warn};

use crate::error::{GeometryError, Result, TessellationError};
use crate::math::Point3;

use super::{build_contour_input, ContourMesh, ContourVertex, ExtrusionData, TessellationParams};

type Cdt = ConstrainedDelaunayTriangulation<SpadePoint2<f64>>;

/// Tessellates a closed contour into a triangle mesh using the even-odd rule.
pub struct TessellateContour<'a> {
    points: &'a [Point3],
    params: TessellationParams,
}

impl<'a> TessellateContour<'a> {
    /// Creates a new `TessellateContour` operation.
    #[must_use]
    pub fn new(points: &'a [Point3], params: TessellationParams) -> Self {
        Self { points, params }
    }

    /// Executes the tessellation, returning the interior triangles.
    ///
    /// Contours with fewer than 3 points produce an empty mesh.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::NonFinite`] if a coordinate is NaN or infinite,
    /// or [`TessellationError::InvalidInput`] if the triangulator rejects a point.
    #[allow(clippy::cast_possible_truncation)]
    pub fn execute(&self) -> Result<ContourMesh> {
        if self.points.len() < 3 {
            return Ok(ContourMesh::default());
        }
        if let Some(index) = self
            .points
            .iter()
            .position(|p| !(p.x.is_finite() && p.y.is_finite()))
        {
            return Err(GeometryError::NonFinite { index }.into());
        }

        let input = build_contour_input(self.points, self.params.subdivide_edges);

        let mut cdt = Cdt::new();
        let payloads = insert_contour(&mut cdt, &input)?;
        let interior_faces = even_odd_faces(&cdt);

        let mut mesh = ContourMesh::default();
        let mut vertex_map: HashMap<usize, u32> = HashMap::new();

        for face_handle in cdt.inner_faces() {
            if !interior_faces.contains(&face_handle.fix().index()) {
                continue;
            }

            let mut tri_indices = [0u32; 3];
            for (i, vh) in face_handle.vertices().iter().enumerate() {
                let idx = vh.fix().index();
                let mesh_idx = if let Some(&existing) = vertex_map.get(&idx) {
                    existing
                } else {
                    let pos = vh.position();
                    let p3 = Point3::new(pos.x, pos.y, 0.0);
                    let new_idx = mesh.positions.len() as u32;
                    mesh.positions.push(p3);
                    mesh.extrusion.push(
                        payloads
                            .get(&idx)
                            .copied()
                            .unwrap_or_else(|| ExtrusionData::vertex(&p3)),
                    );
                    vertex_map.insert(idx, new_idx);
                    new_idx
                };
                tri_indices[i] = mesh_idx;
            }

            mesh.indices.push(tri_indices);
        }

        debug!(
            contour = self.points.len(),
            input = input.len(),
            vertices = mesh.positions.len(),
            triangles = mesh.indices.len(),
            "tessellated contour"
        );

        Ok(mesh)
    }
}

/// Inserts the contour as a closed loop of constraint edges.
///
/// Returns the payload of every inserted vertex keyed by its triangulation
/// index. A position inserted twice keeps the payload of its first insertion.
fn insert_contour(cdt: &mut Cdt, input: &[ContourVertex]) -> Result<HashMap<usize, ExtrusionData>> {
    let mut payloads = HashMap::with_capacity(input.len());
    let mut handles: Vec<FixedVertexHandle> = Vec::with_capacity(input.len());
    for v in input {
        let h = cdt
            .insert(SpadePoint2::new(v.position.x, v.position.y))
            .map_err(|e: InsertionError| TessellationError::InvalidInput(format!("CDT insert: {e}")))?;
        payloads.entry(h.index()).or_insert(v.data);
        handles.push(h);
    }

    for i in 0..handles.len() {
        let from = handles[i];
        let to = handles[(i + 1) % handles.len()];
        if from == to || cdt.exists_constraint(from, to) {
            continue;
        }
        if cdt.can_add_constraint(from, to) {
            cdt.add_constraint(from, to);
        } else {
            // Self-intersecting contour: the crossing segment is dropped.
            warn!(segment = i, "contour segment crosses an earlier segment, skipping");
        }
    }

    Ok(payloads)
}

/// Marks the inner faces that lie inside the contour under the even-odd rule.
///
/// Parity flips every time a walk from the unbounded face crosses a
/// constraint edge; faces reached with odd parity are filled.
fn even_odd_faces(cdt: &Cdt) -> HashSet<usize> {
    let mut parity: HashMap<usize, bool> = HashMap::new();
    let mut stack: Vec<(FixedFaceHandle<InnerTag>, bool)> = Vec::new();

    // Hull edges seen from the outside lead into the first faces.
    let outer = cdt.outer_face().fix();
    let hull = cdt
        .directed_edges()
        .filter(|edge| edge.face().fix() == outer);
    for edge in hull {
        if let Some(face) = edge.rev().face().as_inner() {
            stack.push((face.fix(), cdt.is_constraint_edge(edge.as_undirected().fix())));
        }
    }

    while let Some((face, inside)) = stack.pop() {
        let Entry::Vacant(slot) = parity.entry(face.index()) else {
            continue;
        };
        slot.insert(inside);
        for edge in cdt.face(face).adjacent_edges() {
            if let Some(next) = edge.rev().face().as_inner() {
                if !parity.contains_key(&next.fix().index()) {
                    let crossed = cdt.is_constraint_edge(edge.as_undirected().fix());
                    stack.push((next.fix(), inside ^ crossed));
                }
            }
        }
    }

    parity
        .into_iter()
        .filter_map(|(index, inside)| inside.then_some(index))
        .collect()
}
