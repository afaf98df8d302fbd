use bytemuck::{Pod, Zeroable};

use crate::math::{Point3, Vector4};
use crate::tessellation::ExtrusionData;

/// GPU vertex layout of a shadow mesh.
///
/// `extrusion` holds the packed payload `[x0, y0, x1, y1]`, read by the
/// shadow shader to derive the projection direction.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct ShadowVertex {
    pub position: [f32; 3],
    pub tangent: [f32; 4],
    pub extrusion: [f32; 4],
}

impl ShadowVertex {
    /// Size of one vertex in bytes.
    pub const STRIDE: usize = std::mem::size_of::<Self>();

    /// Packs one mesh vertex, narrowing every component to `f32`.
    #[allow(clippy::cast_possible_truncation)]
    #[must_use]
    pub fn new(position: &Point3, tangent: &Vector4, extrusion: &ExtrusionData) -> Self {
        Self {
            position: [position.x as f32, position.y as f32, position.z as f32],
            tangent: [
                tangent.x as f32,
                tangent.y as f32,
                tangent.z as f32,
                tangent.w as f32,
            ],
            extrusion: extrusion.to_array().map(|v| v as f32),
        }
    }
}
