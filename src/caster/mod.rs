mod light;
mod store;

pub use light::{LayerMask, Light2D};
pub use store::{ShadowCasterId, ShadowCasterStore};

use tracing::debug;

use crate::error::Result;
use crate::math::{Aabb, BoundingSphere, Point3};
use crate::shadow::{BuildShadowMesh, ShadowMesh, ShadowMeshParams};

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0100_0000_01b3;

/// Stable content hash of an ordered point list.
///
/// Order matters: a rotated or reversed contour hashes differently.
#[must_use]
pub fn shape_path_hash(points: &[Point3]) -> u64 {
    points.iter().fold(FNV_OFFSET, |hash, p| {
        [p.x, p.y, p.z]
            .iter()
            .fold(hash, |h, c| h.wrapping_mul(FNV_PRIME) ^ c.to_bits())
    })
}

/// Stores `hash` into `previous` and returns `true` if it differs from the stored value.
pub fn check_for_change(hash: u64, previous: &mut Option<u64>) -> bool {
    if *previous == Some(hash) {
        return false;
    }
    *previous = Some(hash);
    true
}

/// An entity whose contour blocks light.
///
/// The caster owns its shadow mesh and replaces it wholesale on
/// [`update`](Self::update) whenever the contour changed or the mesh was
/// invalidated.
#[derive(Debug, Clone)]
pub struct ShadowCaster {
    shape_path: Vec<Point3>,
    position: Point3,
    casts_shadows: bool,
    self_shadows: bool,
    layers: LayerMask,
    previous_path_hash: Option<u64>,
    force_rebuild: bool,
    mesh: ShadowMesh,
}

impl Default for ShadowCaster {
    /// A caster shaped as the unit square centred on its origin.
    fn default() -> Self {
        Self::new(vec![
            Point3::new(-0.5, -0.5, 0.0),
            Point3::new(0.5, -0.5, 0.0),
            Point3::new(0.5, 0.5, 0.0),
            Point3::new(-0.5, 0.5, 0.0),
        ])
    }
}

impl ShadowCaster {
    /// Creates a caster from a local-space contour. The mesh is built on the
    /// first [`update`](Self::update).
    #[must_use]
    pub fn new(shape_path: Vec<Point3>) -> Self {
        Self {
            shape_path,
            position: Point3::origin(),
            casts_shadows: true,
            self_shadows: false,
            layers: LayerMask::All,
            previous_path_hash: None,
            force_rebuild: false,
            mesh: ShadowMesh::default(),
        }
    }

    #[must_use]
    pub fn shape_path(&self) -> &[Point3] {
        &self.shape_path
    }

    /// Replaces the contour. Takes effect on the next update.
    pub fn set_shape_path(&mut self, shape_path: Vec<Point3>) {
        self.shape_path = shape_path;
    }

    #[must_use]
    pub fn position(&self) -> Point3 {
        self.position
    }

    pub fn set_position(&mut self, position: Point3) {
        self.position = position;
    }

    #[must_use]
    pub fn casts_shadows(&self) -> bool {
        self.casts_shadows
    }

    pub fn set_casts_shadows(&mut self, casts_shadows: bool) {
        self.casts_shadows = casts_shadows;
    }

    /// Whether the caster shadows its own interior.
    #[must_use]
    pub fn self_shadows(&self) -> bool {
        self.self_shadows
    }

    pub fn set_self_shadows(&mut self, self_shadows: bool) {
        self.self_shadows = self_shadows;
    }

    #[must_use]
    pub fn layers(&self) -> &LayerMask {
        &self.layers
    }

    pub fn set_layers(&mut self, layers: LayerMask) {
        self.layers = layers;
    }

    /// Returns `true` if this caster casts shadows onto `layer`.
    #[must_use]
    pub fn is_shadowed_layer(&self, layer: i32) -> bool {
        self.layers.contains(layer)
    }

    /// Forces a rebuild on the next update even if the contour is unchanged.
    pub fn invalidate(&mut self) {
        self.force_rebuild = true;
    }

    /// Returns `true` if the next update will rebuild the mesh.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        let mut previous = self.previous_path_hash;
        self.force_rebuild || check_for_change(shape_path_hash(&self.shape_path), &mut previous)
    }

    /// Rebuilds the mesh if needed. Returns `true` if it was rebuilt.
    ///
    /// # Errors
    ///
    /// Returns an error if mesh generation fails; the previous mesh and hash are kept.
    pub fn update(&mut self, params: &ShadowMeshParams) -> Result<bool> {
        let hash = shape_path_hash(&self.shape_path);
        let mut previous = self.previous_path_hash;
        if !check_for_change(hash, &mut previous) && !self.force_rebuild {
            return Ok(false);
        }

        self.mesh = BuildShadowMesh::new(&self.shape_path, *params).execute()?;
        self.previous_path_hash = previous;
        self.force_rebuild = false;
        debug!(hash, triangles = self.mesh.triangle_count(), "rebuilt shadow caster mesh");
        Ok(true)
    }

    #[must_use]
    pub fn mesh(&self) -> &ShadowMesh {
        &self.mesh
    }

    /// Triangles to draw into the shadow buffer.
    ///
    /// A caster that does not shadow itself only contributes its extrusion
    /// skirt, which leaves its own interior lit.
    #[must_use]
    pub fn shadow_triangles(&self) -> &[[u32; 3]] {
        if self.self_shadows {
            &self.mesh.indices
        } else {
            self.mesh.extrusion_triangles()
        }
    }

    /// Bounds of the mesh in local space.
    #[must_use]
    pub fn local_bounds(&self) -> Aabb {
        self.mesh.bounds
    }

    /// Bounds of the mesh in world space.
    #[must_use]
    pub fn world_bounds(&self) -> Aabb {
        self.mesh.bounds.translated(&self.position.coords)
    }

    #[must_use]
    pub fn bounding_sphere(&self) -> BoundingSphere {
        BoundingSphere::from_aabb(&self.world_bounds())
    }

    /// Returns `true` if the light's range reaches this caster.
    #[must_use]
    pub fn is_lit(&self, light: &Light2D) -> bool {
        self.bounding_sphere().intersects(&light.bounding_sphere())
    }
}
