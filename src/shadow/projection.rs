use crate::math::{Point2, Point3, Vector3, TOLERANCE};

use super::ShadowMesh;

/// Projects a shadow mesh away from a point light on the CPU.
///
/// Mirrors the vertex stage of the shadow shader: a vertex whose tangent
/// faces the light is pushed `radius` units away from it, along the averaged
/// light-to-payload directions so both halves of a split edge move together.
/// Vertices with a zero tangent never move.
pub struct ProjectShadow {
    light: Point3,
    radius: f64,
}

impl ProjectShadow {
    /// Creates a new `ProjectShadow` operation.
    #[must_use]
    pub fn new(light: Point3, radius: f64) -> Self {
        Self { light, radius }
    }

    /// Returns the displaced position of every vertex of `mesh`.
    #[must_use]
    pub fn execute(&self, mesh: &ShadowMesh) -> Vec<Point3> {
        mesh.positions
            .iter()
            .zip(&mesh.tangents)
            .zip(&mesh.extrusion)
            .map(|((pos, tangent), data)| {
                let to_light = Vector3::new(self.light.x - pos.x, self.light.y - pos.y, 0.0);
                let Some(to_light) = to_light.try_normalize(TOLERANCE) else {
                    return *pos;
                };
                if to_light.dot(&tangent.xyz()) <= 0.0 {
                    return *pos;
                }
                let dir0 = self.away_from_light(&data.start);
                let dir1 = self.away_from_light(&data.end);
                let shadow_dir = (dir0 + dir1).try_normalize(TOLERANCE).unwrap_or(-to_light);
                pos + shadow_dir * self.radius
            })
            .collect()
    }

    fn away_from_light(&self, p: &Point2) -> Vector3 {
        Vector3::new(p.x - self.light.x, p.y - self.light.y, 0.0)
            .try_normalize(TOLERANCE)
            .unwrap_or_else(Vector3::zeros)
    }
}
