use rayon::prelude::*;
use slotmap::SlotMap;
use tracing::debug;

use crate::error::{CasterError, Result};
use crate::shadow::ShadowMeshParams;

use super::{Light2D, ShadowCaster};

slotmap::new_key_type! {
    /// Unique identifier for a shadow caster.
    pub struct ShadowCasterId;
}

/// Arena that owns every shadow caster of a scene.
///
/// Casters share no state, so dirty meshes are rebuilt in parallel.
#[derive(Debug, Default)]
pub struct ShadowCasterStore {
    casters: SlotMap<ShadowCasterId, ShadowCaster>,
}

impl ShadowCasterStore {
    /// Creates a new, empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a caster and returns its ID.
    pub fn add(&mut self, caster: ShadowCaster) -> ShadowCasterId {
        self.casters.insert(caster)
    }

    /// Removes a caster, returning it.
    ///
    /// # Errors
    ///
    /// Returns [`CasterError::NotFound`] if the ID is stale.
    pub fn remove(&mut self, id: ShadowCasterId) -> Result<ShadowCaster> {
        self.casters
            .remove(id)
            .ok_or_else(|| CasterError::NotFound.into())
    }

    /// Returns a reference to the caster, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`CasterError::NotFound`] if the ID is stale.
    pub fn caster(&self, id: ShadowCasterId) -> std::result::Result<&ShadowCaster, CasterError> {
        self.casters.get(id).ok_or(CasterError::NotFound)
    }

    /// Returns a mutable reference to the caster, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`CasterError::NotFound`] if the ID is stale.
    pub fn caster_mut(&mut self, id: ShadowCasterId) -> std::result::Result<&mut ShadowCaster, CasterError> {
        self.casters.get_mut(id).ok_or(CasterError::NotFound)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.casters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.casters.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ShadowCasterId, &ShadowCaster)> {
        self.casters.iter()
    }

    /// Rebuilds the mesh of every dirty caster. Returns how many were rebuilt.
    ///
    /// # Errors
    ///
    /// Returns the first mesh generation error. Casters that built
    /// successfully keep their new meshes.
    pub fn update_all(&mut self, params: &ShadowMeshParams) -> Result<usize> {
        let mut dirty: Vec<&mut ShadowCaster> =
            self.casters.values_mut().filter(|c| c.is_dirty()).collect();
        let rebuilt = dirty
            .par_iter_mut()
            .map(|caster| caster.update(params))
            .collect::<Result<Vec<bool>>>()?
            .into_iter()
            .filter(|&built| built)
            .count();
        debug!(rebuilt, total = self.casters.len(), "updated shadow casters");
        Ok(rebuilt)
    }

    /// IDs of casters that shadow `layer` and lie within reach of `light`.
    #[must_use]
    pub fn casters_for_light(&self, light: &Light2D, layer: i32) -> Vec<ShadowCasterId> {
        if !light.target_layers.contains(layer) {
            return Vec::new();
        }
        self.casters
            .iter()
            .filter(|(_, c)| c.casts_shadows() && c.is_shadowed_layer(layer) && c.is_lit(light))
            .map(|(id, _)| id)
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::caster::LayerMask;
    use crate::error::UmbraError;
    use crate::math::Point3;

    fn p(x: f64, y: f64) -> Point3 {
        Point3::new(x, y, 0.0)
    }

    fn caster_at(x: f64, y: f64) -> ShadowCaster {
        let mut caster = ShadowCaster::default();
        caster.set_position(p(x, y));
        caster
    }

    #[test]
    fn add_get_remove() {
        let mut store = ShadowCasterStore::new();
        let id = store.add(ShadowCaster::default());
        assert_eq!(store.len(), 1);
        assert!(store.caster(id).is_ok());
        store.remove(id).unwrap();
        assert!(store.is_empty());
        assert!(matches!(store.caster(id), Err(CasterError::NotFound)));
        assert!(matches!(
            store.remove(id),
            Err(UmbraError::Caster(CasterError::NotFound))
        ));
    }

    #[test]
    fn update_all_rebuilds_only_dirty_casters() {
        let params = ShadowMeshParams::default();
        let mut store = ShadowCasterStore::new();
        let a = store.add(caster_at(0.0, 0.0));
        store.add(caster_at(5.0, 0.0));
        store.add(caster_at(-5.0, 0.0));

        assert_eq!(store.update_all(&params).unwrap(), 3);
        assert_eq!(store.update_all(&params).unwrap(), 0);

        store.caster_mut(a).unwrap().invalidate();
        assert_eq!(store.update_all(&params).unwrap(), 1);
        assert!(store.iter().all(|(_, c)| !c.mesh().is_empty()));
    }

    #[test]
    fn update_all_reports_errors() {
        let params = ShadowMeshParams::default();
        let mut store = ShadowCasterStore::new();
        store.add(ShadowCaster::new(vec![p(0.0, 0.0), p(f64::INFINITY, 0.0), p(0.0, 1.0)]));
        assert!(store.update_all(&params).is_err());
    }

    #[test]
    fn light_culling_by_distance_and_layer() {
        let params = ShadowMeshParams::default();
        let mut store = ShadowCasterStore::new();
        let near = store.add(caster_at(1.0, 0.0));
        let far = store.add(caster_at(50.0, 0.0));
        let other_layer = store.add(caster_at(0.0, 1.0));
        let disabled = store.add(caster_at(0.0, -1.0));
        store
            .caster_mut(other_layer)
            .unwrap()
            .set_layers(LayerMask::Only(vec![2]));
        store.caster_mut(disabled).unwrap().set_casts_shadows(false);
        store.update_all(&params).unwrap();

        let light = Light2D::new(p(0.0, 0.0), 3.0);
        let lit = store.casters_for_light(&light, 0);
        assert!(lit.contains(&near));
        assert!(!lit.contains(&far));
        assert!(!lit.contains(&other_layer));
        assert!(!lit.contains(&disabled));

        assert!(store.casters_for_light(&light, 2).contains(&other_layer));
        assert!(store
            .casters_for_light(&light.clone().with_layers(vec![7]), 0)
            .is_empty());
    }
}
