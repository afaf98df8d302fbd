use crate::math::{BoundingSphere, Point3};

/// Set of sorting layers an entity applies to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LayerMask {
    /// Every layer.
    #[default]
    All,
    /// Only the listed layers.
    Only(Vec<i32>),
}

impl LayerMask {
    /// Returns `true` if `layer` is in the mask.
    #[must_use]
    pub fn contains(&self, layer: i32) -> bool {
        match self {
            Self::All => true,
            Self::Only(layers) => layers.contains(&layer),
        }
    }
}

/// A point light, reduced to what shadow culling needs.
#[derive(Debug, Clone, PartialEq)]
pub struct Light2D {
    /// World position of the light.
    pub position: Point3,
    /// Outer radius of the light's influence.
    pub radius: f64,
    /// Sorting layers lit by this light.
    pub target_layers: LayerMask,
}

impl Light2D {
    /// Creates a light affecting every sorting layer.
    #[must_use]
    pub fn new(position: Point3, radius: f64) -> Self {
        Self {
            position,
            radius,
            target_layers: LayerMask::All,
        }
    }

    /// Restricts the light to the given sorting layers.
    #[must_use]
    pub fn with_layers(mut self, layers: Vec<i32>) -> Self {
        self.target_layers = LayerMask::Only(layers);
        self
    }

    /// Sphere covering the light's range.
    #[must_use]
    pub fn bounding_sphere(&self) -> BoundingSphere {
        BoundingSphere::new(self.position, self.radius)
    }
}
