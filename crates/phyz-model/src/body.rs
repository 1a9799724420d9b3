//! Rigid body definition.

use phyz_math::SpatialInertia;

/// A rigid link in the kinematic tree.
#[derive(Debug, Clone)]
pub struct Body {
    /// Name of the body, used for parameter labels.
    pub name: String,
    /// Spatial inertia in body-local frame.
    pub inertia: SpatialInertia,
    /// Index of the parent body (-1 for the fixed base).
    pub parent: i32,
    /// Index of the joint connecting this body to its parent.
    pub joint_idx: usize,
}
