//! Joint-space state.

use phyz_math::DVec;

/// Generalized positions and velocities of a mechanism.
#[derive(Debug, Clone)]
pub struct State {
    /// Generalized positions (joint angles/displacements).
    pub q: DVec,
    /// Generalized velocities.
    pub v: DVec,
}

impl State {
    /// Create a zero-initialized state for `nv` single-DOF joints.
    pub fn new(nv: usize) -> Self {
        Self {
            q: DVec::zeros(nv),
            v: DVec::zeros(nv),
        }
    }

    /// Create a state from position and velocity slices.
    pub fn from_slices(q: &[f64], v: &[f64]) -> Self {
        Self {
            q: DVec::from_column_slice(q),
            v: DVec::from_column_slice(v),
        }
    }
}
