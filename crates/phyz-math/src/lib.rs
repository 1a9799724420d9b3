//! Spatial algebra and math primitives for the phyz identification stack.
//!
//! Implements 6D spatial vectors, Plücker transforms, spatial inertia and the
//! inertial parameter regressor, following Featherstone's conventions.

pub mod spatial;

pub use spatial::{
    INERTIAL_PARAMS, SpatialInertia, SpatialTransform, SpatialVec, inertial_regressor,
};

use nalgebra as na;

/// 3D vector alias.
pub type Vec3 = na::Vector3<f64>;
/// 3x3 matrix alias.
pub type Mat3 = na::Matrix3<f64>;
/// 6D vector alias.
pub type Vec6 = na::Vector6<f64>;
/// 6x6 matrix alias.
pub type Mat6 = na::Matrix6<f64>;
/// 6x10 matrix mapping the inertial parameters of one body to its spatial force.
pub type Mat6x10 = na::SMatrix<f64, 6, 10>;
/// Vector of the ten inertial parameters of one body.
pub type Vec10 = na::SVector<f64, 10>;
/// Dynamic vector.
pub type DVec = na::DVector<f64>;
/// Dynamic matrix.
pub type DMat = na::DMatrix<f64>;

/// Cross-product matrix: [v]× such that [v]× w = v × w.
#[inline]
pub fn skew(v: &Vec3) -> Mat3 {
    Mat3::new(0.0, -v.z, v.y, v.z, 0.0, -v.x, -v.y, v.x, 0.0)
}

/// Rotation matrix from roll-pitch-yaw angles, `Rz(yaw) * Ry(pitch) * Rx(roll)`.
pub fn rpy_matrix(roll: f64, pitch: f64, yaw: f64) -> Mat3 {
    *na::Rotation3::from_euler_angles(roll, pitch, yaw).matrix()
}

/// Standard gravity (m/s²).
pub const GRAVITY: f64 = 9.81;
