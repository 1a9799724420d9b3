//! Joint types and definitions.

use phyz_math::{Mat3, SpatialTransform, SpatialVec, Vec3};
use serde::{Deserialize, Serialize};

/// Joint type enumeration.
///
/// Identified mechanisms are serial chains of single-DOF actuated joints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JointType {
    /// Single rotational DOF about an axis.
    Revolute,
    /// Single translational DOF along an axis.
    Prismatic,
}

/// A joint connecting two bodies.
#[derive(Debug, Clone)]
pub struct Joint {
    /// Joint type.
    pub joint_type: JointType,
    /// Transform from parent body frame to joint frame (constant).
    pub parent_to_joint: SpatialTransform,
    /// Unit joint axis in the joint frame.
    pub axis: Vec3,
    /// Viscous friction coefficient.
    pub damping: f64,
    /// Coulomb friction coefficient.
    pub friction: f64,
    /// Constant torque offset (sensor bias, unmodelled asymmetric friction).
    pub offset: f64,
    /// Reflected rotor inertia of the drive.
    pub armature: f64,
}

impl Joint {
    fn with_type(joint_type: JointType, parent_to_joint: SpatialTransform, axis: Vec3) -> Self {
        Self {
            joint_type,
            parent_to_joint,
            axis,
            damping: 0.0,
            friction: 0.0,
            offset: 0.0,
            armature: 0.0,
        }
    }

    /// Create a revolute joint about the local Z axis.
    pub fn revolute(parent_to_joint: SpatialTransform) -> Self {
        Self::with_type(JointType::Revolute, parent_to_joint, Vec3::z())
    }

    /// Create a prismatic joint with the given parent-to-joint transform and axis.
    pub fn prismatic(parent_to_joint: SpatialTransform, axis: Vec3) -> Self {
        Self::with_type(JointType::Prismatic, parent_to_joint, axis)
    }

    /// Replace the joint axis.
    pub fn with_axis(mut self, axis: Vec3) -> Self {
        self.axis = axis;
        self
    }

    /// Set the viscous and Coulomb friction coefficients.
    pub fn with_friction(mut self, viscous: f64, coulomb: f64) -> Self {
        self.damping = viscous;
        self.friction = coulomb;
        self
    }

    /// Set the torque offset and rotor inertia.
    pub fn with_drive(mut self, offset: f64, armature: f64) -> Self {
        self.offset = offset;
        self.armature = armature;
        self
    }

    /// Number of degrees of freedom for this joint type.
    pub fn ndof(&self) -> usize {
        1
    }

    /// Compute the joint transform for the given joint position.
    ///
    /// Returns the Plücker transform from predecessor to successor frame.
    pub fn joint_transform(&self, q: f64) -> SpatialTransform {
        match self.joint_type {
            JointType::Revolute => {
                // Passive rotation: negate angle for coordinate transform
                let (s, c) = (-q).sin_cos();
                let ax = phyz_math::skew(&self.axis);
                let rot = Mat3::identity() + ax * s + ax * ax * (1.0 - c);
                SpatialTransform::new(rot, Vec3::zeros())
            }
            JointType::Prismatic => SpatialTransform::translation(self.axis * q),
        }
    }

    /// Motion subspace S of this joint.
    pub fn motion_subspace(&self) -> SpatialVec {
        match self.joint_type {
            JointType::Revolute => SpatialVec::new(self.axis, Vec3::zeros()),
            JointType::Prismatic => SpatialVec::new(Vec3::zeros(), self.axis),
        }
    }

    /// Joint velocity contribution S * qd.
    pub fn velocity(&self, qd: f64) -> SpatialVec {
        self.motion_subspace() * qd
    }

    /// Generalized force spent in the drive: friction, offset and rotor inertia.
    pub fn friction_torque(&self, qd: f64, qdd: f64) -> f64 {
        self.damping * qd + self.friction * coulomb_sign(qd) + self.offset + self.armature * qdd
    }
}

/// Sign of a joint velocity for the Coulomb friction term; zero at rest.
#[inline]
pub fn coulomb_sign(qd: f64) -> f64 {
    if qd > 0.0 {
        1.0
    } else if qd < 0.0 {
        -1.0
    } else {
        0.0
    }
}
