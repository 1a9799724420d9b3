//! Model definition: static description of a mechanism.

use crate::{Body, Joint, State};
use phyz_math::{GRAVITY, SpatialInertia, SpatialTransform, Vec3};

/// Static model describing the topology and parameters of a mechanism.
#[derive(Debug, Clone)]
pub struct Model {
    /// Bodies in the kinematic tree (index 0 = first moving link, no base body).
    pub bodies: Vec<Body>,
    /// Joints connecting bodies.
    pub joints: Vec<Joint>,
    /// Gravity vector in base frame.
    pub gravity: Vec3,
    /// Total number of velocity DOFs.
    pub nv: usize,
    /// Velocity DOF offset for each joint.
    pub v_offsets: Vec<usize>,
}

impl Model {
    /// Create a default zero state for this model.
    pub fn default_state(&self) -> State {
        State::new(self.nv)
    }

    /// Number of bodies.
    pub fn nbodies(&self) -> usize {
        self.bodies.len()
    }

    /// Joint driving body `i`.
    pub fn joint_of(&self, body: usize) -> &Joint {
        &self.joints[self.bodies[body].joint_idx]
    }
}

/// Builder for constructing models.
pub struct ModelBuilder {
    bodies: Vec<Body>,
    joints: Vec<Joint>,
    gravity: Vec3,
}

impl ModelBuilder {
    /// Start building a new model.
    pub fn new() -> Self {
        Self {
            bodies: Vec::new(),
            joints: Vec::new(),
            gravity: Vec3::new(0.0, 0.0, -GRAVITY),
        }
    }

    /// Set the gravity vector.
    pub fn gravity(mut self, g: Vec3) -> Self {
        self.gravity = g;
        self
    }

    /// Add a body with a revolute joint attached to the given parent.
    ///
    /// `parent` is the index of the parent body, or -1 for the base.
    /// `parent_to_joint` is the transform from parent body frame to joint frame.
    /// `inertia` is the body's spatial inertia in its own frame.
    pub fn add_revolute_body(
        self,
        name: &str,
        parent: i32,
        parent_to_joint: SpatialTransform,
        inertia: SpatialInertia,
    ) -> Self {
        self.add_body(name, parent, Joint::revolute(parent_to_joint), inertia)
    }

    /// Add a body with a prismatic joint attached to the given parent.
    pub fn add_prismatic_body(
        self,
        name: &str,
        parent: i32,
        parent_to_joint: SpatialTransform,
        axis: Vec3,
        inertia: SpatialInertia,
    ) -> Self {
        self.add_body(name, parent, Joint::prismatic(parent_to_joint, axis), inertia)
    }

    /// Add a generic joint and body.
    pub fn add_body(
        mut self,
        name: &str,
        parent: i32,
        joint: Joint,
        inertia: SpatialInertia,
    ) -> Self {
        let joint_idx = self.joints.len();
        self.joints.push(joint);
        self.bodies.push(Body {
            name: name.to_string(),
            inertia,
            parent,
            joint_idx,
        });
        self
    }

    /// Build the model.
    pub fn build(self) -> Model {
        let mut nv = 0;
        let mut v_offsets = Vec::with_capacity(self.joints.len());

        for joint in &self.joints {
            v_offsets.push(nv);
            nv += joint.ndof();
        }

        Model {
            bodies: self.bodies,
            joints: self.joints,
            gravity: self.gravity,
            nv,
            v_offsets,
        }
    }
}

impl Default for ModelBuilder {
    fn default() -> Self {
        Self::new()
    }
}
