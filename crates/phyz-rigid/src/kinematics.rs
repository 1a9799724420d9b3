//! Kinematic forward pass shared by inverse dynamics and the regressor.

use phyz_math::{DVec, SpatialTransform, SpatialVec, Vec3};
use phyz_model::{Model, State};

/// Per-link motion, all quantities expressed in the link's own frame.
#[derive(Debug, Clone)]
pub struct LinkMotion {
    /// Plücker transform parent → link.
    pub x_tree: Vec<SpatialTransform>,
    /// Spatial velocity of each link.
    pub vel: Vec<SpatialVec>,
    /// Spatial acceleration of each link, gravity included as a base acceleration.
    pub acc: Vec<SpatialVec>,
}

/// Propagate velocities and accelerations from the base to the tip.
///
/// Gravity enters as the fictitious base acceleration `a0 = [0; -g]`, so the
/// resulting accelerations already carry the gravitational load.
pub fn link_motion(model: &Model, state: &State, qdd: &DVec) -> LinkMotion {
    let nb = model.nbodies();
    let mut x_tree = vec![SpatialTransform::identity(); nb];
    let mut vel = vec![SpatialVec::zero(); nb];
    let mut acc = vec![SpatialVec::zero(); nb];

    let a0 = SpatialVec::new(Vec3::zeros(), -model.gravity);

    for i in 0..nb {
        let body = &model.bodies[i];
        let joint = &model.joints[body.joint_idx];
        let v_idx = model.v_offsets[body.joint_idx];

        x_tree[i] = joint
            .joint_transform(state.q[v_idx])
            .compose(&joint.parent_to_joint);

        let v_joint = joint.velocity(state.v[v_idx]);
        let a_joint = joint.velocity(qdd[v_idx]);

        if body.parent < 0 {
            vel[i] = v_joint;
            acc[i] = x_tree[i].apply_motion(&a0) + a_joint;
        } else {
            let pi = body.parent as usize;
            vel[i] = x_tree[i].apply_motion(&vel[pi]) + v_joint;
            acc[i] = x_tree[i].apply_motion(&acc[pi]) + vel[i].cross_motion(&v_joint) + a_joint;
        }
    }

    LinkMotion { x_tree, vel, acc }
}
