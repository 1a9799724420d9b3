//! Recursive Newton-Euler Algorithm (RNEA) for inverse dynamics.
//!
//! Given (q, v, qdd), compute the required joint torques tau, including the
//! drive terms (friction, offset, rotor inertia) carried by each joint.

use phyz_math::{DVec, SpatialVec};
use phyz_model::{Model, State};

use crate::kinematics::link_motion;

/// Run RNEA: compute inverse dynamics torques.
///
/// Given state (q, v) and desired accelerations `qdd`, returns the torques needed.
pub fn rnea(model: &Model, state: &State, qdd: &DVec) -> DVec {
    let nb = model.nbodies();
    let mut tau = DVec::zeros(model.nv);
    let motion = link_motion(model, state, qdd);

    // ── Body forces ──
    let mut forces: Vec<SpatialVec> = (0..nb)
        .map(|i| {
            let ia = model.bodies[i].inertia.to_matrix();
            let vel = &motion.vel[i];
            SpatialVec {
                data: ia * motion.acc[i].data,
            } + vel.cross_force(&SpatialVec {
                data: ia * vel.data,
            })
        })
        .collect();

    // ── Backward pass: project onto joint axes, accumulate into parents ──
    for i in (0..nb).rev() {
        let body = &model.bodies[i];
        let joint = &model.joints[body.joint_idx];
        let v_idx = model.v_offsets[body.joint_idx];

        tau[v_idx] = joint.motion_subspace().data.dot(&forces[i].data)
            + joint.friction_torque(state.v[v_idx], qdd[v_idx]);

        if body.parent >= 0 {
            let pi = body.parent as usize;
            forces[pi] = forces[pi] + motion.x_tree[i].inv_apply_force(&forces[i]);
        }
    }

    tau
}
