//! Inverse-dynamics regressor.
//!
//! Inverse dynamics is linear in the dynamic parameters:
//! `tau = Y(q, qd, qdd) · pi`. Each link's body force is `K(v_i, a_i) · pi_i`
//! (see [`phyz_math::inertial_regressor`]); transporting that 6×10 block toward
//! the base and projecting it on every ancestor joint axis yields the link's
//! columns of `Y`. Drive terms only load the link's own joint.

use phyz_math::{DMat, DVec, INERTIAL_PARAMS, inertial_regressor};
use phyz_model::{Model, ParameterBasis, ParameterKind, State, joint::coulomb_sign};

use crate::kinematics::link_motion;

/// Compute the `nv × P` regressor for one joint state.
///
/// Columns follow `basis`; the result satisfies
/// `regressor(..) * basis.nominal(model) == rnea(..)` when the model carries the
/// drive coefficients enabled in the basis.
pub fn regressor(model: &Model, basis: &ParameterBasis, state: &State, qdd: &DVec) -> DMat {
    let nb = model.nbodies();
    let mut y = DMat::zeros(model.nv, basis.len());
    let motion = link_motion(model, state, qdd);
    let drive_terms = basis.terms().kinds();

    for i in 0..nb {
        let col = basis.body_offset(i);

        // ── Inertial columns: walk from link i up to the base ──
        let mut block = inertial_regressor(&motion.vel[i], &motion.acc[i]);
        let mut j = i;
        loop {
            let body = &model.bodies[j];
            let row = model.v_offsets[body.joint_idx];
            let projected = model.joints[body.joint_idx]
                .motion_subspace()
                .data
                .transpose()
                * block;
            for k in 0..INERTIAL_PARAMS {
                y[(row, col + k)] = projected[k];
            }

            if body.parent < 0 {
                break;
            }
            block = motion.x_tree[j].inv_apply_force_block(&block);
            j = body.parent as usize;
        }

        // ── Drive columns ──
        let row = model.v_offsets[model.bodies[i].joint_idx];
        let (qd, a) = (state.v[row], qdd[row]);
        for (k, kind) in drive_terms.iter().enumerate() {
            y[(row, col + INERTIAL_PARAMS + k)] = match kind {
                ParameterKind::Viscous => qd,
                ParameterKind::Coulomb => coulomb_sign(qd),
                ParameterKind::Offset => 1.0,
                ParameterKind::Armature => a,
                _ => unreachable!("inertial kinds are not drive terms"),
            };
        }
    }

    y
}
