//! Built-in mechanism descriptions.

use std::f64::consts::{FRAC_PI_2, PI};

use crate::{FrictionTerms, InertiaConfig, JointConfig, JointType, LinkConfig, MechanismConfig};
use phyz_math::GRAVITY;

/// Degrees of freedom of the KUKA LBR iiwa.
pub const LBR_IIWA_DOF: usize = 7;

/// KUKA LBR iiwa 14 R820: seven revolute joints, nominal link inertias.
///
/// Joint placements follow the manufacturer's kinematic description (joint
/// frames rotate about their local Z axis). Friction coefficients are rough
/// nominal values and only matter for RNEA cross-checks.
pub fn lbr_iiwa14() -> MechanismConfig {
    // (xyz, rpy, mass, com, [ixx, iyy, izz], viscous, coulomb)
    #[allow(clippy::type_complexity)]
    let links: [([f64; 3], [f64; 3], f64, [f64; 3], [f64; 3], f64, f64); LBR_IIWA_DOF] = [
        (
            [0.0, 0.0, 0.1575],
            [0.0, 0.0, 0.0],
            4.0,
            [0.0, -0.03, 0.12],
            [0.1, 0.09, 0.02],
            0.80,
            1.10,
        ),
        (
            [0.0, 0.0, 0.2025],
            [FRAC_PI_2, 0.0, PI],
            4.0,
            [0.0003, 0.059, 0.042],
            [0.05, 0.018, 0.044],
            0.80,
            1.10,
        ),
        (
            [0.0, 0.2045, 0.0],
            [FRAC_PI_2, 0.0, PI],
            3.0,
            [0.0, 0.03, 0.13],
            [0.08, 0.075, 0.01],
            0.60,
            0.90,
        ),
        (
            [0.0, 0.0, 0.2155],
            [FRAC_PI_2, 0.0, 0.0],
            2.7,
            [0.0, 0.067, 0.034],
            [0.03, 0.01, 0.029],
            0.60,
            0.90,
        ),
        (
            [0.0, 0.1845, 0.0],
            [-FRAC_PI_2, PI, 0.0],
            1.7,
            [0.0001, 0.021, 0.076],
            [0.02, 0.018, 0.005],
            0.40,
            0.50,
        ),
        (
            [0.0, 0.0, 0.2155],
            [FRAC_PI_2, 0.0, 0.0],
            1.8,
            [0.0, 0.0006, 0.0004],
            [0.005, 0.0036, 0.0047],
            0.30,
            0.40,
        ),
        (
            [0.0, 0.081, 0.0],
            [-FRAC_PI_2, PI, 0.0],
            0.3,
            [0.0, 0.0, 0.02],
            [0.001, 0.001, 0.001],
            0.20,
            0.30,
        ),
    ];

    let links = links
        .iter()
        .enumerate()
        .map(|(i, &(xyz, rpy, mass, com, [ixx, iyy, izz], damping, friction))| LinkConfig {
            name: format!("link{}", i + 1),
            parent: None,
            joint: JointConfig {
                joint_type: JointType::Revolute,
                xyz,
                rpy,
                axis: [0.0, 0.0, 1.0],
                damping,
                friction,
                offset: 0.0,
                armature: 0.0,
            },
            inertia: InertiaConfig {
                mass,
                com,
                inertia: [ixx, 0.0, 0.0, iyy, 0.0, izz],
            },
        })
        .collect();

    MechanismConfig {
        name: "lbr_iiwa14_r820".to_string(),
        gravity: [0.0, 0.0, -GRAVITY],
        friction: FrictionTerms::default(),
        links,
    }
}
