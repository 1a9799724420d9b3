//! Featherstone articulated rigid body dynamics for identification.
//!
//! Implements:
//! - The kinematic forward pass (link transforms, velocities, accelerations)
//! - Recursive Newton-Euler Algorithm (RNEA) for inverse dynamics
//! - The inverse-dynamics regressor, linear in the dynamic parameters

pub mod kinematics;
pub mod regressor;
pub mod rnea;

pub use kinematics::{LinkMotion, link_motion};
pub use regressor::regressor;
pub use rnea::rnea;
