//! Serializable mechanism configuration.
//!
//! A `MechanismConfig` is the already-parsed description of a fixed-topology
//! mechanism: link placements, joint types, nominal inertias and the set of
//! joint-side terms to identify. It is converted once into an immutable
//! [`Model`] at engine construction.

use std::path::Path;

use crate::{FrictionTerms, Joint, JointType, Model, ModelBuilder, ModelError, Result};
use phyz_math::{GRAVITY, Mat3, SpatialInertia, SpatialTransform, Vec3};
use serde::{Deserialize, Serialize};

fn default_gravity() -> [f64; 3] {
    [0.0, 0.0, -GRAVITY]
}

fn default_axis() -> [f64; 3] {
    [0.0, 0.0, 1.0]
}

/// Top-level mechanism description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MechanismConfig {
    /// Mechanism name, informational.
    pub name: String,
    /// Gravity vector in the base frame.
    #[serde(default = "default_gravity")]
    pub gravity: [f64; 3],
    /// Joint-side terms included in the parameter basis.
    #[serde(default)]
    pub friction: FrictionTerms,
    /// Links from base to tip.
    pub links: Vec<LinkConfig>,
}

/// One moving link and the joint that drives it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkConfig {
    pub name: String,
    /// Parent link index; `None` attaches to the previous link (or the base
    /// for the first link).
    #[serde(default)]
    pub parent: Option<usize>,
    pub joint: JointConfig,
    pub inertia: InertiaConfig,
}

/// Joint placement and drive coefficients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JointConfig {
    #[serde(rename = "type")]
    pub joint_type: JointType,
    /// Joint frame origin in the parent link frame.
    #[serde(default)]
    pub xyz: [f64; 3],
    /// Joint frame orientation in the parent link frame (roll, pitch, yaw).
    #[serde(default)]
    pub rpy: [f64; 3],
    #[serde(default = "default_axis")]
    pub axis: [f64; 3],
    #[serde(default)]
    pub damping: f64,
    #[serde(default)]
    pub friction: f64,
    #[serde(default)]
    pub offset: f64,
    #[serde(default)]
    pub armature: f64,
}

/// Nominal inertia of a link, about its center of mass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InertiaConfig {
    pub mass: f64,
    #[serde(default)]
    pub com: [f64; 3],
    /// `[ixx, ixy, ixz, iyy, iyz, izz]`
    #[serde(default)]
    pub inertia: [f64; 6],
}

impl InertiaConfig {
    fn to_spatial(&self) -> SpatialInertia {
        let [ixx, ixy, ixz, iyy, iyz, izz] = self.inertia;
        SpatialInertia::new(
            self.mass,
            Vec3::from(self.com),
            Mat3::new(ixx, ixy, ixz, ixy, iyy, iyz, ixz, iyz, izz),
        )
    }
}

impl MechanismConfig {
    /// Parse a configuration from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: MechanismConfig = serde_json::from_str(json)?;
        log::debug!(
            "parsed mechanism config `{}` with {} links",
            config.name,
            config.links.len()
        );
        Ok(config)
    }

    /// Load a configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&json)
    }

    /// Serialize to pretty JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Number of degrees of freedom described.
    pub fn dof(&self) -> usize {
        self.links.len()
    }

    /// Validate and convert into a [`Model`].
    pub fn to_model(&self) -> Result<Model> {
        if self.links.is_empty() {
            return Err(ModelError::InvalidConfig(format!(
                "mechanism `{}` has no links",
                self.name
            )));
        }
        if !self.gravity.iter().all(|g| g.is_finite()) {
            return Err(ModelError::InvalidConfig("gravity must be finite".into()));
        }

        let mut builder = ModelBuilder::new().gravity(Vec3::from(self.gravity));
        for (i, link) in self.links.iter().enumerate() {
            let parent = match link.parent {
                Some(p) if p >= i => {
                    return Err(ModelError::InvalidConfig(format!(
                        "link `{}` (index {i}) has parent {p}; parents must precede children",
                        link.name
                    )));
                }
                Some(p) => p as i32,
                None => i as i32 - 1,
            };
            if self.links[..i].iter().any(|l| l.name == link.name) {
                return Err(ModelError::InvalidConfig(format!(
                    "duplicate link name `{}`",
                    link.name
                )));
            }

            let joint = link.joint.to_joint(&link.name)?;
            let inertia = &link.inertia;
            let finite = inertia.mass.is_finite()
                && inertia.com.iter().chain(inertia.inertia.iter()).all(|v| v.is_finite());
            if !finite || inertia.mass < 0.0 {
                return Err(ModelError::InvalidConfig(format!(
                    "link `{}` has a negative or non-finite inertia",
                    link.name
                )));
            }

            builder = builder.add_body(&link.name, parent, joint, inertia.to_spatial());
        }

        Ok(builder.build())
    }
}

impl JointConfig {
    fn to_joint(&self, link: &str) -> Result<Joint> {
        let finite = self
            .xyz
            .iter()
            .chain(&self.rpy)
            .chain(&self.axis)
            .copied()
            .chain([self.damping, self.friction, self.offset, self.armature])
            .all(f64::is_finite);
        if !finite {
            return Err(ModelError::InvalidConfig(format!(
                "joint of link `{link}` has non-finite values"
            )));
        }

        let axis = Vec3::from(self.axis);
        let norm = axis.norm();
        if norm < 1e-9 {
            return Err(ModelError::InvalidConfig(format!(
                "joint of link `{link}` has a zero axis"
            )));
        }

        let placement = SpatialTransform::from_xyz_rpy(self.xyz, self.rpy);
        let joint = match self.joint_type {
            JointType::Revolute => Joint::revolute(placement).with_axis(axis / norm),
            JointType::Prismatic => Joint::prismatic(placement, axis / norm),
        };
        Ok(joint
            .with_friction(self.damping, self.friction)
            .with_drive(self.offset, self.armature))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const TWO_LINK: &str = r#"{
        "name": "planar",
        "friction": { "viscous": true, "coulomb": false },
        "links": [
            {
                "name": "l1",
                "joint": { "type": "revolute", "damping": 0.2 },
                "inertia": { "mass": 1.0, "com": [0.5, 0.0, 0.0], "inertia": [0.0, 0.0, 0.0, 0.08, 0.0, 0.08] }
            },
            {
                "name": "l2",
                "joint": { "type": "revolute", "xyz": [1.0, 0.0, 0.0], "axis": [0.0, 0.0, 2.0] },
                "inertia": { "mass": 0.5 }
            }
        ]
    }"#;

    #[test]
    fn test_parse_and_build() {
        let config = MechanismConfig::from_json_str(TWO_LINK).unwrap();
        assert_eq!(config.dof(), 2);
        assert_eq!(config.gravity, [0.0, 0.0, -GRAVITY]);
        assert!(config.friction.viscous);
        assert!(!config.friction.coulomb);

        let model = config.to_model().unwrap();
        assert_eq!(model.nbodies(), 2);
        assert_eq!(model.nv, 2);
        assert_eq!(model.bodies[0].parent, -1);
        assert_eq!(model.bodies[1].parent, 0);
        assert_relative_eq!(model.joints[0].damping, 0.2);
        // Axis is normalized.
        assert_relative_eq!(model.joints[1].axis, Vec3::z(), epsilon = 1e-12);
        assert_relative_eq!(model.joints[1].parent_to_joint.pos, Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_json_roundtrip_preserves_config() {
        let config = MechanismConfig::from_json_str(TWO_LINK).unwrap();
        let back = MechanismConfig::from_json_str(&config.to_json_string().unwrap()).unwrap();
        assert_eq!(config, back);
    }

    #[test]
    fn test_rejects_forward_parent() {
        let mut config = MechanismConfig::from_json_str(TWO_LINK).unwrap();
        config.links[0].parent = Some(1);
        assert!(matches!(config.to_model(), Err(ModelError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_zero_axis() {
        let mut config = MechanismConfig::from_json_str(TWO_LINK).unwrap();
        config.links[1].joint.axis = [0.0; 3];
        assert!(matches!(config.to_model(), Err(ModelError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_empty_mechanism() {
        let config = MechanismConfig {
            name: "empty".into(),
            gravity: default_gravity(),
            friction: FrictionTerms::default(),
            links: Vec::new(),
        };
        assert!(matches!(config.to_model(), Err(ModelError::InvalidConfig(_))));
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(matches!(
            MechanismConfig::from_json_str("{ \"name\": 3 }"),
            Err(ModelError::JsonError(_))
        ));
    }
}
