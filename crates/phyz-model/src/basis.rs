//! Dynamic-parameter basis of a mechanism.
//!
//! The parameter vector is laid out link by link. Each link contributes its ten
//! inertial parameters about the link frame origin
//! (`m, m·cx, m·cy, m·cz, Ixx, Ixy, Ixz, Iyy, Iyz, Izz`), followed by the
//! enabled joint-side terms in the order viscous, Coulomb, offset, armature.

use crate::Model;
use phyz_math::{DVec, INERTIAL_PARAMS};
use serde::{Deserialize, Serialize};

/// Which joint-side terms each joint contributes to the parameter vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrictionTerms {
    /// Viscous friction `Fv · qd`.
    pub viscous: bool,
    /// Coulomb friction `Fc · sign(qd)`.
    pub coulomb: bool,
    /// Constant torque offset.
    pub offset: bool,
    /// Rotor inertia `Ia · qdd`.
    pub armature: bool,
}

impl Default for FrictionTerms {
    fn default() -> Self {
        Self {
            viscous: true,
            coulomb: true,
            offset: false,
            armature: false,
        }
    }
}

impl FrictionTerms {
    /// No joint-side terms, inertial parameters only.
    pub fn none() -> Self {
        Self {
            viscous: false,
            coulomb: false,
            offset: false,
            armature: false,
        }
    }

    /// Every joint-side term enabled.
    pub fn all() -> Self {
        Self {
            viscous: true,
            coulomb: true,
            offset: true,
            armature: true,
        }
    }

    /// Enabled terms in column order.
    pub fn kinds(&self) -> Vec<ParameterKind> {
        [
            (self.viscous, ParameterKind::Viscous),
            (self.coulomb, ParameterKind::Coulomb),
            (self.offset, ParameterKind::Offset),
            (self.armature, ParameterKind::Armature),
        ]
        .into_iter()
        .filter_map(|(on, kind)| on.then_some(kind))
        .collect()
    }

    /// Number of enabled terms.
    pub fn count(&self) -> usize {
        self.kinds().len()
    }
}

/// Physical meaning of one entry of the parameter vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParameterKind {
    Mass,
    FirstMomentX,
    FirstMomentY,
    FirstMomentZ,
    InertiaXX,
    InertiaXY,
    InertiaXZ,
    InertiaYY,
    InertiaYZ,
    InertiaZZ,
    Viscous,
    Coulomb,
    Offset,
    Armature,
}

impl ParameterKind {
    /// Inertial parameters in column order.
    pub const INERTIAL: [ParameterKind; INERTIAL_PARAMS] = [
        ParameterKind::Mass,
        ParameterKind::FirstMomentX,
        ParameterKind::FirstMomentY,
        ParameterKind::FirstMomentZ,
        ParameterKind::InertiaXX,
        ParameterKind::InertiaXY,
        ParameterKind::InertiaXZ,
        ParameterKind::InertiaYY,
        ParameterKind::InertiaYZ,
        ParameterKind::InertiaZZ,
    ];

    /// Short label used in parameter names.
    pub fn label(&self) -> &'static str {
        match self {
            ParameterKind::Mass => "m",
            ParameterKind::FirstMomentX => "mx",
            ParameterKind::FirstMomentY => "my",
            ParameterKind::FirstMomentZ => "mz",
            ParameterKind::InertiaXX => "xx",
            ParameterKind::InertiaXY => "xy",
            ParameterKind::InertiaXZ => "xz",
            ParameterKind::InertiaYY => "yy",
            ParameterKind::InertiaYZ => "yz",
            ParameterKind::InertiaZZ => "zz",
            ParameterKind::Viscous => "fv",
            ParameterKind::Coulomb => "fc",
            ParameterKind::Offset => "fo",
            ParameterKind::Armature => "ia",
        }
    }
}

/// One entry of the parameter vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parameter {
    /// Body (and joint) the parameter belongs to.
    pub body: usize,
    /// Physical meaning.
    pub kind: ParameterKind,
}

/// Layout of the dynamic-parameter vector for a given model.
///
/// Fixed at construction; regressors built against it have exactly
/// [`ParameterBasis::len`] columns.
#[derive(Debug, Clone)]
pub struct ParameterBasis {
    params: Vec<Parameter>,
    names: Vec<String>,
    terms: FrictionTerms,
    per_body: usize,
}

impl ParameterBasis {
    /// Build the basis for `model` with the given joint-side terms.
    pub fn new(model: &Model, terms: FrictionTerms) -> Self {
        let joint_kinds = terms.kinds();
        let per_body = INERTIAL_PARAMS + joint_kinds.len();
        let mut params = Vec::with_capacity(per_body * model.nbodies());
        let mut names = Vec::with_capacity(per_body * model.nbodies());

        for (i, body) in model.bodies.iter().enumerate() {
            for kind in ParameterKind::INERTIAL.iter().chain(joint_kinds.iter()) {
                params.push(Parameter {
                    body: i,
                    kind: *kind,
                });
                names.push(format!("{}.{}", body.name, kind.label()));
            }
        }

        Self {
            params,
            names,
            terms,
            per_body,
        }
    }

    /// Total number of parameters P.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Whether the basis is empty (model without bodies).
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Enabled joint-side terms.
    pub fn terms(&self) -> FrictionTerms {
        self.terms
    }

    /// Number of parameters per body.
    pub fn per_body(&self) -> usize {
        self.per_body
    }

    /// First column belonging to body `i`.
    pub fn body_offset(&self, i: usize) -> usize {
        i * self.per_body
    }

    /// All parameters in column order.
    pub fn parameters(&self) -> &[Parameter] {
        &self.params
    }

    /// Human-readable names in column order, e.g. `link3.mx`.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// The parameter vector of `model` itself, in this basis.
    pub fn nominal(&self, model: &Model) -> DVec {
        let mut pi = DVec::zeros(self.len());
        for (i, body) in model.bodies.iter().enumerate() {
            let offset = self.body_offset(i);
            let inertial = body.inertia.to_parameters();
            for k in 0..INERTIAL_PARAMS {
                pi[offset + k] = inertial[k];
            }

            let joint = model.joint_of(i);
            for (k, kind) in self.terms.kinds().iter().enumerate() {
                pi[offset + INERTIAL_PARAMS + k] = match kind {
                    ParameterKind::Viscous => joint.damping,
                    ParameterKind::Coulomb => joint.friction,
                    ParameterKind::Offset => joint.offset,
                    ParameterKind::Armature => joint.armature,
                    _ => unreachable!("inertial kinds are not joint-side terms"),
                };
            }
        }
        pi
    }
}
