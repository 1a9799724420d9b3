//! Regressor engine.

use phyz_math::{DMat, DVec};
use phyz_model::{FrictionTerms, MechanismConfig, Model, ParameterBasis, State, presets};
use rayon::prelude::*;

use crate::reduction::{ReducedRegressor, reduce_columns};
use crate::{IdentError, JointTable, Result};

/// Builds dynamic-parameter regressors for one fixed mechanism.
///
/// The mechanism and its parameter basis are fixed at construction; every
/// operation takes `&self`, so an engine can be shared across threads.
#[derive(Debug, Clone)]
pub struct RegressorEngine {
    name: String,
    model: Model,
    basis: ParameterBasis,
}

impl RegressorEngine {
    /// Wrap a model, identifying its inertial parameters plus `terms`.
    pub fn new(name: impl Into<String>, model: Model, terms: FrictionTerms) -> Result<Self> {
        if model.nv == 0 {
            return Err(IdentError::InvalidInput(
                "mechanism has no degrees of freedom".into(),
            ));
        }
        check_topology(&model)?;
        let basis = ParameterBasis::new(&model, terms);
        let name = name.into();
        log::debug!(
            "regressor engine `{name}`: {} dof, {} parameters",
            model.nv,
            basis.len()
        );
        Ok(Self { name, model, basis })
    }

    /// Build from a parsed mechanism description.
    pub fn from_config(config: &MechanismConfig) -> Result<Self> {
        Self::new(config.name.clone(), config.to_model()?, config.friction)
    }

    /// The KUKA LBR iiwa 14 with the default joint-side terms.
    pub fn lbr_iiwa14() -> Result<Self> {
        Self::from_config(&presets::lbr_iiwa14())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of joints, i.e. rows per sample.
    pub fn dof(&self) -> usize {
        self.model.nv
    }

    /// Number of regressor columns P.
    pub fn num_parameters(&self) -> usize {
        self.basis.len()
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn basis(&self) -> &ParameterBasis {
        &self.basis
    }

    /// Parameter names in column order.
    pub fn parameter_names(&self) -> &[String] {
        self.basis.names()
    }

    /// Regressor of a single joint state, `dof × P`.
    pub fn compute_basic_regressor(&self, q: &[f64], qd: &[f64], qdd: &[f64]) -> Result<DMat> {
        for (label, values) in [("q", q), ("qd", qd), ("qdd", qdd)] {
            if values.len() != self.dof() {
                return Err(IdentError::InvalidInput(format!(
                    "{label} has length {}, expected {}",
                    values.len(),
                    self.dof()
                )));
            }
            if !values.iter().all(|v| v.is_finite()) {
                return Err(IdentError::InvalidInput(format!(
                    "{label} contains non-finite values"
                )));
            }
        }
        Ok(self.sample_regressor(q, qd, qdd))
    }

    /// Stacked regressor of a trajectory, `(dof·N) × P`.
    ///
    /// Rows `dof·i .. dof·(i+1)` hold the basic regressor of sample `i`.
    pub fn compute_full_regressor(
        &self,
        q: &JointTable,
        qd: &JointTable,
        qdd: &JointTable,
    ) -> Result<DMat> {
        let n = self.check_trajectory(q, qd, qdd)?;
        let dof = self.dof();

        let blocks: Vec<DMat> = (0..n)
            .into_par_iter()
            .map(|i| self.sample_regressor(q.row(i), qd.row(i), qdd.row(i)))
            .collect();

        let mut y = DMat::zeros(dof * n, self.num_parameters());
        for (i, block) in blocks.iter().enumerate() {
            y.view_mut((i * dof, 0), (dof, block.ncols()))
                .copy_from(block);
        }
        log::debug!("full regressor: {} samples, {}x{}", n, y.nrows(), y.ncols());
        Ok(y)
    }

    /// Full regressor restricted to the columns identifiable at `tolerance`.
    ///
    /// `tolerance` is relative to the largest pivot of a column-pivoted QR of
    /// the full regressor; see [`crate::reduction::reduce_columns`].
    pub fn compute_reduced_regressor(
        &self,
        q: &JointTable,
        qd: &JointTable,
        qdd: &JointTable,
        tolerance: f64,
    ) -> Result<ReducedRegressor> {
        // Also checked by `reduce_columns`; repeated here so a bad tolerance
        // is reported ahead of any trajectory shape error.
        if !(tolerance >= 0.0) {
            return Err(IdentError::InvalidInput(format!(
                "tolerance must be a non-negative number, got {tolerance}"
            )));
        }
        let full = self.compute_full_regressor(q, qd, qdd)?;
        if full.nrows() < full.ncols() {
            log::warn!(
                "{} equations for {} parameters: at most {} columns can be identified",
                full.nrows(),
                full.ncols(),
                full.nrows()
            );
        }
        reduce_columns(&full, tolerance)
    }

    fn check_trajectory(&self, q: &JointTable, qd: &JointTable, qdd: &JointTable) -> Result<usize> {
        let n = q.nrows();
        if qd.nrows() != n || qdd.nrows() != n {
            return Err(IdentError::ShapeMismatch(format!(
                "sample counts differ: q {n}, qd {}, qdd {}",
                qd.nrows(),
                qdd.nrows()
            )));
        }
        if n == 0 {
            return Err(IdentError::InvalidInput("trajectory has no samples".into()));
        }
        for (label, table) in [("q", q), ("qd", qd), ("qdd", qdd)] {
            if table.ncols() != self.dof() {
                return Err(IdentError::ShapeMismatch(format!(
                    "{label} has {} columns, expected {}",
                    table.ncols(),
                    self.dof()
                )));
            }
            if !table.is_finite() {
                return Err(IdentError::InvalidInput(format!(
                    "{label} contains non-finite values"
                )));
            }
        }
        Ok(n)
    }

    fn sample_regressor(&self, q: &[f64], qd: &[f64], qdd: &[f64]) -> DMat {
        let state = State::from_slices(q, qd);
        phyz_rigid::regressor(&self.model, &self.basis, &state, &DVec::from_column_slice(qdd))
    }
}

/// Parents must precede their children and every body must own a joint.
///
/// Models from `MechanismConfig::to_model` already satisfy this; models from
/// `ModelBuilder` are only checked here.
fn check_topology(model: &Model) -> Result<()> {
    if model.v_offsets.len() != model.joints.len() {
        return Err(IdentError::InvalidInput(format!(
            "{} joints but {} velocity offsets",
            model.joints.len(),
            model.v_offsets.len()
        )));
    }
    for (i, body) in model.bodies.iter().enumerate() {
        if body.parent < -1 || body.parent >= i as i32 {
            return Err(IdentError::InvalidInput(format!(
                "body `{}` (index {i}) has parent {}; expected -1 or an earlier body",
                body.name, body.parent
            )));
        }
        if body.joint_idx >= model.joints.len() {
            return Err(IdentError::InvalidInput(format!(
                "body `{}` refers to joint {} of {}",
                body.name,
                body.joint_idx,
                model.joints.len()
            )));
        }
    }
    Ok(())
}
