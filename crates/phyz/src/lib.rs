//! phyz: dynamic-parameter regressors for manipulator identification.
//!
//! This is the umbrella crate that re-exports the engine and the core types
//! from sub-crates.
//!
//! ```no_run
//! use phyz::{JointTable, RegressorEngine};
//!
//! let engine = RegressorEngine::lbr_iiwa14()?;
//! let q = JointTable::from_fn(100, 7, |i, j| 0.01 * (i * j) as f64);
//! let qd = JointTable::from_fn(100, 7, |_, _| 0.1);
//! let qdd = JointTable::from_fn(100, 7, |_, _| 0.0);
//! let reduced = engine.compute_reduced_regressor(&q, &qd, &qdd, 1e-6)?;
//! println!("{} identifiable columns", reduced.ncols());
//! # Ok::<(), phyz::IdentError>(())
//! ```

pub use phyz_ident::{
    self, ColumnPivot, IdentError, JointTable, ReducedRegressor, RegressorEngine,
    RegressorReport, signal, write_json, write_matrix_text,
};
pub use phyz_math::{self, DMat, DVec, SpatialInertia, SpatialTransform, Vec3};
pub use phyz_model::{
    self, FrictionTerms, MechanismConfig, Model, ModelBuilder, ParameterBasis, State, presets,
};
pub use phyz_rigid::{self, link_motion, regressor, rnea};
