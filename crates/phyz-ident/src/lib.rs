//! Dynamic-parameter regressors for articulated mechanism identification.
//!
//! [`RegressorEngine`] owns an immutable mechanism description and builds:
//! - the basic regressor of a single joint state (`dof × P`),
//! - the full regressor of a trajectory (`(dof·N) × P`, sample-ordered blocks),
//! - the reduced regressor, keeping only the columns that are numerically
//!   identifiable at a given tolerance.
//!
//! Trajectories are passed as [`JointTable`]s, rectangular tables whose shape
//! is fixed at construction.

pub mod engine;
pub mod error;
pub mod export;
pub mod reduction;
pub mod signal;
pub mod table;

pub use engine::RegressorEngine;
pub use error::{IdentError, Result};
pub use export::{RegressorReport, write_json, write_matrix_text};
pub use reduction::{ColumnPivot, ReducedRegressor, column_pivots, reduce_columns};
pub use table::JointTable;
