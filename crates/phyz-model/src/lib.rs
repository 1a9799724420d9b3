//! Model types for the phyz identification stack.
//!
//! `Model` is the static description of a mechanism (topology, inertias, joint
//! types and joint-side coefficients). `State` holds generalized coordinates.
//! `ParameterBasis` fixes the layout of the dynamic-parameter vector that
//! regressors are built against.

pub mod basis;
pub mod body;
pub mod config;
pub mod error;
pub mod joint;
pub mod model;
pub mod presets;
pub mod state;

pub use basis::{FrictionTerms, Parameter, ParameterBasis, ParameterKind};
pub use body::Body;
pub use config::{InertiaConfig, JointConfig, LinkConfig, MechanismConfig};
pub use error::{ModelError, Result};
pub use joint::{Joint, JointType};
pub use model::{Model, ModelBuilder};
pub use state::State;
