//! Dynamics models for Hamilton–Jacobi reachability of small rigid-body vehicles.
//!
//! Provides:
//! - [`Repr`]: scalar (single point) or batched (per-dimension grid) encoding
//! - [`DynamicsModel`]: shared contract with representation-mirroring dispatch
//! - [`ReducedLateralModel`]: 2-state lateral velocity / angle model
//! - [`FullPlanarModel`]: 4-state planar velocity / attitude model
//! - [`StateLog`]: current state plus append-only history
//! - [`evaluate_partitioned`]: rayon-parallel evaluation over grid row blocks
//!
//! # Example
//!
//! ```
//! use qr_dynamics::{DynamicsModel, ReducedLateralModel, Repr};
//!
//! let model = ReducedLateralModel::with_defaults(vec![0.0, 0.0]).unwrap();
//! let dx = model
//!     .evaluate_derivative(
//!         0.0,
//!         &Repr::Scalar(vec![0.0, 0.0]),
//!         &Repr::Scalar(vec![0.07, 0.07, 1.0]),
//!         None,
//!     )
//!     .unwrap();
//! assert_eq!(dx, Repr::Scalar(vec![0.0, 1.0]));
//! ```

pub mod error;
pub mod model;
pub mod partition;
pub mod planar;
pub mod reduced;
pub mod repr;
pub mod state_log;

// Internal modules
mod dispatch;

pub use error::{DynamicsError, DynamicsResult};
pub use model::DynamicsModel;
pub use partition::{evaluate_partitioned, partition_rows};
pub use planar::{FullPlanarConfig, FullPlanarModel, PLANAR_CONTROL_DIM, PLANAR_STATE_DIM};
pub use reduced::{REDUCED_CONTROL_DIM, REDUCED_STATE_DIM, ReducedLateralConfig, ReducedLateralModel};
pub use repr::Repr;
pub use state_log::StateLog;
