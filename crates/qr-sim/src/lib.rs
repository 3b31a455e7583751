//! Single-trajectory rollout for quadreach dynamics models.
//!
//! Provides:
//! - Fixed-step RK4 and forward Euler integrators
//! - Control policies (constant or closure) closed around a model
//! - A rollout runner that commits every step to the model's state history

pub mod error;
pub mod integrator;
pub mod model;
pub mod policy;
pub mod sim;

pub use error::{SimError, SimResult};
pub use integrator::{ForwardEuler, Integrator, RK4};
pub use model::{ClosedLoop, TransientModel};
pub use policy::{ConstantControl, ControlPolicy};
pub use sim::{IntegratorType, SimOptions, SimRecord, rollout};
