//! Reduced 2-state lateral model.
//!
//! State `[v_lat, angle]`, controls `[T1, T2, rate]`:
//!
//! ```text
//! dv/dt     = -drag * v / mass + sin(angle) * (T1 + T2) / mass
//! dangle/dt = rate
//! ```

use std::f64::consts::TAU;

use ndarray::{ArrayD, ArrayViewD};
use qr_core::{Interval, ensure_finite, ensure_positive};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{DynamicsError, DynamicsResult, check_len};
use crate::model::DynamicsModel;
use crate::state_log::StateLog;

pub const REDUCED_STATE_DIM: usize = 2;
pub const REDUCED_CONTROL_DIM: usize = 3;

/// Parameter set for [`ReducedLateralModel`].
///
/// Omitted fields take the documented defaults when deserialized.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReducedLateralConfig {
    /// Thrust bound for motor 1 `[min, max]` (N)
    pub t1_range: [f64; 2],
    /// Thrust bound for motor 2 `[min, max]` (N)
    pub t2_range: [f64; 2],
    /// Commanded angular-rate range (rad/s), also the bound of the rate channel
    pub wp_range: [f64; 2],
    /// Vehicle mass (kg)
    pub mass: f64,
    /// Lateral drag coefficient
    pub drag: f64,
}

impl Default for ReducedLateralConfig {
    fn default() -> Self {
        Self {
            t1_range: [0.0, 0.14],
            t2_range: [0.0, 0.14],
            wp_range: [0.0, TAU],
            mass: 0.027,
            drag: 7.93e-12,
        }
    }
}

/// Lateral velocity and angle, driven by two thrusts and a commanded rate.
#[derive(Clone, Debug)]
pub struct ReducedLateralModel {
    config: ReducedLateralConfig,
    /// T1, T2, rate
    bounds: [Interval; REDUCED_CONTROL_DIM],
    log: StateLog,
}

impl ReducedLateralModel {
    /// Create a model at `initial_state`.
    ///
    /// # Errors
    ///
    /// `InvalidBounds` if any range has `min > max`, `LengthMismatch` if the
    /// initial state does not hold two values, `NonPositive` for a mass that
    /// is not strictly positive, `NonFinite` for non-finite parameters.
    pub fn new(initial_state: Vec<f64>, config: ReducedLateralConfig) -> DynamicsResult<Self> {
        check_len("initial state", REDUCED_STATE_DIM, initial_state.len())?;
        ensure_positive(config.mass, "mass")?;
        ensure_finite(config.drag, "drag")?;
        let bounds = [
            Interval::from_pair(config.t1_range, "T1")?,
            Interval::from_pair(config.t2_range, "T2")?,
            Interval::from_pair(config.wp_range, "wp_range")?,
        ];
        let log = StateLog::new(initial_state)?;

        debug!(
            mass = config.mass,
            drag = config.drag,
            "constructed reduced lateral model"
        );
        Ok(Self {
            config,
            bounds,
            log,
        })
    }

    /// Create a model with every parameter at its default.
    pub fn with_defaults(initial_state: Vec<f64>) -> DynamicsResult<Self> {
        Self::new(initial_state, ReducedLateralConfig::default())
    }

    pub fn config(&self) -> &ReducedLateralConfig {
        &self.config
    }

    pub fn mass(&self) -> f64 {
        self.config.mass
    }

    pub fn drag(&self) -> f64 {
        self.config.drag
    }

    pub fn wp_range(&self) -> Interval {
        self.bounds[2]
    }
}

impl DynamicsModel for ReducedLateralModel {
    fn name(&self) -> &'static str {
        "reduced_lateral"
    }

    fn state_dim(&self) -> usize {
        REDUCED_STATE_DIM
    }

    fn control_dim(&self) -> usize {
        REDUCED_CONTROL_DIM
    }

    fn control_bounds(&self) -> &[Interval] {
        &self.bounds
    }

    fn auxiliary_range(&self) -> Option<Interval> {
        Some(self.wp_range())
    }

    fn state_log(&self) -> &StateLog {
        &self.log
    }

    fn state_log_mut(&mut self) -> &mut StateLog {
        &mut self.log
    }

    fn derivative_component(
        &self,
        dim: usize,
        x: &[ArrayViewD<'_, f64>],
        u: &[ArrayViewD<'_, f64>],
    ) -> DynamicsResult<ArrayD<f64>> {
        check_len("state", REDUCED_STATE_DIM, x.len())?;
        check_len("control", REDUCED_CONTROL_DIM, u.len())?;
        let mass = self.config.mass;
        match dim {
            0 => {
                let thrust = &u[0] + &u[1];
                Ok(-self.config.drag * &x[0] / mass + x[1].mapv(f64::sin) * &thrust / mass)
            }
            1 => Ok(u[2].to_owned()),
            _ => Err(DynamicsError::DimensionOutOfRange {
                dim,
                state_dim: REDUCED_STATE_DIM,
            }),
        }
    }
}
