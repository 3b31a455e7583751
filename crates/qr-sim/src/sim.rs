//! Trajectory rollout and result recording.

use nalgebra::DVector;
use qr_dynamics::DynamicsModel;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{SimError, SimResult};
use crate::integrator::{ForwardEuler, Integrator, RK4};
use crate::model::ClosedLoop;
use crate::policy::ControlPolicy;

/// Integrator selection for rollouts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegratorType {
    /// 4th-order Runge-Kutta (default, most accurate, 4 rhs calls per step).
    #[default]
    #[serde(rename = "rk4")]
    RK4,
    /// Forward Euler (1st-order, faster, 1 rhs call per step).
    ForwardEuler,
}

/// Options for rollouts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimOptions {
    /// Fixed time step (seconds)
    pub dt: f64,
    /// Final simulation time (seconds)
    pub t_end: f64,
    /// Maximum number of steps (safety limit)
    pub max_steps: usize,
    /// Record every N-th step (decimation)
    pub record_every: usize,
    /// Integrator type (default: RK4)
    pub integrator: IntegratorType,
    /// Clamp policy output to the model's control bounds
    pub clamp_controls: bool,
}

impl Default for SimOptions {
    fn default() -> Self {
        Self {
            dt: 1e-3,
            t_end: 1.0,
            max_steps: 100_000,
            record_every: 10,
            integrator: IntegratorType::default(),
            clamp_controls: true,
        }
    }
}

impl SimOptions {
    pub fn validate(&self) -> SimResult<()> {
        if self.dt <= 0.0 || !self.dt.is_finite() {
            return Err(SimError::InvalidArg {
                what: "dt must be positive",
            });
        }
        if self.t_end < 0.0 || !self.t_end.is_finite() {
            return Err(SimError::InvalidArg {
                what: "t_end must be non-negative",
            });
        }
        if self.max_steps == 0 {
            return Err(SimError::InvalidArg {
                what: "max_steps must be positive",
            });
        }
        if self.record_every == 0 {
            return Err(SimError::InvalidArg {
                what: "record_every must be positive",
            });
        }
        Ok(())
    }
}

/// Record of rollout results.
#[derive(Clone, Debug, Serialize)]
pub struct SimRecord {
    /// Time points (seconds)
    pub t: Vec<f64>,
    /// State snapshots
    pub x: Vec<Vec<f64>>,
}

/// Roll `model` forward from its current state under `policy`.
///
/// Every integration step is committed with
/// [`DynamicsModel::advance_state`], so the model's history grows by one
/// entry per step. The returned record is decimated by `record_every` and
/// always holds the initial and final states.
pub fn rollout<M, P>(model: &mut M, policy: &P, opts: &SimOptions) -> SimResult<SimRecord>
where
    M: DynamicsModel + ?Sized,
    P: ControlPolicy + ?Sized,
{
    opts.validate()?;

    // Fixed step count; the tolerance absorbs t_end/dt landing just above an integer
    let planned = (opts.t_end / opts.dt - 1e-9).ceil().max(0.0) as usize;
    let n_steps = planned.min(opts.max_steps);

    let mut t = 0.0;
    let mut x = DVector::from_column_slice(model.state());

    let mut t_record = vec![t];
    let mut x_record = vec![x.as_slice().to_vec()];

    debug!(
        model = model.name(),
        dt = opts.dt,
        t_end = opts.t_end,
        integrator = ?opts.integrator,
        "starting rollout"
    );

    let mut step = 0;
    while step < n_steps {
        let sys = ClosedLoop::new(&*model, policy, opts.clamp_controls);
        x = match opts.integrator {
            IntegratorType::RK4 => RK4.step(&sys, t, &x, opts.dt)?,
            IntegratorType::ForwardEuler => ForwardEuler.step(&sys, t, &x, opts.dt)?,
        };
        step += 1;
        t = step as f64 * opts.dt;

        if x.iter().any(|v| !v.is_finite()) {
            warn!(model = model.name(), t, step, "state diverged");
            return Err(SimError::NonPhysical {
                what: "non-finite state",
                t,
            });
        }
        model.advance_state(x.as_slice().to_vec())?;

        if step % opts.record_every == 0 {
            t_record.push(t);
            x_record.push(x.as_slice().to_vec());
        }
    }

    // Always record final state
    if step % opts.record_every != 0 {
        t_record.push(t);
        x_record.push(x.as_slice().to_vec());
    }

    if planned > opts.max_steps {
        warn!(step, t, planned, "rollout stopped at max_steps before t_end");
    }
    debug!(steps = step, t, "rollout finished");

    Ok(SimRecord {
        t: t_record,
        x: x_record,
    })
}
