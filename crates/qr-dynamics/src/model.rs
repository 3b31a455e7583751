//! DynamicsModel trait shared by every vehicle variant.

use ndarray::{ArrayD, ArrayViewD};
use qr_core::Interval;

use crate::dispatch;
use crate::error::{DynamicsError, DynamicsResult, check_len};
use crate::repr::Repr;
use crate::state_log::StateLog;

/// Time-invariant ODE right-hand side with box-constrained controls.
///
/// A model must implement:
/// - dimensional metadata (state, control, disturbance)
/// - control bounds for the solver to optimise over
/// - one closed-form derivative per state dimension, evaluated elementwise
///
/// Representation handling (scalar vs batched) is provided and identical for
/// every model: the output of [`DynamicsModel::evaluate_derivative`] always
/// uses the same encoding as its `state` argument.
pub trait DynamicsModel: Send + Sync {
    /// Short model name used in logs.
    fn name(&self) -> &'static str;

    fn state_dim(&self) -> usize;

    fn control_dim(&self) -> usize;

    /// No variant models an external disturbance channel yet.
    fn disturbance_dim(&self) -> usize {
        0
    }

    /// One closed interval per control channel, in channel order.
    fn control_bounds(&self) -> &[Interval];

    /// Substitute bound for a state channel abstracted away by a reduced model.
    fn auxiliary_range(&self) -> Option<Interval> {
        None
    }

    fn state_log(&self) -> &StateLog;

    fn state_log_mut(&mut self) -> &mut StateLog;

    /// Derivative of state dimension `dim`.
    ///
    /// `x` and `u` hold one view per state/control dimension, all with the
    /// same shape; the result must have that shape too. Indices past
    /// `state_dim()` return `DimensionOutOfRange`, and slices whose lengths
    /// differ from `state_dim()`/`control_dim()` return `LengthMismatch`
    /// rather than panicking.
    fn derivative_component(
        &self,
        dim: usize,
        x: &[ArrayViewD<'_, f64>],
        u: &[ArrayViewD<'_, f64>],
    ) -> DynamicsResult<ArrayD<f64>>;

    /// Compute `dx/dt = f(t, x, u, d)`.
    ///
    /// `t` and `disturbance` are accepted for interface uniformity and are
    /// ignored by time-invariant models without a disturbance channel.
    fn evaluate_derivative(
        &self,
        _t: f64,
        state: &Repr,
        control: &Repr,
        _disturbance: Option<&Repr>,
    ) -> DynamicsResult<Repr> {
        dispatch::evaluate(self, 0..self.state_dim(), state, control)
    }

    /// Compute a single derivative component in the same encoding as `state`.
    fn evaluate_component(
        &self,
        _t: f64,
        dim: usize,
        state: &Repr,
        control: &Repr,
    ) -> DynamicsResult<Repr> {
        if dim >= self.state_dim() {
            return Err(DynamicsError::DimensionOutOfRange {
                dim,
                state_dim: self.state_dim(),
            });
        }
        dispatch::evaluate(self, dim..dim + 1, state, control)
    }

    fn state(&self) -> &[f64] {
        self.state_log().current()
    }

    fn state_history(&self) -> &[Vec<f64>] {
        self.state_log().history()
    }

    /// Replace the current state, appending the old one to the history.
    fn advance_state(&mut self, new_state: Vec<f64>) -> DynamicsResult<()> {
        check_len("state", self.state_dim(), new_state.len())?;
        self.state_log_mut().advance(new_state)
    }
}
