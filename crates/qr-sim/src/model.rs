//! TransientModel trait and the closed-loop adapter over a dynamics model.

use nalgebra::DVector;
use qr_dynamics::{DynamicsModel, Repr};

use crate::error::{SimError, SimResult};
use crate::policy::ControlPolicy;

/// Trait for autonomous systems the fixed-step integrators can advance.
///
/// A TransientModel must implement:
/// - RHS (right-hand side) computation: x_dot = f(t, x)
///
/// State arithmetic uses `DVector<f64>`.
pub trait TransientModel {
    /// Compute state derivative dxdt = f(t, x).
    fn rhs(&self, t: f64, x: &DVector<f64>) -> SimResult<DVector<f64>>;
}

/// A dynamics model with its control channels closed by a policy.
///
/// Controls are clamped to the model's bounds when `clamp_controls` is set;
/// the dynamics themselves never clamp.
pub struct ClosedLoop<'a, M: DynamicsModel + ?Sized, P: ControlPolicy + ?Sized> {
    model: &'a M,
    policy: &'a P,
    clamp_controls: bool,
}

impl<'a, M: DynamicsModel + ?Sized, P: ControlPolicy + ?Sized> ClosedLoop<'a, M, P> {
    pub fn new(model: &'a M, policy: &'a P, clamp_controls: bool) -> Self {
        Self {
            model,
            policy,
            clamp_controls,
        }
    }

    /// Control applied at `(t, x)`, after optional clamping.
    pub fn control(&self, t: f64, x: &[f64]) -> Vec<f64> {
        let mut u = self.policy.control(t, x);
        if self.clamp_controls {
            for (v, bound) in u.iter_mut().zip(self.model.control_bounds()) {
                *v = bound.clamp(*v);
            }
        }
        u
    }
}

impl<M: DynamicsModel + ?Sized, P: ControlPolicy + ?Sized> TransientModel for ClosedLoop<'_, M, P> {
    fn rhs(&self, t: f64, x: &DVector<f64>) -> SimResult<DVector<f64>> {
        let u = self.control(t, x.as_slice());
        let dx = self
            .model
            .evaluate_derivative(t, &Repr::Scalar(x.as_slice().to_vec()), &Repr::Scalar(u), None)?
            .into_scalar()
            .ok_or(SimError::InvalidArg {
                what: "scalar state produced a batched derivative",
            })?;
        Ok(DVector::from_vec(dx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::ConstantControl;
    use qr_dynamics::ReducedLateralModel;

    #[test]
    fn rhs_matches_direct_evaluation() {
        let model = ReducedLateralModel::with_defaults(vec![0.0, 0.0]).unwrap();
        let policy = ConstantControl::new(vec![0.07, 0.07, 1.0]);
        let sys = ClosedLoop::new(&model, &policy, false);

        let dx = sys.rhs(0.0, &DVector::from_vec(vec![0.0, 0.0])).unwrap();
        assert_eq!(dx.as_slice(), &[0.0, 1.0]);
    }

    #[test]
    fn controls_clamped_to_bounds() {
        let model = ReducedLateralModel::with_defaults(vec![0.0, 0.0]).unwrap();
        let policy = ConstantControl::new(vec![0.5, -0.1, 10.0]);

        let clamped = ClosedLoop::new(&model, &policy, true);
        let u = clamped.control(0.0, &[0.0, 0.0]);
        assert_eq!(u[0], 0.14);
        assert_eq!(u[1], 0.0);
        assert_eq!(u[2], std::f64::consts::TAU);

        let raw = ClosedLoop::new(&model, &policy, false);
        assert_eq!(raw.control(0.0, &[0.0, 0.0]), vec![0.5, -0.1, 10.0]);
    }

    #[test]
    fn policy_with_wrong_length_surfaces_dynamics_error() {
        let model = ReducedLateralModel::with_defaults(vec![0.0, 0.0]).unwrap();
        let policy = ConstantControl::new(vec![0.1]);
        let sys = ClosedLoop::new(&model, &policy, true);
        let err = sys.rhs(0.0, &DVector::zeros(2)).unwrap_err();
        assert!(matches!(err, SimError::Dynamics(_)));
    }
}
