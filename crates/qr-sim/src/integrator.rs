//! Fixed-step time integrators.

use nalgebra::DVector;

use crate::error::SimResult;
use crate::model::TransientModel;

/// Trait for time integrators.
pub trait Integrator {
    /// Advance state by one time step using the transient model.
    fn step<M: TransientModel + ?Sized>(
        &self,
        model: &M,
        t: f64,
        x: &DVector<f64>,
        dt: f64,
    ) -> SimResult<DVector<f64>>;
}

/// Classical RK4 (Runge-Kutta 4th order) integrator.
#[derive(Clone, Debug)]
pub struct RK4;

impl Integrator for RK4 {
    fn step<M: TransientModel + ?Sized>(
        &self,
        model: &M,
        t: f64,
        x: &DVector<f64>,
        dt: f64,
    ) -> SimResult<DVector<f64>> {
        let k1 = model.rhs(t, x)?;
        let k2 = model.rhs(t + 0.5 * dt, &(x + &k1 * (0.5 * dt)))?;
        let k3 = model.rhs(t + 0.5 * dt, &(x + &k2 * (0.5 * dt)))?;
        let k4 = model.rhs(t + dt, &(x + &k3 * dt))?;

        // x_new = x + (dt/6) * (k1 + 2*k2 + 2*k3 + k4)
        let k_sum = k1 + k2 * 2.0 + k3 * 2.0 + k4;
        Ok(x + k_sum * (dt / 6.0))
    }
}

/// Forward Euler (explicit, 1st order, fast for testing).
/// Calls rhs() once per step instead of 4 times (RK4).
#[derive(Clone, Debug)]
pub struct ForwardEuler;

impl Integrator for ForwardEuler {
    fn step<M: TransientModel + ?Sized>(
        &self,
        model: &M,
        t: f64,
        x: &DVector<f64>,
        dt: f64,
    ) -> SimResult<DVector<f64>> {
        let xdot = model.rhs(t, x)?;
        Ok(x + xdot * dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// dx/dt = -x
    struct Decay;

    impl TransientModel for Decay {
        fn rhs(&self, _t: f64, x: &DVector<f64>) -> SimResult<DVector<f64>> {
            Ok(-x)
        }
    }

    #[test]
    fn euler_single_step() {
        let x = DVector::from_vec(vec![1.0, 2.0]);
        let next = ForwardEuler.step(&Decay, 0.0, &x, 0.1).unwrap();
        assert_relative_eq!(next[0], 0.9, max_relative = 1e-12);
        assert_relative_eq!(next[1], 1.8, max_relative = 1e-12);
    }

    #[test]
    fn rk4_tracks_exponential_decay() {
        let mut x = DVector::from_vec(vec![1.0]);
        let dt = 0.1;
        for i in 0..10 {
            x = RK4.step(&Decay, i as f64 * dt, &x, dt).unwrap();
        }
        assert_relative_eq!(x[0], (-1.0_f64).exp(), max_relative = 1e-6);
    }
}
