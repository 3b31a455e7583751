//! Full 4-state planar model.
//!
//! State `[vx, vz, angle, omega]`, controls `[T1, T2]`:
//!
//! ```text
//! dvx/dt    = -trans_drag * vx / mass + sin(angle) * (T1 + T2) / mass
//! dvz/dt    = -(mass * gravity + trans_drag * vz) / mass + cos(angle) * (T1 + T2) / mass
//! dangle/dt = omega
//! domega/dt = -inertia_yy * rot_drag * omega + length * T1 / inertia_yy - length * T2 / inertia_yy
//! ```
//!
//! The rotational drag term is kept in the `inertia_yy * rot_drag` form.
//! A rigid-body derivation gives `rot_drag * omega / inertia_yy`; confirm
//! against the vehicle's physical model before relying on `domega/dt` for
//! non-zero `omega`.

use ndarray::{ArrayD, ArrayViewD};
use qr_core::{Interval, ensure_finite, ensure_positive};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{DynamicsError, DynamicsResult, check_len};
use crate::model::DynamicsModel;
use crate::state_log::StateLog;

pub const PLANAR_STATE_DIM: usize = 4;
pub const PLANAR_CONTROL_DIM: usize = 2;

/// Parameter set for [`FullPlanarModel`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FullPlanarConfig {
    /// Thrust bound for motor 1 `[min, max]` (N)
    pub t1_range: [f64; 2],
    /// Thrust bound for motor 2 `[min, max]` (N)
    pub t2_range: [f64; 2],
    /// Vehicle mass (kg)
    pub mass: f64,
    /// Translational drag coefficient
    pub trans_drag: f64,
    /// Rotational drag coefficient
    pub rot_drag: f64,
    /// Arm length from centre of mass to rotor (m)
    pub length: f64,
    /// Moment of inertia about the pitch axis (kg·m²)
    pub inertia_yy: f64,
    /// Gravitational acceleration (m/s²)
    pub gravity: f64,
}

impl Default for FullPlanarConfig {
    fn default() -> Self {
        Self {
            t1_range: [0.0, 0.103],
            t2_range: [0.0, 0.103],
            mass: 0.027,
            trans_drag: 9.17e-7,
            rot_drag: 10.31e-7,
            length: 0.039,
            inertia_yy: 1.6e-5,
            gravity: 9.81,
        }
    }
}

/// Planar velocities, pitch angle and pitch rate under two thrusts.
#[derive(Clone, Debug)]
pub struct FullPlanarModel {
    config: FullPlanarConfig,
    bounds: [Interval; PLANAR_CONTROL_DIM],
    log: StateLog,
}

impl FullPlanarModel {
    /// Create a model at `initial_state`.
    ///
    /// # Errors
    ///
    /// `InvalidBounds` if a thrust range has `min > max`, `LengthMismatch`
    /// if the initial state does not hold four values, `NonPositive` unless
    /// `mass` and `inertia_yy` are strictly positive, `NonFinite` for
    /// non-finite parameters.
    pub fn new(initial_state: Vec<f64>, config: FullPlanarConfig) -> DynamicsResult<Self> {
        check_len("initial state", PLANAR_STATE_DIM, initial_state.len())?;
        ensure_positive(config.mass, "mass")?;
        ensure_positive(config.inertia_yy, "inertia_yy")?;
        for (value, what) in [
            (config.trans_drag, "trans_drag"),
            (config.rot_drag, "rot_drag"),
            (config.length, "length"),
            (config.gravity, "gravity"),
        ] {
            ensure_finite(value, what)?;
        }
        let bounds = [
            Interval::from_pair(config.t1_range, "T1")?,
            Interval::from_pair(config.t2_range, "T2")?,
        ];
        let log = StateLog::new(initial_state)?;

        debug!(
            mass = config.mass,
            inertia_yy = config.inertia_yy,
            gravity = config.gravity,
            "constructed full planar model"
        );
        Ok(Self {
            config,
            bounds,
            log,
        })
    }

    pub fn with_defaults(initial_state: Vec<f64>) -> DynamicsResult<Self> {
        Self::new(initial_state, FullPlanarConfig::default())
    }

    pub fn config(&self) -> &FullPlanarConfig {
        &self.config
    }
}

impl DynamicsModel for FullPlanarModel {
    fn name(&self) -> &'static str {
        "full_planar"
    }

    fn state_dim(&self) -> usize {
        PLANAR_STATE_DIM
    }

    fn control_dim(&self) -> usize {
        PLANAR_CONTROL_DIM
    }

    fn control_bounds(&self) -> &[Interval] {
        &self.bounds
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
        check_len("state", PLANAR_STATE_DIM, x.len())?;
        check_len("control", PLANAR_CONTROL_DIM, u.len())?;
        let c = &self.config;
        match dim {
            0 => {
                let thrust = &u[0] + &u[1];
                Ok(-c.trans_drag * &x[0] / c.mass + x[2].mapv(f64::sin) * &thrust / c.mass)
            }
            1 => {
                let thrust = &u[0] + &u[1];
                let resist = c.trans_drag * &x[1] + c.mass * c.gravity;
                Ok(-resist / c.mass + x[2].mapv(f64::cos) * &thrust / c.mass)
            }
            2 => Ok(x[3].to_owned()),
            3 => {
                let drag = -(c.inertia_yy * c.rot_drag) * &x[3];
                let torque = c.length * &u[0] / c.inertia_yy - c.length * &u[1] / c.inertia_yy;
                Ok(drag + torque)
            }
            _ => Err(DynamicsError::DimensionOutOfRange {
                dim,
                state_dim: PLANAR_STATE_DIM,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repr::Repr;
    use approx::assert_relative_eq;

    fn eval(state: [f64; 4], control: [f64; 2]) -> Vec<f64> {
        let model = FullPlanarModel::with_defaults(vec![0.0; 4]).unwrap();
        model
            .evaluate_derivative(
                0.0,
                &Repr::Scalar(state.to_vec()),
                &Repr::Scalar(control.to_vec()),
                None,
            )
            .unwrap()
            .into_scalar()
            .unwrap()
    }

    #[test]
    fn defaults_match_documented_values() {
        let model = FullPlanarModel::with_defaults(vec![0.0; 4]).unwrap();
        let c = model.config();
        assert_eq!(c.mass, 0.027);
        assert_eq!(c.trans_drag, 9.17e-7);
        assert_eq!(c.rot_drag, 10.31e-7);
        assert_eq!(c.length, 0.039);
        assert_eq!(c.inertia_yy, 1.6e-5);
        assert_eq!(c.gravity, 9.81);
        let b = model.control_bounds();
        assert_eq!(b.len(), 2);
        assert_eq!(b[0].as_pair(), [0.0, 0.103]);
        assert_eq!(b[1].as_pair(), [0.0, 0.103]);
        assert_eq!(model.auxiliary_range(), None);
        assert_eq!((model.state_dim(), model.control_dim()), (4, 2));
    }

    #[test]
    fn symmetric_thrust_at_rest() {
        let dx = eval([0.0; 4], [0.05, 0.05]);
        assert_eq!(dx[0], 0.0);
        assert_relative_eq!(dx[1], -9.81 + 0.1 / 0.027, max_relative = 1e-12);
        assert_eq!(dx[2], 0.0);
        assert_eq!(dx[3], 0.0);
    }

    #[test]
    fn zero_thrust_at_rest_is_free_fall() {
        let dx = eval([0.0; 4], [0.0, 0.0]);
        assert_relative_eq!(dx[1], -9.81, max_relative = 1e-12);
    }

    #[test]
    fn angle_tracks_angular_rate() {
        let dx = eval([0.0, 0.0, 0.2, 1.5], [0.0, 0.0]);
        assert_eq!(dx[2], 1.5);
    }

    #[test]
    fn differential_thrust_pitches() {
        let dx = eval([0.0; 4], [0.1, 0.0]);
        assert_relative_eq!(dx[3], 0.039 * 0.1 / 1.6e-5, max_relative = 1e-12);

        let dx = eval([0.0; 4], [0.0, 0.1]);
        assert_relative_eq!(dx[3], -0.039 * 0.1 / 1.6e-5, max_relative = 1e-12);
    }

    #[test]
    fn rotational_drag_uses_inertia_product() {
        let omega = 2.0;
        let dx = eval([0.0, 0.0, 0.0, omega], [0.0, 0.0]);
        assert_relative_eq!(dx[3], -1.6e-5 * 10.31e-7 * omega, max_relative = 1e-12);
    }

    #[test]
    fn general_point_matches_closed_form() {
        let (vx, vz, a, w): (f64, f64, f64, f64) = (0.3, -0.2, 0.4, 0.7);
        let (t1, t2) = (0.06, 0.03);
        let c = FullPlanarConfig::default();
        let dx = eval([vx, vz, a, w], [t1, t2]);

        let tot = t1 + t2;
        assert_relative_eq!(
            dx[0],
            -c.trans_drag * vx / c.mass + a.sin() * tot / c.mass,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            dx[1],
            -(c.mass * c.gravity + c.trans_drag * vz) / c.mass + a.cos() * tot / c.mass,
            max_relative = 1e-12
        );
        assert_eq!(dx[2], w);
        assert_relative_eq!(
            dx[3],
            -c.inertia_yy * c.rot_drag * w + c.length * t1 / c.inertia_yy
                - c.length * t2 / c.inertia_yy,
            max_relative = 1e-12
        );
    }

    #[test]
    fn inverted_thrust_bounds_rejected() {
        let config = FullPlanarConfig {
            t1_range: [0.2, 0.1],
            ..Default::default()
        };
        let err = FullPlanarModel::new(vec![0.0; 4], config).unwrap_err();
        assert!(matches!(err, DynamicsError::InvalidBounds { what: "T1", .. }));
    }

    #[test]
    fn non_finite_parameter_rejected() {
        let config = FullPlanarConfig {
            gravity: f64::NAN,
            ..Default::default()
        };
        let err = FullPlanarModel::new(vec![0.0; 4], config).unwrap_err();
        assert!(matches!(err, DynamicsError::NonFinite { what: "gravity", .. }));
    }

    #[test]
    fn short_state_views_rejected_by_component() {
        use ndarray::arr0;

        let model = FullPlanarModel::with_defaults(vec![0.0; 4]).unwrap();
        let x: Vec<_> = (0..3).map(|_| arr0(0.0).into_dyn()).collect();
        let u: Vec<_> = (0..2).map(|_| arr0(0.0).into_dyn()).collect();
        let xv: Vec<_> = x.iter().map(|a| a.view()).collect();
        let uv: Vec<_> = u.iter().map(|a| a.view()).collect();

        let err = model.derivative_component(3, &xv, &uv).unwrap_err();
        assert_eq!(
            err,
            DynamicsError::LengthMismatch {
                what: "state",
                expected: 4,
                actual: 3
            }
        );
    }

    #[test]
    fn non_positive_divisors_rejected() {
        let config = FullPlanarConfig {
            inertia_yy: 0.0,
            ..Default::default()
        };
        let err = FullPlanarModel::new(vec![0.0; 4], config).unwrap_err();
        assert!(matches!(err, DynamicsError::NonPositive { what: "inertia_yy", .. }));

        let config = FullPlanarConfig {
            mass: -0.027,
            ..Default::default()
        };
        let err = FullPlanarModel::new(vec![0.0; 4], config).unwrap_err();
        assert!(matches!(err, DynamicsError::NonPositive { what: "mass", .. }));
    }

    #[test]
    fn flat_control_with_wrong_length_rejected() {
        let model = FullPlanarModel::with_defaults(vec![0.0; 4]).unwrap();
        let err = model
            .evaluate_derivative(
                0.0,
                &Repr::Scalar(vec![0.0; 4]),
                &Repr::Scalar(vec![0.0; 3]),
                None,
            )
            .unwrap_err();
        assert_eq!(
            err,
            DynamicsError::LengthMismatch {
                what: "control",
                expected: 2,
                actual: 3
            }
        );
    }
}
