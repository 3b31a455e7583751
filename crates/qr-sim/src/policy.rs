//! Control policies that close the loop during a rollout.

/// Maps `(t, x)` to a control vector.
pub trait ControlPolicy {
    fn control(&self, t: f64, x: &[f64]) -> Vec<f64>;
}

/// The same control at every time and state.
#[derive(Clone, Debug, PartialEq)]
pub struct ConstantControl {
    pub u: Vec<f64>,
}

impl ConstantControl {
    pub fn new(u: Vec<f64>) -> Self {
        Self { u }
    }
}

impl ControlPolicy for ConstantControl {
    fn control(&self, _t: f64, _x: &[f64]) -> Vec<f64> {
        self.u.clone()
    }
}

impl<F> ControlPolicy for F
where
    F: Fn(f64, &[f64]) -> Vec<f64>,
{
    fn control(&self, t: f64, x: &[f64]) -> Vec<f64> {
        self(t, x)
    }
}
