//! Current state plus append-only history of past states.

use qr_core::ensure_all_finite;

use crate::error::{DynamicsResult, check_len};

/// Owned state log for one model instance.
///
/// The history holds every state that was current before an
/// [`StateLog::advance`] call, oldest first. The derivative evaluator never
/// reads it.
#[derive(Clone, Debug, PartialEq)]
pub struct StateLog {
    current: Vec<f64>,
    history: Vec<Vec<f64>>,
}

impl StateLog {
    /// Start a log at `initial` with an empty history.
    pub fn new(initial: Vec<f64>) -> DynamicsResult<Self> {
        ensure_all_finite(&initial, "initial state")?;
        Ok(Self {
            current: initial,
            history: Vec::new(),
        })
    }

    pub fn current(&self) -> &[f64] {
        &self.current
    }

    pub fn history(&self) -> &[Vec<f64>] {
        &self.history
    }

    pub fn dim(&self) -> usize {
        self.current.len()
    }

    /// Make `next` current and push the previous state onto the history.
    pub fn advance(&mut self, next: Vec<f64>) -> DynamicsResult<()> {
        check_len("state", self.current.len(), next.len())?;
        ensure_all_finite(&next, "state")?;
        let prev = std::mem::replace(&mut self.current, next);
        self.history.push(prev);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DynamicsError;

    #[test]
    fn starts_with_empty_history() {
        let log = StateLog::new(vec![0.0, 1.0]).unwrap();
        assert_eq!(log.current(), &[0.0, 1.0]);
        assert!(log.history().is_empty());
        assert_eq!(log.dim(), 2);
    }

    #[test]
    fn advance_appends_previous_state() {
        let mut log = StateLog::new(vec![0.0, 0.0]).unwrap();
        log.advance(vec![1.0, 0.5]).unwrap();
        log.advance(vec![2.0, 1.0]).unwrap();

        assert_eq!(log.current(), &[2.0, 1.0]);
        assert_eq!(log.history(), &[vec![0.0, 0.0], vec![1.0, 0.5]]);
    }

    #[test]
    fn advance_rejects_wrong_length() {
        let mut log = StateLog::new(vec![0.0, 0.0]).unwrap();
        let err = log.advance(vec![1.0]).unwrap_err();
        assert_eq!(
            err,
            DynamicsError::LengthMismatch {
                what: "state",
                expected: 2,
                actual: 1
            }
        );
        assert!(log.history().is_empty());
    }

    #[test]
    fn rejects_non_finite_states() {
        assert!(StateLog::new(vec![f64::NAN]).is_err());
        let mut log = StateLog::new(vec![0.0]).unwrap();
        assert!(log.advance(vec![f64::INFINITY]).is_err());
        assert_eq!(log.current(), &[0.0]);
    }
}
