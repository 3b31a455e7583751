//! Closed intervals used as per-channel box constraints.

use crate::error::{CoreError, CoreResult};
use crate::numeric::{Real, ensure_finite};

/// Closed interval `[min, max]` with `min <= max`.
///
/// Control bounds are stored and exposed to the solver; the dynamics never
/// clamp against them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Interval {
    min: Real,
    max: Real,
}

impl Interval {
    /// Create an interval, rejecting `min > max` and non-finite endpoints.
    ///
    /// `what` names the channel in the returned error.
    pub fn new(min: Real, max: Real, what: &'static str) -> CoreResult<Self> {
        ensure_finite(min, what)?;
        ensure_finite(max, what)?;
        if min > max {
            return Err(CoreError::InvalidBounds { what, min, max });
        }
        Ok(Self { min, max })
    }

    /// Build from a `[min, max]` pair as stored in configuration files.
    pub fn from_pair(pair: [Real; 2], what: &'static str) -> CoreResult<Self> {
        Self::new(pair[0], pair[1], what)
    }

    pub fn min(&self) -> Real {
        self.min
    }

    pub fn max(&self) -> Real {
        self.max
    }

    pub fn width(&self) -> Real {
        self.max - self.min
    }

    pub fn midpoint(&self) -> Real {
        0.5 * (self.min + self.max)
    }

    pub fn contains(&self, v: Real) -> bool {
        v >= self.min && v <= self.max
    }

    pub fn clamp(&self, v: Real) -> Real {
        v.clamp(self.min, self.max)
    }

    /// Map a value in `[min, max]` onto `[-1, 1]`.
    ///
    /// A degenerate interval maps everything to 0.
    pub fn normalize(&self, v: Real) -> Real {
        let w = self.width();
        if w == 0.0 {
            return 0.0;
        }
        2.0 * (v - self.min) / w - 1.0
    }

    /// Inverse of [`Interval::normalize`]: map `[-1, 1]` back onto `[min, max]`.
    pub fn denormalize(&self, v: Real) -> Real {
        (v + 1.0) / 2.0 * self.width() + self.min
    }

    pub fn as_pair(&self) -> [Real; 2] {
        [self.min, self.max]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn rejects_inverted_bounds() {
        let err = Interval::new(0.2, 0.1, "T1").unwrap_err();
        assert_eq!(
            err,
            CoreError::InvalidBounds {
                what: "T1",
                min: 0.2,
                max: 0.1
            }
        );
    }

    #[test]
    fn rejects_nan_endpoint() {
        assert!(Interval::new(Real::NAN, 1.0, "T1").is_err());
    }

    #[test]
    fn degenerate_interval_is_valid() {
        let iv = Interval::new(0.5, 0.5, "rate").unwrap();
        assert_eq!(iv.width(), 0.0);
        assert!(iv.contains(0.5));
        assert_eq!(iv.normalize(0.5), 0.0);
        assert_eq!(iv.denormalize(0.3), 0.5);
    }

    #[test]
    fn clamp_and_contains() {
        let iv = Interval::new(0.0, 0.14, "T1").unwrap();
        assert!(iv.contains(0.07));
        assert!(!iv.contains(-0.01));
        assert_eq!(iv.clamp(0.2), 0.14);
        assert_eq!(iv.clamp(-1.0), 0.0);
        assert_relative_eq!(iv.midpoint(), 0.07, max_relative = 1e-12);
    }

    #[test]
    fn normalize_endpoints() {
        let iv = Interval::new(0.0, 0.103, "T2").unwrap();
        assert_eq!(iv.normalize(0.0), -1.0);
        assert_eq!(iv.normalize(0.103), 1.0);
        assert_eq!(iv.denormalize(-1.0), 0.0);
    }
}
