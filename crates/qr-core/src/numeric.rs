use crate::CoreError;

/// Floating point type used throughout system
pub type Real = f64;

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, CoreError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CoreError::NonFinite { what, value: v })
    }
}

/// Check every entry of a slice with [`ensure_finite`].
pub fn ensure_all_finite(values: &[Real], what: &'static str) -> Result<(), CoreError> {
    values
        .iter()
        .try_for_each(|&v| ensure_finite(v, what).map(|_| ()))
}

/// Finite and strictly greater than zero, for parameters used as divisors.
pub fn ensure_positive(v: Real, what: &'static str) -> Result<Real, CoreError> {
    let v = ensure_finite(v, what)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(CoreError::NonPositive { what, value: v })
    }
}
