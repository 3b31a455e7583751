//! Parallel evaluation over contiguous grid partitions.
//!
//! Evaluation is pure, so a batched input can be split along its first
//! axis, evaluated on the rayon pool and stitched back together. The result
//! is identical to a single [`DynamicsModel::evaluate_derivative`] call.

use ndarray::{ArrayD, ArrayViewD, Axis, Slice, concatenate};
use rayon::prelude::*;
use tracing::debug;

use crate::dispatch::common_shape;
use crate::error::{DynamicsError, DynamicsResult, check_len};
use crate::model::DynamicsModel;
use crate::repr::Repr;

/// Evaluate `model` over `partitions` row blocks of a batched input.
///
/// Scalar input, 0-d batches and `partitions <= 1` fall through to a plain
/// evaluation. Control arrays whose first axis spans the batch are split
/// alongside the state; lower-rank or unit-length controls are shared.
pub fn evaluate_partitioned<M: DynamicsModel + ?Sized>(
    model: &M,
    t: f64,
    state: &Repr,
    control: &Repr,
    partitions: usize,
) -> DynamicsResult<Repr> {
    let Repr::Batched(xs) = state else {
        return model.evaluate_derivative(t, state, control, None);
    };
    check_len("state", model.state_dim(), xs.len())?;
    let shape = common_shape(xs)?;
    let rows = shape.first().copied().unwrap_or(0);
    if partitions <= 1 || rows < 2 {
        return model.evaluate_derivative(t, state, control, None);
    }

    let ndim = shape.len();
    let ranges = partition_rows(rows, partitions);
    debug!(
        model = model.name(),
        rows,
        partitions = ranges.len(),
        "partitioned derivative evaluation"
    );

    let parts = ranges
        .into_par_iter()
        .map(|(lo, hi)| {
            let x_part = Repr::Batched(xs.iter().map(|a| slice_rows(a, lo, hi)).collect());
            let u_part = match control {
                Repr::Scalar(_) => control.clone(),
                Repr::Batched(us) => Repr::Batched(
                    us.iter()
                        .map(|a| {
                            if a.ndim() == ndim && a.shape()[0] == rows {
                                slice_rows(a, lo, hi)
                            } else {
                                a.clone()
                            }
                        })
                        .collect(),
                ),
            };
            model.evaluate_derivative(t, &x_part, &u_part, None)
        })
        .collect::<DynamicsResult<Vec<_>>>()?;

    let mut out = Vec::with_capacity(model.state_dim());
    for dim in 0..model.state_dim() {
        let views = parts
            .iter()
            .map(|p| {
                p.as_batched()
                    .and_then(|a| a.get(dim))
                    .map(|a| a.view())
                    .ok_or(DynamicsError::Invariant {
                        what: "partition result must be batched with one array per state",
                    })
            })
            .collect::<DynamicsResult<Vec<ArrayViewD<'_, f64>>>>()?;
        let joined = concatenate(Axis(0), &views).map_err(|_| DynamicsError::ShapeMismatch {
            what: "partition results",
            expected: shape.clone(),
            actual: views.first().map(|v| v.shape().to_vec()).unwrap_or_default(),
        })?;
        out.push(joined);
    }
    Ok(Repr::Batched(out))
}

/// Split `0..rows` into at most `partitions` contiguous, near-equal ranges.
pub fn partition_rows(rows: usize, partitions: usize) -> Vec<(usize, usize)> {
    let parts = partitions.clamp(1, rows.max(1));
    let base = rows / parts;
    let extra = rows % parts;
    let mut ranges = Vec::with_capacity(parts);
    let mut lo = 0;
    for i in 0..parts {
        let len = base + usize::from(i < extra);
        ranges.push((lo, lo + len));
        lo += len;
    }
    ranges
}

fn slice_rows(a: &ArrayD<f64>, lo: usize, hi: usize) -> ArrayD<f64> {
    a.slice_axis(Axis(0), Slice::from(lo..hi)).to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranges_cover_rows_exactly() {
        assert_eq!(partition_rows(10, 3), vec![(0, 4), (4, 7), (7, 10)]);
        assert_eq!(partition_rows(2, 8), vec![(0, 1), (1, 2)]);
        assert_eq!(partition_rows(5, 1), vec![(0, 5)]);
    }

    #[test]
    fn zero_partitions_treated_as_one() {
        assert_eq!(partition_rows(4, 0), vec![(0, 4)]);
    }
}
