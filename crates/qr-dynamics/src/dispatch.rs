//! Scalar/batched dispatch shared by every model.
//!
//! Scalar input is boxed into 0-d arrays so both encodings run the same
//! per-dimension formulas; the result is unboxed again on the way out.

use std::borrow::Cow;
use std::ops::Range;

use ndarray::{ArrayD, ArrayViewD};
use tracing::trace;

use crate::error::{DynamicsError, DynamicsResult, check_len};
use crate::model::DynamicsModel;
use crate::repr::{Repr, box_scalars, unbox_arrays};

/// Evaluate the components in `dims`, mirroring the encoding of `state`.
pub(crate) fn evaluate<M: DynamicsModel + ?Sized>(
    model: &M,
    dims: Range<usize>,
    state: &Repr,
    control: &Repr,
) -> DynamicsResult<Repr> {
    check_len("state", model.state_dim(), state.len())?;
    check_len("control", model.control_dim(), control.len())?;

    let scalar_in = state.is_scalar();
    let x_arrays: Cow<'_, [ArrayD<f64>]> = match state {
        Repr::Scalar(v) => Cow::Owned(box_scalars(v)),
        Repr::Batched(a) => Cow::Borrowed(a.as_slice()),
    };
    let shape = common_shape(&x_arrays)?;

    let u_boxed;
    let u_arrays: &[ArrayD<f64>] = match control {
        Repr::Scalar(v) => {
            u_boxed = box_scalars(v);
            &u_boxed
        }
        Repr::Batched(a) => a,
    };

    let x: Vec<ArrayViewD<'_, f64>> = x_arrays.iter().map(|a| a.view()).collect();
    let u = u_arrays
        .iter()
        .map(|a| broadcast_to(a, &shape))
        .collect::<DynamicsResult<Vec<_>>>()?;

    trace!(
        model = model.name(),
        batched = !scalar_in,
        shape = ?shape,
        "evaluating derivative"
    );

    let mut out = Vec::with_capacity(dims.len());
    for dim in dims {
        let dx = model.derivative_component(dim, &x, &u)?;
        if dx.shape() != shape.as_slice() {
            return Err(DynamicsError::ShapeMismatch {
                what: "derivative component",
                expected: shape,
                actual: dx.shape().to_vec(),
            });
        }
        out.push(dx);
    }

    if scalar_in {
        unbox_arrays(out).map(Repr::Scalar)
    } else {
        Ok(Repr::Batched(out))
    }
}

/// Shape shared by every per-dimension state array.
pub(crate) fn common_shape(arrays: &[ArrayD<f64>]) -> DynamicsResult<Vec<usize>> {
    let Some(first) = arrays.first() else {
        return Ok(Vec::new());
    };
    let shape = first.shape();
    for a in &arrays[1..] {
        if a.shape() != shape {
            return Err(DynamicsError::ShapeMismatch {
                what: "state arrays",
                expected: shape.to_vec(),
                actual: a.shape().to_vec(),
            });
        }
    }
    Ok(shape.to_vec())
}

fn broadcast_to<'a>(a: &'a ArrayD<f64>, shape: &[usize]) -> DynamicsResult<ArrayViewD<'a, f64>> {
    a.broadcast(shape).ok_or_else(|| DynamicsError::ShapeMismatch {
        what: "control array",
        expected: shape.to_vec(),
        actual: a.shape().to_vec(),
    })
}
