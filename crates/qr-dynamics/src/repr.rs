//! State/control representations accepted by the derivative evaluator.
//!
//! A point is passed as [`Repr::Scalar`], one `f64` per dimension. A whole
//! grid is passed as [`Repr::Batched`], one array per dimension, every array
//! sampling that dimension over the same set of grid cells.

use ndarray::{ArrayD, IxDyn};

use crate::error::{DynamicsError, DynamicsResult};

/// Flat or per-dimension encoding of a state, control or derivative.
#[derive(Clone, Debug, PartialEq)]
pub enum Repr {
    /// One scalar per dimension (a single point).
    Scalar(Vec<f64>),
    /// One array per dimension (a batch of points, e.g. a grid).
    Batched(Vec<ArrayD<f64>>),
}

impl Repr {
    /// Number of dimensions carried, regardless of encoding.
    pub fn len(&self) -> usize {
        match self {
            Repr::Scalar(v) => v.len(),
            Repr::Batched(a) => a.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self, Repr::Scalar(_))
    }

    pub fn as_scalar(&self) -> Option<&[f64]> {
        match self {
            Repr::Scalar(v) => Some(v),
            Repr::Batched(_) => None,
        }
    }

    pub fn as_batched(&self) -> Option<&[ArrayD<f64>]> {
        match self {
            Repr::Scalar(_) => None,
            Repr::Batched(a) => Some(a),
        }
    }

    pub fn into_scalar(self) -> Option<Vec<f64>> {
        match self {
            Repr::Scalar(v) => Some(v),
            Repr::Batched(_) => None,
        }
    }

    pub fn into_batched(self) -> Option<Vec<ArrayD<f64>>> {
        match self {
            Repr::Scalar(_) => None,
            Repr::Batched(a) => Some(a),
        }
    }

    /// Shape of the first per-dimension array; `None` for scalar encodings.
    pub fn batch_shape(&self) -> Option<&[usize]> {
        match self {
            Repr::Scalar(_) => None,
            Repr::Batched(a) => a.first().map(|arr| arr.shape()),
        }
    }

    /// Box every scalar into a 0-d array.
    ///
    /// Batched encodings are returned unchanged.
    pub fn boxed(&self) -> Repr {
        match self {
            Repr::Scalar(v) => Repr::Batched(box_scalars(v)),
            Repr::Batched(_) => self.clone(),
        }
    }

    /// Inverse of [`Repr::boxed`]: unbox arrays that each hold exactly one value.
    pub fn unboxed(self) -> DynamicsResult<Repr> {
        match self {
            Repr::Scalar(_) => Ok(self),
            Repr::Batched(arrays) => unbox_arrays(arrays).map(Repr::Scalar),
        }
    }

    /// Repeat a scalar encoding over a batch of the given shape.
    pub fn broadcast_scalar(values: &[f64], shape: &[usize]) -> Repr {
        Repr::Batched(
            values
                .iter()
                .map(|&v| ArrayD::from_elem(IxDyn(shape), v))
                .collect(),
        )
    }
}

impl From<Vec<f64>> for Repr {
    fn from(v: Vec<f64>) -> Self {
        Repr::Scalar(v)
    }
}

impl From<Vec<ArrayD<f64>>> for Repr {
    fn from(a: Vec<ArrayD<f64>>) -> Self {
        Repr::Batched(a)
    }
}

pub(crate) fn box_scalars(values: &[f64]) -> Vec<ArrayD<f64>> {
    values
        .iter()
        .map(|&v| ArrayD::from_elem(IxDyn(&[]), v))
        .collect()
}

pub(crate) fn unbox_arrays(arrays: Vec<ArrayD<f64>>) -> DynamicsResult<Vec<f64>> {
    arrays
        .into_iter()
        .map(|a| match (a.len(), a.iter().next()) {
            (1, Some(&v)) => Ok(v),
            _ => Err(DynamicsError::ShapeMismatch {
                what: "unboxed value",
                expected: vec![],
                actual: a.shape().to_vec(),
            }),
        })
        .collect()
}
