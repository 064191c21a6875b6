//! Name-aligned elementwise arithmetic between fields.

use ndarray::{ArrayViewD, Axis, IxDyn, Zip};

use super::Field;
use crate::error::{Result, WmtError};

impl Field {
    /// Combine two fields elementwise after aligning their dims by name.
    ///
    /// The result has `self`'s dims followed by the dims only `other` has.
    pub fn zip_with<F>(&self, other: &Field, f: F) -> Result<Field>
    where
        F: Fn(f64, f64) -> f64 + Send + Sync,
    {
        let dims = union_dims(self.dims(), other.dims());
        let shape = broadcast_shape(&dims, self, other)?;

        let lhs = self.expand_to(&dims);
        let rhs = other.expand_to(&dims);
        let lhs = lhs
            .broadcast(IxDyn(&shape))
            .ok_or_else(|| broadcast_failure(self, &shape))?;
        let rhs = rhs
            .broadcast(IxDyn(&shape))
            .ok_or_else(|| broadcast_failure(other, &shape))?;

        let zip = Zip::from(&lhs).and(&rhs);
        #[cfg(feature = "parallel")]
        let data = zip.par_map_collect(|&a, &b| f(a, b));
        #[cfg(not(feature = "parallel"))]
        let data = zip.map_collect(|&a, &b| f(a, b));

        Field::new(dims, data)
    }

    /// Elementwise `self + other`.
    pub fn try_add(&self, other: &Field) -> Result<Field> {
        self.zip_with(other, |a, b| a + b)
    }

    /// Elementwise `self - other`.
    pub fn try_sub(&self, other: &Field) -> Result<Field> {
        self.zip_with(other, |a, b| a - b)
    }

    /// Elementwise `self * other`.
    pub fn try_mul(&self, other: &Field) -> Result<Field> {
        self.zip_with(other, |a, b| a * b)
    }

    /// Elementwise `self / other`.
    pub fn try_div(&self, other: &Field) -> Result<Field> {
        self.zip_with(other, |a, b| a / b)
    }

    /// View of the data with axes permuted and length-1 axes inserted so
    /// that it lines up with `dims`. `dims` must contain every own dim.
    fn expand_to(&self, dims: &[String]) -> ArrayViewD<'_, f64> {
        let order: Vec<usize> = dims.iter().filter_map(|d| self.axis_of(d)).collect();
        let mut view = self.view().permuted_axes(order);

        for (i, dim) in dims.iter().enumerate() {
            if !self.has_dim(dim) {
                view = view.insert_axis(Axis(i));
            }
        }
        view
    }
}

fn union_dims(left: &[String], right: &[String]) -> Vec<String> {
    let mut dims = left.to_vec();
    dims.extend(right.iter().filter(|d| !left.contains(d)).cloned());
    dims
}

fn broadcast_shape(dims: &[String], left: &Field, right: &Field) -> Result<Vec<usize>> {
    dims.iter()
        .map(|dim| match (left.len_of(dim), right.len_of(dim)) {
            (Some(l), Some(r)) if l != r => Err(WmtError::DimensionMismatch {
                dim: dim.clone(),
                left: l,
                right: r,
            }),
            (Some(n), _) | (None, Some(n)) => Ok(n),
            (None, None) => unreachable!("dimension '{dim}' comes from one of the operands"),
        })
        .collect()
}

fn broadcast_failure(field: &Field, shape: &[usize]) -> WmtError {
    WmtError::InvalidField(format!(
        "cannot broadcast {} to shape {:?}",
        field, shape
    ))
}

// =============================================================================
// Tests
// =============================================================================
