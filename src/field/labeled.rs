//! The [`Field`] type: named axes over a dynamic-rank array.

use std::fmt;
use std::ops::{Mul, Neg};

use ndarray::{Array1, ArrayD, ArrayViewD, Axis, IxDyn};

use crate::error::{Result, WmtError};

/// A labeled multi-dimensional field of `f64` values.
///
/// Each axis of the underlying array carries a unique dimension name
/// (e.g. `"z_l"`, `"yh"`, `"xh"`). NaN marks missing values.
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    /// One name per axis, unique.
    dims: Vec<String>,
    /// Values, rank = `dims.len()`.
    data: ArrayD<f64>,
}

impl Field {
    // =========================================================================
    // Construction
    // =========================================================================

    /// Create a field from dimension names and an array.
    ///
    /// Fails if the number of names differs from the array rank or if a
    /// name is repeated.
    pub fn new<S: Into<String>>(
        dims: impl IntoIterator<Item = S>,
        data: ArrayD<f64>,
    ) -> Result<Self> {
        let dims: Vec<String> = dims.into_iter().map(Into::into).collect();

        if dims.len() != data.ndim() {
            return Err(WmtError::InvalidField(format!(
                "{} dimension names {:?} for an array of rank {}",
                dims.len(),
                dims,
                data.ndim()
            )));
        }
        for (i, dim) in dims.iter().enumerate() {
            if dims[..i].contains(dim) {
                return Err(WmtError::InvalidField(format!(
                    "duplicate dimension '{dim}'"
                )));
            }
        }

        Ok(Self { dims, data })
    }

    /// Create a field from a flat row-major vector and a shape.
    pub fn from_shape_vec<S: Into<String>>(
        dims: impl IntoIterator<Item = S>,
        shape: &[usize],
        values: Vec<f64>,
    ) -> Result<Self> {
        let data = ArrayD::from_shape_vec(IxDyn(shape), values)?;
        Self::new(dims, data)
    }

    /// Create a one-dimensional field.
    pub fn from_vec(dim: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            dims: vec![dim.into()],
            data: Array1::from(values).into_dyn(),
        }
    }

    /// Create a field filled with a constant value.
    pub fn full<S: Into<String>>(
        dims: impl IntoIterator<Item = S>,
        shape: &[usize],
        value: f64,
    ) -> Result<Self> {
        Self::new(dims, ArrayD::from_elem(IxDyn(shape), value))
    }

    /// Create a zero-filled field.
    pub fn zeros<S: Into<String>>(
        dims: impl IntoIterator<Item = S>,
        shape: &[usize],
    ) -> Result<Self> {
        Self::full(dims, shape, 0.0)
    }

    /// Create a zero-dimensional field holding a single value.
    pub fn scalar(value: f64) -> Self {
        Self {
            dims: Vec::new(),
            data: ArrayD::from_elem(IxDyn(&[]), value),
        }
    }

    /// Replace the values, keeping the dims. The new array must have the
    /// same rank.
    pub fn with_data(&self, data: ArrayD<f64>) -> Result<Self> {
        Self::new(self.dims.clone(), data)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Dimension names in axis order.
    #[inline]
    pub fn dims(&self) -> &[String] {
        &self.dims
    }

    /// Underlying array.
    #[inline]
    pub fn data(&self) -> &ArrayD<f64> {
        &self.data
    }

    /// Consume the field, returning the underlying array.
    #[inline]
    pub fn into_data(self) -> ArrayD<f64> {
        self.data
    }

    /// Array shape in axis order.
    #[inline]
    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    /// Number of dimensions.
    #[inline]
    pub fn ndim(&self) -> usize {
        self.dims.len()
    }

    /// Total number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True if the field holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Axis index of a named dimension.
    pub fn axis_of(&self, dim: &str) -> Option<usize> {
        self.dims.iter().position(|d| d == dim)
    }

    /// True if the field has the named dimension.
    pub fn has_dim(&self, dim: &str) -> bool {
        self.axis_of(dim).is_some()
    }

    /// Length of a named dimension.
    pub fn len_of(&self, dim: &str) -> Option<usize> {
        self.axis_of(dim).map(|axis| self.data.len_of(Axis(axis)))
    }

    /// Axis index of a named dimension, or a [`WmtError::MissingDimension`].
    pub fn require_axis(&self, dim: &str) -> Result<usize> {
        self.axis_of(dim)
            .ok_or_else(|| WmtError::missing_dimension(dim, &self.dims))
    }

    /// Value at a multi-index given in axis order.
    pub fn get(&self, index: &[usize]) -> Option<f64> {
        self.data.get(index).copied()
    }

    /// Iterate over values in logical (row-major) order.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.data.iter().copied()
    }

    /// Read-only view of the data.
    pub fn view(&self) -> ArrayViewD<'_, f64> {
        self.data.view()
    }

    // =========================================================================
    // Missing values
    // =========================================================================

    /// Apply a function to every value.
    pub fn map<F>(&self, f: F) -> Field
    where
        F: Fn(f64) -> f64 + Send + Sync,
    {
        let mut data = self.data.clone();
        #[cfg(feature = "parallel")]
        data.par_mapv_inplace(f);
        #[cfg(not(feature = "parallel"))]
        data.mapv_inplace(f);

        Field {
            dims: self.dims.clone(),
            data,
        }
    }

    /// Replace missing (NaN) values with `value`.
    pub fn fill_missing(&self, value: f64) -> Field {
        self.map(|x| if x.is_nan() { value } else { x })
    }

    /// Mark values matching `pred` as missing.
    pub fn mask_where<P>(&self, pred: P) -> Field
    where
        P: Fn(f64) -> bool + Send + Sync,
    {
        self.map(|x| if pred(x) { f64::NAN } else { x })
    }

    /// Mark exact zeros as missing.
    pub fn mask_zeros(&self) -> Field {
        self.mask_where(|x| x == 0.0)
    }

    /// Number of missing values.
    pub fn count_missing(&self) -> usize {
        self.data.iter().filter(|x| x.is_nan()).count()
    }

    // =========================================================================
    // Dimension manipulation
    // =========================================================================

    /// Rename a dimension.
    pub fn rename_dim(&self, from: &str, to: &str) -> Result<Field> {
        let axis = self.require_axis(from)?;
        let mut dims = self.dims.clone();
        dims[axis] = to.to_string();
        Field::new(dims, self.data.clone())
    }

    /// Reorder axes. `order` must name every dimension exactly once.
    pub fn transpose(&self, order: &[&str]) -> Result<Field> {
        if order.len() != self.ndim() {
            return Err(WmtError::InvalidField(format!(
                "transpose order {:?} does not match dims {:?}",
                order, self.dims
            )));
        }
        let axes = order
            .iter()
            .map(|dim| self.require_axis(dim))
            .collect::<Result<Vec<_>>>()?;
        let dims: Vec<String> = order.iter().map(|d| d.to_string()).collect();
        let data = self.data.clone().permuted_axes(axes);
        Field::new(dims, data)
    }

    /// Move a dimension to the innermost axis and make the storage
    /// contiguous along it.
    pub fn move_dim_last(&self, dim: &str) -> Result<Field> {
        let axis = self.require_axis(dim)?;
        let mut axes: Vec<usize> = (0..self.ndim()).filter(|&a| a != axis).collect();
        axes.push(axis);

        let dims: Vec<String> = axes.iter().map(|&a| self.dims[a].clone()).collect();
        let data = self
            .data
            .view()
            .permuted_axes(axes)
            .as_standard_layout()
            .into_owned();

        Ok(Field { dims, data })
    }

    /// True if the data is stored contiguously in row-major order.
    pub fn is_standard_layout(&self) -> bool {
        self.data.is_standard_layout()
    }

    // =========================================================================
    // Comparison
    // =========================================================================

    /// Elementwise comparison within `tol`, aligning dims by name.
    ///
    /// Missing values compare equal to missing values only.
    pub fn all_close(&self, other: &Field, tol: f64) -> bool {
        if self.ndim() != other.ndim() || !self.dims.iter().all(|d| other.has_dim(d)) {
            return false;
        }
        let order: Vec<&str> = self.dims.iter().map(String::as_str).collect();
        let Ok(other) = other.transpose(&order) else {
            return false;
        };
        if self.shape() != other.shape() {
            return false;
        }

        self.data
            .iter()
            .zip(other.data.iter())
            .all(|(&a, &b)| match (a.is_nan(), b.is_nan()) {
                (true, true) => true,
                (false, false) => (a - b).abs() <= tol,
                _ => false,
            })
    }
}

impl Neg for &Field {
    type Output = Field;

    fn neg(self) -> Field {
        self.map(|x| -x)
    }
}

impl Neg for Field {
    type Output = Field;

    fn neg(self) -> Field {
        -&self
    }
}

impl Mul<f64> for &Field {
    type Output = Field;

    fn mul(self, rhs: f64) -> Field {
        self.map(|x| x * rhs)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sizes: Vec<String> = self
            .dims
            .iter()
            .zip(self.shape())
            .map(|(d, n)| format!("{d}: {n}"))
            .collect();
        write!(f, "Field({})", sizes.join(", "))
    }
}

// =============================================================================
// Tests
// =============================================================================
