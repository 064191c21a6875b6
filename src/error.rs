//! Error types for field arithmetic, grid operations and bin definitions.
//!
//! Degenerate physical inputs (zero-thickness cells, missing boundary
//! contributions) are not errors: they are handled by the masking and fill
//! policies of the tendency pipeline and always produce a numeric result.

use thiserror::Error;

use crate::grid::AxisPosition;

/// Errors that can occur while reconciling tendencies or defining bins.
#[derive(Error, Debug)]
pub enum WmtError {
    /// Two fields share a dimension name but disagree on its length.
    #[error("Dimension mismatch on '{dim}': {left} vs {right}")]
    DimensionMismatch {
        dim: String,
        left: usize,
        right: usize,
    },

    /// A field lacks a dimension required by the operation.
    #[error("Missing dimension '{dim}' (field has {dims:?})")]
    MissingDimension { dim: String, dims: Vec<String> },

    /// Field construction with inconsistent labels or data.
    #[error("Invalid field: {0}")]
    InvalidField(String),

    /// The grid cannot provide a thickness metric at the requested position.
    #[error("No thickness metric available at the {0} position")]
    MetricUnavailable(AxisPosition),

    /// Bin range or width cannot produce a sequence of edges.
    #[error("Invalid bins: lmin={lmin}, lmax={lmax}, delta={delta}")]
    InvalidBins { lmin: f64, lmax: f64, delta: f64 },

    /// Shape error raised by the array backend.
    #[error("Shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),
}

impl WmtError {
    /// Create a missing-dimension error for a field with the given dims.
    pub fn missing_dimension(dim: impl Into<String>, dims: &[String]) -> Self {
        Self::MissingDimension {
            dim: dim.into(),
            dims: dims.to_vec(),
        }
    }
}

/// Result type for this crate.
pub type Result<T> = std::result::Result<T, WmtError>;
