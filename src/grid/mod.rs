//! Staggered vertical grid for finite-volume tendency diagnostics.
//!
//! The ocean column is discretized into cells whose centers live on the
//! `center` position of the vertical axis (length N) and whose faces live on
//! the `outer` position (length N + 1, including the top and bottom faces).
//! Following MOM6 naming the default dimension names are `z_l` (layers) and
//! `z_i` (interfaces).
//!
//! ```text
//!   outer[0]   ─────────────  bottom / top face
//!   center[0]       ●         cell 0, thickness h[0]
//!   outer[1]   ─────────────
//!   center[1]       ●         cell 1, thickness h[1]
//!   outer[2]   ─────────────
//! ```
//!
//! The tendency pipeline consumes the grid only through the
//! [`StaggeredGrid`] trait:
//!
//! - [`StaggeredGrid::diff`]: outer → center difference, `d[k] = f[k+1] - f[k]`
//! - [`StaggeredGrid::interp`]: center → outer interpolation with a
//!   [`Boundary`] policy
//! - [`StaggeredGrid::metrics`]: cell thicknesses, either as a precomputed
//!   [`MetricTable`] or an on-demand [`ThicknessLookup`]
//! - [`StaggeredGrid::realign`]: make a field contiguous along the outer
//!   dimension before face-wise arithmetic
//!
//! # Example
//!
//! ```
//! use wmt_rs::field::Field;
//! use wmt_rs::grid::{StaggeredGrid, ZGrid};
//!
//! // Two columns, three layers, one of them 0 m thick
//! let h = Field::from_shape_vec(["z_l", "xh"], &[3, 2], vec![
//!     10.0, 10.0,
//!     20.0,  0.0,
//!     30.0, 30.0,
//! ]).unwrap();
//! let grid = ZGrid::with_thickness(h);
//!
//! let flux = Field::from_shape_vec(["z_i", "xh"], &[4, 2], vec![
//!     0.0, 0.0,
//!     1.0, 1.0,
//!     3.0, 3.0,
//!     6.0, 6.0,
//! ]).unwrap();
//! let d = grid.diff(&flux).unwrap();
//! assert_eq!(d.dims(), &["z_l", "xh"]);
//! assert_eq!(d.get(&[2, 0]), Some(3.0));
//! ```

mod metrics;
mod zgrid;

use std::fmt;

pub use metrics::{InterfaceDepths, MetricTable, ThicknessLookup, ZMetrics};
pub use zgrid::ZGrid;

use crate::error::{Result, WmtError};
use crate::field::Field;

/// Default dimension name of the center (layer) position.
pub const CENTER_DIM: &str = "z_l";

/// Default dimension name of the outer (interface) position.
pub const OUTER_DIM: &str = "z_i";

/// Position of a field along the vertical axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AxisPosition {
    /// Cell centers, N points.
    Center,
    /// Cell faces including both ends, N + 1 points.
    Outer,
}

impl fmt::Display for AxisPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AxisPosition::Center => write!(f, "center"),
            AxisPosition::Outer => write!(f, "outer"),
        }
    }
}

/// Treatment of the ghost points beyond the first and last cell when
/// interpolating from centers to faces.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum Boundary {
    /// Copy the edge cell value to the boundary face.
    #[default]
    Extend,
    /// Average the edge cell with a fixed ghost value.
    Fill(f64),
}

/// Grid capabilities consumed by the tendency pipeline.
///
/// Implementors provide the vertical stencil operations and the thickness
/// metrics; the remaining methods have default implementations in terms of
/// those.
pub trait StaggeredGrid: Send + Sync {
    /// Dimension name of the center position.
    fn center_dim(&self) -> &str;

    /// Dimension name of the outer position.
    fn outer_dim(&self) -> &str;

    /// Thickness metrics of the grid.
    fn metrics(&self) -> &ZMetrics;

    /// Difference between adjacent faces, producing a field on centers.
    fn diff(&self, field: &Field) -> Result<Field>;

    /// Interpolate a center field to the faces.
    fn interp(&self, field: &Field, boundary: Boundary) -> Result<Field>;

    /// Position a field occupies on the vertical axis.
    fn position_of(&self, field: &Field) -> Result<AxisPosition> {
        if field.has_dim(self.outer_dim()) {
            Ok(AxisPosition::Outer)
        } else if field.has_dim(self.center_dim()) {
            Ok(AxisPosition::Center)
        } else {
            Err(WmtError::missing_dimension(self.center_dim(), field.dims()))
        }
    }

    /// Thickness metric matching the position of `field`.
    fn get_metric(&self, field: &Field) -> Result<Field> {
        let position = self.position_of(field)?;
        self.metrics().thickness(position)
    }

    /// Cell thickness at centers, zeros left in place.
    fn center_thickness(&self) -> Result<Field> {
        self.metrics().thickness(AxisPosition::Center)
    }

    /// Move the outer dimension innermost with contiguous storage.
    fn realign(&self, field: Field) -> Result<Field> {
        field.move_dim_last(self.outer_dim())
    }
}
