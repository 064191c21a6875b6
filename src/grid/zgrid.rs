//! Concrete staggered vertical grid.

use ndarray::{ArrayD, Axis, IxDyn, Slice, concatenate};

use super::metrics::{InterfaceDepths, MetricTable, ZMetrics};
use super::{Boundary, CENTER_DIM, OUTER_DIM, StaggeredGrid};
use crate::error::{Result, WmtError};
use crate::field::Field;
use crate::vertical::Stretching;

/// A single vertical axis with center and outer positions.
///
/// The grid is immutable once built and is only borrowed by the tendency
/// functions.
#[derive(Debug)]
pub struct ZGrid {
    center_dim: String,
    outer_dim: String,
    metrics: ZMetrics,
}

impl ZGrid {
    /// Create a grid with the given metrics and the default `z_l`/`z_i` dims.
    pub fn new(metrics: impl Into<ZMetrics>) -> Self {
        Self {
            center_dim: CENTER_DIM.to_string(),
            outer_dim: OUTER_DIM.to_string(),
            metrics: metrics.into(),
        }
    }

    /// Grid with a precomputed center thickness.
    pub fn with_thickness(center_thickness: Field) -> Self {
        Self::new(MetricTable::new(center_thickness))
    }

    /// Grid whose thicknesses are computed on demand from interface heights.
    pub fn from_interfaces(z_outer: Field) -> Self {
        Self::new(ZMetrics::Computed(Box::new(InterfaceDepths::new(z_outer))))
    }

    /// Terrain-following grid: thicknesses are the column depth times the
    /// sigma layer fractions of `stretching`.
    ///
    /// `depth` holds the water-column thickness (`eta + H`) on the
    /// horizontal dims; zero-depth (land) columns get zero-thickness cells.
    ///
    /// # Example
    ///
    /// ```
    /// use wmt_rs::field::Field;
    /// use wmt_rs::grid::{StaggeredGrid, ZGrid};
    /// use wmt_rs::vertical::UniformStretching;
    ///
    /// let depth = Field::from_vec("xh", vec![100.0, 0.0]);
    /// let grid = ZGrid::sigma(4, &UniformStretching, &depth).unwrap();
    ///
    /// let h = grid.center_thickness().unwrap();
    /// assert_eq!(h.dims(), &["z_l", "xh"]);
    /// assert!((h.get(&[0, 0]).unwrap() - 25.0).abs() < 1e-12);
    /// assert_eq!(h.get(&[0, 1]), Some(0.0));
    /// ```
    pub fn sigma(n_levels: usize, stretching: &dyn Stretching, depth: &Field) -> Result<Self> {
        if n_levels == 0 {
            return Err(WmtError::InvalidField(
                "sigma grid needs at least one level".to_string(),
            ));
        }

        let center = Field::from_vec(CENTER_DIM, stretching.layer_fractions(n_levels));
        let outer = Field::from_vec(OUTER_DIM, stretching.interface_fractions(n_levels));

        tracing::debug!(
            n_levels,
            stretching = %stretching.description(),
            "building sigma grid"
        );

        let table = MetricTable::new(center.try_mul(depth)?).with_outer(outer.try_mul(depth)?);
        Ok(Self::new(table))
    }

    /// Use custom center/outer dimension names.
    ///
    /// A computed metric lookup is renamed along with the grid; a
    /// precomputed table must already be on the new dims.
    pub fn with_dims(mut self, center: impl Into<String>, outer: impl Into<String>) -> Self {
        self.center_dim = center.into();
        self.outer_dim = outer.into();
        if let ZMetrics::Computed(lookup) = &mut self.metrics {
            lookup.set_dims(&self.center_dim, &self.outer_dim);
        }
        self
    }
}

impl StaggeredGrid for ZGrid {
    fn center_dim(&self) -> &str {
        &self.center_dim
    }

    fn outer_dim(&self) -> &str {
        &self.outer_dim
    }

    fn metrics(&self) -> &ZMetrics {
        &self.metrics
    }

    fn diff(&self, field: &Field) -> Result<Field> {
        let axis = Axis(field.require_axis(&self.outer_dim)?);
        let data = field.data();
        let n = data.len_of(axis);
        if n == 0 {
            return Err(WmtError::InvalidField(format!(
                "cannot difference empty '{}'",
                self.outer_dim
            )));
        }

        let upper = data.slice_axis(axis, Slice::from(1..n));
        let lower = data.slice_axis(axis, Slice::from(0..n - 1));
        let d = &upper - &lower;

        field
            .with_data(d)?
            .rename_dim(&self.outer_dim, &self.center_dim)
    }

    fn interp(&self, field: &Field, boundary: Boundary) -> Result<Field> {
        let axis = Axis(field.require_axis(&self.center_dim)?);
        let data = field.data();
        let n = data.len_of(axis);
        if n == 0 {
            return Err(WmtError::InvalidField(format!(
                "cannot interpolate empty '{}'",
                self.center_dim
            )));
        }

        let (first, last) = match boundary {
            Boundary::Extend => (
                data.slice_axis(axis, Slice::from(0..1)).to_owned(),
                data.slice_axis(axis, Slice::from(n - 1..n)).to_owned(),
            ),
            Boundary::Fill(value) => {
                let mut shape = data.shape().to_vec();
                shape[axis.index()] = 1;
                let ghost = ArrayD::from_elem(IxDyn(&shape), value);
                (ghost.clone(), ghost)
            }
        };

        // Ghost, centers, ghost: N + 2 points averaged pairwise onto N + 1 faces
        let padded = concatenate(axis, &[first.view(), data.view(), last.view()])?;
        let lower = padded.slice_axis(axis, Slice::from(0..n + 1));
        let upper = padded.slice_axis(axis, Slice::from(1..n + 2));
        let faces = (&lower + &upper) * 0.5;

        field
            .with_data(faces)?
            .rename_dim(&self.center_dim, &self.outer_dim)
    }
}

// =============================================================================
// Tests
// =============================================================================
