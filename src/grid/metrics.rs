//! Cell-thickness metrics.
//!
//! A grid either carries its thicknesses in a precomputed table keyed by
//! axis position, or resolves them on demand through a [`ThicknessLookup`].
//! The choice is fixed when the grid is built.

use std::fmt;

use ndarray::{Axis, Slice, concatenate};

use super::{AxisPosition, CENTER_DIM, OUTER_DIM};
use crate::error::{Result, WmtError};
use crate::field::Field;

/// Thickness metrics of a vertical grid.
pub enum ZMetrics {
    /// Thicknesses computed once and stored per position.
    Precomputed(MetricTable),
    /// Thicknesses resolved per request.
    Computed(Box<dyn ThicknessLookup>),
}

impl ZMetrics {
    /// Thickness field at a position.
    pub fn thickness(&self, position: AxisPosition) -> Result<Field> {
        match self {
            ZMetrics::Precomputed(table) => table
                .get(position)
                .cloned()
                .ok_or(WmtError::MetricUnavailable(position)),
            ZMetrics::Computed(lookup) => lookup.thickness(position),
        }
    }

    /// True for the precomputed variant.
    pub fn is_precomputed(&self) -> bool {
        matches!(self, ZMetrics::Precomputed(_))
    }
}

impl fmt::Debug for ZMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZMetrics::Precomputed(table) => f.debug_tuple("Precomputed").field(table).finish(),
            ZMetrics::Computed(lookup) => write!(f, "Computed({})", lookup.name()),
        }
    }
}

impl From<MetricTable> for ZMetrics {
    fn from(table: MetricTable) -> Self {
        ZMetrics::Precomputed(table)
    }
}

// =============================================================================
// Precomputed table
// =============================================================================

/// Thicknesses stored per axis position.
#[derive(Clone, Debug)]
pub struct MetricTable {
    center: Field,
    outer: Option<Field>,
}

impl MetricTable {
    /// Table holding the center thickness only.
    pub fn new(center: Field) -> Self {
        Self {
            center,
            outer: None,
        }
    }

    /// Add the thickness associated with faces.
    pub fn with_outer(mut self, outer: Field) -> Self {
        self.outer = Some(outer);
        self
    }

    /// Center thickness.
    pub fn center(&self) -> &Field {
        &self.center
    }

    /// Face thickness, if present.
    pub fn outer(&self) -> Option<&Field> {
        self.outer.as_ref()
    }

    /// Thickness at a position, if present.
    pub fn get(&self, position: AxisPosition) -> Option<&Field> {
        match position {
            AxisPosition::Center => Some(&self.center),
            AxisPosition::Outer => self.outer.as_ref(),
        }
    }
}

// =============================================================================
// On-demand lookup
// =============================================================================

/// On-demand source of thickness fields.
pub trait ThicknessLookup: Send + Sync {
    /// Thickness field at a position.
    fn thickness(&self, position: AxisPosition) -> Result<Field>;

    /// Human-readable name for debugging.
    fn name(&self) -> &'static str {
        "custom"
    }

    /// Adopt the grid's center/outer dimension names. Lookups that do not
    /// read dims from their inputs can ignore this.
    fn set_dims(&mut self, _center: &str, _outer: &str) {}
}

impl<F> ThicknessLookup for F
where
    F: Fn(AxisPosition) -> Result<Field> + Send + Sync,
{
    fn thickness(&self, position: AxisPosition) -> Result<Field> {
        self(position)
    }

    fn name(&self) -> &'static str {
        "closure"
    }
}

/// Thicknesses derived from the heights of the cell interfaces.
///
/// - center thickness: `|z[k+1] - z[k]|`
/// - outer thickness: distance between adjacent cell midpoints, with half
///   cells at the first and last face
///
/// Vanished layers (coincident interfaces) give zero thickness.
#[derive(Clone, Debug)]
pub struct InterfaceDepths {
    z_outer: Field,
    center_dim: String,
    outer_dim: String,
}

impl InterfaceDepths {
    /// Lookup over interface heights on the default `z_i` dimension.
    pub fn new(z_outer: Field) -> Self {
        Self {
            z_outer,
            center_dim: CENTER_DIM.to_string(),
            outer_dim: OUTER_DIM.to_string(),
        }
    }

    /// Use custom center/outer dimension names.
    pub fn with_dims(mut self, center: impl Into<String>, outer: impl Into<String>) -> Self {
        self.center_dim = center.into();
        self.outer_dim = outer.into();
        self
    }

    /// Interface heights.
    pub fn z_outer(&self) -> &Field {
        &self.z_outer
    }

    fn center_thickness(&self) -> Result<Field> {
        let axis = Axis(self.z_outer.require_axis(&self.outer_dim)?);
        let z = self.z_outer.data();
        let n = z.len_of(axis);
        if n == 0 {
            return Err(WmtError::InvalidField(format!(
                "'{}' has no interfaces",
                self.outer_dim
            )));
        }

        let upper = z.slice_axis(axis, Slice::from(1..n));
        let lower = z.slice_axis(axis, Slice::from(0..n - 1));
        let h = (&upper - &lower).mapv(f64::abs);

        self.z_outer
            .with_data(h)?
            .rename_dim(&self.outer_dim, &self.center_dim)
    }

    fn outer_thickness(&self) -> Result<Field> {
        let axis = Axis(self.z_outer.require_axis(&self.outer_dim)?);
        let z = self.z_outer.data();
        let n = z.len_of(axis);
        if n < 2 {
            return Err(WmtError::MetricUnavailable(AxisPosition::Outer));
        }

        // Cell midpoints bracketed by the end faces: N + 2 points
        let upper = z.slice_axis(axis, Slice::from(1..n));
        let lower = z.slice_axis(axis, Slice::from(0..n - 1));
        let mid = (&upper + &lower) * 0.5;
        let first = z.slice_axis(axis, Slice::from(0..1));
        let last = z.slice_axis(axis, Slice::from(n - 1..n));
        let nodes = concatenate(axis, &[first, mid.view(), last])?;

        let m = nodes.len_of(axis);
        let hi = nodes.slice_axis(axis, Slice::from(1..m));
        let lo = nodes.slice_axis(axis, Slice::from(0..m - 1));
        let h = (&hi - &lo).mapv(f64::abs);

        self.z_outer.with_data(h)
    }
}

impl ThicknessLookup for InterfaceDepths {
    fn thickness(&self, position: AxisPosition) -> Result<Field> {
        match position {
            AxisPosition::Center => self.center_thickness(),
            AxisPosition::Outer => self.outer_thickness(),
        }
    }

    fn name(&self) -> &'static str {
        "interface_depths"
    }

    fn set_dims(&mut self, center: &str, outer: &str) {
        self.center_dim = center.to_string();
        self.outer_dim = outer.to_string();
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-12;

    fn interfaces() -> Field {
        // Heights (positive up) of 4 interfaces, 3 layers: 10 m, 0 m, 30 m
        Field::from_vec("z_i", vec![0.0, -10.0, -10.0, -40.0])
    }

    #[test]
    fn test_table_lookup() {
        let table = MetricTable::new(Field::from_vec("z_l", vec![1.0, 2.0]));
        let metrics = ZMetrics::from(table);

        assert!(metrics.is_precomputed());
        assert!(metrics.thickness(AxisPosition::Center).is_ok());
        assert!(matches!(
            metrics.thickness(AxisPosition::Outer),
            Err(WmtError::MetricUnavailable(AxisPosition::Outer))
        ));
    }

    #[test]
    fn test_interface_center_thickness() {
        let lookup = InterfaceDepths::new(interfaces());
        let h = lookup.thickness(AxisPosition::Center).unwrap();

        assert_eq!(h.dims(), &["z_l"]);
        assert!(h.all_close(&Field::from_vec("z_l", vec![10.0, 0.0, 30.0]), TOL));
    }

    #[test]
    fn test_interface_outer_thickness() {
        let lookup = InterfaceDepths::new(interfaces());
        let h = lookup.thickness(AxisPosition::Outer).unwrap();

        // Midpoints: -5, -10, -25
        let expected = Field::from_vec("z_i", vec![5.0, 5.0, 15.0, 15.0]);
        assert!(h.all_close(&expected, TOL));

        // Face thicknesses sum to the column depth
        let total: f64 = h.values().sum();
        assert!((total - 40.0).abs() < TOL);
    }

    #[test]
    fn test_closure_lookup() {
        let metrics = ZMetrics::Computed(Box::new(|position: AxisPosition| match position {
            AxisPosition::Center => Ok(Field::from_vec("z_l", vec![2.0])),
            AxisPosition::Outer => Err(WmtError::MetricUnavailable(position)),
        }));

        assert!(!metrics.is_precomputed());
        assert_eq!(
            metrics.thickness(AxisPosition::Center).unwrap().get(&[0]),
            Some(2.0)
        );
        assert_eq!(format!("{metrics:?}"), "Computed(closure)");
    }
}
