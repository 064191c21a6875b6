//! Bin edges for histogramming tendencies by scalar value.
//!
//! Bins are centered on `lmin, lmin + delta, ..., lmax`, so the edges start
//! half a width below `lmin` and end half a width above `lmax`:
//!
//! ```text
//!  lmin - d/2   lmin + d/2            lmax - d/2   lmax + d/2
//!      |-----------|-----------| ... |-----------|
//!           lmin                           lmax
//! ```
//!
//! # Floating-Point Boundary
//!
//! The number of bins is `floor((lmax - lmin) / delta)` plus one, where the
//! quotient `q` is allowed to fall short of an integer by a few ulps
//! (`4 * q * f64::EPSILON`): `0.7 / 0.1` evaluates to `6.999999999999999`,
//! and `0..0.7` by `0.1` still gets its eighth bin centered on `0.7`. The
//! slack scales with `q`, so it never adds a bin the range does not reach.
//! Each edge is computed as `start + i * delta`, not by repeated addition,
//! so error does not accumulate along the sequence.
//!
//! At most [`MAX_BINS`] bins are defined; wider requests are rejected.

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::error::{Result, WmtError};

/// Slack allowed on the bin count quotient, in units of its magnitude.
const COUNT_ULPS: f64 = 4.0 * f64::EPSILON;

/// Largest number of bins [`bin_define`] will produce.
pub const MAX_BINS: usize = 1 << 24;

/// Edges of bins of width `delta_l` centered from `lmin` to `lmax`.
///
/// # Example
///
/// ```
/// use wmt_rs::bins::bin_define;
///
/// let edges = bin_define(0.0, 10.0, 2.0).unwrap();
/// assert_eq!(edges.to_vec(), vec![-1.0, 1.0, 3.0, 5.0, 7.0, 9.0, 11.0]);
/// ```
pub fn bin_define(lmin: f64, lmax: f64, delta_l: f64) -> Result<Array1<f64>> {
    let invalid = || WmtError::InvalidBins {
        lmin,
        lmax,
        delta: delta_l,
    };

    if !(lmin.is_finite() && lmax.is_finite() && delta_l.is_finite()) {
        return Err(invalid());
    }
    if delta_l <= 0.0 || lmax < lmin {
        return Err(invalid());
    }

    let quotient = (lmax - lmin) / delta_l;
    if !quotient.is_finite() || quotient >= MAX_BINS as f64 {
        return Err(invalid());
    }
    let n_bins = ((quotient + quotient * COUNT_ULPS).floor() as usize)
        .checked_add(1)
        .filter(|&n| n <= MAX_BINS)
        .ok_or_else(invalid)?;
    let start = lmin - delta_l / 2.0;

    Ok(Array1::from_shape_fn(n_bins + 1, |i| start + i as f64 * delta_l))
}

/// Midpoints between consecutive edges.
pub fn bin_centers(edges: &Array1<f64>) -> Array1<f64> {
    edges
        .windows(2)
        .into_iter()
        .map(|w| 0.5 * (w[0] + w[1]))
        .collect()
}

/// Bin configuration for one scalar coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BinSpec {
    /// Center of the first bin.
    pub lmin: f64,
    /// Center of the last bin.
    pub lmax: f64,
    /// Bin width.
    pub delta: f64,
}

impl BinSpec {
    pub fn new(lmin: f64, lmax: f64, delta: f64) -> Self {
        Self { lmin, lmax, delta }
    }

    /// Bin edges, see [`bin_define`].
    pub fn edges(&self) -> Result<Array1<f64>> {
        bin_define(self.lmin, self.lmax, self.delta)
    }

    /// Bin centers.
    pub fn centers(&self) -> Result<Array1<f64>> {
        Ok(bin_centers(&self.edges()?))
    }

    /// Number of bins.
    pub fn n_bins(&self) -> Result<usize> {
        Ok(self.edges()?.len() - 1)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-12;

    #[test]
    fn test_integer_range() {
        let edges = bin_define(0.0, 10.0, 2.0).unwrap();

        assert_eq!(edges.len(), (10.0_f64 / 2.0).floor() as usize + 2);
        assert_eq!(edges[0], -1.0);
        assert_eq!(edges[edges.len() - 1], 11.0);
        for w in edges.windows(2) {
            assert_eq!(w[1] - w[0], 2.0);
        }
    }

    #[test]
    fn test_fractional_width_reaches_upper_edge() {
        let edges = bin_define(0.0, 1.0, 0.1).unwrap();

        assert_eq!(edges.len(), 12);
        assert!((edges[0] + 0.05).abs() < TOL);
        assert!((edges[11] - 1.05).abs() < TOL);
        for w in edges.windows(2) {
            assert!((w[1] - w[0] - 0.1).abs() < TOL);
        }
    }

    #[test]
    fn test_quotient_rounding_below_integer() {
        assert!(0.7_f64 / 0.1 < 7.0);
        let edges = bin_define(0.0, 0.7, 0.1).unwrap();

        assert_eq!(edges.len(), 9);
        assert!((edges[8] - 0.75).abs() < TOL);
    }

    #[test]
    fn test_non_integer_range_stops_before_upper_edge() {
        let edges = bin_define(0.0, 1.0, 0.3).unwrap();

        // Bins centered at 0, 0.3, 0.6, 0.9
        assert_eq!(edges.len(), 5);
        assert!(edges[4] <= 1.0 + 0.15);
        assert!((edges[4] - 1.05).abs() < TOL);
    }

    #[test]
    fn test_single_bin() {
        let edges = bin_define(34.0, 34.0, 0.5).unwrap();
        assert_eq!(edges.to_vec(), vec![33.75, 34.25]);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(bin_define(0.0, 10.0, 0.0).is_err());
        assert!(bin_define(0.0, 10.0, -1.0).is_err());
        assert!(bin_define(10.0, 0.0, 1.0).is_err());
        assert!(bin_define(f64::NAN, 10.0, 1.0).is_err());
        assert!(bin_define(0.0, f64::INFINITY, 1.0).is_err());
    }

    #[test]
    fn test_overflowing_range_rejected() {
        // Range overflows to infinity
        assert!(matches!(
            bin_define(-1e308, 1e308, 1.0),
            Err(WmtError::InvalidBins { .. })
        ));
        // Finite but far too many bins
        assert!(matches!(
            bin_define(0.0, 1e12, 1.0),
            Err(WmtError::InvalidBins { .. })
        ));
        assert!(bin_define(0.0, 1.0, 1e-320).is_err());
        assert!(bin_define(0.0, MAX_BINS as f64, 1.0).is_err());
    }

    #[test]
    fn test_range_just_short_of_integer() {
        // 0.9999999999 / 0.2 falls short of 5 by more than rounding error
        let (lmax, delta) = (0.9999999999, 0.2);
        let edges = bin_define(0.0, lmax, delta).unwrap();

        assert_eq!(edges.len(), 6);
        assert!(edges[edges.len() - 1] <= lmax + delta / 2.0);
    }

    #[test]
    fn test_centers() {
        let spec = BinSpec::new(-2.0, 2.0, 1.0);
        let centers = spec.centers().unwrap();

        assert_eq!(spec.n_bins().unwrap(), 5);
        let expected = [-2.0, -1.0, 0.0, 1.0, 2.0];
        for (c, e) in centers.iter().zip(expected) {
            assert!((c - e).abs() < TOL);
        }
    }

    #[test]
    fn test_spec_from_json() {
        let spec: BinSpec = serde_json::from_str(r#"{"lmin": 0.0, "lmax": 40.0, "delta": 0.5}"#)
            .unwrap();
        assert_eq!(spec.edges().unwrap().len(), 82);
    }
}
