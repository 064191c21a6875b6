//! Reconciliation of supplied tendencies into one extensive tendency.

use super::boundary::calc_hlamdotmass;
use super::divergence::hlamdot_from_jlam;
use super::intensive::hlamdot_from_lamdot_h;
use super::request::{Tendency, TendencyRequest};
use crate::error::Result;
use crate::field::Field;
use crate::grid::StaggeredGrid;

/// Add an optional boundary term to an interior extensive tendency.
///
/// Missing boundary values count as no contribution (zero); missing
/// interior values stay missing.
pub fn hlamdot_from_ldot_hlamdotmass(ldot: Field, hlamdotmass: Option<&Field>) -> Result<Field> {
    match hlamdotmass {
        Some(boundary) => ldot.try_add(&boundary.fill_missing(0.0)),
        None => Ok(ldot),
    }
}

/// Vertically-extensive tendency `h * dlam/dt` for a request.
///
/// | request                          | result                                    |
/// |----------------------------------|-------------------------------------------|
/// | `Intensive { lamdot }`           | `h_center * lamdot`                       |
/// | `Extensive { hlamdot }`          | `hlamdot`, unchanged                      |
/// | `ExtensiveWithBoundary { .. }`   | `-dJ` normalized, plus the boundary term  |
///
/// # Example
///
/// ```
/// use wmt_rs::field::Field;
/// use wmt_rs::grid::ZGrid;
/// use wmt_rs::tendency::{BoundaryFlux, TendencyRequest, calc_hlamdot_tendency};
///
/// let grid = ZGrid::with_thickness(Field::from_vec("z_l", vec![5.0, 5.0]));
/// let salinity = Field::from_vec("z_l", vec![35.0, 34.0]);
///
/// // No interior flux, 0.1 kg/m²/s of freshwater through the top face
/// let jlam = Field::from_vec("z_i", vec![0.0, 0.0, 0.0]);
/// let wfo = Field::from_vec("z_i", vec![0.0, 0.0, 0.1]);
/// let request = TendencyRequest::with_boundary(salinity, jlam, BoundaryFlux::mass(wfo, 0.0));
///
/// let hlamdot = calc_hlamdot_tendency(&grid, &request).unwrap();
/// assert_eq!(hlamdot.get(&[0]), Some(0.0));
/// assert!((hlamdot.get(&[1]).unwrap() - 3.4).abs() < 1e-12);
/// ```
pub fn calc_hlamdot_tendency<G>(grid: &G, request: &TendencyRequest) -> Result<Field>
where
    G: StaggeredGrid + ?Sized,
{
    match &request.tendency {
        Tendency::ExtensiveWithBoundary { jlam, boundary } => {
            tracing::debug!(mass = boundary.is_mass(), "reconciling flux with boundary term");
            let hlamdotmass = calc_hlamdotmass(grid, request)?;
            let interior = hlamdot_from_jlam(grid, jlam)?;
            hlamdot_from_ldot_hlamdotmass(interior, hlamdotmass.as_ref())
        }
        Tendency::Extensive { hlamdot } => {
            tracing::debug!("tendency already extensive");
            hlamdot_from_ldot_hlamdotmass(hlamdot.clone(), None)
        }
        Tendency::Intensive { lamdot } => {
            tracing::debug!("weighting intensive tendency by center thickness");
            hlamdot_from_lamdot_h(lamdot, &grid.center_thickness()?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::ZGrid;
    use crate::tendency::request::BoundaryFlux;

    const TOL: f64 = 1e-12;

    fn grid() -> ZGrid {
        ZGrid::with_thickness(Field::from_vec("z_l", vec![2.0, 0.0, 4.0]))
    }

    fn scalar() -> Field {
        Field::from_vec("z_l", vec![10.0, 11.0, 12.0])
    }

    #[test]
    fn test_combiner_fills_missing_boundary() {
        let ldot = Field::from_vec("z_l", vec![1.0, 2.0, f64::NAN]);
        let boundary = Field::from_vec("z_l", vec![f64::NAN, 1.0, 1.0]);

        let out = hlamdot_from_ldot_hlamdotmass(ldot.clone(), Some(&boundary)).unwrap();
        assert_eq!(out.get(&[0]), Some(1.0));
        assert_eq!(out.get(&[1]), Some(3.0));
        assert!(out.get(&[2]).unwrap().is_nan());

        let unchanged = hlamdot_from_ldot_hlamdotmass(ldot.clone(), None).unwrap();
        assert!(unchanged.all_close(&ldot, 0.0));
    }

    #[test]
    fn test_extensive_returns_array() {
        let hlamdot = Field::from_vec("z_l", vec![0.5, f64::NAN, -3.0]);
        let request = TendencyRequest::extensive(scalar(), hlamdot.clone());

        let out = calc_hlamdot_tendency(&grid(), &request).unwrap();
        assert!(out.all_close(&hlamdot, 0.0));
    }

    #[test]
    fn test_intensive_uses_unmasked_center_thickness() {
        let lamdot = Field::from_vec("z_l", vec![1.0, 5.0, -0.5]);
        let request = TendencyRequest::intensive(scalar(), lamdot.clone());

        let out = calc_hlamdot_tendency(&grid(), &request).unwrap();
        let expected =
            hlamdot_from_lamdot_h(&lamdot, &grid().center_thickness().unwrap()).unwrap();
        assert!(out.all_close(&expected, 0.0));
        assert_eq!(out.get(&[1]), Some(0.0));
    }

    #[test]
    fn test_flux_with_tracer_boundary() {
        let jlam = Field::from_vec("z_i", vec![0.0, 2.0, 2.0, 0.0]);
        let boundary = Field::from_vec("z_l", vec![f64::NAN, 1.0, 1.0]);
        let request =
            TendencyRequest::with_boundary(scalar(), jlam, BoundaryFlux::tracer(boundary));

        let out = calc_hlamdot_tendency(&grid(), &request).unwrap();
        // Interior: -[2, 0, -2] with the vanished middle layer zeroed
        let expected = Field::from_vec("z_l", vec![-2.0, 1.0, 3.0]);
        assert!(out.all_close(&expected, TOL));
    }

    #[test]
    fn test_flux_with_mass_boundary() {
        let jlam = Field::from_vec("z_i", vec![0.0, 0.0, 0.0, 1.0]);
        let qm = Field::from_vec("z_i", vec![0.0, 0.0, 0.0, 0.5]);
        let request =
            TendencyRequest::with_boundary(scalar(), jlam.clone(), BoundaryFlux::mass(qm, 20.0));

        let out = calc_hlamdot_tendency(&grid(), &request).unwrap();
        // Interior: -1 in the top layer; boundary: -(0.5 * (20 - 12)) = -4
        assert!((out.get(&[2]).unwrap() + 5.0).abs() < TOL);
        assert_eq!(out.get(&[0]), Some(0.0));
        assert_eq!(out.get(&[1]), Some(0.0));
    }
}
