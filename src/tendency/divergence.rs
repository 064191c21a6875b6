//! Vertical flux divergence normalized to an extensive tendency.

use crate::error::Result;
use crate::field::Field;
use crate::grid::{StaggeredGrid, ZMetrics};

/// Thickness-weighted tendency from a flux on cell faces.
///
/// ```text
/// dJ     = -(J[k+1] - J[k])        convergence is a positive tendency
/// lamdot = dJ / h                  h = 0 masked, never divided into
/// hlamdot = fill(h, 0) * fill(lamdot, 0)
/// ```
///
/// The thickness comes from the grid's precomputed center table when it has
/// one, otherwise from the metric lookup for the position of `dJ`.
///
/// The result is zero, not missing, wherever the thickness is zero or
/// missing or the divergence is missing, so a single masked cell does not
/// blank out a column.
pub fn hlamdot_from_jlam<G>(grid: &G, jlam: &Field) -> Result<Field>
where
    G: StaggeredGrid + ?Sized,
{
    let djlam = -grid.diff(jlam)?;

    let h = match grid.metrics() {
        ZMetrics::Precomputed(table) => table.center().mask_zeros(),
        ZMetrics::Computed(_) => grid.get_metric(&djlam)?.mask_zeros(),
    };

    let lamdot = djlam.try_div(&h)?;
    tracing::trace!(
        masked_thickness = h.count_missing(),
        missing_tendency = lamdot.count_missing(),
        "normalized vertical flux divergence"
    );

    h.fill_missing(0.0).try_mul(&lamdot.fill_missing(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{AxisPosition, ZGrid};

    const TOL: f64 = 1e-12;

    #[test]
    fn test_convergence_sign() {
        let grid = ZGrid::with_thickness(Field::from_vec("z_l", vec![2.0, 4.0]));
        // Flux decreasing upward: convergence into cell 0, divergence out of cell 1
        let jlam = Field::from_vec("z_i", vec![0.0, 3.0, 1.0]);

        let hlamdot = hlamdot_from_jlam(&grid, &jlam).unwrap();
        let expected = Field::from_vec("z_l", vec![-3.0, 2.0]);
        assert!(hlamdot.all_close(&expected, TOL));
    }

    #[test]
    fn test_zero_thickness_gives_zero() {
        let grid = ZGrid::with_thickness(Field::from_vec("z_l", vec![1.0, 0.0, 5.0]));
        let jlam = Field::from_vec("z_i", vec![0.0, 1.0, 7.0, 2.0]);

        let hlamdot = hlamdot_from_jlam(&grid, &jlam).unwrap();
        assert_eq!(hlamdot.count_missing(), 0);
        assert_eq!(hlamdot.get(&[1]), Some(0.0));
        assert!((hlamdot.get(&[0]).unwrap() + 1.0).abs() < TOL);
        assert!((hlamdot.get(&[2]).unwrap() - 5.0).abs() < TOL);
    }

    #[test]
    fn test_missing_flux_gives_zero() {
        let grid = ZGrid::with_thickness(Field::from_vec("z_l", vec![1.0, 1.0, 1.0]));
        let jlam = Field::from_vec("z_i", vec![0.0, f64::NAN, 2.0, 3.0]);

        let hlamdot = hlamdot_from_jlam(&grid, &jlam).unwrap();
        assert_eq!(hlamdot.get(&[0]), Some(0.0));
        assert_eq!(hlamdot.get(&[1]), Some(0.0));
        assert!((hlamdot.get(&[2]).unwrap() + 1.0).abs() < TOL);
    }

    #[test]
    fn test_missing_thickness_gives_zero() {
        let grid = ZGrid::with_thickness(Field::from_vec("z_l", vec![f64::NAN, 2.0]));
        let jlam = Field::from_vec("z_i", vec![4.0, 0.0, 0.0]);

        let hlamdot = hlamdot_from_jlam(&grid, &jlam).unwrap();
        assert_eq!(hlamdot.get(&[0]), Some(0.0));
        assert_eq!(hlamdot.get(&[1]), Some(0.0));
    }

    #[test]
    fn test_computed_metrics_mask_zero_thickness() {
        // Layer 1 has vanished: coincident interfaces
        let grid = ZGrid::from_interfaces(Field::from_vec("z_i", vec![0.0, -2.0, -2.0, -6.0]));
        let jlam = Field::from_vec("z_i", vec![0.0, 1.0, 5.0, 2.0]);

        let hlamdot = hlamdot_from_jlam(&grid, &jlam).unwrap();
        assert_eq!(hlamdot.count_missing(), 0);
        assert_eq!(hlamdot.get(&[1]), Some(0.0));
        assert!((hlamdot.get(&[0]).unwrap() + 1.0).abs() < TOL);
        assert!((hlamdot.get(&[2]).unwrap() - 3.0).abs() < TOL);
    }

    #[test]
    fn test_metric_variants_agree() {
        let z = Field::from_shape_vec(
            ["z_i", "xh"],
            &[3, 2],
            vec![0.0, 0.0, -4.0, 0.0, -10.0, -3.0],
        )
        .unwrap();
        let computed = ZGrid::from_interfaces(z.clone());
        let table = ZGrid::with_thickness(
            computed.metrics().thickness(AxisPosition::Center).unwrap(),
        );

        let jlam = Field::from_shape_vec(["z_i", "xh"], &[3, 2], vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0])
            .unwrap();
        let a = hlamdot_from_jlam(&computed, &jlam).unwrap();
        let b = hlamdot_from_jlam(&table, &jlam).unwrap();
        assert!(a.all_close(&b, TOL));
        assert_eq!(a.get(&[0, 1]), Some(0.0));
    }

    #[test]
    fn test_broadcasts_thickness_over_horizontal() {
        let grid = ZGrid::with_thickness(Field::from_vec("z_l", vec![10.0]));
        let jlam = Field::from_shape_vec(["z_i", "xh"], &[2, 3], vec![0.0, 0.0, 0.0, 1.0, 2.0, 3.0])
            .unwrap();

        let hlamdot = hlamdot_from_jlam(&grid, &jlam).unwrap();
        assert_eq!(hlamdot.shape(), &[1, 3]);
        assert!((hlamdot.get(&[0, 2]).unwrap() + 3.0).abs() < TOL);
    }
}
