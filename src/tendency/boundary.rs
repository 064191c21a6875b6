//! Boundary contribution to the extensive tendency.

use super::divergence::hlamdot_from_jlam;
use super::flux_law::jlammass_from_qm_lamf_lam;
use super::request::{BoundaryFlux, TendencyRequest};
use crate::error::Result;
use crate::field::Field;
use crate::grid::{Boundary, StaggeredGrid};

/// Boundary term of a request, as a thickness-weighted tendency.
///
/// - no boundary term: `None`
/// - [`BoundaryFlux::Tracer`]: the flux, unchanged
/// - [`BoundaryFlux::Mass`]: the scalar is interpolated to the faces
///   (edge values extended), the mass flux is converted with
///   [`jlammass_from_qm_lamf_lam`] and the result normalized with
///   [`hlamdot_from_jlam`]
pub fn calc_hlamdotmass<G>(grid: &G, request: &TendencyRequest) -> Result<Option<Field>>
where
    G: StaggeredGrid + ?Sized,
{
    let Some(boundary) = request.boundary() else {
        return Ok(None);
    };

    match boundary {
        BoundaryFlux::Tracer { flux } => Ok(Some(flux.clone())),
        BoundaryFlux::Mass {
            flux,
            scalar_in_mass,
        } => {
            let scalar_i = grid.realign(grid.interp(&request.scalar, Boundary::Extend)?)?;
            let jlammass = jlammass_from_qm_lamf_lam(flux, scalar_in_mass, &scalar_i)?;
            hlamdot_from_jlam(grid, &jlammass).map(Some)
        }
    }
}
