//! Tendency reconciliation for water-mass transformation diagnostics.
//!
//! Tendencies of a scalar (temperature, salinity, ...) arrive in several
//! forms: per unit thickness or thickness-weighted, as a convergence of
//! fluxes through cell faces, and with or without a boundary flux such as
//! surface forcing. This module turns all of them into the single
//! vertically-extensive tendency `hlamdot = h * dlam/dt` that is later
//! binned by scalar value.
//!
//! # Components
//!
//! - [`jlammass_from_qm_lamf_lam`]: tracer flux carried by a mass flux
//! - [`hlamdot_from_jlam`]: flux convergence normalized by cell thickness
//! - [`calc_hlamdotmass`]: boundary term of a request
//! - [`hlamdot_from_lamdot_h`]: intensive to extensive
//! - [`hlamdot_from_ldot_hlamdotmass`]: interior plus boundary
//! - [`calc_hlamdot_tendency`]: the decision procedure over a
//!   [`TendencyRequest`]
//!
//! # Missing Values
//!
//! Zero-thickness cells are masked before any division. Where a flux
//! divergence or thickness is undefined the normalized tendency is zero,
//! and a missing boundary value adds nothing. Intensive inputs are
//! multiplied through without masking.

mod boundary;
mod divergence;
mod flux_law;
mod intensive;
mod reconcile;
mod request;

pub use boundary::calc_hlamdotmass;
pub use divergence::hlamdot_from_jlam;
pub use flux_law::jlammass_from_qm_lamf_lam;
pub use intensive::hlamdot_from_lamdot_h;
pub use reconcile::{calc_hlamdot_tendency, hlamdot_from_ldot_hlamdotmass};
pub use request::{BoundaryFlux, ScalarRef, Tendency, TendencyRequest};
