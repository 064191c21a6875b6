//! # wmt-rs
//!
//! Tendency diagnostics for water-mass transformation (WMT) analysis.
//!
//! Ocean model output provides the rate of change of a scalar (temperature,
//! salinity, ...) in many forms: per unit thickness or thickness-weighted,
//! as fluxes through cell faces, with or without surface forcing given as a
//! mass flux. This crate reconciles them into one vertically-extensive
//! tendency `h * dlam/dt` on a staggered vertical grid, and defines the bin
//! edges used to histogram that tendency by scalar value.
//!
//! This crate provides:
//! - Labeled fields with name-aligned broadcasting ([`field`])
//! - A staggered vertical grid with thickness metrics ([`grid`])
//! - Sigma stretching for terrain-following thicknesses ([`vertical`])
//! - The tendency reconciliation pipeline ([`tendency`])
//! - Bin edge definition ([`bins`])
//!
//! # Example
//!
//! ```
//! use wmt_rs::{Field, TendencyRequest, ZGrid, bin_define, calc_hlamdot_tendency};
//!
//! let grid = ZGrid::with_thickness(Field::from_vec("z_l", vec![10.0, 20.0]));
//! let theta = Field::from_vec("z_l", vec![4.0, 12.0]);
//!
//! // Heating rate per unit thickness (degC/s)
//! let lamdot = Field::from_vec("z_l", vec![1e-6, 2e-6]);
//! let request = TendencyRequest::intensive(theta, lamdot);
//!
//! let hlamdot = calc_hlamdot_tendency(&grid, &request).unwrap();
//! assert!((hlamdot.get(&[1]).unwrap() - 4e-5).abs() < 1e-18);
//!
//! let edges = bin_define(-2.0, 30.0, 0.5).unwrap();
//! assert_eq!(edges.len(), 66);
//! ```

pub mod bins;
pub mod error;
pub mod field;
pub mod grid;
pub mod tendency;
pub mod vertical;

pub use bins::{BinSpec, bin_centers, bin_define};
pub use error::{Result, WmtError};
pub use field::Field;
pub use grid::{
    AxisPosition, Boundary, InterfaceDepths, MetricTable, StaggeredGrid, ThicknessLookup,
    ZGrid, ZMetrics,
};
pub use tendency::{
    BoundaryFlux, ScalarRef, Tendency, TendencyRequest, calc_hlamdot_tendency,
    calc_hlamdotmass, hlamdot_from_jlam, hlamdot_from_lamdot_h, hlamdot_from_ldot_hlamdotmass,
    jlammass_from_qm_lamf_lam,
};
pub use vertical::{SongHaidvogelStretching, Stretching, UniformStretching};
