//! Labeled multi-dimensional fields.
//!
//! A [`Field`] couples an `ndarray::ArrayD<f64>` with one name per axis.
//! Tendencies, fluxes, thicknesses and tracer values on the ocean grid are
//! all carried as fields.
//!
//! # Missing Values
//!
//! NaN is the missing value. Arithmetic propagates it the usual IEEE way;
//! the tendency pipeline decides explicitly where to fill it (see
//! [`Field::fill_missing`]) and where to introduce it (see
//! [`Field::mask_zeros`]).
//!
//! # Broadcasting
//!
//! Binary operations align axes by name, not by position:
//!
//! - the result dims are the left operand's dims followed by any dims only
//!   the right operand has;
//! - a dim present in both operands must have the same length in both;
//! - a dim present in only one operand is broadcast across the other.
//!
//! ```
//! use wmt_rs::field::Field;
//!
//! // Temperature on (z_l, xh) and a surface value on (xh)
//! let theta = Field::from_shape_vec(["z_l", "xh"], &[2, 3], vec![
//!     10.0, 11.0, 12.0,
//!      8.0,  9.0, 10.0,
//! ]).unwrap();
//! let sst = Field::from_vec("xh", vec![12.0, 12.0, 12.0]);
//!
//! let contrast = sst.try_sub(&theta).unwrap();
//! assert_eq!(contrast.dims(), &["xh".to_string(), "z_l".to_string()]);
//! assert_eq!(contrast.get(&[0, 1]), Some(4.0));
//! ```

mod arith;
mod labeled;

pub use labeled::Field;
