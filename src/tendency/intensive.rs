//! Intensive to extensive tendency conversion.

use crate::error::Result;
use crate::field::Field;

/// `h * lamdot`.
///
/// No masking: missing thicknesses or tendencies stay missing.
pub fn hlamdot_from_lamdot_h(lamdot: &Field, h: &Field) -> Result<Field> {
    h.try_mul(lamdot)
}
