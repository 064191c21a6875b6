//! Tracer transport carried by a mass flux.

use super::request::ScalarRef;
use crate::error::Result;
use crate::field::Field;

/// Tracer flux associated with a mass flux.
///
/// ```text
/// J = Qm * (lamf - lam)
/// ```
///
/// `qm` is the mass flux (e.g. `wfo`), `lamf` the scalar value the mass
/// carries (e.g. `tos`, or `0` for salt in freshwater) and `lam` the ambient
/// scalar field. Dims are aligned by name, so a surface `qm` broadcasts over
/// the vertical axis of `lam`.
pub fn jlammass_from_qm_lamf_lam(qm: &Field, lamf: &ScalarRef, lam: &Field) -> Result<Field> {
    let contrast = match lamf {
        ScalarRef::Constant(value) => {
            let value = *value;
            lam.map(move |x| value - x)
        }
        ScalarRef::Field(lamf) => lamf.try_sub(lam)?,
    };
    qm.try_mul(&contrast)
}
