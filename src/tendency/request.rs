//! Tendency request descriptors.
//!
//! A request describes what the caller has (an intensive tendency, an
//! extensive tendency, or an interior flux plus a boundary flux) together
//! with the scalar field the tendency refers to. Every variant carries
//! exactly the inputs its reconciliation path reads.

use crate::field::Field;

/// Scalar value carried by a mass flux.
#[derive(Clone, Debug, PartialEq)]
pub enum ScalarRef {
    /// Uniform value, e.g. `0.0` for salt carried by freshwater.
    Constant(f64),
    /// Spatially varying value, e.g. sea-surface temperature.
    Field(Field),
}

impl From<f64> for ScalarRef {
    fn from(value: f64) -> Self {
        ScalarRef::Constant(value)
    }
}

impl From<Field> for ScalarRef {
    fn from(field: Field) -> Self {
        ScalarRef::Field(field)
    }
}

/// Flux entering at the vertical boundary of the domain.
#[derive(Clone, Debug, PartialEq)]
pub enum BoundaryFlux {
    /// Already a tracer flux; added as is.
    Tracer { flux: Field },
    /// Mass flux on the faces, converted to a tracer flux with the
    /// scalar it carries.
    Mass {
        flux: Field,
        scalar_in_mass: ScalarRef,
    },
}

impl BoundaryFlux {
    /// Tracer-flux boundary term.
    pub fn tracer(flux: Field) -> Self {
        BoundaryFlux::Tracer { flux }
    }

    /// Mass-flux boundary term carrying `scalar_in_mass`.
    pub fn mass(flux: Field, scalar_in_mass: impl Into<ScalarRef>) -> Self {
        BoundaryFlux::Mass {
            flux,
            scalar_in_mass: scalar_in_mass.into(),
        }
    }

    /// True when the flux is a mass flux.
    pub fn is_mass(&self) -> bool {
        matches!(self, BoundaryFlux::Mass { .. })
    }

    /// The flux field, mass or tracer.
    pub fn flux(&self) -> &Field {
        match self {
            BoundaryFlux::Tracer { flux } | BoundaryFlux::Mass { flux, .. } => flux,
        }
    }
}

/// Form in which the tendency is supplied.
#[derive(Clone, Debug, PartialEq)]
pub enum Tendency {
    /// Per-unit-thickness tendency on cell centers.
    Intensive { lamdot: Field },
    /// Thickness-weighted tendency on cell centers.
    Extensive { hlamdot: Field },
    /// Interior flux on cell faces plus a boundary contribution.
    ExtensiveWithBoundary { jlam: Field, boundary: BoundaryFlux },
}

/// Everything needed to produce one extensive tendency field.
#[derive(Clone, Debug, PartialEq)]
pub struct TendencyRequest {
    /// Scalar field on cell centers.
    pub scalar: Field,
    /// Supplied tendency.
    pub tendency: Tendency,
}

impl TendencyRequest {
    /// Request for an intensive tendency.
    pub fn intensive(scalar: Field, lamdot: Field) -> Self {
        Self {
            scalar,
            tendency: Tendency::Intensive { lamdot },
        }
    }

    /// Request for an extensive tendency without boundary term.
    pub fn extensive(scalar: Field, hlamdot: Field) -> Self {
        Self {
            scalar,
            tendency: Tendency::Extensive { hlamdot },
        }
    }

    /// Request for an interior flux plus a boundary term.
    pub fn with_boundary(scalar: Field, jlam: Field, boundary: BoundaryFlux) -> Self {
        Self {
            scalar,
            tendency: Tendency::ExtensiveWithBoundary { jlam, boundary },
        }
    }

    /// True unless the tendency is intensive.
    pub fn is_extensive(&self) -> bool {
        !matches!(self.tendency, Tendency::Intensive { .. })
    }

    /// True when a boundary term is present.
    pub fn has_boundary(&self) -> bool {
        self.boundary().is_some()
    }

    /// Boundary term, if any.
    pub fn boundary(&self) -> Option<&BoundaryFlux> {
        match &self.tendency {
            Tendency::ExtensiveWithBoundary { boundary, .. } => Some(boundary),
            _ => None,
        }
    }

    /// The supplied tendency or flux array.
    pub fn array(&self) -> &Field {
        match &self.tendency {
            Tendency::Intensive { lamdot } => lamdot,
            Tendency::Extensive { hlamdot } => hlamdot,
            Tendency::ExtensiveWithBoundary { jlam, .. } => jlam,
        }
    }
}
