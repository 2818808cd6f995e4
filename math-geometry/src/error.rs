//! Error types for geometry construction and evaluation.

use thiserror::Error;

/// Errors raised by shapes and their parametrizations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// A parametric point lies outside the geometry's canonical domain.
    #[error("{geometry}({value:?}) is not defined: {reason}")]
    DomainViolation {
        geometry: &'static str,
        /// The offending parameter values
        value: Vec<f64>,
        reason: String,
    },

    /// Wrong number of parameters passed to a parametrization.
    #[error("{geometry} expects {expected} parameter(s), got {got}")]
    DimensionMismatch {
        geometry: &'static str,
        expected: usize,
        got: usize,
    },

    /// Bezier curve whose binomial coefficients would overflow `f64`.
    #[error(
        "{geometry} with {control_points} control points exceeds the maximum of {max} supported control points"
    )]
    DegreeTooHigh {
        geometry: &'static str,
        control_points: usize,
        max: usize,
    },

    /// Construction arguments describe a degenerate shape.
    #[error("degenerate {geometry}: {reason}")]
    Degenerate { geometry: &'static str, reason: String },

    /// The geometry has no parametrization and must be discretized first.
    #[error("{geometry} has no parametrization, discretize it first")]
    NoParametrization { geometry: &'static str },

    /// No closed-form Jacobian is available for the geometry.
    #[error("{geometry} has no analytical jacobian")]
    NoAnalyticalJacobian { geometry: &'static str },

    /// Polygon triangulation failed.
    #[error("triangulation of {geometry} failed: {reason}")]
    Triangulation { geometry: &'static str, reason: String },

    /// Elements of a domain have different parametric dimensions.
    #[error(
        "domain elements must share one parametric dimension: expected {expected}, found {found} at element {index}"
    )]
    HeterogeneousDomain {
        expected: usize,
        found: usize,
        index: usize,
    },
}

/// A specialized `Result` type for geometry operations.
pub type Result<T> = std::result::Result<T, GeometryError>;

impl GeometryError {
    /// Returns `true` when a parameter fell outside the canonical domain.
    pub fn is_domain_error(&self) -> bool {
        matches!(self, GeometryError::DomainViolation { .. })
    }

    pub(crate) fn degenerate(geometry: &'static str, reason: impl Into<String>) -> Self {
        GeometryError::Degenerate {
            geometry,
            reason: reason.into(),
        }
    }
}

/// Check that `params` has exactly `expected` entries.
pub(crate) fn check_params(geometry: &'static str, params: &[f64], expected: usize) -> Result<()> {
    if params.len() != expected {
        return Err(GeometryError::DimensionMismatch {
            geometry,
            expected,
            got: params.len(),
        });
    }
    Ok(())
}

/// Check that every parameter lies in `[0, 1]`.
pub(crate) fn check_unit_box(geometry: &'static str, params: &[f64], expected: usize) -> Result<()> {
    check_params(geometry, params, expected)?;
    if params.iter().any(|t| !(0.0..=1.0).contains(t)) {
        return Err(GeometryError::DomainViolation {
            geometry,
            value: params.to_vec(),
            reason: "parameters must lie in [0, 1]".to_string(),
        });
    }
    Ok(())
}
