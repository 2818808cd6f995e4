//! Error types for the integration engine.

use math_geometry::GeometryError;
use math_quadrature::QuadratureError;
use thiserror::Error;

/// Errors raised while setting up or evaluating an integral
#[derive(Debug, Error)]
pub enum IntegralError {
    /// The geometry cannot be integrated with the requested rule.
    #[error("integrating a {geometry} with {rule} is not supported")]
    UnsupportedCombination {
        geometry: &'static str,
        rule: &'static str,
    },

    /// Analytical differentiation was requested for a geometry without a
    /// closed-form Jacobian.
    #[error(
        "{geometry} has no analytical jacobian, integrating it requires diff_method=FiniteDifference"
    )]
    UnsupportedDiffMethod { geometry: &'static str },

    /// Parametric dimension does not match what the operation needs.
    #[error("{operation} requires parametric dimension {expected}, but {geometry} has {got}")]
    DimensionMismatch {
        operation: &'static str,
        geometry: &'static str,
        expected: usize,
        got: usize,
    },

    /// An option or integrand output is out of its valid range.
    #[error("invalid parameter '{parameter}': {message}")]
    InvalidParameter {
        parameter: &'static str,
        message: String,
    },

    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Quadrature(#[from] QuadratureError),
}

/// A specialized `Result` type for integration operations.
pub type Result<T> = std::result::Result<T, IntegralError>;

impl IntegralError {
    /// Returns `true` for unsupported rule or differentiation-method choices.
    pub fn is_unsupported(&self) -> bool {
        matches!(
            self,
            IntegralError::UnsupportedCombination { .. } | IntegralError::UnsupportedDiffMethod { .. }
        )
    }

    /// Returns `true` when a parameter fell outside a geometry's domain.
    pub fn is_domain_error(&self) -> bool {
        matches!(self, IntegralError::Geometry(e) if e.is_domain_error())
    }

    /// Returns `true` for parametric dimension mismatches.
    pub fn is_dimension_error(&self) -> bool {
        matches!(
            self,
            IntegralError::DimensionMismatch { .. }
                | IntegralError::Geometry(GeometryError::DimensionMismatch { .. })
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = IntegralError::UnsupportedCombination {
            geometry: "Tetrahedron",
            rule: "GaussKronrod",
        };
        assert!(err.to_string().contains("not supported"));
        assert!(err.is_unsupported());

        let err = IntegralError::UnsupportedDiffMethod { geometry: "Sphere" };
        assert!(err.to_string().contains("requires diff_method=FiniteDifference"));

        let err = IntegralError::DimensionMismatch {
            operation: "lineintegral",
            geometry: "Sphere",
            expected: 1,
            got: 2,
        };
        assert_eq!(
            err.to_string(),
            "lineintegral requires parametric dimension 1, but Sphere has 2"
        );
        assert!(err.is_dimension_error());
    }

    #[test]
    fn test_conversions() {
        let err: IntegralError = GeometryError::DomainViolation {
            geometry: "BezierCurve",
            value: vec![1.5],
            reason: "outside [0, 1]".to_string(),
        }
        .into();
        assert!(err.is_domain_error());
        assert!(!err.is_unsupported());

        let err: IntegralError = QuadratureError::InvalidParameter {
            parameter: "n",
            message: "zero".to_string(),
        }
        .into();
        assert!(err.to_string().contains("invalid parameter 'n'"));
    }
}
