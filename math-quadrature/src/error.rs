//! Error types for the quadrature primitives.

use thiserror::Error;

/// Errors raised before any integrand evaluation takes place.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuadratureError {
    /// A rule or option parameter is out of its valid range.
    #[error("invalid parameter '{parameter}': {message}")]
    InvalidParameter {
        /// Name of the offending parameter
        parameter: &'static str,
        /// What is wrong with it
        message: String,
    },

    /// Integration bounds are NaN or reversed.
    #[error("invalid interval [{lower}, {upper}] in {context}")]
    InvalidInterval {
        /// Lower bound
        lower: f64,
        /// Upper bound
        upper: f64,
        /// Primitive that rejected the interval
        context: &'static str,
    },

    /// Lower and upper bound vectors differ in length, or are empty.
    #[error("dimension mismatch in {context}: lower has {lower_len} bounds, upper has {upper_len}")]
    DimensionMismatch {
        /// Primitive that rejected the bounds
        context: &'static str,
        /// Number of lower bounds
        lower_len: usize,
        /// Number of upper bounds
        upper_len: usize,
    },
}

/// A specialized `Result` type for quadrature operations.
pub type Result<T> = std::result::Result<T, QuadratureError>;

impl QuadratureError {
    /// Returns `true` for errors about rule or option parameters.
    pub fn is_parameter_error(&self) -> bool {
        matches!(self, QuadratureError::InvalidParameter { .. })
    }

    /// Returns `true` for errors about integration bounds.
    pub fn is_bounds_error(&self) -> bool {
        matches!(
            self,
            QuadratureError::InvalidInterval { .. } | QuadratureError::DimensionMismatch { .. }
        )
    }
}

pub(crate) fn check_tolerances(rtol: f64, atol: f64, max_evals: usize) -> Result<()> {
    if !(rtol >= 0.0 && rtol.is_finite()) {
        return Err(QuadratureError::InvalidParameter {
            parameter: "rtol",
            message: format!("must be finite and non-negative, got {}", rtol),
        });
    }
    if !(atol >= 0.0 && atol.is_finite()) {
        return Err(QuadratureError::InvalidParameter {
            parameter: "atol",
            message: format!("must be finite and non-negative, got {}", atol),
        });
    }
    if max_evals == 0 {
        return Err(QuadratureError::InvalidParameter {
            parameter: "max_evals",
            message: "must allow at least one evaluation".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = QuadratureError::InvalidInterval {
            lower: 2.0,
            upper: 1.0,
            context: "quadgk",
        };
        assert_eq!(err.to_string(), "invalid interval [2, 1] in quadgk");
        assert!(err.is_bounds_error());
        assert!(!err.is_parameter_error());
    }

    #[test]
    fn test_check_tolerances() {
        assert!(check_tolerances(1e-8, 0.0, 10).is_ok());
        assert!(check_tolerances(-1.0, 0.0, 10).unwrap_err().is_parameter_error());
        assert!(check_tolerances(1e-8, f64::NAN, 10).is_err());
        assert!(check_tolerances(1e-8, 0.0, 0).is_err());
    }
}
