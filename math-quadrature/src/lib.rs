//! Numerical quadrature primitives
//!
//! This crate provides the numerical building blocks used by the mesh
//! integration engine:
//!
//! - **Gauss-Legendre**: n-point nodes and weights on [-1, 1] for any n, and
//!   tensor-product traversal in any dimension
//! - **Adaptive Gauss-Kronrod**: G7-K15 with global bisection, vector-valued
//!   integrands, infinite bounds
//! - **h-adaptive cubature**: Genz-Malik degree-7/5 rule over boxes
//!
//! All integrands are vector valued: they write their components into a
//! caller-provided buffer and may fail with any error type convertible from
//! [`QuadratureError`].
//!
//! # Example
//! ```
//! use math_quadrature::{CubatureOptions, QuadratureError, hcubature};
//!
//! let result = hcubature(
//!     |x: &[f64], out: &mut [f64]| -> Result<(), QuadratureError> {
//!         out[0] = x[0] * x[1];
//!         Ok(())
//!     },
//!     &[0.0, 0.0],
//!     &[1.0, 2.0],
//!     1,
//!     &CubatureOptions::default(),
//! )
//! .unwrap();
//! assert!((result.integral[0] - 1.0).abs() < 1e-12);
//! ```

mod cubature;
mod error;
mod gauss;
mod kronrod;

pub use cubature::{CubatureOptions, hcubature};
pub use error::{QuadratureError, Result};
pub use gauss::{GaussLegendreQuadrature, legendre_eval};
pub use kronrod::{GK15_EVALS, QuadGkOptions, quadgk};

/// Outcome of an adaptive integration
#[derive(Debug, Clone, PartialEq)]
pub struct QuadResult {
    /// Integral estimate, one entry per integrand component
    pub integral: Vec<f64>,
    /// Error estimate (norm over components)
    pub error: f64,
    /// Number of integrand evaluations
    pub neval: usize,
    /// Whether the requested tolerance was met
    pub converged: bool,
}

impl QuadResult {
    pub(crate) fn zero(ncomp: usize) -> Self {
        Self {
            integral: vec![0.0; ncomp],
            error: 0.0,
            neval: 0,
            converged: true,
        }
    }
}

/// Library version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
