//! Adaptive Gauss-Kronrod rule

use super::{Kernel, check_box};
use crate::error::{IntegralError, Result};
use math_quadrature::{QuadGkOptions, QuadResult, quadgk};

/// Adaptive G7-K15 quadrature
///
/// One-dimensional boxes may have infinite bounds. Two-dimensional boxes are
/// handled by nesting, which is slow and deprecated in favour of
/// [`HAdaptiveCubature`](super::HAdaptiveCubature).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GaussKronrod {
    options: QuadGkOptions,
}

impl GaussKronrod {
    /// Default tolerances: `rtol = √ε`, `atol = 0`, at most 10⁷ evaluations
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: QuadGkOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &QuadGkOptions {
        &self.options
    }

    /// Integrate over `[a, b]` with a scalar parameter kernel
    pub(crate) fn integrate_interval<F>(
        &self,
        f: F,
        a: f64,
        b: f64,
        ncomp: usize,
    ) -> Result<QuadResult>
    where
        F: FnMut(f64, &mut [f64]) -> Result<()>,
    {
        quadgk(f, a, b, ncomp, &self.options)
    }

    pub(crate) fn integrate_box(
        &self,
        kernel: &Kernel<'_>,
        lower: &[f64],
        upper: &[f64],
        ncomp: usize,
    ) -> Result<QuadResult> {
        check_box("GaussKronrod", lower, upper)?;
        match lower.len() {
            1 => self.integrate_interval(|t, out| kernel(&[t], out), lower[0], upper[0], ncomp),
            2 => {
                log::warn!(
                    "nested GaussKronrod over a 2-D box is deprecated and slow, use HAdaptiveCubature"
                );
                let mut inner_neval = 0;
                let mut inner_converged = true;
                let mut outer = self.integrate_interval(
                    |u, out| {
                        let inner = self.integrate_interval(
                            |v, inner_out| kernel(&[u, v], inner_out),
                            lower[1],
                            upper[1],
                            ncomp,
                        )?;
                        inner_neval += inner.neval;
                        inner_converged &= inner.converged;
                        out.copy_from_slice(&inner.integral);
                        Ok(())
                    },
                    lower[0],
                    upper[0],
                    ncomp,
                )?;
                outer.neval = inner_neval;
                outer.converged &= inner_converged;
                Ok(outer)
            }
            dim => Err(IntegralError::InvalidParameter {
                parameter: "dimension",
                message: format!("GaussKronrod integrates 1-D or 2-D boxes, got {}-D", dim),
            }),
        }
    }
}
