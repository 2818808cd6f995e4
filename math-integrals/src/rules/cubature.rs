//! h-adaptive cubature rule

use super::{Kernel, check_box};
use crate::error::Result;
use math_quadrature::{CubatureOptions, QuadResult, hcubature};

/// Genz-Malik degree-7/5 h-adaptive cubature; G7-K15 for one dimension
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HAdaptiveCubature {
    options: CubatureOptions,
}

impl HAdaptiveCubature {
    /// Default tolerances: `rtol = √ε`, `atol = 0`, at most 10⁷ evaluations
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: CubatureOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &CubatureOptions {
        &self.options
    }

    pub(crate) fn integrate_box(
        &self,
        kernel: &Kernel<'_>,
        lower: &[f64],
        upper: &[f64],
        ncomp: usize,
    ) -> Result<QuadResult> {
        check_box("HAdaptiveCubature", lower, upper)?;
        hcubature(|x: &[f64], out: &mut [f64]| kernel(x, out), lower, upper, ncomp, &self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_three_dimensional_box() {
        let rule = HAdaptiveCubature::new();
        let kernel = |x: &[f64], out: &mut [f64]| -> Result<()> {
            out[0] = x[0] * x[1] * x[2];
            out[1] = 1.0;
            Ok(())
        };
        let r = rule.integrate_box(&kernel, &[0.0; 3], &[1.0, 2.0, 3.0], 2).unwrap();
        assert_relative_eq!(r.integral[0], 0.5 * 2.0 * 4.5, epsilon = 1e-10);
        assert_relative_eq!(r.integral[1], 6.0, epsilon = 1e-12);
        assert!(r.converged);
    }

    #[test]
    fn test_budget_limits_evaluations() {
        let rule = HAdaptiveCubature::with_options(CubatureOptions {
            rtol: 1e-15,
            atol: 0.0,
            max_evals: 2_000,
        });
        let kernel = |x: &[f64], out: &mut [f64]| -> Result<()> {
            out[0] = (x[0] * x[0] + x[1] * x[1]).sqrt();
            Ok(())
        };
        let r = rule.integrate_box(&kernel, &[-1.0, -1.0], &[1.0, 1.0], 1).unwrap();
        assert!(r.neval <= 2_000);
    }
}
