//! Tensor-product Gauss-Legendre rule

use super::{Kernel, check_box};
use crate::error::{IntegralError, Result};
use crate::parallel::parallel_map_indexed;
use math_quadrature::{GaussLegendreQuadrature, QuadResult};

/// `n`-point Gauss-Legendre rule, applied as an `n^N` tensor grid
///
/// Nodes and weights are computed once at construction. The rule has no
/// error control: results report zero error and are always converged.
#[derive(Debug, Clone, PartialEq)]
pub struct GaussLegendre {
    quadrature: GaussLegendreQuadrature,
}

impl GaussLegendre {
    /// Compute an `n`-point rule; `n = 0` is rejected.
    pub fn new(n: usize) -> Result<Self> {
        Ok(Self {
            quadrature: GaussLegendreQuadrature::new(n)?,
        })
    }

    /// Number of nodes per axis
    pub fn n(&self) -> usize {
        self.quadrature.len()
    }

    /// Nodes on [-1, 1]
    pub fn nodes(&self) -> &[f64] {
        &self.quadrature.nodes
    }

    /// Weights on [-1, 1]
    pub fn weights(&self) -> &[f64] {
        &self.quadrature.weights
    }

    /// The grid is split across the first axis; partial sums are combined in
    /// node order.
    pub(crate) fn integrate_box(
        &self,
        kernel: &Kernel<'_>,
        lower: &[f64],
        upper: &[f64],
        ncomp: usize,
    ) -> Result<QuadResult> {
        check_box("GaussLegendre", lower, upper)?;
        if let Some((a, b)) = lower
            .iter()
            .zip(upper)
            .find(|(a, b)| !a.is_finite() || !b.is_finite())
        {
            return Err(IntegralError::InvalidParameter {
                parameter: "bounds",
                message: format!("GaussLegendre needs finite bounds, got [{}, {}]", a, b),
            });
        }

        let dim = lower.len();
        let q = &self.quadrature;
        let mid: Vec<f64> = lower.iter().zip(upper).map(|(a, b)| 0.5 * (a + b)).collect();
        let half: Vec<f64> = lower.iter().zip(upper).map(|(a, b)| 0.5 * (b - a)).collect();
        let scale: f64 = half.iter().product();

        let partials: Vec<Result<Vec<f64>>> = parallel_map_indexed(q.len(), |i| {
            let mut acc = vec![0.0; ncomp];
            let mut buf = vec![0.0; ncomp];
            let mut x = mid.clone();
            x[0] = mid[0] + half[0] * q.nodes[i];
            let w0 = q.weights[i];

            if dim == 1 {
                kernel(&x, &mut buf)?;
                for (a, v) in acc.iter_mut().zip(&buf) {
                    *a += w0 * v;
                }
                return Ok(acc);
            }

            q.try_for_each_tensor_node(dim - 1, |coords, w| -> Result<()> {
                for (k, c) in coords.iter().enumerate() {
                    x[k + 1] = mid[k + 1] + half[k + 1] * c;
                }
                kernel(&x, &mut buf)?;
                let weight = w0 * w;
                for (a, v) in acc.iter_mut().zip(&buf) {
                    *a += weight * v;
                }
                Ok(())
            })?;
            Ok(acc)
        });

        let mut integral = vec![0.0; ncomp];
        for partial in partials {
            for (total, v) in integral.iter_mut().zip(partial?) {
                *total += v;
            }
        }
        integral.iter_mut().for_each(|v| *v *= scale);

        Ok(QuadResult {
            integral,
            error: 0.0,
            neval: q.len().pow(dim as u32),
            converged: true,
        })
    }
}
