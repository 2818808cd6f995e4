//! h-adaptive cubature over axis-aligned boxes
//!
//! Genz-Malik degree-7 rule with an embedded degree-5 rule for the error
//! estimate. The region with the largest error is bisected along the axis with
//! the largest fourth divided difference. One-dimensional problems use the
//! G7-K15 pair instead, since Genz-Malik needs at least two dimensions.
//!
//! Reference: A. C. Genz and A. A. Malik, "An adaptive algorithm for numerical
//! integration over an n-dimensional rectangular region", J. Comput. Appl.
//! Math. 6 (1980).

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use serde::{Deserialize, Serialize};

use crate::QuadResult;
use crate::error::{QuadratureError, check_tolerances};
use crate::kronrod::{QuadGkOptions, norm, quadgk};

/// Options for [`hcubature`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CubatureOptions {
    /// Relative tolerance on the norm of the integral
    pub rtol: f64,
    /// Absolute tolerance
    pub atol: f64,
    /// Maximum number of integrand evaluations
    pub max_evals: usize,
}

impl Default for CubatureOptions {
    fn default() -> Self {
        Self {
            rtol: f64::EPSILON.sqrt(),
            atol: 0.0,
            max_evals: 10_000_000,
        }
    }
}

/// Genz-Malik generator points and weights for a fixed dimension
struct GenzMalik {
    dim: usize,
    /// Degree-7 weights for the five point classes
    w7: [f64; 5],
    /// Degree-5 weights for the first four point classes
    w5: [f64; 4],
}

const LAMBDA2: f64 = 0.358_568_582_800_318_1; // sqrt(9/70)
const LAMBDA4: f64 = 0.948_683_298_050_513_8; // sqrt(9/10)
const LAMBDA5: f64 = 0.688_247_201_611_685_3; // sqrt(9/19)
/// (LAMBDA2 / LAMBDA4)^2
const FOURTH_DIFF_RATIO: f64 = 1.0 / 7.0;

impl GenzMalik {
    fn new(dim: usize) -> Self {
        let n = dim as f64;
        let w7 = [
            (12824.0 - 9120.0 * n + 400.0 * n * n) / 19683.0,
            980.0 / 6561.0,
            (1820.0 - 400.0 * n) / 19683.0,
            200.0 / 19683.0,
            6859.0 / 19683.0 / 2.0_f64.powi(dim as i32),
        ];
        let w5 = [
            (729.0 - 950.0 * n + 50.0 * n * n) / 729.0,
            245.0 / 486.0,
            (265.0 - 100.0 * n) / 1458.0,
            25.0 / 729.0,
        ];
        Self { dim, w7, w5 }
    }

    /// Evaluations per region: 1 + 4n + 2n(n-1) + 2^n
    fn num_points(&self) -> usize {
        let n = self.dim;
        1 + 4 * n + 2 * n * (n - 1) + (1 << n)
    }

    fn evaluate<F, E>(
        &self,
        f: &mut F,
        center: Vec<f64>,
        half_width: Vec<f64>,
        buf: &mut [f64],
    ) -> Result<Region, E>
    where
        F: FnMut(&[f64], &mut [f64]) -> Result<(), E>,
    {
        let n = self.dim;
        let ncomp = buf.len();
        let mut x = center.clone();

        f(&x, buf)?;
        let f0 = buf.to_vec();

        let mut sum2 = vec![0.0; ncomp];
        let mut sum3 = vec![0.0; ncomp];
        let mut sum4 = vec![0.0; ncomp];
        let mut sum5 = vec![0.0; ncomp];
        let mut fourth_diff = vec![0.0; n];

        let mut d2 = vec![0.0; ncomp];
        let mut d3 = vec![0.0; ncomp];
        for i in 0..n {
            d2.iter_mut().for_each(|v| *v = 0.0);
            d3.iter_mut().for_each(|v| *v = 0.0);
            for sign in [-1.0, 1.0] {
                x[i] = center[i] + sign * LAMBDA2 * half_width[i];
                f(&x, buf)?;
                for k in 0..ncomp {
                    d2[k] += buf[k];
                }
                x[i] = center[i] + sign * LAMBDA4 * half_width[i];
                f(&x, buf)?;
                for k in 0..ncomp {
                    d3[k] += buf[k];
                }
            }
            x[i] = center[i];

            let mut diff_sq = 0.0;
            for k in 0..ncomp {
                sum2[k] += d2[k];
                sum3[k] += d3[k];
                let diff = d2[k] - 2.0 * f0[k] - FOURTH_DIFF_RATIO * (d3[k] - 2.0 * f0[k]);
                diff_sq += diff * diff;
            }
            fourth_diff[i] = diff_sq.sqrt();
        }

        for i in 0..n {
            for j in (i + 1)..n {
                for (si, sj) in [(-1.0, -1.0), (-1.0, 1.0), (1.0, -1.0), (1.0, 1.0)] {
                    x[i] = center[i] + si * LAMBDA4 * half_width[i];
                    x[j] = center[j] + sj * LAMBDA4 * half_width[j];
                    f(&x, buf)?;
                    for k in 0..ncomp {
                        sum4[k] += buf[k];
                    }
                }
                x[i] = center[i];
                x[j] = center[j];
            }
        }

        for corner in 0..(1usize << n) {
            for i in 0..n {
                let sign = if corner & (1 << i) == 0 { -1.0 } else { 1.0 };
                x[i] = center[i] + sign * LAMBDA5 * half_width[i];
            }
            f(&x, buf)?;
            for k in 0..ncomp {
                sum5[k] += buf[k];
            }
        }

        let volume: f64 = half_width.iter().map(|h| 2.0 * h).product();
        let mut integral = vec![0.0; ncomp];
        let mut diff_sq = 0.0;
        for k in 0..ncomp {
            let i7 = volume
                * (self.w7[0] * f0[k]
                    + self.w7[1] * sum2[k]
                    + self.w7[2] * sum3[k]
                    + self.w7[3] * sum4[k]
                    + self.w7[4] * sum5[k]);
            let i5 = volume
                * (self.w5[0] * f0[k]
                    + self.w5[1] * sum2[k]
                    + self.w5[2] * sum3[k]
                    + self.w5[3] * sum4[k]);
            integral[k] = i7;
            diff_sq += (i7 - i5).powi(2);
        }

        let split_axis = choose_split_axis(&fourth_diff, &half_width);

        Ok(Region {
            center,
            half_width,
            integral,
            error: diff_sq.sqrt(),
            split_axis,
        })
    }
}

/// Largest fourth difference wins; near ties go to the widest axis.
fn choose_split_axis(fourth_diff: &[f64], half_width: &[f64]) -> usize {
    let max_diff = fourth_diff.iter().copied().fold(0.0, f64::max);
    let mut best = 0;
    let mut best_width = f64::NEG_INFINITY;
    for (i, (&d, &h)) in fourth_diff.iter().zip(half_width).enumerate() {
        let is_max = (max_diff - d) <= 1e-12 * max_diff.max(f64::MIN_POSITIVE);
        if is_max && h > best_width {
            best = i;
            best_width = h;
        }
    }
    best
}

struct Region {
    center: Vec<f64>,
    half_width: Vec<f64>,
    integral: Vec<f64>,
    error: f64,
    split_axis: usize,
}

impl PartialEq for Region {
    fn eq(&self, other: &Self) -> bool {
        self.error.total_cmp(&other.error) == Ordering::Equal
    }
}

impl Eq for Region {}

impl PartialOrd for Region {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Region {
    fn cmp(&self, other: &Self) -> Ordering {
        self.error.total_cmp(&other.error)
    }
}

/// Integrate a vector-valued function over the box `[lower, upper]`.
///
/// All bounds must be finite. `f(x, out)` writes `ncomp` components.
pub fn hcubature<F, E>(
    mut f: F,
    lower: &[f64],
    upper: &[f64],
    ncomp: usize,
    options: &CubatureOptions,
) -> Result<QuadResult, E>
where
    F: FnMut(&[f64], &mut [f64]) -> Result<(), E>,
    E: From<QuadratureError>,
{
    if lower.len() != upper.len() || lower.is_empty() {
        return Err(QuadratureError::DimensionMismatch {
            context: "hcubature",
            lower_len: lower.len(),
            upper_len: upper.len(),
        }
        .into());
    }
    for (&a, &b) in lower.iter().zip(upper) {
        if !a.is_finite() || !b.is_finite() || a > b {
            return Err(QuadratureError::InvalidInterval {
                lower: a,
                upper: b,
                context: "hcubature",
            }
            .into());
        }
    }
    check_tolerances(options.rtol, options.atol, options.max_evals)?;

    let dim = lower.len();
    if dim == 1 {
        let gk = QuadGkOptions {
            rtol: options.rtol,
            atol: options.atol,
            max_evals: options.max_evals,
        };
        let mut x = [0.0];
        return quadgk(
            |t, out: &mut [f64]| {
                x[0] = t;
                f(&x, out)
            },
            lower[0],
            upper[0],
            ncomp,
            &gk,
        );
    }

    if lower.iter().zip(upper).any(|(a, b)| a == b) {
        return Ok(QuadResult::zero(ncomp));
    }

    let rule = GenzMalik::new(dim);
    let points_per_region = rule.num_points();
    let mut buf = vec![0.0; ncomp];

    let center: Vec<f64> = lower.iter().zip(upper).map(|(a, b)| 0.5 * (a + b)).collect();
    let half_width: Vec<f64> = lower.iter().zip(upper).map(|(a, b)| 0.5 * (b - a)).collect();
    let first = rule.evaluate(&mut f, center, half_width, &mut buf)?;
    let mut neval = points_per_region;

    let mut total = first.integral.clone();
    let mut total_error = first.error;
    let mut heap = BinaryHeap::new();
    heap.push(first);

    let tolerance = |integral: &[f64]| options.atol.max(options.rtol * norm(integral));

    while total_error > tolerance(&total) && neval + 2 * points_per_region <= options.max_evals {
        let Some(worst) = heap.pop() else { break };
        let axis = worst.split_axis;

        let mut half_width = worst.half_width.clone();
        half_width[axis] *= 0.5;
        let mut left_center = worst.center.clone();
        left_center[axis] -= half_width[axis];
        let mut right_center = worst.center.clone();
        right_center[axis] += half_width[axis];

        let left = rule.evaluate(&mut f, left_center, half_width.clone(), &mut buf)?;
        let right = rule.evaluate(&mut f, right_center, half_width, &mut buf)?;
        neval += 2 * points_per_region;

        for (k, t) in total.iter_mut().enumerate() {
            *t += left.integral[k] + right.integral[k] - worst.integral[k];
        }
        total_error += left.error + right.error - worst.error;

        heap.push(left);
        heap.push(right);
    }

    let mut integral = vec![0.0; ncomp];
    let mut error = 0.0;
    for region in heap.iter() {
        for (acc, v) in integral.iter_mut().zip(&region.integral) {
            *acc += v;
        }
        error += region.error;
    }
    let converged = error <= tolerance(&integral);

    if !converged {
        log::warn!(
            "hcubature did not converge in {} dimensions: error {:.2e} after {} evaluations",
            dim,
            error,
            neval
        );
    }

    Ok(QuadResult {
        integral,
        error,
        neval,
        converged,
    })
}
