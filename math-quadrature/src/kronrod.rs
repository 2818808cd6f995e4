//! Adaptive Gauss-Kronrod quadrature in one dimension
//!
//! Uses the G7-K15 pair with global adaptive bisection: the interval with the
//! largest error estimate is split until the total error meets the tolerance
//! or the evaluation budget is spent. Integrands are vector valued; the error
//! of a segment is the Euclidean norm of the Kronrod-Gauss difference.
//!
//! Infinite bounds are mapped onto finite intervals:
//! - `(-∞, ∞)`: `x = t / (1 - t²)`, `t ∈ (-1, 1)`
//! - `[a, ∞)`: `x = a + t / (1 - t)`, `t ∈ [0, 1)`
//! - `(-∞, b]`: `x = b - t / (1 - t)`, `t ∈ [0, 1)`

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use serde::{Deserialize, Serialize};

use crate::QuadResult;
use crate::error::{QuadratureError, check_tolerances};

/// Kronrod nodes, non-negative half (index 7 is the center)
const XGK: [f64; 8] = [
    0.991_455_371_120_812_6,
    0.949_107_912_342_758_5,
    0.864_864_423_359_769_1,
    0.741_531_185_599_394_4,
    0.586_087_235_467_691_1,
    0.405_845_151_377_397_2,
    0.207_784_955_007_898_5,
    0.0,
];

/// Kronrod weights matching `XGK`
const WGK: [f64; 8] = [
    0.022_935_322_010_529_225,
    0.063_092_092_629_978_55,
    0.104_790_010_322_250_18,
    0.140_653_259_715_525_92,
    0.169_004_726_639_267_9,
    0.190_350_578_064_785_4,
    0.204_432_940_075_298_9,
    0.209_482_141_084_727_83,
];

/// Gauss weights at `XGK[1]`, `XGK[3]`, `XGK[5]`, `XGK[7]`
const WG: [f64; 4] = [
    0.129_484_966_168_869_7,
    0.279_705_391_489_276_7,
    0.381_830_050_505_118_9,
    0.417_959_183_673_469_4,
];

/// Number of integrand evaluations per G7-K15 panel
pub const GK15_EVALS: usize = 15;

/// Options for [`quadgk`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuadGkOptions {
    /// Relative tolerance on the norm of the integral
    pub rtol: f64,
    /// Absolute tolerance
    pub atol: f64,
    /// Maximum number of integrand evaluations
    pub max_evals: usize,
}

impl Default for QuadGkOptions {
    fn default() -> Self {
        Self {
            rtol: f64::EPSILON.sqrt(),
            atol: 0.0,
            max_evals: 10_000_000,
        }
    }
}

/// One panel of the adaptive partition
struct Segment {
    a: f64,
    b: f64,
    integral: Vec<f64>,
    error: f64,
}

impl PartialEq for Segment {
    fn eq(&self, other: &Self) -> bool {
        self.error.total_cmp(&other.error) == Ordering::Equal
    }
}

impl Eq for Segment {}

impl PartialOrd for Segment {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Segment {
    fn cmp(&self, other: &Self) -> Ordering {
        self.error.total_cmp(&other.error)
    }
}

/// Integrate a vector-valued function over `[a, b]`.
///
/// `f(x, out)` must write `ncomp` components into `out`. Bounds may be
/// infinite. Reversed bounds negate the result.
///
/// ```
/// use math_quadrature::{QuadGkOptions, QuadratureError, quadgk};
///
/// let result = quadgk(
///     |x: f64, out: &mut [f64]| -> Result<(), QuadratureError> {
///         out[0] = (-x * x).exp();
///         Ok(())
///     },
///     f64::NEG_INFINITY,
///     f64::INFINITY,
///     1,
///     &QuadGkOptions::default(),
/// )
/// .unwrap();
/// assert!((result.integral[0] - std::f64::consts::PI.sqrt()).abs() < 1e-8);
/// ```
pub fn quadgk<F, E>(
    mut f: F,
    a: f64,
    b: f64,
    ncomp: usize,
    options: &QuadGkOptions,
) -> Result<QuadResult, E>
where
    F: FnMut(f64, &mut [f64]) -> Result<(), E>,
    E: From<QuadratureError>,
{
    if a.is_nan() || b.is_nan() {
        return Err(QuadratureError::InvalidInterval {
            lower: a,
            upper: b,
            context: "quadgk",
        }
        .into());
    }
    check_tolerances(options.rtol, options.atol, options.max_evals)?;

    if a == b {
        return Ok(QuadResult::zero(ncomp));
    }
    if a > b {
        let mut result = quadgk(f, b, a, ncomp, options)?;
        result.integral.iter_mut().for_each(|v| *v = -*v);
        return Ok(result);
    }

    match (a.is_finite(), b.is_finite()) {
        (true, true) => adaptive(&mut f, a, b, ncomp, options),
        (false, false) => {
            let mut g = |t: f64, out: &mut [f64]| -> Result<(), E> {
                let d = 1.0 - t * t;
                f(t / d, out)?;
                let jac = (1.0 + t * t) / (d * d);
                out.iter_mut().for_each(|v| *v *= jac);
                Ok(())
            };
            adaptive(&mut g, -1.0, 1.0, ncomp, options)
        }
        (true, false) => {
            let mut g = |t: f64, out: &mut [f64]| -> Result<(), E> {
                let d = 1.0 - t;
                f(a + t / d, out)?;
                let jac = 1.0 / (d * d);
                out.iter_mut().for_each(|v| *v *= jac);
                Ok(())
            };
            adaptive(&mut g, 0.0, 1.0, ncomp, options)
        }
        (false, true) => {
            let mut g = |t: f64, out: &mut [f64]| -> Result<(), E> {
                let d = 1.0 - t;
                f(b - t / d, out)?;
                let jac = 1.0 / (d * d);
                out.iter_mut().for_each(|v| *v *= jac);
                Ok(())
            };
            adaptive(&mut g, 0.0, 1.0, ncomp, options)
        }
    }
}

fn adaptive<F, E>(
    f: &mut F,
    a: f64,
    b: f64,
    ncomp: usize,
    options: &QuadGkOptions,
) -> Result<QuadResult, E>
where
    F: FnMut(f64, &mut [f64]) -> Result<(), E>,
{
    let mut buf = vec![0.0; ncomp];
    let first = gauss_kronrod_15(f, a, b, &mut buf)?;
    let mut neval = GK15_EVALS;

    let mut total = first.integral.clone();
    let mut total_error = first.error;
    let mut heap = BinaryHeap::new();
    heap.push(first);

    let mut converged = total_error <= tolerance(&total, options);
    while !converged && neval + 2 * GK15_EVALS <= options.max_evals {
        let Some(worst) = heap.pop() else { break };

        let mid = 0.5 * (worst.a + worst.b);
        if mid <= worst.a || mid >= worst.b {
            // Interval exhausted at machine precision
            heap.push(worst);
            break;
        }

        let left = gauss_kronrod_15(f, worst.a, mid, &mut buf)?;
        let right = gauss_kronrod_15(f, mid, worst.b, &mut buf)?;
        neval += 2 * GK15_EVALS;

        for (k, t) in total.iter_mut().enumerate() {
            *t += left.integral[k] + right.integral[k] - worst.integral[k];
        }
        total_error += left.error + right.error - worst.error;

        heap.push(left);
        heap.push(right);
        converged = total_error <= tolerance(&total, options);
    }

    // Re-sum to avoid drift from the incremental updates
    let mut integral = vec![0.0; ncomp];
    let mut error = 0.0;
    for segment in heap.iter() {
        for (acc, v) in integral.iter_mut().zip(&segment.integral) {
            *acc += v;
        }
        error += segment.error;
    }
    let converged = error <= tolerance(&integral, options);

    if !converged {
        log::warn!(
            "quadgk did not converge on [{}, {}]: error {:.2e} after {} evaluations",
            a,
            b,
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

fn tolerance(integral: &[f64], options: &QuadGkOptions) -> f64 {
    options.atol.max(options.rtol * norm(integral))
}

pub(crate) fn norm(v: &[f64]) -> f64 {
    v.iter().map(|x| x * x).sum::<f64>().sqrt()
}

/// G7-K15 estimate over one segment.
fn gauss_kronrod_15<F, E>(f: &mut F, a: f64, b: f64, buf: &mut [f64]) -> Result<Segment, E>
where
    F: FnMut(f64, &mut [f64]) -> Result<(), E>,
{
    let ncomp = buf.len();
    let center = 0.5 * (a + b);
    let half_width = 0.5 * (b - a);

    let mut kronrod = vec![0.0; ncomp];
    let mut gauss = vec![0.0; ncomp];

    f(center, buf)?;
    for k in 0..ncomp {
        kronrod[k] += WGK[7] * buf[k];
        gauss[k] += WG[3] * buf[k];
    }

    for j in 0..7 {
        let dx = half_width * XGK[j];
        for x in [center - dx, center + dx] {
            f(x, buf)?;
            for k in 0..ncomp {
                kronrod[k] += WGK[j] * buf[k];
                if j % 2 == 1 {
                    gauss[k] += WG[j / 2] * buf[k];
                }
            }
        }
    }

    let mut diff_sq = 0.0;
    for k in 0..ncomp {
        kronrod[k] *= half_width;
        gauss[k] *= half_width;
        diff_sq += (kronrod[k] - gauss[k]).powi(2);
    }

    Ok(Segment {
        a,
        b,
        integral: kronrod,
        error: diff_sq.sqrt(),
    })
}
