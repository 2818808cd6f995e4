//! Bezier curves
//!
//! A curve of degree `N` has `N + 1` control points and is defined on
//! `t ∈ [0, 1]`. Two evaluation algorithms are offered:
//!
//! - [`BezierEvaluation::DeCasteljau`]: repeated linear interpolation,
//!   O(N²) but numerically stable
//! - [`BezierEvaluation::Horner`]: Bernstein form via Horner's scheme, O(N)
//!   but less accurate for high degrees

use crate::error::{GeometryError, Result, check_params};
use crate::parametrized::Parametrized;
use crate::types::Point3D;
use serde::{Deserialize, Serialize};

/// Largest supported number of control points. Binomial coefficients of
/// higher degrees overflow `f64`.
pub const MAX_BEZIER_CONTROL_POINTS: usize = 1000;

/// Algorithm used to evaluate a Bezier curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BezierEvaluation {
    /// Fast, less precise
    Horner,
    /// Precise, quadratic in the degree
    #[default]
    DeCasteljau,
}

/// Bezier curve defined by its control points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BezierCurveData")]
pub struct BezierCurve {
    control_points: Vec<Point3D>,
}

#[derive(Deserialize)]
struct BezierCurveData {
    control_points: Vec<Point3D>,
}

impl TryFrom<BezierCurveData> for BezierCurve {
    type Error = GeometryError;

    fn try_from(data: BezierCurveData) -> Result<Self> {
        Self::new(data.control_points)
    }
}

impl BezierCurve {
    /// Build a curve from at least two control points.
    ///
    /// Curves with more than [`MAX_BEZIER_CONTROL_POINTS`] points can be
    /// built, but evaluating their derivative fails.
    pub fn new(control_points: Vec<Point3D>) -> Result<Self> {
        if control_points.len() < 2 {
            return Err(GeometryError::degenerate(
                "BezierCurve",
                format!("need at least 2 control points, got {}", control_points.len()),
            ));
        }
        Ok(Self { control_points })
    }

    pub fn control_points(&self) -> &[Point3D] {
        &self.control_points
    }

    pub fn degree(&self) -> usize {
        self.control_points.len() - 1
    }

    fn check_domain(&self, t: f64) -> Result<()> {
        if !(0.0..=1.0).contains(&t) {
            return Err(GeometryError::DomainViolation {
                geometry: "BezierCurve",
                value: vec![t],
                reason: "bezier(t) is not defined for t outside [0, 1]".to_string(),
            });
        }
        Ok(())
    }

    fn check_degree(&self) -> Result<()> {
        if self.control_points.len() > MAX_BEZIER_CONTROL_POINTS {
            return Err(GeometryError::DegreeTooHigh {
                geometry: "BezierCurve",
                control_points: self.control_points.len(),
                max: MAX_BEZIER_CONTROL_POINTS,
            });
        }
        Ok(())
    }

    /// Evaluate the curve at `t` with the chosen algorithm
    pub fn evaluate(&self, t: f64, method: BezierEvaluation) -> Result<Point3D> {
        self.check_domain(t)?;
        match method {
            BezierEvaluation::DeCasteljau => Ok(de_casteljau(&self.control_points, t)),
            BezierEvaluation::Horner => {
                self.check_degree()?;
                Ok(horner(&self.control_points, t))
            }
        }
    }

    /// Tangent vector `dP/dt`:
    /// `N · Σ_{i=0}^{N-1} B_i^{N-1}(t) (P_{i+1} - P_i)`
    pub fn derivative(&self, t: f64) -> Result<Point3D> {
        self.check_domain(t)?;
        self.check_degree()?;

        let n = self.degree();
        let m = n - 1;
        let s = 1.0 - t;
        let mut sum = Point3D::zero();
        for (i, w) in self.control_points.windows(2).enumerate() {
            let basis = binomial(m, i) * t.powi(i as i32) * s.powi((m - i) as i32);
            sum += (w[1] - w[0]) * basis;
        }
        Ok(sum * n as f64)
    }
}

impl Parametrized for BezierCurve {
    fn name(&self) -> &'static str {
        "BezierCurve"
    }

    fn paramdim(&self) -> usize {
        1
    }

    fn point(&self, params: &[f64]) -> Result<Point3D> {
        check_params(self.name(), params, 1)?;
        self.evaluate(params[0], BezierEvaluation::default())
    }

    fn has_analytical_jacobian(&self) -> bool {
        true
    }

    fn analytical_jacobian(&self, params: &[f64]) -> Result<Vec<Point3D>> {
        check_params(self.name(), params, 1)?;
        Ok(vec![self.derivative(params[0])?])
    }

    /// No closed form for the arc length
    fn measure(&self) -> Option<f64> {
        None
    }
}

/// Binomial coefficient `C(n, k)` as `f64`
pub fn binomial(n: usize, k: usize) -> f64 {
    if k > n {
        return 0.0;
    }
    let k = k.min(n - k);
    let mut c = 1.0;
    for i in 1..=k {
        c = c * (n - k + i) as f64 / i as f64;
    }
    c.round()
}

fn de_casteljau(points: &[Point3D], t: f64) -> Point3D {
    let mut work = points.to_vec();
    for level in (1..work.len()).rev() {
        for i in 0..level {
            work[i] = work[i].lerp(&work[i + 1], t);
        }
    }
    work[0]
}

fn horner(points: &[Point3D], t: f64) -> Point3D {
    // Evaluate in the half where t/(1-t) <= 1
    if t > 0.5 {
        let reversed: Vec<Point3D> = points.iter().rev().copied().collect();
        return horner(&reversed, 1.0 - t);
    }
    let n = points.len() - 1;
    let s = 1.0 - t;
    let ratio = t / s;
    let mut acc = points[n];
    for i in (0..n).rev() {
        acc = acc * ratio + points[i] * binomial(n, i);
    }
    acc * s.powi(n as i32)
}
