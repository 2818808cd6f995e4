//! Bezier curves
//!
//! Points come from the configured evaluation algorithm; the closed-form
//! derivative is used when the differential is analytical.

use crate::dispatch::{Axis, Context, integrate_parametric};
use crate::error::Result;
use math_geometry::{BezierCurve, ParametricGeometry};
use std::sync::Arc;

pub(crate) fn integrate(ctx: &Context<'_>, curve: &BezierCurve) -> Result<Vec<f64>> {
    let shared = Arc::new(curve.clone());
    let evaluation = ctx.bezier;
    let derivative = Arc::clone(&shared);
    let geometry = ParametricGeometry::new(1, move |t| shared.evaluate(t[0], evaluation))
        .with_jacobian(move |t| Ok(vec![derivative.derivative(t[0])?]));
    log::trace!(
        "integrating Bezier curve of degree {} with {:?}",
        curve.degree(),
        evaluation
    );
    integrate_parametric(ctx, &geometry, &[Axis::Unit])
}

#[cfg(test)]
mod tests {
    use crate::differential::DiffMethod;
    use crate::dispatch::{IntegrationOptions, integral_with};
    use crate::rules::GaussLegendre;
    use approx::assert_relative_eq;
    use math_geometry::{BezierCurve, BezierEvaluation, Geometry, Point3D};

    #[test]
    fn test_straight_bezier_length() {
        let curve: Geometry = BezierCurve::new(vec![
            Point3D::zero(),
            Point3D::new(1.0, 0.0, 0.0),
            Point3D::new(2.0, 0.0, 0.0),
        ])
        .unwrap()
        .into();
        for evaluation in [BezierEvaluation::Horner, BezierEvaluation::DeCasteljau] {
            for method in [DiffMethod::Analytical, DiffMethod::finite_difference()] {
                let opts = IntegrationOptions::new()
                    .with_bezier_evaluation(evaluation)
                    .with_diff_method(method);
                let length: f64 = integral_with(|_| 1.0, &curve, &opts).unwrap();
                assert_relative_eq!(length, 2.0, max_relative = 1e-8);
            }
        }
    }

    #[test]
    fn test_parabola_arc_length() {
        // B(t) = (2t, 2t², 0) from (0,0),(1,0),(2,2); ∫|B'| dt = ∫ 2√(1+4t²) dt
        let curve: Geometry = BezierCurve::new(vec![
            Point3D::new(0.0, 0.0, 0.0),
            Point3D::new(1.0, 0.0, 0.0),
            Point3D::new(2.0, 2.0, 0.0),
        ])
        .unwrap()
        .into();
        let exact = 5.0_f64.sqrt() + 0.5 * (2.0 + 5.0_f64.sqrt()).ln();
        let opts = IntegrationOptions::new().with_rule(GaussLegendre::new(30).unwrap());
        let length: f64 = integral_with(|_| 1.0, &curve, &opts).unwrap();
        assert_relative_eq!(length, exact, max_relative = 1e-10);
    }
}
