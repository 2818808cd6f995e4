//! Rings and ropes, integrated segment by segment
//!
//! The polyline parametrization has a kink at every vertex. Summing the
//! segment integrals keeps each piece smooth.

use super::accumulate;
use crate::dispatch::{Axis, Context, integrate_parametric};
use crate::error::Result;
use math_geometry::Segment;

pub(crate) fn integrate(ctx: &Context<'_>, segments: &[Segment]) -> Result<Vec<f64>> {
    let mut total = vec![0.0; ctx.ncomp];
    for segment in segments {
        let part = integrate_parametric(ctx, segment, &[Axis::Unit])?;
        accumulate(&mut total, &part);
    }
    log::trace!("integrated polyline of {} segments", segments.len());
    Ok(total)
}

#[cfg(test)]
mod tests {
    use crate::dispatch::{IntegrationOptions, integral, integral_with};
    use crate::rules::GaussLegendre;
    use approx::assert_relative_eq;
    use math_geometry::{Geometry, Point3D, Ring, Rope};

    fn square() -> Vec<Point3D> {
        vec![
            Point3D::new_2d(0.0, 0.0),
            Point3D::new_2d(1.0, 0.0),
            Point3D::new_2d(1.0, 1.0),
            Point3D::new_2d(0.0, 1.0),
        ]
    }

    #[test]
    fn test_ring_includes_closing_segment() {
        let ring: Geometry = Ring::new(square()).unwrap().into();
        let perimeter: f64 = integral(|_| 1.0, &ring).unwrap();
        assert_relative_eq!(perimeter, 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rope_linear_integrand() {
        let rope: Geometry = Rope::new(square()).unwrap().into();
        let opts = IntegrationOptions::new().with_rule(GaussLegendre::new(3).unwrap());
        // ∫ x ds over the three open sides: 0.5 + 1 + 0.5
        let v: f64 = integral_with(|p| p.x, &rope, &opts).unwrap();
        assert_relative_eq!(v, 2.0, epsilon = 1e-12);
    }
}
