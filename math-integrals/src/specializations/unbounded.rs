//! Lines, rays and planes
//!
//! Gauss-Kronrod integrates the infinite parameter range directly. The other
//! rules integrate over a finite box through `x = t / (1 - t²)`.

use crate::dispatch::{Axis, Context, integrate_parametric};
use crate::error::Result;
use math_geometry::{Line, Plane, Ray};

pub(crate) fn integrate_line(ctx: &Context<'_>, line: &Line) -> Result<Vec<f64>> {
    integrate_parametric(ctx, line, &[Axis::Real])
}

pub(crate) fn integrate_ray(ctx: &Context<'_>, ray: &Ray) -> Result<Vec<f64>> {
    integrate_parametric(ctx, ray, &[Axis::HalfLine])
}

pub(crate) fn integrate_plane(ctx: &Context<'_>, plane: &Plane) -> Result<Vec<f64>> {
    integrate_parametric(ctx, plane, &[Axis::Real, Axis::Real])
}

#[cfg(test)]
mod tests {
    use crate::dispatch::{IntegrationOptions, integral_with};
    use crate::rules::{GaussKronrod, GaussLegendre, HAdaptiveCubature, IntegrationRule};
    use approx::assert_relative_eq;
    use math_geometry::{Geometry, Line, Plane, Point3D, Ray};
    use std::f64::consts::PI;

    fn rules() -> Vec<IntegrationRule> {
        vec![
            GaussKronrod::new().into(),
            GaussLegendre::new(100).unwrap().into(),
            HAdaptiveCubature::new().into(),
        ]
    }

    #[test]
    fn test_gaussian_along_line() {
        // unit-speed line through the origin along x
        let line: Geometry = Line::new(Point3D::zero(), Point3D::unit_x()).unwrap().into();
        for rule in rules() {
            let opts = IntegrationOptions::new().with_rule(rule.clone());
            let v: f64 = integral_with(|p| (-p.x * p.x).exp(), &line, &opts).unwrap();
            assert_relative_eq!(v, PI.sqrt(), max_relative = 1e-6);
        }
    }

    #[test]
    fn test_exponential_along_ray() {
        let ray: Geometry = Ray::new(Point3D::zero(), Point3D::new(2.0, 0.0, 0.0)).unwrap().into();
        for rule in rules() {
            let opts = IntegrationOptions::new().with_rule(rule.clone());
            let v: f64 = integral_with(|p| (-p.x).exp(), &ray, &opts).unwrap();
            assert_relative_eq!(v, 1.0, max_relative = 1e-6);
        }
    }

    #[test]
    fn test_gaussian_over_plane() {
        let plane: Geometry = Plane::xy().into();
        let rules: Vec<IntegrationRule> = vec![
            GaussLegendre::new(100).unwrap().into(),
            HAdaptiveCubature::new().into(),
        ];
        for rule in rules {
            let opts = IntegrationOptions::new().with_rule(rule.clone());
            let v: f64 =
                integral_with(|p| (-(p.x * p.x + p.y * p.y)).exp(), &plane, &opts).unwrap();
            assert_relative_eq!(v, PI, max_relative = 1e-6);
        }
    }
}
