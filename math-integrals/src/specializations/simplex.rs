//! Triangles and tetrahedra
//!
//! Barycentric domains are not boxes. Gauss-Kronrod integrates a triangle
//! as a nested integral with a variable inner bound. The box rules see the
//! triangle through a polar change of variables and the tetrahedron through
//! the collapsed cube map
//!
//! ```text
//! u = s(1 - t),  v = s·t·(1 - r),  w = s·t·r,   |∂(u,v,w)/∂(s,t,r)| = s²t
//! ```

use crate::differential::differential_value;
use crate::dispatch::{Axis, Context, integrate_parametric};
use crate::error::Result;
use crate::rules::IntegrationRule;
use math_geometry::{ParametricGeometry, Parametrized, Tetrahedron, Triangle};
use std::f64::consts::FRAC_PI_2;

/// Barycentric point of the triangle reached from `(R, φ)`, with the area
/// factor of the change of variables
fn polar_to_barycentric(radius: f64, angle: f64) -> ([f64; 2], f64) {
    let (s, c) = angle.sin_cos();
    let sum = s + c;
    ([radius * c / sum, radius * s / sum], radius / (sum * sum))
}

pub(crate) fn integrate_triangle(ctx: &Context<'_>, triangle: &Triangle) -> Result<Vec<f64>> {
    // The barycentric map is affine, so its differential is constant
    let scale = differential_value(triangle, &[1.0 / 3.0, 1.0 / 3.0], ctx.method)?;

    let mut integral = match ctx.rule {
        IntegrationRule::GaussKronrod(rule) => rule
            .integrate_interval(
                |u, out| {
                    let inner = rule.integrate_interval(
                        |v, inner_out| (ctx.sample)(&triangle.point(&[u, v])?, inner_out),
                        0.0,
                        1.0 - u,
                        ctx.ncomp,
                    )?;
                    out.copy_from_slice(&inner.integral);
                    Ok(())
                },
                0.0,
                1.0,
                ctx.ncomp,
            )?
            .integral,
        rule => {
            let kernel = |x: &[f64], out: &mut [f64]| -> Result<()> {
                let (params, weight) = polar_to_barycentric(x[0], x[1]);
                (ctx.sample)(&triangle.point(&params)?, out)?;
                out.iter_mut().for_each(|v| *v *= weight);
                Ok(())
            };
            rule.integrate_box(&kernel, &[0.0, 0.0], &[1.0, FRAC_PI_2], ctx.ncomp)?
                .integral
        }
    };
    integral.iter_mut().for_each(|v| *v *= scale);
    Ok(integral)
}

/// Tetrahedron over `[0, 1]³` through the collapsed cube map
pub(crate) fn collapsed(tetrahedron: &Tetrahedron) -> ParametricGeometry {
    let tet = *tetrahedron;
    let (e1, e2, e3) = (tet.b - tet.a, tet.c - tet.a, tet.d - tet.a);
    ParametricGeometry::new(3, move |p| {
        let (s, t, r) = (p[0], p[1], p[2]);
        tet.point(&[s * (1.0 - t), s * t * (1.0 - r), s * t * r])
    })
    .with_jacobian(move |p| {
        let (s, t, r) = (p[0], p[1], p[2]);
        Ok(vec![
            e1 * (1.0 - t) + e2 * (t * (1.0 - r)) + e3 * (t * r),
            e1 * -s + e2 * (s * (1.0 - r)) + e3 * (s * r),
            (e3 - e2) * (s * t),
        ])
    })
    .with_measure(tetrahedron.volume())
}

pub(crate) fn integrate_tetrahedron(ctx: &Context<'_>, tetrahedron: &Tetrahedron) -> Result<Vec<f64>> {
    let cube = collapsed(tetrahedron);
    integrate_parametric(ctx, &cube, &[Axis::Unit; 3])
}
