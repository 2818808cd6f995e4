//! Closed surfaces of revolution, integrated as lateral surface plus caps

use super::accumulate;
use crate::dispatch::{Axis, Context, integrate_parametric};
use crate::error::{IntegralError, Result};
use math_geometry::{Disk, Geometry, ParametricGeometry, Parametrized};

pub(crate) fn integrate(ctx: &Context<'_>, geometry: &Geometry) -> Result<Vec<f64>> {
    let (lateral, caps): (ParametricGeometry, Vec<Disk>) = match geometry {
        Geometry::CylinderSurface(s) => (s.lateral(), vec![s.bottom_cap()?, s.top_cap()?]),
        Geometry::ConeSurface(s) => (s.lateral(), vec![s.base()?]),
        Geometry::FrustumSurface(s) => (s.lateral(), vec![s.bottom_cap()?, s.top_cap()?]),
        other => {
            return Err(IntegralError::UnsupportedCombination {
                geometry: other.name(),
                rule: ctx.rule.kind().name(),
            });
        }
    };

    let mut total = integrate_parametric(ctx, &lateral, &[Axis::Unit; 2])?;
    for cap in &caps {
        let part = integrate_parametric(ctx, cap, &[Axis::Unit; 2])?;
        accumulate(&mut total, &part);
    }
    Ok(total)
}
