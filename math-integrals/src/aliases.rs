//! Dimension-checked entry points
//!
//! Same as [`integral`](crate::integral) but the geometry must be a curve,
//! a surface or a solid respectively.

use crate::dispatch::{IntegrationOptions, integral_with};
use crate::error::{IntegralError, Result};
use crate::integrand::IntegrandValue;
use math_geometry::{Geometry, Parametrized, Point3D};

fn check_paramdim(operation: &'static str, geometry: &Geometry, expected: usize) -> Result<()> {
    let got = geometry.paramdim();
    if got != expected {
        return Err(IntegralError::DimensionMismatch {
            operation,
            geometry: geometry.name(),
            expected,
            got,
        });
    }
    Ok(())
}

/// Integral over a curve
pub fn lineintegral<F, V>(f: F, geometry: &Geometry) -> Result<V>
where
    F: Fn(&Point3D) -> V + Sync,
    V: IntegrandValue,
{
    lineintegral_with(f, geometry, &IntegrationOptions::default())
}

pub fn lineintegral_with<F, V>(f: F, geometry: &Geometry, options: &IntegrationOptions) -> Result<V>
where
    F: Fn(&Point3D) -> V + Sync,
    V: IntegrandValue,
{
    check_paramdim("lineintegral", geometry, 1)?;
    integral_with(f, geometry, options)
}

/// Integral over a surface
pub fn surfaceintegral<F, V>(f: F, geometry: &Geometry) -> Result<V>
where
    F: Fn(&Point3D) -> V + Sync,
    V: IntegrandValue,
{
    surfaceintegral_with(f, geometry, &IntegrationOptions::default())
}

pub fn surfaceintegral_with<F, V>(
    f: F,
    geometry: &Geometry,
    options: &IntegrationOptions,
) -> Result<V>
where
    F: Fn(&Point3D) -> V + Sync,
    V: IntegrandValue,
{
    check_paramdim("surfaceintegral", geometry, 2)?;
    integral_with(f, geometry, options)
}

/// Integral over a solid
pub fn volumeintegral<F, V>(f: F, geometry: &Geometry) -> Result<V>
where
    F: Fn(&Point3D) -> V + Sync,
    V: IntegrandValue,
{
    volumeintegral_with(f, geometry, &IntegrationOptions::default())
}

pub fn volumeintegral_with<F, V>(
    f: F,
    geometry: &Geometry,
    options: &IntegrationOptions,
) -> Result<V>
where
    F: Fn(&Point3D) -> V + Sync,
    V: IntegrandValue,
{
    check_paramdim("volumeintegral", geometry, 3)?;
    integral_with(f, geometry, options)
}
