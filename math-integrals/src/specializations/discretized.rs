//! Polygonal areas, meshes and geometry sets
//!
//! The domain is split into elements that are integrated independently and
//! summed in element order, so the result does not depend on scheduling.

use super::accumulate;
use crate::dispatch::{Context, integrate_geometry};
use crate::error::Result;
use crate::parallel::{is_parallel_available, parallel_map};
use math_geometry::{Geometry, Parametrized};

pub(crate) fn integrate(ctx: &Context<'_>, geometry: &Geometry) -> Result<Vec<f64>> {
    let elements = geometry.discretize()?;
    log::debug!(
        "integrating {} as {} elements ({})",
        geometry.name(),
        elements.len(),
        if is_parallel_available() { "parallel" } else { "sequential" }
    );

    let parts = parallel_map(&elements, |element| integrate_geometry(ctx, element));
    let mut total = vec![0.0; ctx.ncomp];
    for part in parts {
        accumulate(&mut total, &part?);
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use crate::dispatch::{IntegrationOptions, integral, integral_with};
    use crate::rules::{GaussKronrod, GaussLegendre};
    use approx::assert_relative_eq;
    use math_geometry::{
        Connectivity, Geometry, GeometrySet, PolyArea, Point3D, SimpleMesh, Triangle,
    };

    #[test]
    fn test_polyarea_with_hole() {
        let outer = vec![
            Point3D::new_2d(0.0, 0.0),
            Point3D::new_2d(4.0, 0.0),
            Point3D::new_2d(4.0, 4.0),
            Point3D::new_2d(0.0, 4.0),
        ];
        let hole = vec![
            Point3D::new_2d(1.0, 1.0),
            Point3D::new_2d(1.0, 2.0),
            Point3D::new_2d(2.0, 2.0),
            Point3D::new_2d(2.0, 1.0),
        ];
        let g: Geometry = PolyArea::with_holes(outer, vec![hole]).unwrap().into();
        let area: f64 = integral(|_| 1.0, &g).unwrap();
        assert_relative_eq!(area, 15.0, max_relative = 1e-10);
    }

    #[test]
    fn test_mesh_of_tetrahedra_rejects_gauss_kronrod() {
        let mesh = SimpleMesh::new(
            vec![
                Point3D::zero(),
                Point3D::unit_x(),
                Point3D::unit_y(),
                Point3D::unit_z(),
                Point3D::new(1.0, 1.0, 1.0),
            ],
            vec![
                Connectivity::Tetrahedron([0, 1, 2, 3]),
                Connectivity::Tetrahedron([1, 2, 3, 4]),
            ],
        )
        .unwrap();
        let g: Geometry = mesh.into();
        let opts = IntegrationOptions::new().with_rule(GaussKronrod::new());
        assert!(integral_with(|_| 1.0, &g, &opts).unwrap_err().is_unsupported());

        let opts = IntegrationOptions::new().with_rule(GaussLegendre::new(4).unwrap());
        let volume: f64 = integral_with(|_| 1.0, &g, &opts).unwrap();
        assert_relative_eq!(volume, 1.0 / 6.0 + 1.0 / 3.0, max_relative = 1e-12);
    }

    #[test]
    fn test_set_sums_items() {
        let a = Triangle::new(Point3D::zero(), Point3D::unit_x(), Point3D::unit_y());
        let b = Triangle::new(Point3D::unit_z(), Point3D::new(2.0, 0.0, 1.0), Point3D::new(0.0, 2.0, 1.0));
        let set: Geometry = GeometrySet::new(vec![a.into(), b.into()]).unwrap().into();
        let v: [f64; 2] = integral(|p| [1.0, p.z], &set).unwrap();
        assert_relative_eq!(v[0], 0.5 + 2.0, max_relative = 1e-10);
        assert_relative_eq!(v[1], 2.0, max_relative = 1e-10);
    }
}
