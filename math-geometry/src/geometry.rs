//! The closed set of geometries understood by the integration engine

use crate::bezier::BezierCurve;
use crate::curves::{Circle, Line, Ray, Ring, Rope, Segment};
use crate::domain::{GeometrySet, SimpleMesh};
use crate::error::Result;
use crate::parametric::ParametricGeometry;
use crate::parametrized::Parametrized;
use crate::polyarea::PolyArea;
use crate::revolution::{ConeSurface, CylinderSurface, FrustumSurface};
use crate::solids::{Ball, Cuboid, Cylinder, Tetrahedron};
use crate::surfaces::{Disk, ParaboloidSurface, Plane, Quadrangle, Sphere, Torus, Triangle};
use crate::types::Point3D;
use std::fmt;

macro_rules! geometries {
    ($($variant:ident($ty:ty)),+ $(,)?) => {
        /// Any supported geometry
        #[derive(Debug, Clone)]
        pub enum Geometry {
            $($variant($ty),)+
        }

        /// Fieldless tag of a [`Geometry`] variant
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum GeometryKind {
            $($variant,)+
        }

        impl Geometry {
            pub fn kind(&self) -> GeometryKind {
                match self {
                    $(Geometry::$variant(_) => GeometryKind::$variant,)+
                }
            }

            fn as_parametrized(&self) -> &dyn Parametrized {
                match self {
                    $(Geometry::$variant(g) => g,)+
                }
            }
        }

        impl fmt::Display for GeometryKind {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self {
                    $(GeometryKind::$variant => f.write_str(stringify!($variant)),)+
                }
            }
        }

        $(
            impl From<$ty> for Geometry {
                fn from(g: $ty) -> Self {
                    Geometry::$variant(g)
                }
            }
        )+
    };
}

geometries! {
    Segment(Segment),
    Ray(Ray),
    Line(Line),
    Circle(Circle),
    BezierCurve(BezierCurve),
    Ring(Ring),
    Rope(Rope),
    Plane(Plane),
    Triangle(Triangle),
    Quadrangle(Quadrangle),
    Disk(Disk),
    Sphere(Sphere),
    Torus(Torus),
    ParaboloidSurface(ParaboloidSurface),
    CylinderSurface(CylinderSurface),
    ConeSurface(ConeSurface),
    FrustumSurface(FrustumSurface),
    PolyArea(PolyArea),
    Cuboid(Cuboid),
    Ball(Ball),
    Cylinder(Cylinder),
    Tetrahedron(Tetrahedron),
    Parametric(ParametricGeometry),
    Mesh(SimpleMesh),
    Set(GeometrySet),
}

impl Geometry {
    /// Split into parametrized pieces: triangles for a `PolyArea`, elements
    /// for a mesh or a set, the geometry itself otherwise.
    pub fn discretize(&self) -> Result<Vec<Geometry>> {
        match self {
            Geometry::PolyArea(poly) => Ok(poly
                .triangulate()?
                .into_iter()
                .map(Geometry::Triangle)
                .collect()),
            Geometry::Mesh(mesh) => Ok(mesh.elements()),
            Geometry::Set(set) => Ok(set.elements()),
            other => Ok(vec![other.clone()]),
        }
    }
}

impl Parametrized for Geometry {
    fn name(&self) -> &'static str {
        self.as_parametrized().name()
    }

    fn paramdim(&self) -> usize {
        self.as_parametrized().paramdim()
    }

    fn point(&self, params: &[f64]) -> Result<Point3D> {
        self.as_parametrized().point(params)
    }

    fn has_analytical_jacobian(&self) -> bool {
        self.as_parametrized().has_analytical_jacobian()
    }

    fn analytical_jacobian(&self, params: &[f64]) -> Result<Vec<Point3D>> {
        self.as_parametrized().analytical_jacobian(params)
    }

    fn measure(&self) -> Option<f64> {
        self.as_parametrized().measure()
    }

    fn interior_params(&self) -> Vec<f64> {
        self.as_parametrized().interior_params()
    }

    fn interior_point(&self) -> Result<Point3D> {
        self.as_parametrized().interior_point()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parametrized::Rank;

    #[test]
    fn test_kind_and_delegation() {
        let g: Geometry = Segment::new(Point3D::zero(), Point3D::unit_x()).into();
        assert_eq!(g.kind(), GeometryKind::Segment);
        assert_eq!(g.kind().to_string(), "Segment");
        assert_eq!(g.name(), "Segment");
        assert_eq!(g.measure(), Some(1.0));
        assert!(g.is_curve());
        assert!(g.has_analytical_jacobian());

        let ball: Geometry = Ball::new(Point3D::zero(), 1.0).unwrap().into();
        assert_eq!(ball.rank(), Some(Rank::Solid));
        assert!(!ball.has_analytical_jacobian());
    }

    #[test]
    fn test_discretize() {
        let poly = PolyArea::new(vec![
            Point3D::new_2d(0.0, 0.0),
            Point3D::new_2d(1.0, 0.0),
            Point3D::new_2d(1.0, 1.0),
            Point3D::new_2d(0.0, 1.0),
        ])
        .unwrap();
        let parts = Geometry::from(poly).discretize().unwrap();
        assert_eq!(parts.len(), 2);
        assert!(parts.iter().all(|p| p.kind() == GeometryKind::Triangle));

        let sphere = Geometry::from(Sphere::new(Point3D::zero(), 1.0).unwrap());
        assert_eq!(sphere.discretize().unwrap().len(), 1);
    }
}
