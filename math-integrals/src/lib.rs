//! Numerical integrals over parametrized geometries
//!
//! This crate integrates a field `f: Point3D -> V` over curves, surfaces,
//! solids and domains built from them:
//!
//! - **Rules**: fixed Gauss-Legendre grids, adaptive Gauss-Kronrod, h-adaptive
//!   cubature
//! - **Differentials**: closed-form or finite-difference Jacobians reduced to
//!   the length, area or volume element
//! - **Specializations**: unbounded domains, polylines, Bezier curves,
//!   simplices, closed surfaces of revolution, polygons and meshes
//! - **Values**: scalars, fixed arrays, points, complex numbers, `ndarray`
//!   vectors and quantities carrying SI units
//!
//! # Example
//!
//! ```
//! use math_integrals::{GaussLegendre, Geometry, IntegrationOptions, Point3D, Sphere, integral_with};
//!
//! let sphere: Geometry = Sphere::new(Point3D::zero(), 1.0).unwrap().into();
//! let options = IntegrationOptions::new().with_rule(GaussLegendre::new(40).unwrap());
//! let area: f64 = integral_with(|_| 1.0, &sphere, &options).unwrap();
//! assert!((area - 4.0 * std::f64::consts::PI).abs() < 1e-6);
//! ```
//!
//! Integrating a [`Quantity`] multiplies its unit by `m^N`, `N` being the
//! parametric dimension of the geometry.

mod aliases;
mod config;
mod differential;
mod dispatch;
mod error;
mod integrand;
pub mod parallel;
mod rules;
mod specializations;
mod wedge;

pub use aliases::{
    lineintegral, lineintegral_with, surfaceintegral, surfaceintegral_with, volumeintegral,
    volumeintegral_with,
};
pub use config::{IntegrationConfig, RuleConfig};
pub use differential::{
    DEFAULT_FD_EPSILON, DiffMethod, default_diff_method, differential, jacobian,
    supports_analytical,
};
pub use dispatch::{IntegrationOptions, integral, integral_with};
pub use error::{IntegralError, Result};
pub use integrand::IntegrandValue;
pub use rules::{
    GaussKronrod, GaussLegendre, HAdaptiveCubature, IntegrationRule, RuleKind, default_rule,
};
pub use wedge::{gram_determinant, wedge_magnitude};

pub use math_geometry::{
    Ball, BezierCurve, BezierEvaluation, Circle, ConeSurface, Connectivity, Cuboid, Cylinder,
    CylinderSurface, Disk, FrustumSurface, Geometry, GeometryError, GeometryKind, GeometrySet,
    Line, ParaboloidSurface, ParametricGeometry, Parametrized, Plane, Point3D, PolyArea,
    Quadrangle, Quantity, Ray, Ring, Rope, Segment, SimpleMesh, Sphere, Tetrahedron, Torus,
    Triangle, Unit,
};
pub use math_quadrature::{CubatureOptions, QuadGkOptions, QuadResult};

/// Library version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
