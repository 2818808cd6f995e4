//! Parametrized geometry in 3-D space
//!
//! This crate provides the shapes integrated by the mesh integration engine:
//!
//! - **Curves**: segments, rays, lines, circles, Bezier curves, polylines
//! - **Surfaces**: planes, triangles, quadrangles, disks, spheres, tori,
//!   paraboloids, closed surfaces of revolution, polygons with holes
//! - **Solids**: boxes, balls, cylinders, tetrahedra
//! - **Domains**: simple meshes and geometry sets
//!
//! Every shape implements [`Parametrized`]: a map from a canonical parameter
//! domain into space, its measure, and optionally a closed-form Jacobian.
//! Coordinates are in metres; [`units`] provides SI dimensions for values
//! attached to geometries.

mod bezier;
mod curves;
mod domain;
mod error;
mod geometry;
mod parametric;
mod parametrized;
mod polyarea;
mod revolution;
mod solids;
mod surfaces;
mod types;
pub mod units;

pub use bezier::{BezierCurve, BezierEvaluation, MAX_BEZIER_CONTROL_POINTS, binomial};
pub use curves::{Circle, Line, Ray, Ring, Rope, Segment};
pub use domain::{Connectivity, GeometrySet, SimpleMesh};
pub use error::{GeometryError, Result};
pub use geometry::{Geometry, GeometryKind};
pub use parametric::{JacobianFn, ParametricGeometry, PointFn};
pub use parametrized::{Parametrized, Rank};
pub use polyarea::PolyArea;
pub use revolution::{ConeSurface, CylinderSurface, FrustumSurface};
pub use solids::{Ball, Cuboid, Cylinder, Tetrahedron};
pub use surfaces::{
    Disk, ParaboloidSurface, Plane, Quadrangle, SIMPLEX_TOLERANCE, Sphere, Torus, Triangle,
};
pub use types::{Point3D, orthonormal_basis};
pub use units::{Quantity, Unit};

/// Library version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
