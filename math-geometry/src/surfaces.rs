//! Two-dimensional shapes with a single parametrization

use crate::error::{GeometryError, Result, check_params, check_unit_box};
use crate::parametrized::Parametrized;
use crate::types::{Point3D, orthonormal_basis};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Slack allowed on the `u + v <= 1` barycentric constraint
pub const SIMPLEX_TOLERANCE: f64 = 1e-12;

/// Infinite plane `origin + s·u + t·v`, `(s, t) ∈ ℝ²`, with orthonormal `u`, `v`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Plane {
    pub origin: Point3D,
    u: Point3D,
    v: Point3D,
}

impl Plane {
    /// Plane spanned by two directions, orthonormalized by Gram-Schmidt
    pub fn new(origin: Point3D, u: Point3D, v: Point3D) -> Result<Self> {
        let degenerate = || GeometryError::degenerate("Plane", "directions must be independent");
        let u = u.normalize().ok_or_else(degenerate)?;
        let v = (v - u * u.dot(&v)).normalize().ok_or_else(degenerate)?;
        Ok(Self { origin, u, v })
    }

    /// Plane through `origin` perpendicular to `normal`
    pub fn from_normal(origin: Point3D, normal: Point3D) -> Result<Self> {
        let (u, v) = orthonormal_basis(&normal)
            .ok_or_else(|| GeometryError::degenerate("Plane", "normal must be non-zero"))?;
        Ok(Self { origin, u, v })
    }

    /// The `z = 0` plane
    pub fn xy() -> Self {
        Self {
            origin: Point3D::zero(),
            u: Point3D::unit_x(),
            v: Point3D::unit_y(),
        }
    }

    pub fn normal(&self) -> Point3D {
        self.u.cross(&self.v)
    }

    pub fn basis(&self) -> (Point3D, Point3D) {
        (self.u, self.v)
    }
}

impl Parametrized for Plane {
    fn name(&self) -> &'static str {
        "Plane"
    }

    fn paramdim(&self) -> usize {
        2
    }

    fn point(&self, params: &[f64]) -> Result<Point3D> {
        check_params(self.name(), params, 2)?;
        Ok(self.origin + self.u * params[0] + self.v * params[1])
    }

    fn has_analytical_jacobian(&self) -> bool {
        true
    }

    fn analytical_jacobian(&self, params: &[f64]) -> Result<Vec<Point3D>> {
        check_params(self.name(), params, 2)?;
        Ok(vec![self.u, self.v])
    }

    fn measure(&self) -> Option<f64> {
        Some(f64::INFINITY)
    }

    fn interior_point(&self) -> Result<Point3D> {
        Ok(self.origin)
    }
}

/// Triangle with barycentric parametrization
/// `a + u·(b - a) + v·(c - a)`, `u, v >= 0`, `u + v <= 1`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    pub a: Point3D,
    pub b: Point3D,
    pub c: Point3D,
}

impl Triangle {
    pub fn new(a: Point3D, b: Point3D, c: Point3D) -> Self {
        Self { a, b, c }
    }

    /// Area-weighted normal, half the cross product of two edges
    pub fn vector_area(&self) -> Point3D {
        (self.b - self.a).cross(&(self.c - self.a)) * 0.5
    }

    pub fn area(&self) -> f64 {
        self.vector_area().length()
    }

    pub fn centroid(&self) -> Point3D {
        (self.a + self.b + self.c) * (1.0 / 3.0)
    }
}

impl Parametrized for Triangle {
    fn name(&self) -> &'static str {
        "Triangle"
    }

    fn paramdim(&self) -> usize {
        2
    }

    fn point(&self, params: &[f64]) -> Result<Point3D> {
        check_params(self.name(), params, 2)?;
        let (u, v) = (params[0], params[1]);
        if !(u >= 0.0 && v >= 0.0 && u + v <= 1.0 + SIMPLEX_TOLERANCE) {
            return Err(GeometryError::DomainViolation {
                geometry: self.name(),
                value: params.to_vec(),
                reason: "barycentric coordinates must satisfy u, v >= 0 and u + v <= 1".to_string(),
            });
        }
        Ok(self.a + (self.b - self.a) * u + (self.c - self.a) * v)
    }

    fn has_analytical_jacobian(&self) -> bool {
        true
    }

    fn analytical_jacobian(&self, params: &[f64]) -> Result<Vec<Point3D>> {
        check_params(self.name(), params, 2)?;
        Ok(vec![self.b - self.a, self.c - self.a])
    }

    fn measure(&self) -> Option<f64> {
        Some(self.area())
    }

    fn interior_params(&self) -> Vec<f64> {
        vec![1.0 / 3.0; 2]
    }

    fn interior_point(&self) -> Result<Point3D> {
        Ok(self.centroid())
    }
}

/// Quadrangle `a b c d` (counter-clockwise) with bilinear parametrization
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quadrangle {
    pub a: Point3D,
    pub b: Point3D,
    pub c: Point3D,
    pub d: Point3D,
}

impl Quadrangle {
    pub fn new(a: Point3D, b: Point3D, c: Point3D, d: Point3D) -> Self {
        Self { a, b, c, d }
    }
}

impl Parametrized for Quadrangle {
    fn name(&self) -> &'static str {
        "Quadrangle"
    }

    fn paramdim(&self) -> usize {
        2
    }

    fn point(&self, params: &[f64]) -> Result<Point3D> {
        check_unit_box(self.name(), params, 2)?;
        let (u, v) = (params[0], params[1]);
        let bottom = self.a.lerp(&self.b, u);
        let top = self.d.lerp(&self.c, u);
        Ok(bottom.lerp(&top, v))
    }

    fn has_analytical_jacobian(&self) -> bool {
        true
    }

    fn analytical_jacobian(&self, params: &[f64]) -> Result<Vec<Point3D>> {
        check_params(self.name(), params, 2)?;
        let (u, v) = (params[0], params[1]);
        let du = (self.b - self.a) * (1.0 - v) + (self.c - self.d) * v;
        let dv = (self.d - self.a) * (1.0 - u) + (self.c - self.b) * u;
        Ok(vec![du, dv])
    }

    /// Exact for planar quadrangles
    fn measure(&self) -> Option<f64> {
        let first = Triangle::new(self.a, self.b, self.c).area();
        let second = Triangle::new(self.a, self.c, self.d).area();
        Some(first + second)
    }
}

/// Flat disk of `radius` in a plane; `(ρ, θ) ↦ center + r·ρ·(cos 2πθ u + sin 2πθ v)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Disk {
    pub plane: Plane,
    pub radius: f64,
}

impl Disk {
    /// Disk centered at the plane origin
    pub fn new(plane: Plane, radius: f64) -> Result<Self> {
        check_radius("Disk", radius)?;
        Ok(Self { plane, radius })
    }

    pub fn center(&self) -> Point3D {
        self.plane.origin
    }
}

impl Parametrized for Disk {
    fn name(&self) -> &'static str {
        "Disk"
    }

    fn paramdim(&self) -> usize {
        2
    }

    fn point(&self, params: &[f64]) -> Result<Point3D> {
        check_unit_box(self.name(), params, 2)?;
        let (u, v) = self.plane.basis();
        let (s, c) = (2.0 * PI * params[1]).sin_cos();
        Ok(self.plane.origin + (u * c + v * s) * (self.radius * params[0]))
    }

    fn measure(&self) -> Option<f64> {
        Some(PI * self.radius * self.radius)
    }
}

/// Sphere surface; `(θ, φ) ↦ center + r·(sin πθ cos 2πφ, sin πθ sin 2πφ, cos πθ)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SphereData")]
pub struct Sphere {
    pub center: Point3D,
    pub radius: f64,
}

#[derive(Deserialize)]
struct SphereData {
    center: Point3D,
    radius: f64,
}

impl TryFrom<SphereData> for Sphere {
    type Error = GeometryError;

    fn try_from(data: SphereData) -> Result<Self> {
        Self::new(data.center, data.radius)
    }
}

impl Sphere {
    pub fn new(center: Point3D, radius: f64) -> Result<Self> {
        check_radius("Sphere", radius)?;
        Ok(Self { center, radius })
    }
}

impl Parametrized for Sphere {
    fn name(&self) -> &'static str {
        "Sphere"
    }

    fn paramdim(&self) -> usize {
        2
    }

    fn point(&self, params: &[f64]) -> Result<Point3D> {
        check_unit_box(self.name(), params, 2)?;
        let offset = Point3D::from_spherical(self.radius, PI * params[0], 2.0 * PI * params[1]);
        Ok(self.center + offset)
    }

    fn measure(&self) -> Option<f64> {
        Some(4.0 * PI * self.radius * self.radius)
    }
}

/// Torus around `normal` through `center`, with `major` and `minor` radii
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Torus {
    pub center: Point3D,
    pub major: f64,
    pub minor: f64,
    axis: Point3D,
    u: Point3D,
    v: Point3D,
}

impl Torus {
    pub fn new(center: Point3D, normal: Point3D, major: f64, minor: f64) -> Result<Self> {
        check_radius("Torus", major)?;
        check_radius("Torus", minor)?;
        let (u, v) = orthonormal_basis(&normal)
            .ok_or_else(|| GeometryError::degenerate("Torus", "normal must be non-zero"))?;
        Ok(Self {
            center,
            major,
            minor,
            axis: u.cross(&v),
            u,
            v,
        })
    }
}

impl Parametrized for Torus {
    fn name(&self) -> &'static str {
        "Torus"
    }

    fn paramdim(&self) -> usize {
        2
    }

    fn point(&self, params: &[f64]) -> Result<Point3D> {
        check_unit_box(self.name(), params, 2)?;
        let (sp, cp) = (2.0 * PI * params[0]).sin_cos();
        let (st, ct) = (2.0 * PI * params[1]).sin_cos();
        let radial = self.u * cp + self.v * sp;
        Ok(self.center + radial * (self.major + self.minor * ct) + self.axis * (self.minor * st))
    }

    fn measure(&self) -> Option<f64> {
        Some(4.0 * PI * PI * self.major * self.minor)
    }
}

/// Paraboloid `z = (x² + y²) / (4f)` around `apex`, opening towards `+z`,
/// cut at `radius`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ParaboloidSurfaceData")]
pub struct ParaboloidSurface {
    pub apex: Point3D,
    pub radius: f64,
    pub focal_length: f64,
}

#[derive(Deserialize)]
struct ParaboloidSurfaceData {
    apex: Point3D,
    radius: f64,
    focal_length: f64,
}

impl TryFrom<ParaboloidSurfaceData> for ParaboloidSurface {
    type Error = GeometryError;

    fn try_from(data: ParaboloidSurfaceData) -> Result<Self> {
        Self::new(data.apex, data.radius, data.focal_length)
    }
}

impl ParaboloidSurface {
    pub fn new(apex: Point3D, radius: f64, focal_length: f64) -> Result<Self> {
        check_radius("ParaboloidSurface", radius)?;
        if !(focal_length > 0.0 && focal_length.is_finite()) {
            return Err(GeometryError::degenerate(
                "ParaboloidSurface",
                format!("focal length must be positive, got {}", focal_length),
            ));
        }
        Ok(Self {
            apex,
            radius,
            focal_length,
        })
    }
}

impl Parametrized for ParaboloidSurface {
    fn name(&self) -> &'static str {
        "ParaboloidSurface"
    }

    fn paramdim(&self) -> usize {
        2
    }

    fn point(&self, params: &[f64]) -> Result<Point3D> {
        check_unit_box(self.name(), params, 2)?;
        let rho = self.radius * params[0];
        let (s, c) = (2.0 * PI * params[1]).sin_cos();
        let z = rho * rho / (4.0 * self.focal_length);
        Ok(self.apex + Point3D::new(rho * c, rho * s, z))
    }

    fn measure(&self) -> Option<f64> {
        let f = self.focal_length;
        let r = self.radius;
        let shape = (1.0 + r * r / (4.0 * f * f)).powf(1.5) - 1.0;
        Some(8.0 * PI * f * f / 3.0 * shape)
    }
}

pub(crate) fn check_radius(geometry: &'static str, radius: f64) -> Result<()> {
    if !(radius > 0.0 && radius.is_finite()) {
        return Err(GeometryError::degenerate(
            geometry,
            format!("radius must be positive and finite, got {}", radius),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_plane_gram_schmidt() {
        let plane = Plane::new(
            Point3D::zero(),
            Point3D::new(2.0, 0.0, 0.0),
            Point3D::new(1.0, 1.0, 0.0),
        )
        .unwrap();
        let (u, v) = plane.basis();
        assert_relative_eq!(u.dot(&v), 0.0, epsilon = 1e-15);
        assert_relative_eq!(v.length(), 1.0, epsilon = 1e-15);
        assert_eq!(plane.normal(), Point3D::unit_z());
        assert!(
            Plane::new(Point3D::zero(), Point3D::unit_x(), Point3D::new(3.0, 0.0, 0.0)).is_err()
        );
    }

    #[test]
    fn test_triangle_domain() {
        let t = Triangle::new(
            Point3D::zero(),
            Point3D::new(2.0, 0.0, 0.0),
            Point3D::new(0.0, 2.0, 0.0),
        );
        assert_eq!(t.measure(), Some(2.0));
        assert_eq!(t.point(&[0.5, 0.5]).unwrap(), Point3D::new(1.0, 1.0, 0.0));
        assert!(t.point(&[0.6, 0.6]).unwrap_err().is_domain_error());
        assert!(t.point(&[-0.1, 0.2]).is_err());
        assert!(t.point(&t.interior_params()).is_ok());
    }

    #[test]
    fn test_quadrangle_jacobian() {
        let q = Quadrangle::new(
            Point3D::new(0.0, 0.0, 0.0),
            Point3D::new(2.0, 0.0, 0.0),
            Point3D::new(2.0, 1.0, 0.0),
            Point3D::new(0.0, 1.0, 0.0),
        );
        assert_relative_eq!(q.measure().unwrap(), 2.0);
        let j = q.analytical_jacobian(&[0.3, 0.7]).unwrap();
        assert_eq!(j[0], Point3D::new(2.0, 0.0, 0.0));
        assert_eq!(j[1], Point3D::new(0.0, 1.0, 0.0));
        assert_eq!(q.point(&[1.0, 1.0]).unwrap(), q.c);
    }

    #[test]
    fn test_round_surfaces() {
        let disk = Disk::new(Plane::xy(), 2.0).unwrap();
        assert_relative_eq!(disk.measure().unwrap(), 4.0 * PI);
        assert_relative_eq!(disk.point(&[1.0, 0.0]).unwrap().x, 2.0);

        let sphere = Sphere::new(Point3D::zero(), 1.0).unwrap();
        let p = sphere.point(&[0.3, 0.8]).unwrap();
        assert_relative_eq!(p.length(), 1.0, epsilon = 1e-14);

        let torus = Torus::new(Point3D::zero(), Point3D::unit_z(), 3.0, 1.0).unwrap();
        let p = torus.point(&[0.0, 0.25]).unwrap();
        let radial = (p.x * p.x + p.y * p.y).sqrt();
        assert_relative_eq!(radial, 3.0, epsilon = 1e-14);
        assert_relative_eq!(p.z.abs(), 1.0, epsilon = 1e-14);
        assert_relative_eq!(torus.measure().unwrap(), 12.0 * PI * PI);

        assert!(Sphere::new(Point3D::zero(), -1.0).is_err());
    }

    #[test]
    fn test_paraboloid_measure_small_radius() {
        // Nearly flat: area tends to the disk area
        let p = ParaboloidSurface::new(Point3D::zero(), 0.01, 100.0).unwrap();
        assert_relative_eq!(p.measure().unwrap(), PI * 1e-4, max_relative = 1e-6);
        let rim = p.point(&[1.0, 0.0]).unwrap();
        assert_relative_eq!(rim.z, 1e-4 / 400.0, epsilon = 1e-18);
    }
}
